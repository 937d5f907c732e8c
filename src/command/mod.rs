//! Command pipeline
//!
//! Text line -> parse_command -> Action -> Simulation::execute_command -> log

pub mod action;
pub mod parser;
pub mod scenario;

pub use action::{Action, ActionKind, ActionStatus, CommandReport};
pub use parser::{parse_arguments, parse_command, DispatchError};
pub use scenario::{ScenarioConfig, ScenarioEntry};
