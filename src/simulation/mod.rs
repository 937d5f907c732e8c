//! Simulation engine - world state, ticking, and backup/restore

pub mod engine;
pub mod snapshot;

pub use engine::Simulation;
pub use snapshot::{BackupSlot, SimulationState};
