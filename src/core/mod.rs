pub mod error;
pub mod types;

pub use error::{ConfigError, Result, SimError};
pub use types::{PlanId, Scores, Tick};
