use crate::city::facility::FacilityCategory;
use crate::core::types::PlanId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Settlement already exists: {0}")]
    DuplicateSettlement(String),

    #[error("Facility already exists: {0}")]
    DuplicateFacility(String),

    #[error("Settlement not found: {0}")]
    SettlementNotFound(String),

    #[error("Plan not found: {0}")]
    PlanNotFound(PlanId),

    #[error("Unknown selection policy: {0}")]
    UnknownPolicy(String),

    #[error("No facilities available for selection")]
    EmptyCatalog,

    #[error("No facility of category {0} available for selection")]
    NoMatchingCategory(FacilityCategory),

    #[error("Simulation is not running")]
    NotRunning,

    #[error("No backup available")]
    NoBackupAvailable,

    #[error("Plan {plan} already uses selection policy {policy}")]
    NoOpPolicyChange { plan: PlanId, policy: String },
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Failure while loading or applying a scenario file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("line {line}: {message}")]
    Line { line: usize, message: String },

    #[error("line {line}: command '{command}' is not allowed in a scenario file")]
    Unsupported { line: usize, command: String },

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error(transparent)]
    Simulation(#[from] SimError),
}
