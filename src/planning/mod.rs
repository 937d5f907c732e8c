//! Planning layer - construction plans and the policies that drive them

pub mod plan;
pub mod selection;

pub use plan::{Plan, PlanStatus, PlanTick};
pub use selection::{
    BalancedSelection, CategorySelection, FacilitySelector, NaiveSelection, SelectionPolicy,
};
