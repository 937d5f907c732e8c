//! Whole-simulation state and the single-slot backup that copies it
//!
//! Everything that `backup` must capture lives in `SimulationState`. Every
//! field is an owned value, so `Clone` is a deep copy and no data is shared
//! between the live state and a stored snapshot.

use crate::city::catalog::FacilityCatalog;
use crate::city::settlement::Settlement;
use crate::command::action::Action;
use crate::core::types::Tick;
use crate::planning::plan::Plan;

#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub(crate) running: bool,
    pub(crate) next_plan_id: u32,
    pub(crate) tick: Tick,
    pub(crate) catalog: FacilityCatalog,
    pub(crate) settlements: Vec<Settlement>,
    pub(crate) plans: Vec<Plan>,
    pub(crate) actions_log: Vec<Action>,
}

/// Holds at most one snapshot; storing a new one discards the old one
#[derive(Debug, Clone, Default)]
pub struct BackupSlot {
    snapshot: Option<SimulationState>,
}

impl BackupSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, state: &SimulationState) {
        self.snapshot = Some(state.clone());
    }

    /// Independent copy of the stored snapshot; the slot keeps its own copy
    pub fn copy_out(&self) -> Option<SimulationState> {
        self.snapshot.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_none()
    }
}
