//! The simulation engine
//!
//! `Simulation` owns the facility catalog, the settlements, the plans, and
//! the action log. Plans borrow the catalog at tick time, so types added after
//! a plan was created are visible to its policy on the next tick.

use crate::city::catalog::FacilityCatalog;
use crate::city::facility::FacilityType;
use crate::city::settlement::Settlement;
use crate::command::action::{Action, CommandReport};
use crate::core::error::{Result, SimError};
use crate::core::types::{PlanId, Scores, Tick};
use crate::planning::plan::Plan;
use crate::planning::selection::{FacilitySelector, SelectionPolicy};
use crate::simulation::snapshot::{BackupSlot, SimulationState};

#[derive(Debug, Clone, Default)]
pub struct Simulation {
    state: SimulationState,
    backup: BackupSlot,
}

impl Simulation {
    /// Empty, closed simulation
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the simulation for stepping
    pub fn start(&mut self) {
        self.open();
        tracing::info!(
            settlements = self.state.settlements.len(),
            facilities = self.state.catalog.len(),
            plans = self.state.plans.len(),
            "Simulation started"
        );
    }

    pub fn open(&mut self) {
        self.state.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Summarize every plan and stop the simulation
    pub fn close(&mut self) -> String {
        self.state.running = false;
        tracing::info!(tick = self.state.tick, "Simulation closed");
        self.state
            .plans
            .iter()
            .map(Plan::summary)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn add_settlement(&mut self, settlement: Settlement) -> Result<()> {
        if self.is_settlement_exists(settlement.name()) {
            return Err(SimError::DuplicateSettlement(settlement.name().to_string()));
        }
        tracing::debug!(
            settlement = settlement.name(),
            tier = %settlement.settlement_type(),
            "Settlement added"
        );
        self.state.settlements.push(settlement);
        Ok(())
    }

    pub fn add_facility(&mut self, facility_type: FacilityType) -> Result<()> {
        tracing::debug!(facility = facility_type.name(), "Facility type added");
        self.state.catalog.add(facility_type)
    }

    /// Create a plan for an existing settlement under the named policy
    pub fn add_plan(&mut self, settlement_name: &str, policy_identifier: &str) -> Result<PlanId> {
        let settlement = self.get_settlement(settlement_name)?.clone();
        let policy = SelectionPolicy::from_identifier(policy_identifier, Scores::default())?;
        let id = PlanId(self.state.next_plan_id);
        self.state.next_plan_id += 1;
        tracing::debug!(plan = id.0, settlement = settlement_name, policy = policy_identifier, "Plan added");
        self.state.plans.push(Plan::new(id, settlement, policy));
        Ok(id)
    }

    pub fn is_settlement_exists(&self, name: &str) -> bool {
        self.state.settlements.iter().any(|s| s.name() == name)
    }

    pub fn get_settlement(&self, name: &str) -> Result<&Settlement> {
        self.state
            .settlements
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| SimError::SettlementNotFound(name.to_string()))
    }

    pub fn get_plan(&self, id: PlanId) -> Result<&Plan> {
        self.state
            .plans
            .iter()
            .find(|p| p.id() == id)
            .ok_or(SimError::PlanNotFound(id))
    }

    fn get_plan_mut(&mut self, id: PlanId) -> Result<&mut Plan> {
        self.state
            .plans
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(SimError::PlanNotFound(id))
    }

    /// Swap a plan's selection policy for a fresh one
    ///
    /// Switching to the policy the plan already uses is rejected. A new
    /// balanced policy starts from the plan's projected scores.
    pub fn change_plan_policy(&mut self, id: PlanId, policy_identifier: &str) -> Result<()> {
        let plan = self.get_plan_mut(id)?;
        if plan.selection_policy().identifier() == policy_identifier {
            return Err(SimError::NoOpPolicyChange {
                plan: id,
                policy: policy_identifier.to_string(),
            });
        }
        let policy = SelectionPolicy::from_identifier(policy_identifier, plan.projected_scores())?;
        tracing::debug!(
            plan = id.0,
            from = plan.selection_policy().identifier(),
            to = policy_identifier,
            "Selection policy changed"
        );
        plan.set_selection_policy(policy);
        Ok(())
    }

    /// Advance every plan by one tick, in plan-id order
    ///
    /// A selection failure in one plan does not stop the others from ticking;
    /// the first failure is returned after all plans have advanced.
    pub fn step(&mut self) -> Result<()> {
        if !self.state.running {
            return Err(SimError::NotRunning);
        }
        let mut first_error = None;
        for plan in &mut self.state.plans {
            match plan.step(&self.state.catalog) {
                Ok(tick) if !tick.completed.is_empty() => {
                    tracing::debug!(plan = plan.id().0, completed = tick.completed.len(), "Plan tick finished");
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(plan = plan.id().0, error = %err, "Plan could not select a facility");
                    first_error.get_or_insert(err);
                }
            }
        }
        self.state.tick += 1;
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Deep-copy the whole simulation into the backup slot
    pub fn backup(&mut self) {
        self.backup.store(&self.state);
        tracing::info!(
            tick = self.state.tick,
            actions = self.state.actions_log.len(),
            "Simulation backed up"
        );
    }

    /// Replace the live state with a copy of the backup, keeping the backup
    pub fn restore(&mut self) -> Result<()> {
        let snapshot = self.backup.copy_out().ok_or(SimError::NoBackupAvailable)?;
        self.state = snapshot;
        tracing::info!(tick = self.state.tick, "Simulation restored from backup");
        Ok(())
    }

    pub fn has_backup(&self) -> bool {
        !self.backup.is_empty()
    }

    /// Run an action and append it to the log whatever its outcome
    pub fn execute_command(&mut self, mut action: Action) -> CommandReport {
        let output = action.act(self);
        let report = CommandReport {
            record: action.describe(),
            output,
            error: action.error_message().map(str::to_string),
        };
        match &report.error {
            Some(err) => tracing::warn!(record = %report.record, error = %err, "Action failed"),
            None => tracing::debug!(record = %report.record, "Action completed"),
        }
        self.state.actions_log.push(action);
        report
    }

    pub fn actions_log(&self) -> &[Action] {
        &self.state.actions_log
    }

    pub fn catalog(&self) -> &FacilityCatalog {
        &self.state.catalog
    }

    pub fn settlements(&self) -> &[Settlement] {
        &self.state.settlements
    }

    pub fn plans(&self) -> &[Plan] {
        &self.state.plans
    }

    pub fn current_tick(&self) -> Tick {
        self.state.tick
    }
}
