//! Recorded commands
//!
//! An `Action` pairs a validated command with its completion status. Running
//! an action is the only place simulation errors are caught: a failure becomes
//! an `Error` status carrying the message, and the action is logged like any
//! other.

use crate::city::facility::{FacilityCategory, FacilityType};
use crate::city::settlement::{Settlement, SettlementType};
use crate::core::error::{Result, SimError};
use crate::core::types::{PlanId, Scores};
use crate::simulation::engine::Simulation;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionStatus {
    /// Not yet run
    Pending,
    Completed,
    Error(String),
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStatus::Pending => f.write_str("PENDING"),
            ActionStatus::Completed => f.write_str("COMPLETED"),
            ActionStatus::Error(_) => f.write_str("ERROR"),
        }
    }
}

/// Every command the simulation understands, with validated arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    SimulateStep {
        steps: u32,
    },
    AddPlan {
        settlement: String,
        policy: String,
    },
    AddSettlement {
        name: String,
        settlement_type: SettlementType,
    },
    AddFacility {
        name: String,
        category: FacilityCategory,
        cost: u32,
        impact: Scores,
    },
    PrintPlanStatus {
        plan_id: PlanId,
    },
    ChangePlanPolicy {
        plan_id: PlanId,
        policy: String,
    },
    PrintActionsLog,
    Close,
    BackupSimulation,
    RestoreSimulation,
}

impl ActionKind {
    /// Command keyword that dispatches to this action
    pub fn keyword(&self) -> &'static str {
        match self {
            ActionKind::SimulateStep { .. } => "step",
            ActionKind::AddPlan { .. } => "plan",
            ActionKind::AddSettlement { .. } => "settlement",
            ActionKind::AddFacility { .. } => "facility",
            ActionKind::PrintPlanStatus { .. } => "planStatus",
            ActionKind::ChangePlanPolicy { .. } => "changePolicy",
            ActionKind::PrintActionsLog => "log",
            ActionKind::Close => "close",
            ActionKind::BackupSimulation => "backup",
            ActionKind::RestoreSimulation => "restore",
        }
    }

    /// Arguments echoed back in the textual record, in command order
    fn arguments(&self) -> Vec<String> {
        match self {
            ActionKind::SimulateStep { steps } => vec![steps.to_string()],
            ActionKind::AddPlan { settlement, policy } => vec![settlement.clone(), policy.clone()],
            ActionKind::AddSettlement {
                name,
                settlement_type,
            } => vec![name.clone(), settlement_type.code().to_string()],
            ActionKind::AddFacility {
                name,
                category,
                cost,
                impact,
            } => vec![
                name.clone(),
                category.code().to_string(),
                cost.to_string(),
                impact.life_quality.to_string(),
                impact.economy.to_string(),
                impact.environment.to_string(),
            ],
            ActionKind::PrintPlanStatus { plan_id } => vec![plan_id.to_string()],
            ActionKind::ChangePlanPolicy { plan_id, policy } => {
                vec![plan_id.to_string(), policy.clone()]
            }
            ActionKind::PrintActionsLog
            | ActionKind::Close
            | ActionKind::BackupSimulation
            | ActionKind::RestoreSimulation => Vec::new(),
        }
    }

    /// Apply the command, returning any text it renders
    fn perform(&self, simulation: &mut Simulation) -> Result<Option<String>> {
        match self {
            ActionKind::SimulateStep { steps } => {
                // Selection failures do not stop later ticks; the first one is reported
                let mut first_error = None;
                for _ in 0..*steps {
                    match simulation.step() {
                        Ok(()) => {}
                        Err(SimError::NotRunning) => return Err(SimError::NotRunning),
                        Err(err) => {
                            first_error.get_or_insert(err);
                        }
                    }
                }
                match first_error {
                    Some(err) => Err(err),
                    None => Ok(None),
                }
            }
            ActionKind::AddPlan { settlement, policy } => {
                simulation.add_plan(settlement, policy)?;
                Ok(None)
            }
            ActionKind::AddSettlement {
                name,
                settlement_type,
            } => {
                simulation.add_settlement(Settlement::new(name.clone(), *settlement_type))?;
                Ok(None)
            }
            ActionKind::AddFacility {
                name,
                category,
                cost,
                impact,
            } => {
                simulation.add_facility(FacilityType::new(name.clone(), *category, *cost, *impact))?;
                Ok(None)
            }
            ActionKind::PrintPlanStatus { plan_id } => {
                Ok(Some(simulation.get_plan(*plan_id)?.status_report()))
            }
            ActionKind::ChangePlanPolicy { plan_id, policy } => {
                simulation.change_plan_policy(*plan_id, policy)?;
                Ok(None)
            }
            ActionKind::PrintActionsLog => {
                let records: Vec<String> =
                    simulation.actions_log().iter().map(Action::describe).collect();
                Ok(Some(records.join("\n")))
            }
            ActionKind::Close => Ok(Some(simulation.close())),
            ActionKind::BackupSimulation => {
                simulation.backup();
                Ok(None)
            }
            ActionKind::RestoreSimulation => {
                simulation.restore()?;
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    kind: ActionKind,
    status: ActionStatus,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            status: ActionStatus::Pending,
        }
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn status(&self) -> &ActionStatus {
        &self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            ActionStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Run the action against the simulation and record how it went
    ///
    /// Returns the text the command renders (plan status, log, summary), if any.
    pub fn act(&mut self, simulation: &mut Simulation) -> Option<String> {
        match self.kind.perform(simulation) {
            Ok(output) => {
                self.status = ActionStatus::Completed;
                output
            }
            Err(err) => {
                self.status = ActionStatus::Error(err.to_string());
                None
            }
        }
    }

    /// Canonical one-line record: keyword, arguments, status
    pub fn describe(&self) -> String {
        let mut parts = vec![self.kind.keyword().to_string()];
        parts.extend(self.kind.arguments());
        parts.push(self.status.to_string());
        parts.join(" ")
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Outcome of `Simulation::execute_command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReport {
    /// The action's log record after it ran
    pub record: String,
    /// Text rendered by the command
    pub output: Option<String>,
    /// Failure message when the action ended in error
    pub error: Option<String>,
}

impl CommandReport {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_echoes_arguments_and_status() {
        let action = Action::new(ActionKind::AddFacility {
            name: "Park".into(),
            category: FacilityCategory::Environment,
            cost: 3,
            impact: Scores::new(1, -2, 4),
        });
        assert_eq!(action.describe(), "facility Park 2 3 1 -2 4 PENDING");
    }

    #[test]
    fn test_act_records_completion() {
        let mut sim = Simulation::new();
        let mut action = Action::new(ActionKind::AddSettlement {
            name: "KfarSPL".into(),
            settlement_type: SettlementType::Village,
        });
        assert_eq!(action.act(&mut sim), None);
        assert_eq!(action.status(), &ActionStatus::Completed);
        assert_eq!(action.describe(), "settlement KfarSPL 0 COMPLETED");
    }

    #[test]
    fn test_act_records_error_message() {
        let mut sim = Simulation::new();
        let mut action = Action::new(ActionKind::PrintPlanStatus { plan_id: PlanId(3) });
        assert_eq!(action.act(&mut sim), None);
        assert_eq!(action.error_message(), Some("Plan not found: 3"));
        assert_eq!(action.describe(), "planStatus 3 ERROR");
    }

    #[test]
    fn test_step_runs_every_tick_and_reports_first_failure() {
        let mut sim = Simulation::new();
        sim.add_settlement(Settlement::new("V", SettlementType::Village)).unwrap();
        sim.add_plan("V", "env").unwrap();
        sim.start();

        let mut action = Action::new(ActionKind::SimulateStep { steps: 3 });
        action.act(&mut sim);
        assert_eq!(sim.current_tick(), 3);
        assert_eq!(action.error_message(), Some("No facilities available for selection"));
    }

    #[test]
    fn test_step_on_closed_simulation_fails() {
        let mut sim = Simulation::new();
        let mut action = Action::new(ActionKind::SimulateStep { steps: 2 });
        action.act(&mut sim);
        assert_eq!(action.error_message(), Some("Simulation is not running"));
    }
}
