//! Command dispatch - turns one line of text into an `Action`
//!
//! Arguments are whitespace separated and the first token is the command
//! keyword. Lines that fail here never reach the simulation or its log.

use crate::city::facility::FacilityCategory;
use crate::city::settlement::SettlementType;
use crate::command::action::{Action, ActionKind};
use crate::core::types::{PlanId, Scores};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {usage}")]
    WrongArity {
        command: &'static str,
        usage: &'static str,
    },

    #[error("Invalid {what} '{value}' for command {command}")]
    InvalidArgument {
        command: &'static str,
        what: &'static str,
        value: String,
    },
}

/// Split a line into whitespace-separated arguments
pub fn parse_arguments(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Command keywords the dispatcher understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Settlement,
    Facility,
    Plan,
    Step,
    PlanStatus,
    ChangePolicy,
    Log,
    Close,
    Backup,
    Restore,
}

impl Keyword {
    const ALL: [Keyword; 10] = [
        Keyword::Settlement,
        Keyword::Facility,
        Keyword::Plan,
        Keyword::Step,
        Keyword::PlanStatus,
        Keyword::ChangePolicy,
        Keyword::Log,
        Keyword::Close,
        Keyword::Backup,
        Keyword::Restore,
    ];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.name() == name)
    }

    fn name(self) -> &'static str {
        match self {
            Keyword::Settlement => "settlement",
            Keyword::Facility => "facility",
            Keyword::Plan => "plan",
            Keyword::Step => "step",
            Keyword::PlanStatus => "planStatus",
            Keyword::ChangePolicy => "changePolicy",
            Keyword::Log => "log",
            Keyword::Close => "close",
            Keyword::Backup => "backup",
            Keyword::Restore => "restore",
        }
    }

    fn usage(self) -> &'static str {
        match self {
            Keyword::Settlement => "settlement <name> <type 0|1|2>",
            Keyword::Facility => {
                "facility <name> <category 0|1|2> <cost> <life_quality> <economy> <environment>"
            }
            Keyword::Plan => "plan <settlement> <policy nve|bal|eco|env>",
            Keyword::Step => "step <ticks>",
            Keyword::PlanStatus => "planStatus <plan_id>",
            Keyword::ChangePolicy => "changePolicy <plan_id> <policy nve|bal|eco|env>",
            Keyword::Log => "log",
            Keyword::Close => "close",
            Keyword::Backup => "backup",
            Keyword::Restore => "restore",
        }
    }
}

/// Parse one command line into an action ready to run
pub fn parse_command(line: &str) -> Result<Action, DispatchError> {
    let args = parse_arguments(line);
    let Some((&first, rest)) = args.split_first() else {
        return Err(DispatchError::Empty);
    };
    let Some(keyword) = Keyword::from_name(first) else {
        return Err(DispatchError::UnknownCommand(first.to_string()));
    };
    let args = Args {
        command: keyword.name(),
        usage: keyword.usage(),
        values: rest,
    };

    let kind = match keyword {
        Keyword::Settlement => {
            args.expect_count(2)?;
            let code: u8 = args.number(1, "settlement type")?;
            let settlement_type = SettlementType::from_code(code)
                .ok_or_else(|| args.invalid(1, "settlement type"))?;
            ActionKind::AddSettlement {
                name: args.values[0].to_string(),
                settlement_type,
            }
        }
        Keyword::Facility => {
            args.expect_count(6)?;
            let code: u8 = args.number(1, "facility category")?;
            let category = FacilityCategory::from_code(code)
                .ok_or_else(|| args.invalid(1, "facility category"))?;
            ActionKind::AddFacility {
                name: args.values[0].to_string(),
                category,
                cost: args.number(2, "cost")?,
                impact: Scores::new(
                    args.number(3, "life quality score")?,
                    args.number(4, "economy score")?,
                    args.number(5, "environment score")?,
                ),
            }
        }
        Keyword::Plan => {
            args.expect_count(2)?;
            ActionKind::AddPlan {
                settlement: args.values[0].to_string(),
                policy: args.values[1].to_string(),
            }
        }
        Keyword::Step => {
            args.expect_count(1)?;
            ActionKind::SimulateStep {
                steps: args.number(0, "step count")?,
            }
        }
        Keyword::PlanStatus => {
            args.expect_count(1)?;
            ActionKind::PrintPlanStatus {
                plan_id: PlanId(args.number(0, "plan id")?),
            }
        }
        Keyword::ChangePolicy => {
            args.expect_count(2)?;
            ActionKind::ChangePlanPolicy {
                plan_id: PlanId(args.number(0, "plan id")?),
                policy: args.values[1].to_string(),
            }
        }
        Keyword::Log => {
            args.expect_count(0)?;
            ActionKind::PrintActionsLog
        }
        Keyword::Close => {
            args.expect_count(0)?;
            ActionKind::Close
        }
        Keyword::Backup => {
            args.expect_count(0)?;
            ActionKind::BackupSimulation
        }
        Keyword::Restore => {
            args.expect_count(0)?;
            ActionKind::RestoreSimulation
        }
    };
    Ok(Action::new(kind))
}

struct Args<'a> {
    command: &'static str,
    usage: &'static str,
    values: &'a [&'a str],
}

impl Args<'_> {
    fn expect_count(&self, count: usize) -> Result<(), DispatchError> {
        if self.values.len() == count {
            Ok(())
        } else {
            Err(DispatchError::WrongArity {
                command: self.command,
                usage: self.usage,
            })
        }
    }

    fn number<T: FromStr>(&self, idx: usize, what: &'static str) -> Result<T, DispatchError> {
        self.values[idx]
            .parse()
            .map_err(|_| self.invalid(idx, what))
    }

    fn invalid(&self, idx: usize, what: &'static str) -> DispatchError {
        DispatchError::InvalidArgument {
            command: self.command,
            what,
            value: self.values[idx].to_string(),
        }
    }
}
