//! Per-settlement construction plans
//!
//! A plan keeps at most `settlement.capacity()` facilities under construction.
//! Each tick it first refills open capacity through its selection policy, then
//! advances every construction countdown, then moves finished facilities to
//! the completed list and adds their impacts to the plan's scores.

use crate::city::catalog::FacilityCatalog;
use crate::city::facility::{Facility, FacilityStatus};
use crate::city::settlement::Settlement;
use crate::core::error::Result;
use crate::core::types::{PlanId, Scores};
use crate::planning::selection::{FacilitySelector, SelectionPolicy};
use std::fmt;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    /// Has open construction capacity
    Available,
    /// Every construction slot is taken
    Busy,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStatus::Available => f.write_str("AVAILABLE"),
            PlanStatus::Busy => f.write_str("BUSY"),
        }
    }
}

/// What happened to a plan during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanTick {
    /// Facility types started this tick, in selection order
    pub started: Vec<String>,
    /// Facility types that finished this tick
    pub completed: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Plan {
    id: PlanId,
    settlement: Settlement,
    policy: SelectionPolicy,
    status: PlanStatus,
    under_construction: Vec<Facility>,
    completed: Vec<Facility>,
    scores: Scores,
}

impl Plan {
    pub fn new(id: PlanId, settlement: Settlement, policy: SelectionPolicy) -> Self {
        Self {
            id,
            settlement,
            policy,
            status: PlanStatus::Available,
            under_construction: Vec::new(),
            completed: Vec::new(),
            scores: Scores::default(),
        }
    }

    pub fn id(&self) -> PlanId {
        self.id
    }

    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }

    pub fn status(&self) -> PlanStatus {
        self.status
    }

    pub fn selection_policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Replace the selection policy, dropping the previous one
    pub fn set_selection_policy(&mut self, policy: SelectionPolicy) {
        self.policy = policy;
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn under_construction(&self) -> &[Facility] {
        &self.under_construction
    }

    pub fn completed(&self) -> &[Facility] {
        &self.completed
    }

    /// Current scores plus the impacts of everything still being built
    pub fn projected_scores(&self) -> Scores {
        self.under_construction
            .iter()
            .fold(self.scores, |acc, facility| acc + facility.impact())
    }

    /// Advance the plan by one tick against the shared catalog
    ///
    /// If the policy cannot supply a facility, the remaining slots stay empty
    /// for this tick, construction still advances, and the selection error is
    /// returned once the tick has finished.
    pub fn step(&mut self, catalog: &FacilityCatalog) -> Result<PlanTick> {
        let mut tick = PlanTick::default();
        let capacity = self.settlement.capacity();
        let mut selection_error = None;

        if self.status == PlanStatus::Available {
            while self.under_construction.len() < capacity {
                match self.policy.select_facility(catalog.all()) {
                    Ok(kind) => {
                        tracing::debug!(
                            plan = self.id.0,
                            facility = kind.name(),
                            "Facility selected for construction"
                        );
                        tick.started.push(kind.name().to_string());
                        self.under_construction
                            .push(Facility::new(kind, self.settlement.name()));
                    }
                    Err(err) => {
                        selection_error = Some(err);
                        break;
                    }
                }
            }
        }

        for facility in &mut self.under_construction {
            facility.step();
        }

        let (finished, pending): (Vec<Facility>, Vec<Facility>) = self
            .under_construction
            .drain(..)
            .partition(|f| f.status() == FacilityStatus::Operational);
        self.under_construction = pending;
        for facility in finished {
            tracing::debug!(
                plan = self.id.0,
                facility = facility.name(),
                "Facility became operational"
            );
            self.scores += facility.impact();
            tick.completed.push(facility.name().to_string());
            self.completed.push(facility);
        }

        self.status = if self.under_construction.len() >= capacity {
            PlanStatus::Busy
        } else {
            PlanStatus::Available
        };

        match selection_error {
            Some(err) => Err(err),
            None => Ok(tick),
        }
    }

    /// Full status report: header, scores, then every facility
    pub fn status_report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "PlanID: {}", self.id);
        let _ = writeln!(out, "SettlementName: {}", self.settlement.name());
        let _ = writeln!(out, "PlanStatus: {}", self.status);
        let _ = writeln!(out, "SelectionPolicy: {}", self.policy);
        let _ = writeln!(out, "LifeQualityScore: {}", self.scores.life_quality);
        let _ = writeln!(out, "EconomyScore: {}", self.scores.economy);
        let _ = write!(out, "EnvironmentScore: {}", self.scores.environment);
        for facility in self.completed.iter().chain(&self.under_construction) {
            let _ = write!(out, "\n{facility}");
        }
        out
    }

    /// Short summary printed when the simulation closes
    pub fn summary(&self) -> String {
        format!(
            "PlanID: {}\nSettlementName: {}\nLifeQuality_Score: {}\nEconomy_Score: {}\nEnvironment_Score: {}",
            self.id,
            self.settlement.name(),
            self.scores.life_quality,
            self.scores.economy,
            self.scores.environment
        )
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_report())
    }
}
