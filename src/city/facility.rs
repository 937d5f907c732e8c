//! Facility blueprints and the per-construction instances built from them

use crate::core::types::Scores;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which growth dimension a facility type primarily serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityCategory {
    LifeQuality,
    Economy,
    Environment,
}

impl FacilityCategory {
    /// Decode the 0-based category code used by commands and scenario files
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(FacilityCategory::LifeQuality),
            1 => Some(FacilityCategory::Economy),
            2 => Some(FacilityCategory::Environment),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            FacilityCategory::LifeQuality => 0,
            FacilityCategory::Economy => 1,
            FacilityCategory::Environment => 2,
        }
    }
}

impl fmt::Display for FacilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FacilityCategory::LifeQuality => "LIFE_QUALITY",
            FacilityCategory::Economy => "ECONOMY",
            FacilityCategory::Environment => "ENVIRONMENT",
        };
        f.write_str(label)
    }
}

/// Immutable blueprint for a facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityType {
    name: String,
    category: FacilityCategory,
    /// Construction time in ticks
    cost: u32,
    impact: Scores,
}

impl FacilityType {
    pub fn new(name: impl Into<String>, category: FacilityCategory, cost: u32, impact: Scores) -> Self {
        Self {
            name: name.into(),
            category,
            cost,
            impact,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> FacilityCategory {
        self.category
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn impact(&self) -> Scores {
        self.impact
    }
}

/// Construction state of a facility instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityStatus {
    /// Countdown still running
    UnderConstruction,
    /// Finished, contributing to its plan's scores
    Operational,
}

impl fmt::Display for FacilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityStatus::UnderConstruction => f.write_str("UNDER_CONSTRUCTION"),
            FacilityStatus::Operational => f.write_str("OPERATIONAL"),
        }
    }
}

/// A facility being built (or already built) for one settlement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    facility_type: FacilityType,
    settlement_name: String,
    status: FacilityStatus,
    time_left: u32,
}

impl Facility {
    /// Start construction; the countdown begins at the type's cost
    pub fn new(facility_type: &FacilityType, settlement_name: impl Into<String>) -> Self {
        Self {
            facility_type: facility_type.clone(),
            settlement_name: settlement_name.into(),
            status: FacilityStatus::UnderConstruction,
            time_left: facility_type.cost(),
        }
    }

    pub fn name(&self) -> &str {
        self.facility_type.name()
    }

    pub fn settlement_name(&self) -> &str {
        &self.settlement_name
    }

    pub fn status(&self) -> FacilityStatus {
        self.status
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn impact(&self) -> Scores {
        self.facility_type.impact()
    }

    /// Advance construction by one tick
    ///
    /// A facility whose countdown is already zero becomes operational on its
    /// first step. Operational facilities are left untouched.
    pub fn step(&mut self) -> FacilityStatus {
        if self.status == FacilityStatus::UnderConstruction {
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                self.status = FacilityStatus::Operational;
            }
        }
        self.status
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FacilityName: {}\nFacilityStatus: {}",
            self.name(),
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park() -> FacilityType {
        FacilityType::new("Park", FacilityCategory::Environment, 2, Scores::new(1, 0, 4))
    }

    #[test]
    fn test_category_codes_are_zero_based() {
        assert_eq!(FacilityCategory::from_code(0), Some(FacilityCategory::LifeQuality));
        assert_eq!(FacilityCategory::from_code(1), Some(FacilityCategory::Economy));
        assert_eq!(FacilityCategory::from_code(2), Some(FacilityCategory::Environment));
        assert_eq!(FacilityCategory::from_code(3), None);
        assert_eq!(FacilityCategory::Environment.code(), 2);
    }

    #[test]
    fn test_new_facility_counts_down_from_cost() {
        let facility = Facility::new(&park(), "Haifa");
        assert_eq!(facility.time_left(), 2);
        assert_eq!(facility.status(), FacilityStatus::UnderConstruction);
        assert_eq!(facility.settlement_name(), "Haifa");
    }

    #[test]
    fn test_facility_becomes_operational_when_countdown_ends() {
        let mut facility = Facility::new(&park(), "Haifa");
        assert_eq!(facility.step(), FacilityStatus::UnderConstruction);
        assert_eq!(facility.time_left(), 1);
        assert_eq!(facility.step(), FacilityStatus::Operational);
        assert_eq!(facility.time_left(), 0);

        // Further steps are no-ops
        assert_eq!(facility.step(), FacilityStatus::Operational);
        assert_eq!(facility.time_left(), 0);
    }

    #[test]
    fn test_zero_cost_facility_completes_on_first_step() {
        let free = FacilityType::new("Bench", FacilityCategory::LifeQuality, 0, Scores::new(1, 0, 0));
        let mut facility = Facility::new(&free, "Haifa");
        assert_eq!(facility.step(), FacilityStatus::Operational);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(FacilityCategory::LifeQuality.to_string(), "LIFE_QUALITY");
        assert_eq!(FacilityStatus::UnderConstruction.to_string(), "UNDER_CONSTRUCTION");
        let facility = Facility::new(&park(), "Haifa");
        assert_eq!(
            facility.to_string(),
            "FacilityName: Park\nFacilityStatus: UNDER_CONSTRUCTION"
        );
    }
}
