//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Unique plan identifier, assigned in increasing order starting at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanId(pub u32);

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulation tick counter
pub type Tick = u64;

/// The three growth dimensions tracked for facilities and plans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scores {
    pub life_quality: i32,
    pub economy: i32,
    pub environment: i32,
}

impl Scores {
    pub fn new(life_quality: i32, economy: i32, environment: i32) -> Self {
        Self {
            life_quality,
            economy,
            environment,
        }
    }

    /// Largest pairwise absolute difference among the three dimensions
    ///
    /// Zero means perfectly balanced growth.
    pub fn max_spread(&self) -> i64 {
        let values = [
            self.life_quality as i64,
            self.economy as i64,
            self.environment as i64,
        ];
        let max = values.iter().copied().max().unwrap_or(0);
        let min = values.iter().copied().min().unwrap_or(0);
        max - min
    }
}

impl Add for Scores {
    type Output = Scores;

    fn add(self, other: Scores) -> Scores {
        Scores {
            life_quality: self.life_quality.saturating_add(other.life_quality),
            economy: self.economy.saturating_add(other.economy),
            environment: self.environment.saturating_add(other.environment),
        }
    }
}

impl AddAssign for Scores {
    fn add_assign(&mut self, other: Scores) {
        *self = *self + other;
    }
}
