//! Settlements and their construction tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement tier; the discriminant is the plan's construction capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementType {
    Village = 1,
    City = 2,
    Metropolis = 3,
}

impl SettlementType {
    /// Decode the 0-based type code used by commands and scenario files
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SettlementType::Village),
            1 => Some(SettlementType::City),
            2 => Some(SettlementType::Metropolis),
            _ => None,
        }
    }

    /// 0-based code, the inverse of `from_code`
    pub fn code(&self) -> u8 {
        *self as u8 - 1
    }

    /// How many facilities a plan may have under construction at once
    pub fn capacity(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SettlementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementType::Village => f.write_str("Village"),
            SettlementType::City => f.write_str("City"),
            SettlementType::Metropolis => f.write_str("Metropolis"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    name: String,
    settlement_type: SettlementType,
}

impl Settlement {
    pub fn new(name: impl Into<String>, settlement_type: SettlementType) -> Self {
        Self {
            name: name.into(),
            settlement_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settlement_type(&self) -> SettlementType {
        self.settlement_type
    }

    pub fn capacity(&self) -> usize {
        self.settlement_type.capacity()
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SettlementName: {}\nSettlementType: {}",
            self.name, self.settlement_type
        )
    }
}
