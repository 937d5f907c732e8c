//! Scenario files - the settlements, facility types, and plans a run starts with
//!
//! Two formats are accepted:
//! - the command line format (`settlement`, `facility`, and `plan` lines, one
//!   per line, `#` comments and blank lines ignored)
//! - TOML with `[[settlements]]`, `[[facilities]]`, and `[[plans]]` tables
//!
//! Both use the 0-based type and category codes of the command grammar.

use crate::city::facility::{FacilityCategory, FacilityType};
use crate::city::settlement::{Settlement, SettlementType};
use crate::command::action::ActionKind;
use crate::command::parser::parse_command;
use crate::core::error::ConfigError;
use crate::core::types::Scores;
use crate::simulation::engine::Simulation;
use serde::Deserialize;
use std::path::Path;

/// One thing a scenario file sets up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioEntry {
    Settlement(Settlement),
    Facility(FacilityType),
    Plan { settlement: String, policy: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioConfig {
    pub entries: Vec<ScenarioEntry>,
}

impl ScenarioConfig {
    /// Load a scenario file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::parse_toml(&content)
        } else {
            Self::parse_lines(&content)
        }
    }

    /// Parse the line-oriented format
    pub fn parse_lines(content: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let action = parse_command(line).map_err(|err| ConfigError::Line {
                line: line_number,
                message: err.to_string(),
            })?;
            let entry = match action.kind() {
                ActionKind::AddSettlement {
                    name,
                    settlement_type,
                } => ScenarioEntry::Settlement(Settlement::new(name.clone(), *settlement_type)),
                ActionKind::AddFacility {
                    name,
                    category,
                    cost,
                    impact,
                } => ScenarioEntry::Facility(FacilityType::new(name.clone(), *category, *cost, *impact)),
                ActionKind::AddPlan { settlement, policy } => ScenarioEntry::Plan {
                    settlement: settlement.clone(),
                    policy: policy.clone(),
                },
                other => {
                    return Err(ConfigError::Unsupported {
                        line: line_number,
                        command: other.keyword().to_string(),
                    })
                }
            };
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// Parse the TOML format; settlements, then facilities, then plans
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let data: TomlScenario = toml::from_str(content)?;
        let mut entries = Vec::new();

        for settlement in data.settlements {
            let settlement_type = SettlementType::from_code(settlement.settlement_type)
                .ok_or_else(|| {
                    ConfigError::InvalidEntry(format!(
                        "settlement {} has unknown type {}",
                        settlement.name, settlement.settlement_type
                    ))
                })?;
            entries.push(ScenarioEntry::Settlement(Settlement::new(
                settlement.name,
                settlement_type,
            )));
        }

        for facility in data.facilities {
            let category = FacilityCategory::from_code(facility.category).ok_or_else(|| {
                ConfigError::InvalidEntry(format!(
                    "facility {} has unknown category {}",
                    facility.name, facility.category
                ))
            })?;
            entries.push(ScenarioEntry::Facility(FacilityType::new(
                facility.name,
                category,
                facility.cost,
                Scores::new(facility.life_quality, facility.economy, facility.environment),
            )));
        }

        for plan in data.plans {
            entries.push(ScenarioEntry::Plan {
                settlement: plan.settlement,
                policy: plan.policy,
            });
        }

        Ok(Self { entries })
    }

    /// Fresh, closed simulation with every entry applied
    pub fn build(&self) -> Result<Simulation, ConfigError> {
        let mut simulation = Simulation::new();
        self.apply(&mut simulation)?;
        Ok(simulation)
    }

    /// Apply every entry in order; the first failure stops loading
    pub fn apply(&self, simulation: &mut Simulation) -> Result<(), ConfigError> {
        for entry in &self.entries {
            match entry {
                ScenarioEntry::Settlement(settlement) => {
                    simulation.add_settlement(settlement.clone())?
                }
                ScenarioEntry::Facility(facility) => simulation.add_facility(facility.clone())?,
                ScenarioEntry::Plan { settlement, policy } => {
                    simulation.add_plan(settlement, policy)?;
                }
            }
        }
        tracing::info!(entries = self.entries.len(), "Scenario applied");
        Ok(())
    }
}

/// TOML representation of a scenario file
#[derive(Debug, Deserialize)]
struct TomlScenario {
    #[serde(default)]
    settlements: Vec<TomlSettlement>,
    #[serde(default)]
    facilities: Vec<TomlFacility>,
    #[serde(default)]
    plans: Vec<TomlPlan>,
}

#[derive(Debug, Deserialize)]
struct TomlSettlement {
    name: String,
    #[serde(rename = "type")]
    settlement_type: u8,
}

#[derive(Debug, Deserialize)]
struct TomlFacility {
    name: String,
    category: u8,
    cost: u32,
    life_quality: i32,
    economy: i32,
    environment: i32,
}

#[derive(Debug, Deserialize)]
struct TomlPlan {
    settlement: String,
    policy: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SimError;

    const LINES: &str = "\
# settlements
settlement KfarSPL 0
settlement Haifa 1

facility Park 2 3 1 0 4
facility Mall 1 2 0 5 -1
plan KfarSPL eco
";

    #[test]
    fn test_parse_lines_skips_comments_and_blanks() {
        let scenario = ScenarioConfig::parse_lines(LINES).unwrap();
        assert_eq!(scenario.entries.len(), 5);
        assert_eq!(
            scenario.entries[0],
            ScenarioEntry::Settlement(Settlement::new("KfarSPL", SettlementType::Village))
        );
        assert_eq!(
            scenario.entries[4],
            ScenarioEntry::Plan {
                settlement: "KfarSPL".into(),
                policy: "eco".into()
            }
        );
    }

    #[test]
    fn test_parse_lines_reports_line_number() {
        let err = ScenarioConfig::parse_lines("settlement A 0\nsettlement B nine\n").unwrap_err();
        assert!(matches!(err, ConfigError::Line { line: 2, .. }));
    }

    #[test]
    fn test_parse_lines_rejects_runtime_commands() {
        let err = ScenarioConfig::parse_lines("step 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Unsupported { line: 1, ref command } if command == "step"));
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
[[settlements]]
name = "Haifa"
type = 2

[[facilities]]
name = "Park"
category = 2
cost = 3
life_quality = 1
economy = 0
environment = 4

[[plans]]
settlement = "Haifa"
policy = "bal"
"#;
        let scenario = ScenarioConfig::parse_toml(content).unwrap();
        assert_eq!(scenario.entries.len(), 3);
        assert_eq!(
            scenario.entries[0],
            ScenarioEntry::Settlement(Settlement::new("Haifa", SettlementType::Metropolis))
        );
        assert_eq!(
            scenario.entries[1],
            ScenarioEntry::Facility(FacilityType::new(
                "Park",
                FacilityCategory::Environment,
                3,
                Scores::new(1, 0, 4)
            ))
        );
    }

    #[test]
    fn test_parse_toml_rejects_unknown_codes() {
        let content = "[[settlements]]\nname = \"X\"\ntype = 7\n";
        assert!(matches!(
            ScenarioConfig::parse_toml(content).unwrap_err(),
            ConfigError::InvalidEntry(_)
        ));
    }

    #[test]
    fn test_apply_builds_simulation() {
        let scenario = ScenarioConfig::parse_lines(LINES).unwrap();
        let sim = scenario.build().unwrap();
        assert_eq!(sim.settlements().len(), 2);
        assert_eq!(sim.catalog().len(), 2);
        assert_eq!(sim.plans().len(), 1);
        assert!(sim.actions_log().is_empty());
        assert!(!sim.is_running());
    }

    #[test]
    fn test_apply_stops_at_first_failure() {
        let scenario = ScenarioConfig::parse_lines("plan Nowhere nve\n").unwrap();
        let err = scenario.build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Simulation(SimError::SettlementNotFound(_))
        ));
    }
}
