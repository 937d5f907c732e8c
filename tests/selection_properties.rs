//! Property tests for selection policies and plan ticking

use proptest::prelude::*;
use settlement_planner::city::facility::{FacilityCategory, FacilityType};
use settlement_planner::city::settlement::{Settlement, SettlementType};
use settlement_planner::core::error::SimError;
use settlement_planner::core::types::Scores;
use settlement_planner::planning::{FacilitySelector, PlanStatus, SelectionPolicy};
use settlement_planner::simulation::Simulation;

fn category() -> impl Strategy<Value = FacilityCategory> {
    prop_oneof![
        Just(FacilityCategory::LifeQuality),
        Just(FacilityCategory::Economy),
        Just(FacilityCategory::Environment),
    ]
}

fn tier() -> impl Strategy<Value = SettlementType> {
    prop_oneof![
        Just(SettlementType::Village),
        Just(SettlementType::City),
        Just(SettlementType::Metropolis),
    ]
}

/// Catalog with unique names `F0`, `F1`, ...
fn catalog(max_len: usize) -> impl Strategy<Value = Vec<FacilityType>> {
    prop::collection::vec((category(), 0u32..5, -5i32..10, -5i32..10, -5i32..10), 1..max_len)
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (category, cost, lq, eco, env))| {
                    FacilityType::new(format!("F{i}"), category, cost, Scores::new(lq, eco, env))
                })
                .collect()
        })
}

proptest! {
    #[test]
    fn naive_visits_each_entry_once_per_cycle(options in catalog(12), cycles in 1usize..4) {
        let mut policy = SelectionPolicy::naive();
        for _ in 0..cycles {
            for expected in &options {
                let chosen = policy.select_facility(&options).unwrap();
                prop_assert_eq!(chosen.name(), expected.name());
            }
        }
    }

    #[test]
    fn balanced_choice_is_global_minimum(
        options in catalog(10),
        seed in (-20i32..20, -20i32..20, -20i32..20),
    ) {
        let totals = Scores::new(seed.0, seed.1, seed.2);
        let mut policy = SelectionPolicy::balanced(totals);
        let chosen = policy.select_facility(&options).unwrap().clone();

        let chosen_spread = (totals + chosen.impact()).max_spread();
        let first_min = options
            .iter()
            .position(|o| (totals + o.impact()).max_spread() == chosen_spread)
            .unwrap();
        for option in &options {
            prop_assert!(chosen_spread <= (totals + option.impact()).max_spread());
        }
        prop_assert_eq!(options[first_min].name(), chosen.name());
    }

    #[test]
    fn category_policies_only_return_matching_category(options in catalog(12), picks in 1usize..20) {
        for (mut policy, wanted) in [
            (SelectionPolicy::economy(), FacilityCategory::Economy),
            (SelectionPolicy::sustainability(), FacilityCategory::Environment),
        ] {
            let has_match = options.iter().any(|o| o.category() == wanted);
            for _ in 0..picks {
                match policy.select_facility(&options) {
                    Ok(chosen) => prop_assert_eq!(chosen.category(), wanted),
                    Err(err) => {
                        prop_assert!(!has_match);
                        prop_assert_eq!(err, SimError::NoMatchingCategory(wanted));
                    }
                }
            }
        }
    }

    #[test]
    fn under_construction_never_exceeds_capacity(
        options in catalog(8),
        tiers in prop::collection::vec(tier(), 1..4),
        ticks in 1usize..25,
    ) {
        let mut sim = Simulation::new();
        for option in options {
            sim.add_facility(option).unwrap();
        }
        for (i, tier) in tiers.iter().enumerate() {
            let name = format!("S{i}");
            sim.add_settlement(Settlement::new(name.clone(), *tier)).unwrap();
            sim.add_plan(&name, "nve").unwrap();
            sim.add_plan(&name, "bal").unwrap();
        }
        sim.start();

        for _ in 0..ticks {
            sim.step().unwrap();
            for plan in sim.plans() {
                let capacity = plan.settlement().capacity();
                prop_assert!(plan.under_construction().len() <= capacity);
                let expected = if plan.under_construction().len() >= capacity {
                    PlanStatus::Busy
                } else {
                    PlanStatus::Available
                };
                prop_assert_eq!(plan.status(), expected);
            }
        }
    }

    #[test]
    fn restore_twice_yields_identical_state(options in catalog(6), before in 0usize..5, after in 0usize..5) {
        let mut sim = Simulation::new();
        for option in options {
            sim.add_facility(option).unwrap();
        }
        sim.add_settlement(Settlement::new("S", SettlementType::City)).unwrap();
        sim.add_plan("S", "bal").unwrap();
        sim.start();
        for _ in 0..before {
            sim.step().unwrap();
        }
        sim.backup();
        for _ in 0..after {
            sim.step().unwrap();
        }

        sim.restore().unwrap();
        let first: Vec<String> = sim.plans().iter().map(|p| p.status_report()).collect();
        let first_policy = sim.plans()[0].selection_policy().clone();
        sim.restore().unwrap();
        let second: Vec<String> = sim.plans().iter().map(|p| p.status_report()).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(&first_policy, sim.plans()[0].selection_policy());
    }
}
