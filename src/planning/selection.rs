//! Facility selection policies
//!
//! A policy decides which facility type a plan builds next. Policies are
//! stateful: round-robin variants remember the last index they returned and
//! the balanced variant accumulates the impacts of everything it picked.

use crate::city::facility::{FacilityCategory, FacilityType};
use crate::core::error::{Result, SimError};
use crate::core::types::Scores;
use std::fmt;

/// Shared interface of every selection strategy
pub trait FacilitySelector {
    /// Pick the next facility type to build from `options`
    fn select_facility<'a>(&mut self, options: &'a [FacilityType]) -> Result<&'a FacilityType>;

    /// Short identifier used for display and for parsing policy names
    fn identifier(&self) -> &'static str;
}

/// Round-robin over the whole catalog in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaiveSelection {
    last_selected: Option<usize>,
}

impl NaiveSelection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FacilitySelector for NaiveSelection {
    fn select_facility<'a>(&mut self, options: &'a [FacilityType]) -> Result<&'a FacilityType> {
        if options.is_empty() {
            return Err(SimError::EmptyCatalog);
        }
        let next = self.last_selected.map_or(0, |last| (last + 1) % options.len());
        self.last_selected = Some(next);
        Ok(&options[next])
    }

    fn identifier(&self) -> &'static str {
        "nve"
    }
}

/// Keeps the three running scores as close to each other as possible
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalancedSelection {
    totals: Scores,
}

impl BalancedSelection {
    pub fn new(totals: Scores) -> Self {
        Self { totals }
    }

    /// Running totals the next selection is balanced against
    pub fn totals(&self) -> Scores {
        self.totals
    }
}

impl FacilitySelector for BalancedSelection {
    fn select_facility<'a>(&mut self, options: &'a [FacilityType]) -> Result<&'a FacilityType> {
        let mut best: Option<(&FacilityType, i64)> = None;
        for candidate in options {
            let spread = (self.totals + candidate.impact()).max_spread();
            // Strict comparison keeps the earliest candidate on ties
            if best.map_or(true, |(_, best_spread)| spread < best_spread) {
                best = Some((candidate, spread));
            }
        }
        let (chosen, _) = best.ok_or(SimError::EmptyCatalog)?;
        self.totals += chosen.impact();
        Ok(chosen)
    }

    fn identifier(&self) -> &'static str {
        "bal"
    }
}

/// Round-robin restricted to one facility category
///
/// The scan is bounded to one full cycle over the catalog so a catalog without
/// a matching facility fails instead of looping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    category: FacilityCategory,
    identifier: &'static str,
    last_selected: Option<usize>,
}

impl CategorySelection {
    /// Built only through `SelectionPolicy::economy` and `sustainability`
    fn new(category: FacilityCategory, identifier: &'static str) -> Self {
        Self {
            category,
            identifier,
            last_selected: None,
        }
    }

    pub fn category(&self) -> FacilityCategory {
        self.category
    }
}

impl FacilitySelector for CategorySelection {
    fn select_facility<'a>(&mut self, options: &'a [FacilityType]) -> Result<&'a FacilityType> {
        if options.is_empty() {
            return Err(SimError::EmptyCatalog);
        }
        let start = self.last_selected.map_or(0, |last| last + 1);
        for offset in 0..options.len() {
            let idx = (start + offset) % options.len();
            if options[idx].category() == self.category {
                self.last_selected = Some(idx);
                return Ok(&options[idx]);
            }
        }
        Err(SimError::NoMatchingCategory(self.category))
    }

    fn identifier(&self) -> &'static str {
        self.identifier
    }
}

/// The policy a plan currently follows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    Naive(NaiveSelection),
    Balanced(BalancedSelection),
    Economy(CategorySelection),
    Sustainability(CategorySelection),
}

impl SelectionPolicy {
    /// Identifiers accepted by `from_identifier`
    pub const IDENTIFIERS: [&'static str; 4] = ["nve", "bal", "eco", "env"];

    pub fn naive() -> Self {
        SelectionPolicy::Naive(NaiveSelection::new())
    }

    pub fn balanced(totals: Scores) -> Self {
        SelectionPolicy::Balanced(BalancedSelection::new(totals))
    }

    pub fn economy() -> Self {
        SelectionPolicy::Economy(CategorySelection::new(FacilityCategory::Economy, "eco"))
    }

    pub fn sustainability() -> Self {
        SelectionPolicy::Sustainability(CategorySelection::new(FacilityCategory::Environment, "env"))
    }

    /// Build a fresh policy from its short identifier
    ///
    /// `balanced_seed` is the starting total for the balanced policy and is
    /// ignored by the other variants.
    pub fn from_identifier(identifier: &str, balanced_seed: Scores) -> Result<Self> {
        match identifier {
            "nve" => Ok(Self::naive()),
            "bal" => Ok(Self::balanced(balanced_seed)),
            "eco" => Ok(Self::economy()),
            "env" => Ok(Self::sustainability()),
            other => Err(SimError::UnknownPolicy(other.to_string())),
        }
    }

    /// Long, human-readable policy name
    pub fn name(&self) -> &'static str {
        match self {
            SelectionPolicy::Naive(_) => "NaiveSelection",
            SelectionPolicy::Balanced(_) => "BalancedSelection",
            SelectionPolicy::Economy(_) => "EconomySelection",
            SelectionPolicy::Sustainability(_) => "SustainabilitySelection",
        }
    }

    fn selector(&mut self) -> &mut dyn FacilitySelector {
        match self {
            SelectionPolicy::Naive(p) => p,
            SelectionPolicy::Balanced(p) => p,
            SelectionPolicy::Economy(p) | SelectionPolicy::Sustainability(p) => p,
        }
    }
}

impl FacilitySelector for SelectionPolicy {
    fn select_facility<'a>(&mut self, options: &'a [FacilityType]) -> Result<&'a FacilityType> {
        self.selector().select_facility(options)
    }

    fn identifier(&self) -> &'static str {
        match self {
            SelectionPolicy::Naive(p) => p.identifier(),
            SelectionPolicy::Balanced(p) => p.identifier(),
            SelectionPolicy::Economy(p) | SelectionPolicy::Sustainability(p) => p.identifier(),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
