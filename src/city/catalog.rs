//! Catalog of facility types available to every plan
//!
//! Insertion order is preserved; round-robin selection policies depend on it.

use crate::city::facility::FacilityType;
use crate::core::error::{Result, SimError};
use ahash::AHashMap;

#[derive(Debug, Clone, Default)]
pub struct FacilityCatalog {
    types: Vec<FacilityType>,
    by_name: AHashMap<String, usize>,
}

impl FacilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a facility type; names must be unique
    pub fn add(&mut self, facility_type: FacilityType) -> Result<()> {
        if self.by_name.contains_key(facility_type.name()) {
            return Err(SimError::DuplicateFacility(facility_type.name().to_string()));
        }
        self.by_name
            .insert(facility_type.name().to_string(), self.types.len());
        self.types.push(facility_type);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FacilityType> {
        self.by_name.get(name).map(|&idx| &self.types[idx])
    }

    /// All facility types in insertion order
    pub fn all(&self) -> &[FacilityType] {
        &self.types
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacilityType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::facility::FacilityCategory;
    use crate::core::types::Scores;

    fn kind(name: &str) -> FacilityType {
        FacilityType::new(name, FacilityCategory::Economy, 1, Scores::new(0, 1, 0))
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut catalog = FacilityCatalog::new();
        for name in ["Mall", "Bank", "Factory"] {
            catalog.add(kind(name)).unwrap();
        }
        let names: Vec<&str> = catalog.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Mall", "Bank", "Factory"]);
        assert_eq!(catalog.get("Bank").map(|t| t.name()), Some("Bank"));
    }

    #[test]
    fn test_duplicate_name_rejected_without_mutation() {
        let mut catalog = FacilityCatalog::new();
        catalog.add(kind("Mall")).unwrap();
        let err = catalog.add(kind("Mall")).unwrap_err();
        assert_eq!(err, SimError::DuplicateFacility("Mall".into()));
        assert_eq!(catalog.len(), 1);
    }
}
