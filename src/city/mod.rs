//! City layer - settlements, facility types, and facility construction

pub mod catalog;
pub mod facility;
pub mod settlement;

pub use catalog::FacilityCatalog;
pub use facility::{Facility, FacilityCategory, FacilityStatus, FacilityType};
pub use settlement::{Settlement, SettlementType};
