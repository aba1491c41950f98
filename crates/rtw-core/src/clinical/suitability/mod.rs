//! Functional ability to duty suitability.
//!
//! Compares a duty's physical and cognitive demand profile with a worker's functional
//! restrictions. Missing data lowers `confidence` and adds warnings; the verdict itself is
//! always one of the three [`SuitabilityLevel`] values.

mod calculator;
mod catalog;
mod compare;
pub mod domain;
mod modifications;

#[cfg(test)]
mod tests;

pub use calculator::{
    calculate_duty_suitability, rank_duties, SuitabilityCalculator, SuitabilityPolicy,
};
pub use catalog::{CatalogImportError, DutyCatalog};
pub use compare::{
    compare_demand_to_capability, compare_weight_limit, compare_weight_limit_within,
    WEIGHT_TOLERANCE_KG,
};
pub use domain::{
    Capability, DemandComparison, DemandFrequency, DemandKind, Duty, DutyDemands,
    FunctionalRestrictions, SuitabilityLevel, SuitabilityResult,
};
pub use modifications::suggest_modifications;
