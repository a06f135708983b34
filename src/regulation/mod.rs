//! City building regulations: envelope table, parking rules and land-rule checks.
//!
//! Runs alongside the financial engine on its own inputs.

pub mod city;
pub mod parking;
pub mod validation;

pub use city::CityRegulation;
pub use parking::{AreaType, ParkingAssessment, TransportAccessibility, calculate_parking_requirement};
pub use validation::{ValidationReport, validate_land_rules};
