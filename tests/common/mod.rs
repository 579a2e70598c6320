//! Shared test fixtures for integration tests.

use solar_quote::catalog::Catalog;
use solar_quote::incentive::{IncentiveDefaults, IncentiveInputs};

/// Built-in catalog and rate-sheet defaults.
pub fn builtin() -> (Catalog, IncentiveDefaults) {
    (Catalog::builtin(), IncentiveDefaults::default())
}

/// Two Powerwall 3 units at the default 4.5 kW commit and 0.85 performance.
pub fn pw3_pair(program_id: &str) -> IncentiveInputs {
    IncentiveInputs {
        program_id: program_id.to_string(),
        battery_id: "PW3".to_string(),
        quantity: 2,
        commit_kw_per_unit: Some(4.5),
        performance: Some(0.85),
        ..IncentiveInputs::default()
    }
}
