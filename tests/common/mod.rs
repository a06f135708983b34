//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use kost_sim::config::ProjectConfig;
use kost_sim::finance::Scenario;
use kost_sim::finance::types::{Ancillary, RoomModule, RoomType};

/// Absolute tolerance for derived areas.
pub const AREA_EPS: f64 = 1e-9;

/// Relative tolerance for money totals.
pub const MONEY_REL_EPS: f64 = 1e-12;

/// The Central Jakarta reference project (504 m², 60% coverage, 4 floors, 14/8/2 rooms).
pub fn jakarta_scenario() -> Scenario {
    ProjectConfig::jakarta_24().to_scenario()
}

/// The Yogyakarta student reference project.
pub fn yogya_scenario() -> Scenario {
    ProjectConfig::yogya_16().to_scenario()
}

/// Jakarta project with utilities cut to Rp 10.000/m², which turns EBITDA positive.
pub fn profitable_scenario() -> Scenario {
    let mut s = jakarta_scenario();
    s.opex.utilities_rp_per_sqm_monthly = 10_000.0;
    s
}

/// Jakarta project with the room list replaced by share-based modules.
pub fn share_based_scenario() -> Scenario {
    let mut s = jakarta_scenario();
    s.rooms = vec![
        RoomModule::with_share(RoomType::Standard, 11.0, 2_200_000.0, 12_000_000.0, 60.0),
        RoomModule::with_share(RoomType::Ensuite, 14.0, 3_200_000.0, 16_000_000.0, 40.0),
    ];
    s
}

/// Jakarta project that can never earn: empty and without ancillary income.
pub fn vacant_scenario() -> Scenario {
    let mut s = jakarta_scenario();
    s.revenue.occupancy_pct = 0.0;
    s.revenue.ancillary = Ancillary::default();
    s
}

/// Annual room revenue for the Jakarta reference mix at `occupancy_pct`.
pub fn jakarta_room_revenue(occupancy_pct: f64) -> f64 {
    (14.0 * 2_200_000.0 + 8.0 * 3_200_000.0 + 2.0 * 4_500_000.0) * 12.0 * occupancy_pct / 100.0
}

/// Asserts two money values agree within a relative tolerance.
pub fn assert_money_eq(actual: f64, expected: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= scale * MONEY_REL_EPS,
        "expected Rp {expected}, got Rp {actual}"
    );
}
