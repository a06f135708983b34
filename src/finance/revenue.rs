//! Annual revenue from room rents, occupancy and ancillary income.

use super::types::{RoomModule, Scenario};

/// Annual revenue for the given (reconciled) room list.
///
/// Occupancy applies uniformly to every room type.
pub fn revenue_annual(scenario: &Scenario, rooms: &[RoomModule]) -> f64 {
    let occupancy = scenario.revenue.occupancy_pct / 100.0;
    let rooms_revenue: f64 = rooms
        .iter()
        .map(|r| f64::from(r.units()) * r.rent * 12.0 * occupancy)
        .sum();
    rooms_revenue + scenario.revenue.ancillary.total()
}
