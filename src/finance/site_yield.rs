//! Usable floor area and room-count reconciliation.

use serde::Serialize;

use super::types::{RoomModule, Scenario};

/// Floor areas and reconciled room inventory for a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldOutcome {
    /// Gross floor area available to the building (m²).
    pub usable_gross: f64,
    /// Leasable area after circulation loss (m²).
    pub usable_net: f64,
    /// Room modules with every `count` populated.
    pub rooms: Vec<RoomModule>,
    /// Sum of reconciled counts.
    pub rooms_total: u32,
}

impl YieldOutcome {
    /// Circulation and shared area: `usable_gross × (1 − efficiency)`.
    pub fn shared_area(&self, efficiency: f64) -> f64 {
        self.usable_gross * (1.0 - efficiency)
    }
}

/// Gross floor area: `site_area × kdb × floors`.
pub fn usable_gross(site_area: f64, kdb: f64, floors: u32) -> f64 {
    site_area * kdb * f64::from(floors)
}

/// Leasable floor area: `usable_gross × efficiency`.
pub fn usable_net(usable_gross: f64, efficiency: f64) -> f64 {
    usable_gross * efficiency
}

/// Populates every module's count.
///
/// If any module carries an explicit count the whole list is count-driven and
/// missing counts become zero. Otherwise each module receives
/// `floor(usable_net × share / size)` units, with an equal split when a share
/// is absent. Only non-positive sizes fall back to 1 m²; fractional sizes
/// are used as given.
pub fn reconcile_counts(rooms: &[RoomModule], usable_net: f64) -> Vec<RoomModule> {
    if rooms.iter().any(|r| r.count.is_some()) {
        return rooms
            .iter()
            .map(|r| RoomModule {
                count: Some(r.units()),
                ..r.clone()
            })
            .collect();
    }

    let equal_share = 100.0 / rooms.len().max(1) as f64;
    rooms
        .iter()
        .map(|r| {
            let share = r.share_pct.unwrap_or(equal_share) / 100.0;
            let size = if r.size > 0.0 { r.size } else { 1.0 };
            let units = (usable_net * share / size).floor();
            RoomModule {
                count: Some(to_count(units)),
                ..r.clone()
            }
        })
        .collect()
}

/// Sum of module counts, saturating at `u32::MAX`.
pub fn rooms_total(rooms: &[RoomModule]) -> u32 {
    rooms
        .iter()
        .fold(0u32, |total, r| total.saturating_add(r.units()))
}

/// Runs the full yield pipeline for a scenario.
pub fn compute_yield(scenario: &Scenario) -> YieldOutcome {
    let gross = usable_gross(scenario.site_area, scenario.kdb, scenario.floors);
    let net = usable_net(gross, scenario.efficiency.value());
    let rooms = reconcile_counts(&scenario.rooms, net);
    let rooms_total = rooms_total(&rooms);
    YieldOutcome {
        usable_gross: gross,
        usable_net: net,
        rooms,
        rooms_total,
    }
}

/// Converts a non-negative float to a room count, saturating at the bounds.
pub(crate) fn to_count(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}
