//! Perturbation-based sensitivity: tornado deltas and the ROI-vs-rooms curve.

use serde::Serialize;

use super::metrics::compute_metrics;
use super::site_yield::{compute_yield, rooms_total, to_count};
use super::types::{RoomModule, Scenario};

/// Smallest room count the ROI sweep starts from.
const MIN_SWEEP_ROOMS: u32 = 5;

/// One bar of the tornado chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TornadoItem {
    pub key: &'static str,
    /// Relative ROI change in percent of `|base ROI|`.
    pub delta_roi_pct: f64,
}

/// One point of the ROI-vs-rooms curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiPoint {
    pub rooms: u32,
    /// ROI as a decimal fraction.
    pub roi: f64,
}

/// A single controlled change to a scenario input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perturbation {
    OccupancyUp,
    OccupancyDown,
    RentUp,
    RentDown,
    StructureUp,
    StructureDown,
    FitoutUp,
    FitoutDown,
    UtilitiesUp,
    UtilitiesDown,
}

impl Perturbation {
    /// Every perturbation, in tornado output order.
    pub const ALL: [Perturbation; 10] = [
        Self::OccupancyUp,
        Self::OccupancyDown,
        Self::RentUp,
        Self::RentDown,
        Self::StructureUp,
        Self::StructureDown,
        Self::FitoutUp,
        Self::FitoutDown,
        Self::UtilitiesUp,
        Self::UtilitiesDown,
    ];

    /// Chart label.
    pub fn label(self) -> &'static str {
        match self {
            Self::OccupancyUp => "occupancy +10pt",
            Self::OccupancyDown => "occupancy -10pt",
            Self::RentUp => "rent +10%",
            Self::RentDown => "rent -10%",
            Self::StructureUp => "structure +10%",
            Self::StructureDown => "structure -10%",
            Self::FitoutUp => "fitout +10%",
            Self::FitoutDown => "fitout -10%",
            Self::UtilitiesUp => "utilities +10%",
            Self::UtilitiesDown => "utilities -10%",
        }
    }

    /// Returns a perturbed copy of `scenario`.
    ///
    /// Occupancy stays within 0–100; scaled rents and fitouts are rounded to
    /// whole rupiah.
    pub fn apply(self, scenario: &Scenario) -> Scenario {
        let mut s = scenario.clone();
        match self {
            Self::OccupancyUp => {
                s.revenue.occupancy_pct = (s.revenue.occupancy_pct + 10.0).min(100.0);
            }
            Self::OccupancyDown => {
                s.revenue.occupancy_pct = (s.revenue.occupancy_pct - 10.0).max(0.0);
            }
            Self::RentUp | Self::RentDown => {
                let f = self.factor();
                for r in &mut s.rooms {
                    r.rent = (r.rent * f).round();
                }
            }
            Self::StructureUp | Self::StructureDown => {
                s.capex.structure_rp_per_sqm *= self.factor();
            }
            Self::FitoutUp | Self::FitoutDown => {
                let f = self.factor();
                for r in &mut s.rooms {
                    r.fitout = (r.fitout * f).round();
                }
            }
            Self::UtilitiesUp | Self::UtilitiesDown => {
                s.opex.utilities_rp_per_sqm_monthly *= self.factor();
            }
        }
        s
    }

    fn factor(self) -> f64 {
        match self {
            Self::RentUp | Self::StructureUp | Self::FitoutUp | Self::UtilitiesUp => 1.1,
            _ => 0.9,
        }
    }
}

/// Relative ROI change in percent; zero when the base ROI is zero.
pub fn delta_roi_pct(roi_base: f64, roi_new: f64) -> f64 {
    if roi_base == 0.0 {
        0.0
    } else {
        (roi_new - roi_base) / roi_base.abs() * 100.0
    }
}

/// Runs every [`Perturbation`] through the full metrics pipeline.
pub fn tornado(scenario: &Scenario) -> Vec<TornadoItem> {
    let roi_base = compute_metrics(scenario).roi;
    Perturbation::ALL
        .iter()
        .map(|p| {
            let roi_new = compute_metrics(&p.apply(scenario)).roi;
            TornadoItem {
                key: p.label(),
                delta_roi_pct: delta_roi_pct(roi_base, roi_new),
            }
        })
        .collect()
}

/// Inclusive room-count range swept for a base room total.
///
/// `min = max(5, ⌊0.5·base⌋)`, `max = max(min, ⌊1.5·base⌋)`, with a zero
/// base treated as one.
///
/// # Examples
///
/// ```
/// use kost_sim::finance::sensitivity::sweep_bounds;
///
/// assert_eq!(sweep_bounds(24), (12, 36));
/// assert_eq!(sweep_bounds(0), (5, 5));
/// ```
pub fn sweep_bounds(base_rooms: u32) -> (u32, u32) {
    let base = u64::from(base_rooms.max(1));
    let min = (base / 2).max(u64::from(MIN_SWEEP_ROOMS));
    let max = (base * 3 / 2).max(min);
    (
        u32::try_from(min).unwrap_or(u32::MAX),
        u32::try_from(max).unwrap_or(u32::MAX),
    )
}

/// ROI for every integer room total in [`sweep_bounds`].
///
/// Each point scales the reconciled room counts by `rooms / base` and rounds
/// them, so the room mix keeps its proportions.
pub fn roi_vs_rooms(scenario: &Scenario) -> Vec<RoiPoint> {
    let reconciled = compute_yield(scenario).rooms;
    let base = rooms_total(&reconciled).max(1);
    let (min, max) = sweep_bounds(base);
    tracing::debug!(base, min, max, "sweeping room totals");

    (min..=max)
        .map(|target| {
            let ratio = f64::from(target) / f64::from(base);
            let rooms = scale_counts(&reconciled, ratio);
            let roi = compute_metrics(&scenario.with_rooms(rooms)).roi;
            RoiPoint { rooms: target, roi }
        })
        .collect()
}

/// The curve point with the highest ROI.
pub fn peak_roi(points: &[RoiPoint]) -> Option<RoiPoint> {
    points.iter().copied().reduce(|best, p| if p.roi > best.roi { p } else { best })
}

fn scale_counts(rooms: &[RoomModule], ratio: f64) -> Vec<RoomModule> {
    rooms
        .iter()
        .map(|r| RoomModule {
            count: Some(to_count((f64::from(r.units()) * ratio).round())),
            ..r.clone()
        })
        .collect()
}
