//! Parking requirement from a city rule table, transit proximity and area type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One value per transit mode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TransitTable {
    pub mrt: f64,
    pub lrt: f64,
    pub busway: f64,
    pub train_station: f64,
    pub bus_stop: f64,
}

/// Additive adjustment fraction per area type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AreaAdjustments {
    pub commercial: f64,
    pub tourist: f64,
    pub student: f64,
    pub residential: f64,
}

/// Parking rules of a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParkingRequirement {
    /// Spots per room before reductions.
    pub base_ratio: f64,
    /// Cap on the summed transit reductions.
    pub max_reduction: f64,
    /// Reduction fraction granted per transit mode.
    pub reductions: TransitTable,
    /// Maximum qualifying distance (m) per transit mode.
    pub distances: TransitTable,
    pub area_adjustments: AreaAdjustments,
}

impl ParkingRequirement {
    /// A ratio-only rule with no transit reductions or area adjustments.
    pub const fn flat(base_ratio: f64) -> Self {
        Self {
            base_ratio,
            max_reduction: 0.0,
            reductions: TransitTable {
                mrt: 0.0,
                lrt: 0.0,
                busway: 0.0,
                train_station: 0.0,
                bus_stop: 0.0,
            },
            distances: TransitTable {
                mrt: 0.0,
                lrt: 0.0,
                busway: 0.0,
                train_station: 0.0,
                bus_stop: 0.0,
            },
            area_adjustments: AreaAdjustments {
                commercial: 0.0,
                tourist: 0.0,
                student: 0.0,
                residential: 0.0,
            },
        }
    }
}

/// Transit proximity of the site.
///
/// A single `distance` (m) is checked against every mode's qualifying distance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportAccessibility {
    pub mrt: bool,
    pub lrt: bool,
    pub busway: bool,
    pub train_station: bool,
    pub bus_stop: bool,
    pub distance: f64,
}

/// Character of the surrounding neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    Commercial,
    Tourist,
    Student,
    #[default]
    Residential,
}

impl AreaType {
    /// Accepted names, in declaration order.
    pub const NAMES: &[&str] = &["commercial", "tourist", "student", "residential"];

    fn label(self) -> &'static str {
        match self {
            Self::Commercial => "Commercial Area",
            Self::Tourist => "Tourist Area",
            Self::Student => "Student Area",
            Self::Residential => "Residential Area",
        }
    }

    fn adjustment(self, table: &AreaAdjustments) -> f64 {
        match self {
            Self::Commercial => table.commercial,
            Self::Tourist => table.tourist,
            Self::Student => table.student,
            Self::Residential => table.residential,
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Commercial => "commercial",
            Self::Tourist => "tourist",
            Self::Student => "student",
            Self::Residential => "residential",
        };
        f.write_str(name)
    }
}

impl FromStr for AreaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commercial" => Ok(Self::Commercial),
            "tourist" => Ok(Self::Tourist),
            "student" => Ok(Self::Student),
            "residential" => Ok(Self::Residential),
            other => Err(format!(
                "unknown area type \"{other}\", available: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// A named fraction applied during the calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub source: &'static str,
    pub amount: f64,
}

/// Parking spots required for a project, with the applied line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingAssessment {
    pub base_spots: u32,
    pub reduced_spots: u32,
    pub final_spots: u32,
    pub reductions: Vec<LineItem>,
    pub adjustments: Vec<LineItem>,
}

/// Computes required parking spots.
///
/// Transit reductions are summed and capped at `max_reduction`; exactly one
/// area adjustment is applied afterwards. Reduced and final counts never drop
/// below one.
pub fn calculate_parking_requirement(
    room_count: u32,
    rules: &ParkingRequirement,
    transport: &TransportAccessibility,
    area_type: AreaType,
) -> ParkingAssessment {
    let base_spots = spots(f64::from(room_count) * rules.base_ratio);

    let modes = [
        ("MRT Access", transport.mrt, rules.reductions.mrt, rules.distances.mrt),
        ("LRT Access", transport.lrt, rules.reductions.lrt, rules.distances.lrt),
        (
            "Busway Access",
            transport.busway,
            rules.reductions.busway,
            rules.distances.busway,
        ),
        (
            "Train Station Access",
            transport.train_station,
            rules.reductions.train_station,
            rules.distances.train_station,
        ),
        (
            "Bus Stop Access",
            transport.bus_stop,
            rules.reductions.bus_stop,
            rules.distances.bus_stop,
        ),
    ];
    let reductions: Vec<LineItem> = modes
        .iter()
        .filter(|(_, available, _, max_distance)| *available && transport.distance <= *max_distance)
        .map(|&(source, _, amount, _)| LineItem { source, amount })
        .collect();
    let total_reduction = reductions
        .iter()
        .map(|r| r.amount)
        .sum::<f64>()
        .min(rules.max_reduction);

    let area_adjustment = area_type.adjustment(&rules.area_adjustments);
    let adjustments = if area_adjustment == 0.0 {
        Vec::new()
    } else {
        vec![LineItem {
            source: area_type.label(),
            amount: area_adjustment,
        }]
    };

    let reduced_spots = spots(f64::from(base_spots) * (1.0 - total_reduction)).max(1);
    let final_spots = spots(f64::from(reduced_spots) * (1.0 + area_adjustment)).max(1);

    tracing::debug!(
        room_count,
        base_spots,
        reduced_spots,
        final_spots,
        total_reduction,
        "parking requirement"
    );

    ParkingAssessment {
        base_spots,
        reduced_spots,
        final_spots,
        reductions,
        adjustments,
    }
}

fn spots(raw: f64) -> u32 {
    crate::finance::site_yield::to_count(raw.ceil())
}

impl fmt::Display for ParkingAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Parking ---")?;
        writeln!(f, "Base spots:            {}", self.base_spots)?;
        for r in &self.reductions {
            writeln!(f, "  {:<20} -{:.0}%", r.source, r.amount * 100.0)?;
        }
        writeln!(f, "After reductions:      {}", self.reduced_spots)?;
        for a in &self.adjustments {
            writeln!(f, "  {:<20} {:+.0}%", a.source, a.amount * 100.0)?;
        }
        write!(f, "Required spots:        {}", self.final_spots)
    }
}
