//! Core scenario types: site geometry, room inventory, cost and revenue configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Corridor layout of the building, which drives the net:gross efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corridor {
    /// Double-loaded central corridor (rooms on both sides).
    #[default]
    Central,
    /// Single-loaded external gallery.
    External,
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Central => write!(f, "central"),
            Self::External => write!(f, "external"),
        }
    }
}

/// Room archetype tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Standard,
    Ensuite,
    Premium,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Ensuite => write!(f, "ensuite"),
            Self::Premium => write!(f, "premium"),
        }
    }
}

/// Net:gross area efficiency, always held within `[0, 1]`.
///
/// # Examples
///
/// ```
/// use kost_sim::finance::types::Efficiency;
///
/// assert_eq!(Efficiency::new(1.3).value(), 1.0);
/// assert_eq!(Efficiency::new(-0.2).value(), 0.0);
/// assert_eq!(Efficiency::new(0.78).value(), 0.78);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Efficiency(f64);

impl Efficiency {
    /// Creates an efficiency, clamping into `[0, 1]`. NaN becomes 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Fraction of gross area that is leasable.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Efficiency {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Efficiency> for f64 {
    fn from(value: Efficiency) -> Self {
        value.0
    }
}

/// A room archetype with either an explicit count or a share of the mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomModule {
    /// Archetype tag.
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Net unit size (m²).
    pub size: f64,
    /// Monthly rent (Rp).
    pub rent: f64,
    /// One-time fitout cost per room (Rp).
    pub fitout: f64,
    /// Explicit number of units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Share of usable net area, 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_pct: Option<f64>,
}

impl RoomModule {
    /// Creates a count-driven module.
    pub fn with_count(room_type: RoomType, size: f64, rent: f64, fitout: f64, count: u32) -> Self {
        Self {
            room_type,
            size,
            rent,
            fitout,
            count: Some(count),
            share_pct: None,
        }
    }

    /// Creates a share-driven module.
    pub fn with_share(
        room_type: RoomType,
        size: f64,
        rent: f64,
        fitout: f64,
        share_pct: f64,
    ) -> Self {
        Self {
            room_type,
            size,
            rent,
            fitout,
            count: None,
            share_pct: Some(share_pct),
        }
    }

    /// Unit count, treating a missing count as zero.
    pub fn units(&self) -> u32 {
        self.count.unwrap_or(0)
    }
}

/// How the land is acquired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case", deny_unknown_fields)]
pub enum LandAcquisition {
    /// Purchased at a rate per m² of site area.
    Own { rp_per_sqm: f64 },
    /// Leased at a rate per m² per year, paid up-front for the lease term.
    Lease { rp_per_sqm: f64, years: f64 },
    /// A single lump-sum amount.
    Flat { amount: f64 },
}

impl Default for LandAcquisition {
    fn default() -> Self {
        Self::Own { rp_per_sqm: 0.0 }
    }
}

/// One-time capital expenditure assumptions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapexConfig {
    /// Land acquisition method and rate.
    pub land: LandAcquisition,
    /// Structure cost per m² of usable gross area.
    pub structure_rp_per_sqm: f64,
    /// Shared-area cost per m² of circulation/shared area.
    pub shared_area_rp_per_sqm: f64,
    /// Branding and launch budget.
    pub branding_launch: f64,
    /// Working capital, in months of annual OPEX.
    pub working_capital_months: f64,
}

/// How marketing spend is budgeted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case", deny_unknown_fields)]
pub enum Marketing {
    /// Fixed monthly spend.
    Flat { monthly: f64 },
    /// Percentage (0–100) of annual revenue.
    PctRevenue { pct: f64 },
}

impl Default for Marketing {
    fn default() -> Self {
        Self::Flat { monthly: 0.0 }
    }
}

/// Recurring operating expenditure assumptions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpexConfig {
    pub caretaker_monthly: f64,
    pub cleaning_per_room_monthly: f64,
    pub utilities_rp_per_sqm_monthly: f64,
    pub internet_monthly: f64,
    pub maintenance_per_room_monthly: f64,
    /// Land tax (PBB) or ground lease, per year.
    pub pbb_or_lease_annual: f64,
    pub marketing: Marketing,
}

/// Optional annual ancillary income lines. Missing lines count as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Ancillary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_annual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laundry_annual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilities_markup_annual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kiosks_annual: Option<f64>,
}

impl Ancillary {
    /// Sum of all ancillary lines.
    pub fn total(&self) -> f64 {
        [
            self.parking_annual,
            self.laundry_annual,
            self.utilities_markup_annual,
            self.kiosks_annual,
        ]
        .iter()
        .map(|line| line.unwrap_or(0.0))
        .sum()
    }
}

/// Occupancy and ancillary income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevenueConfig {
    /// Occupancy percentage (0–100), uniform across room types.
    pub occupancy_pct: f64,
    pub ancillary: Ancillary,
}

impl Default for RevenueConfig {
    fn default() -> Self {
        Self {
            occupancy_pct: 85.0,
            ancillary: Ancillary::default(),
        }
    }
}

/// Single-loan financing approximation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebtConfig {
    /// Loan-to-value percentage of total CAPEX.
    pub ltv_pct: f64,
    /// Annual interest rate percentage.
    pub rate_pct: f64,
    /// Term in years.
    pub years: u32,
}

/// The normalized project description the engine consumes.
///
/// Built once per run from a project file or form state and never mutated
/// by the engine; perturbations clone it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// City regulation code (e.g. `"JKT-C"`).
    pub city: String,
    /// Site area (m²).
    pub site_area: f64,
    /// Coverage ratio (KDB), as a fraction.
    pub kdb: f64,
    /// Floor-area ratio (KLB).
    pub klb: f64,
    /// Number of floors.
    pub floors: u32,
    pub corridor: Corridor,
    pub efficiency: Efficiency,
    pub rooms: Vec<RoomModule>,
    pub capex: CapexConfig,
    pub opex: OpexConfig,
    pub revenue: RevenueConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt: Option<DebtConfig>,
}

impl Scenario {
    /// Returns a copy with a different room list.
    pub fn with_rooms(&self, rooms: Vec<RoomModule>) -> Self {
        Self {
            rooms,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiency_clamps_into_unit_interval() {
        assert_eq!(Efficiency::new(2.0).value(), 1.0);
        assert_eq!(Efficiency::new(-1.0).value(), 0.0);
        assert_eq!(Efficiency::new(f64::NAN).value(), 0.0);
        assert_eq!(Efficiency::from(0.5).value(), 0.5);
    }

    #[test]
    fn ancillary_total_treats_missing_as_zero() {
        let a = Ancillary {
            parking_annual: Some(18_000_000.0),
            laundry_annual: None,
            utilities_markup_annual: Some(6_000_000.0),
            kiosks_annual: None,
        };
        assert_eq!(a.total(), 24_000_000.0);
        assert_eq!(Ancillary::default().total(), 0.0);
    }

    #[test]
    fn land_method_is_tagged() {
        let land: LandAcquisition =
            toml::from_str("method = \"lease\"\nrp_per_sqm = 100.0\nyears = 5.0").unwrap();
        assert_eq!(
            land,
            LandAcquisition::Lease {
                rp_per_sqm: 100.0,
                years: 5.0
            }
        );
    }

    #[test]
    fn efficiency_deserializes_clamped() {
        #[derive(Deserialize)]
        struct Wrap {
            e: Efficiency,
        }
        let w: Wrap = toml::from_str("e = 1.5").unwrap();
        assert_eq!(w.e.value(), 1.0);
    }
}
