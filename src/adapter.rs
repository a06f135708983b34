//! Mapping between the wizard form state and a normalized [`Scenario`].
//!
//! The form carries totals (monthly costs, one-time budgets, coverage in
//! percent); the engine wants rates. Conversions guard every division: a
//! rate derived from a zero area is 0, never an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::currency::deserialize_amount;
use crate::finance::efficiency::{BASE_EFFICIENCY, derive_efficiency};
use crate::finance::metrics::Evaluation;
use crate::finance::site_yield::{rooms_total, usable_gross};
use crate::finance::types::{
    CapexConfig, Corridor, LandAcquisition, Marketing, OpexConfig, RevenueConfig, RoomModule,
    RoomType, Scenario,
};

/// Name given to scenarios built from a form.
pub const FORM_SCENARIO_NAME: &str = "Form scenario";

/// One room row of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormRoom {
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub size: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub rent: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub fitout: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Share of the room mix, 0–100.
    #[serde(default)]
    pub mix: f64,
}

/// One-time budgets (Rp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormCapex {
    #[serde(deserialize_with = "deserialize_amount")]
    pub land_cost: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub structure_cost: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub fitout_cost: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub shared_area_cost: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub branding_cost: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub working_capital: f64,
}

impl Default for FormCapex {
    fn default() -> Self {
        Self {
            land_cost: 3_500_000_000.0,
            structure_cost: 4_500_000_000.0,
            fitout_cost: 750_000_000.0,
            shared_area_cost: 500_000_000.0,
            branding_cost: 250_000_000.0,
            working_capital: 500_000_000.0,
        }
    }
}

/// Monthly operating costs (Rp/month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormOpex {
    #[serde(deserialize_with = "deserialize_amount")]
    pub caretaker: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub cleaning: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub utilities: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub internet: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub maintenance: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub marketing: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub tax: f64,
}

impl FormOpex {
    /// Sum of all monthly lines.
    pub fn monthly_total(&self) -> f64 {
        self.caretaker
            + self.cleaning
            + self.utilities
            + self.internet
            + self.maintenance
            + self.marketing
            + self.tax
    }
}

impl Default for FormOpex {
    fn default() -> Self {
        Self {
            caretaker: 5_000_000.0,
            cleaning: 4_000_000.0,
            utilities: 7_500_000.0,
            internet: 3_000_000.0,
            maintenance: 5_000_000.0,
            marketing: 3_500_000.0,
            tax: 2_000_000.0,
        }
    }
}

/// Flat wizard form state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormState {
    pub site_area: f64,
    /// Coverage in percent.
    pub kdb: f64,
    pub klb: f64,
    pub floors: u32,
    pub corridor: Corridor,
    pub parking_spots: u32,
    pub rooms: Vec<FormRoom>,
    pub total_rooms_target: u32,
    pub capex: FormCapex,
    pub opex: FormOpex,
    pub occupancy_pct: f64,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            site_area: 500.0,
            kdb: 60.0,
            klb: 1.2,
            floors: 3,
            corridor: Corridor::Central,
            parking_spots: 8,
            rooms: vec![
                FormRoom {
                    room_type: RoomType::Standard,
                    size: 12.0,
                    rent: 2_500_000.0,
                    fitout: 15_000_000.0,
                    count: Some(12),
                    mix: 50.0,
                },
                FormRoom {
                    room_type: RoomType::Ensuite,
                    size: 16.0,
                    rent: 3_500_000.0,
                    fitout: 25_000_000.0,
                    count: Some(8),
                    mix: 33.0,
                },
                FormRoom {
                    room_type: RoomType::Premium,
                    size: 20.0,
                    rent: 4_500_000.0,
                    fitout: 35_000_000.0,
                    count: Some(4),
                    mix: 17.0,
                },
            ],
            total_rooms_target: 24,
            capex: FormCapex::default(),
            opex: FormOpex::default(),
            occupancy_pct: 85.0,
        }
    }
}

impl FormState {
    /// Parses form state from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the JSON is invalid.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::new("form", format!("cannot read \"{}\": {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    /// Parses form state from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is invalid or contains unknown fields.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::new("json", e.to_string()))
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Builds a scenario from form totals.
pub fn scenario_from_form(form: &FormState, city: &str) -> Scenario {
    let kdb = form.kdb / 100.0;
    let floors = form.floors.max(1);
    let efficiency = derive_efficiency(form.corridor, BASE_EFFICIENCY);
    let gross = usable_gross(form.site_area, kdb, floors);
    let shared_area = gross * (1.0 - efficiency.value());
    if gross <= 0.0 {
        tracing::warn!(
            site_area = form.site_area,
            kdb = form.kdb,
            "usable gross area is zero; per-area rates set to 0"
        );
    }

    let rooms: Vec<RoomModule> = form
        .rooms
        .iter()
        .map(|r| RoomModule {
            room_type: r.room_type,
            size: r.size,
            rent: r.rent,
            fitout: r.fitout,
            count: r.count,
            share_pct: Some(r.mix),
        })
        .collect();

    let counted = rooms_total(&rooms);
    let per_room_divisor = if counted == 0 {
        tracing::warn!("form has no counted rooms; per-room costs spread over one room");
        1.0
    } else {
        f64::from(counted)
    };

    let monthly_total = form.opex.monthly_total();
    let working_capital_months = if monthly_total > 0.0 {
        (form.capex.working_capital / monthly_total).round()
    } else {
        tracing::warn!("monthly OPEX is zero; working capital months set to 0");
        0.0
    };

    Scenario {
        name: FORM_SCENARIO_NAME.to_string(),
        city: city.to_string(),
        site_area: form.site_area,
        kdb,
        klb: form.klb,
        floors,
        corridor: form.corridor,
        efficiency,
        rooms,
        capex: CapexConfig {
            land: LandAcquisition::Own {
                rp_per_sqm: form.capex.land_cost / form.site_area.max(1.0),
            },
            structure_rp_per_sqm: ratio_or_zero(form.capex.structure_cost, gross),
            shared_area_rp_per_sqm: ratio_or_zero(form.capex.shared_area_cost, shared_area),
            branding_launch: form.capex.branding_cost,
            working_capital_months,
        },
        opex: OpexConfig {
            caretaker_monthly: form.opex.caretaker,
            cleaning_per_room_monthly: form.opex.cleaning / per_room_divisor,
            utilities_rp_per_sqm_monthly: ratio_or_zero(form.opex.utilities, gross),
            internet_monthly: form.opex.internet,
            maintenance_per_room_monthly: form.opex.maintenance / per_room_divisor,
            pbb_or_lease_annual: form.opex.tax * 12.0,
            marketing: Marketing::Flat {
                monthly: form.opex.marketing,
            },
        },
        revenue: RevenueConfig {
            occupancy_pct: form.occupancy_pct,
            ..RevenueConfig::default()
        },
        debt: None,
    }
}

/// Re-expands a scenario's rates into form totals.
///
/// `evaluation` must come from evaluating `scenario`; its reconciled rooms and
/// itemized costs supply the totals.
pub fn form_from_scenario(scenario: &Scenario, evaluation: &Evaluation) -> FormState {
    let y = &evaluation.yield_outcome;
    let rooms_total = f64::from(y.rooms_total);
    let monthly_marketing = match scenario.opex.marketing {
        Marketing::Flat { monthly } => monthly,
        Marketing::PctRevenue { pct } => pct / 100.0 * evaluation.revenue / 12.0,
    };

    FormState {
        site_area: scenario.site_area,
        kdb: scenario.kdb * 100.0,
        klb: scenario.klb,
        floors: scenario.floors,
        corridor: scenario.corridor,
        parking_spots: 0,
        rooms: y
            .rooms
            .iter()
            .map(|r| FormRoom {
                room_type: r.room_type,
                size: r.size,
                rent: r.rent,
                fitout: r.fitout,
                count: Some(r.units()),
                mix: r.share_pct.unwrap_or(0.0),
            })
            .collect(),
        total_rooms_target: y.rooms_total,
        capex: FormCapex {
            land_cost: evaluation.capex.land,
            structure_cost: evaluation.capex.structure.round(),
            fitout_cost: evaluation.capex.fitout,
            shared_area_cost: evaluation.capex.shared.round(),
            branding_cost: evaluation.capex.branding,
            working_capital: evaluation.capex.working_capital.round(),
        },
        opex: FormOpex {
            caretaker: scenario.opex.caretaker_monthly,
            cleaning: scenario.opex.cleaning_per_room_monthly * rooms_total,
            utilities: (scenario.opex.utilities_rp_per_sqm_monthly * y.usable_gross).round(),
            internet: scenario.opex.internet_monthly,
            maintenance: scenario.opex.maintenance_per_room_monthly * rooms_total,
            marketing: monthly_marketing.round(),
            tax: (scenario.opex.pbb_or_lease_annual / 12.0).round(),
        },
        occupancy_pct: scenario.revenue.occupancy_pct,
    }
}
