//! TOML-based project configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapter::{FORM_SCENARIO_NAME, FormState, scenario_from_form};
use crate::finance::efficiency::{BASE_EFFICIENCY, derive_efficiency};
use crate::finance::types::{
    Ancillary, CapexConfig, Corridor, DebtConfig, Efficiency, LandAcquisition, Marketing,
    OpexConfig, RevenueConfig, RoomModule, RoomType, Scenario,
};
use crate::finance::site_yield::compute_yield;
use crate::regulation::city::DEFAULT_CODE;
use crate::regulation::{AreaType, TransportAccessibility};

/// Upper bound on rooms per module and on the reconciled total.
pub const MAX_ROOMS: u32 = 10_000;

/// Top-level project configuration parsed from TOML.
///
/// Every section has a default. Load from TOML with
/// [`ProjectConfig::from_toml_file`] or start from a preset with
/// [`ProjectConfig::from_preset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Name, city and neighbourhood.
    #[serde(default)]
    pub project: ProjectSection,
    /// Plot geometry and building envelope.
    #[serde(default)]
    pub site: SiteConfig,
    /// Room archetypes, in display order.
    #[serde(default)]
    pub rooms: Vec<RoomModule>,
    #[serde(default)]
    pub capex: CapexConfig,
    #[serde(default)]
    pub opex: OpexConfig,
    #[serde(default)]
    pub revenue: RevenueConfig,
    /// Optional single-loan financing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt: Option<DebtConfig>,
    /// Transit proximity used by the parking assessment.
    #[serde(default)]
    pub transport: TransportAccessibility,
}

/// Project identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectSection {
    pub name: String,
    /// City regulation code, e.g. `"JKT-C"`.
    pub city: String,
    pub area_type: AreaType,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: "Untitled kost".to_string(),
            city: DEFAULT_CODE.to_string(),
            area_type: AreaType::default(),
        }
    }
}

/// Plot geometry and building envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Plot area (m², must be > 0).
    pub site_area: f64,
    /// Coverage ratio (KDB) as a fraction.
    pub kdb: f64,
    /// Floor-area ratio (KLB).
    pub klb: f64,
    /// Number of floors (must be > 0).
    pub floors: u32,
    pub corridor: Corridor,
    /// Efficiency before the corridor adjustment.
    pub base_efficiency: f64,
    /// Explicit efficiency; overrides the corridor derivation when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    /// Planned parking spots, checked against open space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_spots: Option<u32>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_area: 500.0,
            kdb: 0.6,
            klb: 1.2,
            floors: 3,
            corridor: Corridor::Central,
            base_efficiency: BASE_EFFICIENCY,
            efficiency: None,
            parking_spots: None,
        }
    }
}

impl SiteConfig {
    /// Explicit efficiency if given, else derived from the corridor layout.
    pub fn resolved_efficiency(&self) -> Efficiency {
        self.efficiency
            .map_or_else(|| derive_efficiency(self.corridor, self.base_efficiency), Efficiency::new)
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"site.site_area"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ProjectConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["jakarta_24", "yogya_16", "form_default"];

    /// 24-room boutique kost in Central Jakarta.
    pub fn jakarta_24() -> Self {
        Self {
            project: ProjectSection {
                name: "Jakarta • 24-room Boutique".to_string(),
                city: "JKT-C".to_string(),
                area_type: AreaType::Commercial,
            },
            site: SiteConfig {
                site_area: 504.0,
                kdb: 0.60,
                klb: 2.4,
                floors: 4,
                corridor: Corridor::Central,
                efficiency: Some(0.78),
                ..SiteConfig::default()
            },
            rooms: vec![
                RoomModule::with_count(RoomType::Standard, 11.0, 2_200_000.0, 12_000_000.0, 14),
                RoomModule::with_count(RoomType::Ensuite, 14.0, 3_200_000.0, 16_000_000.0, 8),
                RoomModule::with_count(RoomType::Premium, 20.0, 4_500_000.0, 22_000_000.0, 2),
            ],
            capex: CapexConfig {
                land: LandAcquisition::Own {
                    rp_per_sqm: 14_000_000.0,
                },
                structure_rp_per_sqm: 7_500_000.0,
                shared_area_rp_per_sqm: 4_500_000.0,
                branding_launch: 30_000_000.0,
                working_capital_months: 3.0,
            },
            opex: OpexConfig {
                caretaker_monthly: 4_500_000.0,
                cleaning_per_room_monthly: 120_000.0,
                utilities_rp_per_sqm_monthly: 45_000.0,
                internet_monthly: 700_000.0,
                maintenance_per_room_monthly: 90_000.0,
                pbb_or_lease_annual: 8_000_000.0,
                marketing: Marketing::PctRevenue { pct: 2.0 },
            },
            revenue: RevenueConfig {
                occupancy_pct: 85.0,
                ancillary: Ancillary {
                    parking_annual: Some(18_000_000.0),
                    laundry_annual: Some(9_000_000.0),
                    utilities_markup_annual: Some(6_000_000.0),
                    kiosks_annual: Some(0.0),
                },
            },
            debt: None,
            transport: TransportAccessibility::default(),
        }
    }

    /// 16-room student kost in Yogyakarta.
    pub fn yogya_16() -> Self {
        Self {
            project: ProjectSection {
                name: "Yogyakarta • 16-room Student".to_string(),
                city: "YOG".to_string(),
                area_type: AreaType::Student,
            },
            site: SiteConfig {
                site_area: 420.0,
                kdb: 0.65,
                klb: 2.0,
                floors: 3,
                corridor: Corridor::External,
                efficiency: Some(0.80),
                ..SiteConfig::default()
            },
            rooms: vec![
                RoomModule::with_count(RoomType::Standard, 10.0, 1_500_000.0, 9_000_000.0, 12),
                RoomModule::with_count(RoomType::Ensuite, 13.0, 2_200_000.0, 13_000_000.0, 4),
            ],
            capex: CapexConfig {
                land: LandAcquisition::Own {
                    rp_per_sqm: 5_500_000.0,
                },
                structure_rp_per_sqm: 6_200_000.0,
                shared_area_rp_per_sqm: 3_800_000.0,
                branding_launch: 15_000_000.0,
                working_capital_months: 2.0,
            },
            opex: OpexConfig {
                caretaker_monthly: 3_500_000.0,
                cleaning_per_room_monthly: 80_000.0,
                utilities_rp_per_sqm_monthly: 35_000.0,
                internet_monthly: 550_000.0,
                maintenance_per_room_monthly: 70_000.0,
                pbb_or_lease_annual: 4_000_000.0,
                marketing: Marketing::PctRevenue { pct: 1.5 },
            },
            revenue: RevenueConfig {
                occupancy_pct: 88.0,
                ancillary: Ancillary {
                    parking_annual: Some(6_000_000.0),
                    laundry_annual: Some(4_200_000.0),
                    utilities_markup_annual: Some(3_600_000.0),
                    kiosks_annual: Some(0.0),
                },
            },
            debt: None,
            transport: TransportAccessibility::default(),
        }
    }

    /// The wizard's default form state, run through the adapter.
    pub fn form_default() -> Self {
        Self::from_form(&FormState::default(), DEFAULT_CODE)
    }

    /// Builds a project from form state via [`scenario_from_form`].
    pub fn from_form(form: &FormState, city: &str) -> Self {
        let scenario = scenario_from_form(form, city);
        Self {
            project: ProjectSection {
                name: FORM_SCENARIO_NAME.to_string(),
                city: city.to_string(),
                area_type: AreaType::default(),
            },
            site: SiteConfig {
                site_area: scenario.site_area,
                kdb: scenario.kdb,
                klb: scenario.klb,
                floors: scenario.floors,
                corridor: scenario.corridor,
                base_efficiency: BASE_EFFICIENCY,
                efficiency: Some(scenario.efficiency.value()),
                parking_spots: Some(form.parking_spots),
            },
            rooms: scenario.rooms,
            capex: scenario.capex,
            opex: scenario.opex,
            revenue: scenario.revenue,
            debt: scenario.debt,
            transport: TransportAccessibility::default(),
        }
    }

    /// Loads a project from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "jakarta_24" => Ok(Self::jakarta_24()),
            "yogya_16" => Ok(Self::yogya_16()),
            "form_default" => Ok(Self::form_default()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a project from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a project from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates structural constraints and returns a list of errors.
    ///
    /// Regulatory limits are checked separately by
    /// [`crate::regulation::validate_land_rules`].
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let site = &self.site;

        if site.site_area <= 0.0 {
            errors.push(ConfigError::new("site.site_area", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&site.kdb) {
            errors.push(ConfigError::new("site.kdb", "must be a fraction in [0.0, 1.0]"));
        }
        if site.floors == 0 {
            errors.push(ConfigError::new("site.floors", "must be > 0"));
        }

        if self.rooms.is_empty() {
            errors.push(ConfigError::new("rooms", "at least one room module is required"));
        }
        for (i, room) in self.rooms.iter().enumerate() {
            if room.size <= 0.0 {
                errors.push(ConfigError::new(format!("rooms[{i}].size"), "must be > 0"));
            }
            if let Some(share) = room.share_pct {
                if !(0.0..=100.0).contains(&share) {
                    errors.push(ConfigError::new(
                        format!("rooms[{i}].share_pct"),
                        "must be in [0, 100]",
                    ));
                }
            }
            if let Some(count) = room.count {
                if count > MAX_ROOMS {
                    errors.push(ConfigError::new(
                        format!("rooms[{i}].count"),
                        format!("must be <= {MAX_ROOMS}"),
                    ));
                }
            }
        }
        // share-driven modules derive their counts from the site
        if errors.is_empty() {
            let total = compute_yield(&self.to_scenario()).rooms_total;
            if total > MAX_ROOMS {
                errors.push(ConfigError::new(
                    "rooms",
                    format!("{total} rooms exceed the limit of {MAX_ROOMS}"),
                ));
            }
        }

        if !(0.0..=100.0).contains(&self.revenue.occupancy_pct) {
            errors.push(ConfigError::new(
                "revenue.occupancy_pct",
                "must be in [0, 100]",
            ));
        }

        if let Some(debt) = &self.debt {
            if !(0.0..=100.0).contains(&debt.ltv_pct) {
                errors.push(ConfigError::new("debt.ltv_pct", "must be in [0, 100]"));
            }
        }

        errors
    }

    /// Normalizes the configuration into the engine's scenario.
    pub fn to_scenario(&self) -> Scenario {
        Scenario {
            name: self.project.name.clone(),
            city: self.project.city.clone(),
            site_area: self.site.site_area,
            kdb: self.site.kdb,
            klb: self.site.klb,
            floors: self.site.floors,
            corridor: self.site.corridor,
            efficiency: self.site.resolved_efficiency(),
            rooms: self.rooms.clone(),
            capex: self.capex.clone(),
            opex: self.opex.clone(),
            revenue: self.revenue.clone(),
            debt: self.debt.clone(),
        }
    }
}
