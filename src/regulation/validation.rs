//! Land-rule checks against a city's regulatory envelope.
//!
//! Validation only annotates a scenario for display; it never alters the
//! inputs or the computed results.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::city::CityRegulation;
use crate::finance::types::Scenario;

/// Largest plot the tool accepts (m²).
pub const MAX_SITE_AREA: f64 = 10_000.0;

/// Ground area one parking spot occupies (2.5 m × 5 m).
pub const PARKING_SPOT_AREA: f64 = 12.5;

/// Total floor area above which Jakarta regions need special permits (m²).
const JAKARTA_PERMIT_THRESHOLD: f64 = 1_000.0;
const PERMIT_THRESHOLD: f64 = 800.0;

/// Field name → message maps for hard errors and advisory warnings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationReport {
    pub errors: BTreeMap<String, String>,
    pub warnings: BTreeMap<String, String>,
}

impl ValidationReport {
    /// True when no hard errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error unless `field` already has one; earlier rules win.
    fn error(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_insert(message);
    }

    fn warn(&mut self, field: &str, message: String) {
        self.warnings.insert(field.to_string(), message);
    }
}

/// Checks site geometry and planned parking against `city`.
///
/// The first failing rule per field is reported.
pub fn validate_land_rules(
    scenario: &Scenario,
    parking_spots: Option<u32>,
    city: &CityRegulation,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let name = city.name;
    let site = scenario.site_area;
    let kdb = scenario.kdb;
    let klb = scenario.klb;

    if site <= 0.0 {
        report.error("site_area", "Site area must be positive".into());
    } else if site < city.min_site_area {
        report.error(
            "site_area",
            format!(
                "Site area must be at least {}m² in {name}",
                city.min_site_area
            ),
        );
    } else if site > MAX_SITE_AREA {
        report.error("site_area", "Site area cannot exceed 10,000m²".into());
    }

    if kdb < city.kdb_range.min {
        report.error(
            "kdb",
            format!(
                "KDB cannot be less than {}% in {name}",
                pct(city.kdb_range.min)
            ),
        );
    } else if kdb > city.kdb_range.max {
        report.error(
            "kdb",
            format!("KDB cannot exceed {}% in {name}", pct(city.kdb_range.max)),
        );
    }

    if klb < city.klb_range.min {
        report.error(
            "klb",
            format!("KLB cannot be less than {} in {name}", city.klb_range.min),
        );
    } else if klb > city.klb_range.max {
        report.error(
            "klb",
            format!("KLB cannot exceed {} in {name}", city.klb_range.max),
        );
    }

    let floors = scenario.floors;
    if floors < 1 {
        report.error("floors", "Building must have at least 1 floor".into());
    } else if floors > city.max_floors {
        report.error(
            "floors",
            format!("Maximum {} floors allowed in {name}", city.max_floors),
        );
    } else if kdb > 0.0 && f64::from(floors) > (klb / kdb).ceil() {
        report.error(
            "floors",
            "Number of floors cannot exceed KLB/KDB ratio".into(),
        );
    }

    if let Some(spots) = parking_spots {
        let max_spots = max_parking_spots(site, kdb, city);
        if spots > max_spots {
            report.error(
                "parking_spots",
                "Not enough open space for this many parking spots considering setbacks".into(),
            );
        }
    }

    let comfortable_site = city.min_site_area * 1.2;
    if site > 0.0 && site < comfortable_site {
        report.warn(
            "site_area",
            format!(
                "Site area below {:.0}m² may be too small for efficient kost in {name}",
                comfortable_site.round()
            ),
        );
    }

    let open_space_kdb = city.kdb_range.max * 0.9;
    if kdb > open_space_kdb {
        report.warn(
            "kdb",
            format!(
                "KDB above {}% may not leave enough open space for amenities in {name}",
                pct(open_space_kdb)
            ),
        );
    }

    let permit_floors = city.max_floors.saturating_sub(1);
    if floors > permit_floors {
        report.warn(
            "floors",
            format!("More than {permit_floors} floors may require additional permits in {name}"),
        );
    }

    let threshold = if city.is_jakarta() {
        JAKARTA_PERMIT_THRESHOLD
    } else {
        PERMIT_THRESHOLD
    };
    if site * klb > threshold {
        report.warn(
            "klb",
            format!("Total building area above {threshold}m² requires special permits in {name}"),
        );
    }

    if let Some((first, rest)) = city.special_rules.split_first() {
        let mut general = format!("Special rule for {name}: {first}");
        for rule in rest {
            general.push('\n');
            general.push_str(rule);
        }
        report.warn("general", general);
    }

    tracing::debug!(
        city = city.code,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated land rules"
    );
    report
}

/// Parking spots that fit in the open space left after coverage and setbacks.
pub fn max_parking_spots(site_area: f64, kdb: f64, city: &CityRegulation) -> u32 {
    let s = &city.setbacks;
    let open_space = site_area * (1.0 - kdb);
    let setback_area = 2.0 * (s.front + s.back) + 2.0 * (s.side + s.side);
    let usable = (open_space - setback_area).max(0.0);
    crate::finance::site_yield::to_count((usable / PARKING_SPOT_AREA).floor())
}

fn pct(fraction: f64) -> f64 {
    (fraction * 100.0).round()
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Land Rules ---")?;
        if self.errors.is_empty() && self.warnings.is_empty() {
            return write!(f, "No issues found");
        }
        let mut first = true;
        for (label, map) in [("error", &self.errors), ("warning", &self.warnings)] {
            for (field, message) in map {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(f, "{label}: {field}: {}", message.replace('\n', "; "))?;
            }
        }
        Ok(())
    }
}
