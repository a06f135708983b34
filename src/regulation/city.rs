//! Static per-city building regulation table.

use serde::Serialize;

use super::parking::{AreaAdjustments, ParkingRequirement, TransitTable};

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Minimum building setbacks from the plot boundary (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Setbacks {
    pub front: f64,
    pub side: f64,
    pub back: f64,
}

impl Setbacks {
    const fn new(front: f64, side: f64, back: f64) -> Self {
        Self { front, side, back }
    }
}

/// Legal building envelope for one city or region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRegulation {
    pub code: &'static str,
    pub name: &'static str,
    /// Coverage ratio (KDB) range, as fractions.
    pub kdb_range: Range,
    /// Floor-area ratio (KLB) range.
    pub klb_range: Range,
    pub max_floors: u32,
    /// Minimum plot size (m²).
    pub min_site_area: f64,
    pub setbacks: Setbacks,
    pub parking: ParkingRequirement,
    pub special_rules: &'static [&'static str],
}

/// Code of the fallback entry.
pub const DEFAULT_CODE: &str = "default";

const JAKARTA_CENTRAL_PARKING: ParkingRequirement = ParkingRequirement {
    base_ratio: 0.4,
    max_reduction: 0.6,
    reductions: TransitTable {
        mrt: 0.3,
        lrt: 0.2,
        busway: 0.15,
        train_station: 0.2,
        bus_stop: 0.1,
    },
    distances: TransitTable {
        mrt: 500.0,
        lrt: 400.0,
        busway: 300.0,
        train_station: 750.0,
        bus_stop: 200.0,
    },
    area_adjustments: AreaAdjustments {
        commercial: 0.2,
        tourist: 0.1,
        student: 0.0,
        residential: -0.1,
    },
};

#[allow(clippy::too_many_arguments)]
const fn city(
    code: &'static str,
    name: &'static str,
    kdb_pct: (f64, f64),
    klb: (f64, f64),
    max_floors: u32,
    min_site_area: f64,
    parking: ParkingRequirement,
    setbacks: Setbacks,
    special_rules: &'static [&'static str],
) -> CityRegulation {
    CityRegulation {
        code,
        name,
        kdb_range: Range::new(kdb_pct.0 / 100.0, kdb_pct.1 / 100.0),
        klb_range: Range::new(klb.0, klb.1),
        max_floors,
        min_site_area,
        setbacks,
        parking,
        special_rules,
    }
}

static CITIES: [CityRegulation; 24] = [
    city(
        "JKT-C",
        "Jakarta Central",
        (40.0, 55.0),
        (1.2, 3.0),
        4,
        120.0,
        JAKARTA_CENTRAL_PARKING,
        Setbacks::new(6.0, 2.5, 3.0),
        &[
            "Premium building materials required in CBD area",
            "Minimum 35% green space in Menteng area",
            "Heritage building preservation rules in Kota Tua",
            "TOD parking reduction only applies with dedicated pedestrian access",
        ],
    ),
    city(
        "JKT-S",
        "Jakarta South",
        (40.0, 60.0),
        (1.0, 2.8),
        4,
        100.0,
        ParkingRequirement::flat(0.35),
        Setbacks::new(5.0, 2.0, 2.5),
        &[
            "Extra drainage requirements in flood-prone areas",
            "Green building certification for sites > 500m²",
        ],
    ),
    city(
        "JKT-E",
        "Jakarta East",
        (45.0, 65.0),
        (1.0, 2.6),
        4,
        90.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(5.0, 2.0, 2.0),
        &[
            "Industrial zone buffer requirements",
            "Additional noise insulation near airport",
        ],
    ),
    city(
        "JKT-N",
        "Jakarta North",
        (40.0, 60.0),
        (1.0, 2.4),
        3,
        100.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(5.0, 2.0, 2.0),
        &[
            "Coastal zone building restrictions",
            "Extra foundation requirements in reclamation areas",
        ],
    ),
    city(
        "JKT-W",
        "Jakarta West",
        (45.0, 65.0),
        (1.0, 2.6),
        4,
        95.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(5.0, 2.0, 2.0),
        &[
            "Transit-oriented development incentives near MRT",
            "Additional parking for commercial areas",
        ],
    ),
    city(
        "BDG",
        "Bandung Central",
        (45.0, 70.0),
        (0.9, 2.4),
        3,
        80.0,
        ParkingRequirement::flat(0.25),
        Setbacks::new(4.0, 1.5, 2.0),
        &[
            "Heritage zone restrictions in Braga area",
            "Art deco façade requirements in historic district",
        ],
    ),
    city(
        "BDG-N",
        "Bandung North",
        (40.0, 65.0),
        (0.8, 2.0),
        3,
        90.0,
        ParkingRequirement::flat(0.2),
        Setbacks::new(5.0, 2.0, 2.0),
        &[
            "Hill slope construction restrictions",
            "View corridor preservation rules",
        ],
    ),
    city(
        "BDG-S",
        "Bandung South",
        (45.0, 70.0),
        (0.9, 2.2),
        3,
        85.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(4.0, 1.5, 2.0),
        &[
            "Educational zone specific requirements",
            "Student housing density restrictions",
        ],
    ),
    city(
        "YOG",
        "Yogyakarta City",
        (50.0, 75.0),
        (0.8, 2.0),
        3,
        60.0,
        ParkingRequirement::flat(0.2),
        Setbacks::new(3.0, 1.5, 1.5),
        &[
            "Kraton cultural heritage zone restrictions",
            "Traditional Javanese architectural elements required",
        ],
    ),
    city(
        "SLM",
        "Sleman",
        (50.0, 80.0),
        (0.8, 2.2),
        3,
        70.0,
        ParkingRequirement::flat(0.25),
        Setbacks::new(4.0, 1.5, 2.0),
        &[
            "University area development guidelines",
            "Volcanic hazard zone restrictions",
        ],
    ),
    city(
        "BTL",
        "Bantul",
        (55.0, 80.0),
        (0.7, 1.8),
        2,
        65.0,
        ParkingRequirement::flat(0.2),
        Setbacks::new(3.0, 1.5, 1.5),
        &[
            "Rural area development guidelines",
            "Agricultural land preservation rules",
        ],
    ),
    city(
        "SBY",
        "Surabaya Central",
        (40.0, 65.0),
        (1.0, 2.8),
        4,
        90.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(4.0, 2.0, 2.0),
        &[
            "Commercial zone specific requirements",
            "Heritage building preservation in old town",
        ],
    ),
    city(
        "SBY-W",
        "Surabaya West",
        (45.0, 70.0),
        (0.9, 2.4),
        3,
        85.0,
        ParkingRequirement::flat(0.25),
        Setbacks::new(4.0, 2.0, 2.0),
        &[
            "Industrial buffer zone requirements",
            "Port area development restrictions",
        ],
    ),
    city(
        "SBY-E",
        "Surabaya East",
        (45.0, 70.0),
        (1.0, 2.6),
        4,
        85.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(4.0, 2.0, 2.0),
        &["Coastal development guidelines", "New CBD area incentives"],
    ),
    city(
        "DPS",
        "Denpasar",
        (50.0, 65.0),
        (0.8, 2.0),
        3,
        70.0,
        ParkingRequirement::flat(0.25),
        Setbacks::new(4.0, 2.0, 2.0),
        &[
            "Traditional Balinese architecture requirements",
            "Temple zone height restrictions",
        ],
    ),
    city(
        "BTB",
        "Badung",
        (45.0, 60.0),
        (0.8, 1.8),
        3,
        80.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(5.0, 2.0, 2.0),
        &[
            "Tourist area development guidelines",
            "Beach setback requirements",
        ],
    ),
    city(
        "GYR",
        "Gianyar",
        (50.0, 70.0),
        (0.7, 1.6),
        2,
        75.0,
        ParkingRequirement::flat(0.2),
        Setbacks::new(4.0, 2.0, 2.0),
        &[
            "Cultural heritage preservation rules",
            "Rice field view preservation",
        ],
    ),
    city(
        "MLG",
        "Malang",
        (45.0, 70.0),
        (0.8, 2.2),
        3,
        75.0,
        ParkingRequirement::flat(0.2),
        Setbacks::new(3.5, 1.5, 2.0),
        &[
            "University area specific requirements",
            "Colonial architecture preservation",
        ],
    ),
    city(
        "SMG",
        "Semarang",
        (40.0, 65.0),
        (0.9, 2.4),
        4,
        85.0,
        ParkingRequirement::flat(0.25),
        Setbacks::new(4.0, 2.0, 2.0),
        &[
            "Coastal flood zone requirements",
            "Old town heritage preservation",
        ],
    ),
    city(
        "PKU",
        "Pekanbaru",
        (45.0, 70.0),
        (0.8, 2.2),
        3,
        80.0,
        ParkingRequirement::flat(0.25),
        Setbacks::new(4.0, 2.0, 2.0),
        &[
            "Peatland construction restrictions",
            "Fire safety requirements",
        ],
    ),
    city(
        "PDG",
        "Padang",
        (40.0, 65.0),
        (0.8, 2.0),
        3,
        85.0,
        ParkingRequirement::flat(0.25),
        Setbacks::new(4.0, 2.0, 2.0),
        &[
            "Tsunami evacuation requirements",
            "Earthquake resistant construction",
        ],
    ),
    city(
        "BKS",
        "Bekasi",
        (45.0, 70.0),
        (1.0, 2.6),
        4,
        90.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(5.0, 2.0, 2.0),
        &[
            "Industrial area buffer requirements",
            "Transit-oriented development incentives",
        ],
    ),
    city(
        "TNG",
        "Tangerang",
        (45.0, 70.0),
        (1.0, 2.6),
        4,
        90.0,
        ParkingRequirement::flat(0.3),
        Setbacks::new(5.0, 2.0, 2.0),
        &[
            "Airport zone noise insulation requirements",
            "Modern township development guidelines",
        ],
    ),
    city(
        DEFAULT_CODE,
        "Default",
        (40.0, 70.0),
        (0.8, 2.4),
        3,
        80.0,
        ParkingRequirement::flat(0.25),
        Setbacks::new(4.0, 2.0, 2.0),
        &[],
    ),
];

impl CityRegulation {
    /// Exact lookup by city code.
    pub fn lookup(code: &str) -> Option<&'static CityRegulation> {
        CITIES.iter().find(|c| c.code == code)
    }

    /// Lookup that falls back to the `default` entry for unknown codes.
    pub fn resolve(code: &str) -> &'static CityRegulation {
        Self::lookup(code).unwrap_or_else(Self::fallback)
    }

    /// The `default` entry.
    pub fn fallback() -> &'static CityRegulation {
        &CITIES[CITIES.len() - 1]
    }

    /// Every known city code, `default` last.
    pub fn codes() -> impl Iterator<Item = &'static str> {
        CITIES.iter().map(|c| c.code)
    }

    /// Whether the entry belongs to the Jakarta special region.
    pub fn is_jakarta(&self) -> bool {
        self.code.starts_with("JKT")
    }
}
