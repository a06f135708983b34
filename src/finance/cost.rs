//! CAPEX and OPEX computation from itemized rates.

use serde::Serialize;

use super::site_yield::YieldOutcome;
use super::types::{LandAcquisition, Marketing, Scenario};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Itemized one-time capital expenditure (Rp).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CapexBreakdown {
    pub land: f64,
    pub structure: f64,
    pub shared: f64,
    pub fitout: f64,
    pub branding: f64,
    pub working_capital: f64,
}

impl CapexBreakdown {
    /// Sum of all line items.
    pub fn total(&self) -> f64 {
        self.land + self.structure + self.shared + self.fitout + self.branding + self.working_capital
    }

    /// Line items in display order.
    pub fn items(&self) -> [(&'static str, f64); 6] {
        [
            ("land", self.land),
            ("structure", self.structure),
            ("shared_area", self.shared),
            ("fitout", self.fitout),
            ("branding_launch", self.branding),
            ("working_capital", self.working_capital),
        ]
    }
}

/// Itemized annual operating expenditure (Rp/year).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OpexBreakdown {
    pub caretaker: f64,
    pub cleaning: f64,
    pub utilities: f64,
    pub internet: f64,
    pub maintenance: f64,
    pub tax_or_lease: f64,
    /// Zero for the percentage method until [`OpexBreakdown::finalize_marketing`] runs.
    pub marketing: f64,
}

impl OpexBreakdown {
    /// Sum of all line items.
    pub fn total(&self) -> f64 {
        self.caretaker
            + self.cleaning
            + self.utilities
            + self.internet
            + self.maintenance
            + self.tax_or_lease
            + self.marketing
    }

    /// Adds the percentage-of-revenue marketing spend once revenue is known.
    ///
    /// Flat marketing is already annualized and is left untouched.
    pub fn finalize_marketing(&self, marketing: &Marketing, revenue_annual: f64) -> Self {
        match marketing {
            Marketing::PctRevenue { pct } => Self {
                marketing: self.marketing + pct / 100.0 * revenue_annual,
                ..self.clone()
            },
            Marketing::Flat { .. } => self.clone(),
        }
    }

    /// Line items in display order.
    pub fn items(&self) -> [(&'static str, f64); 7] {
        [
            ("caretaker", self.caretaker),
            ("cleaning", self.cleaning),
            ("utilities", self.utilities),
            ("internet", self.internet),
            ("maintenance", self.maintenance),
            ("tax_or_lease", self.tax_or_lease),
            ("marketing", self.marketing),
        ]
    }
}

/// Land cost for the configured acquisition method.
pub fn land_cost(land: &LandAcquisition, site_area: f64) -> f64 {
    match land {
        LandAcquisition::Own { rp_per_sqm } => rp_per_sqm * site_area,
        LandAcquisition::Lease { rp_per_sqm, years } => rp_per_sqm * site_area * years,
        LandAcquisition::Flat { amount } => *amount,
    }
}

/// Provisional annual OPEX: percentage-based marketing contributes zero here.
pub fn opex_annual(scenario: &Scenario, usable_gross: f64, rooms_total: u32) -> OpexBreakdown {
    let o = &scenario.opex;
    let rooms = f64::from(rooms_total);
    let marketing = match o.marketing {
        Marketing::Flat { monthly } => monthly * MONTHS_PER_YEAR,
        Marketing::PctRevenue { .. } => 0.0,
    };
    OpexBreakdown {
        caretaker: o.caretaker_monthly * MONTHS_PER_YEAR,
        cleaning: o.cleaning_per_room_monthly * rooms * MONTHS_PER_YEAR,
        utilities: o.utilities_rp_per_sqm_monthly * usable_gross * MONTHS_PER_YEAR,
        internet: o.internet_monthly * MONTHS_PER_YEAR,
        maintenance: o.maintenance_per_room_monthly * rooms * MONTHS_PER_YEAR,
        tax_or_lease: o.pbb_or_lease_annual,
        marketing,
    }
}

/// Itemized CAPEX.
///
/// `opex_annual` must be the finalized OPEX total, since working capital is
/// sized in months of it.
pub fn capex_breakdown(
    scenario: &Scenario,
    yield_outcome: &YieldOutcome,
    opex_annual: f64,
) -> CapexBreakdown {
    let c = &scenario.capex;
    let efficiency = scenario.efficiency.value();
    let fitout = yield_outcome
        .rooms
        .iter()
        .map(|r| f64::from(r.units()) * r.fitout)
        .sum();

    CapexBreakdown {
        land: land_cost(&c.land, scenario.site_area),
        structure: c.structure_rp_per_sqm * yield_outcome.usable_gross,
        shared: c.shared_area_rp_per_sqm * yield_outcome.shared_area(efficiency),
        fitout,
        branding: c.branding_launch,
        working_capital: c.working_capital_months / MONTHS_PER_YEAR * opex_annual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::site_yield::compute_yield;
    use crate::finance::types::{
        CapexConfig, Corridor, Efficiency, OpexConfig, RevenueConfig, RoomModule, RoomType,
    };

    fn scenario() -> Scenario {
        Scenario {
            name: "test".into(),
            city: "default".into(),
            site_area: 100.0,
            kdb: 0.5,
            klb: 1.5,
            floors: 2,
            corridor: Corridor::Central,
            efficiency: Efficiency::new(0.8),
            rooms: vec![
                RoomModule::with_count(RoomType::Standard, 10.0, 1_000.0, 500.0, 4),
                RoomModule::with_count(RoomType::Premium, 20.0, 2_000.0, 1_000.0, 1),
            ],
            capex: CapexConfig {
                land: LandAcquisition::Own { rp_per_sqm: 10.0 },
                structure_rp_per_sqm: 100.0,
                shared_area_rp_per_sqm: 50.0,
                branding_launch: 700.0,
                working_capital_months: 6.0,
            },
            opex: OpexConfig {
                caretaker_monthly: 10.0,
                cleaning_per_room_monthly: 1.0,
                utilities_rp_per_sqm_monthly: 0.5,
                internet_monthly: 2.0,
                maintenance_per_room_monthly: 3.0,
                pbb_or_lease_annual: 40.0,
                marketing: Marketing::Flat { monthly: 5.0 },
            },
            revenue: RevenueConfig::default(),
            debt: None,
        }
    }

    #[test]
    fn land_methods() {
        assert_eq!(land_cost(&LandAcquisition::Own { rp_per_sqm: 2.0 }, 50.0), 100.0);
        assert_eq!(
            land_cost(
                &LandAcquisition::Lease {
                    rp_per_sqm: 2.0,
                    years: 3.0
                },
                50.0
            ),
            300.0
        );
        assert_eq!(land_cost(&LandAcquisition::Flat { amount: 9.0 }, 50.0), 9.0);
    }

    #[test]
    fn opex_annualizes_monthly_items() {
        let s = scenario();
        // gross = 100 * 0.5 * 2 = 100 m², 5 rooms
        let o = opex_annual(&s, 100.0, 5);
        assert_eq!(o.caretaker, 120.0);
        assert_eq!(o.cleaning, 60.0);
        assert_eq!(o.utilities, 600.0);
        assert_eq!(o.internet, 24.0);
        assert_eq!(o.maintenance, 180.0);
        assert_eq!(o.tax_or_lease, 40.0);
        assert_eq!(o.marketing, 60.0);
        assert_eq!(o.total(), 1084.0);
    }

    #[test]
    fn pct_marketing_is_zero_until_finalized() {
        let mut s = scenario();
        s.opex.marketing = Marketing::PctRevenue { pct: 10.0 };
        let provisional = opex_annual(&s, 100.0, 5);
        assert_eq!(provisional.marketing, 0.0);
        let finalized = provisional.finalize_marketing(&s.opex.marketing, 2_000.0);
        assert_eq!(finalized.marketing, 200.0);
        assert_eq!(finalized.total(), provisional.total() + 200.0);
    }

    #[test]
    fn flat_marketing_not_double_counted() {
        let s = scenario();
        let provisional = opex_annual(&s, 100.0, 5);
        let finalized = provisional.finalize_marketing(&s.opex.marketing, 1e9);
        assert_eq!(finalized, provisional);
    }

    #[test]
    fn capex_items() {
        let s = scenario();
        let y = compute_yield(&s);
        let c = capex_breakdown(&s, &y, 1_200.0);
        assert_eq!(c.land, 1_000.0);
        assert_eq!(c.structure, 10_000.0);
        assert!((c.shared - 50.0 * 100.0 * 0.2).abs() < 1e-9);
        assert_eq!(c.fitout, 3_000.0);
        assert_eq!(c.branding, 700.0);
        assert_eq!(c.working_capital, 600.0);
        assert!((c.total() - 16_300.0).abs() < 1e-9);
    }
}
