//! Metrics aggregation: yield, OPEX, revenue and CAPEX in dependency order.

use serde::{Serialize, Serializer};

use super::cost::{CapexBreakdown, OpexBreakdown, capex_breakdown, opex_annual};
use super::revenue::revenue_annual;
use super::site_yield::{YieldOutcome, compute_yield};
use super::types::{DebtConfig, Scenario};

/// Headline profitability figures for one scenario evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub rooms_total: u32,
    /// Total CAPEX (Rp).
    pub capex: f64,
    /// Finalized annual OPEX (Rp/year).
    pub opex: f64,
    /// Annual revenue (Rp/year).
    pub revenue: f64,
    /// `revenue − opex`.
    pub ebitda: f64,
    /// `ebitda / capex` as a decimal fraction; 0 when CAPEX is not positive.
    pub roi: f64,
    /// `capex / ebitda`; infinite when EBITDA is not positive.
    #[serde(serialize_with = "finite_or_null")]
    pub payback_years: f64,
    /// Annual debt service when financing is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_service: Option<f64>,
    /// `ebitda / debt_service` when debt service is positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscr: Option<f64>,
}

/// Full output of one aggregator pass, including itemized intermediates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub yield_outcome: YieldOutcome,
    pub capex: CapexBreakdown,
    pub opex: OpexBreakdown,
    pub revenue: f64,
    pub metrics: Metrics,
}

/// Evaluates a scenario.
///
/// The ordering resolves the OPEX/revenue circularity without iteration:
/// 1. yield and reconciled rooms
/// 2. provisional OPEX (percentage marketing as zero)
/// 3. revenue from reconciled rooms
/// 4. OPEX finalized with percentage marketing
/// 5. CAPEX, whose working capital needs the finalized OPEX
pub fn evaluate(scenario: &Scenario) -> Evaluation {
    let yield_outcome = compute_yield(scenario);
    let provisional = opex_annual(scenario, yield_outcome.usable_gross, yield_outcome.rooms_total);
    let revenue = revenue_annual(scenario, &yield_outcome.rooms);
    let opex = provisional.finalize_marketing(&scenario.opex.marketing, revenue);
    let opex_total = opex.total();
    let capex = capex_breakdown(scenario, &yield_outcome, opex_total);
    let capex_total = capex.total();

    let ebitda = revenue - opex_total;
    let roi = if capex_total > 0.0 {
        ebitda / capex_total
    } else {
        0.0
    };
    let payback_years = if ebitda > 0.0 {
        capex_total / ebitda
    } else {
        f64::INFINITY
    };

    let debt_service = scenario
        .debt
        .as_ref()
        .map(|debt| annual_debt_service(capex_total * debt.ltv_pct / 100.0, debt));
    let dscr = debt_service.and_then(|ds| (ds > 0.0).then(|| ebitda / ds));

    tracing::debug!(
        scenario = %scenario.name,
        rooms = yield_outcome.rooms_total,
        capex = capex_total,
        opex = opex_total,
        revenue,
        roi,
        "evaluated scenario"
    );

    Evaluation {
        metrics: Metrics {
            rooms_total: yield_outcome.rooms_total,
            capex: capex_total,
            opex: opex_total,
            revenue,
            ebitda,
            roi,
            payback_years,
            debt_service,
            dscr,
        },
        yield_outcome,
        capex,
        opex,
        revenue,
    }
}

/// Shorthand for `evaluate(scenario).metrics`.
pub fn compute_metrics(scenario: &Scenario) -> Metrics {
    evaluate(scenario).metrics
}

/// Annual payment on an amortizing loan.
///
/// Uses the annuity formula `P·r / (1 − (1+r)^−n)`; a non-positive rate or
/// term falls back to straight-line `P / max(1, n)`.
///
/// # Examples
///
/// ```
/// use kost_sim::finance::metrics::annual_debt_service;
/// use kost_sim::finance::types::DebtConfig;
///
/// let zero_rate = DebtConfig { ltv_pct: 50.0, rate_pct: 0.0, years: 4 };
/// assert_eq!(annual_debt_service(1_000.0, &zero_rate), 250.0);
/// ```
pub fn annual_debt_service(principal: f64, debt: &DebtConfig) -> f64 {
    let r = debt.rate_pct / 100.0;
    let n = debt.years;
    if r <= 0.0 || n == 0 {
        return principal / f64::from(n.max(1));
    }
    let n = i32::try_from(n).unwrap_or(i32::MAX);
    principal * r / (1.0 - (1.0 + r).powi(-n))
}

fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}
