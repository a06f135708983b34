//! Results assembly: base metrics plus chart series.

use std::fmt;

use serde::Serialize;

use super::metrics::{Evaluation, Metrics, evaluate};
use super::sensitivity::{RoiPoint, TornadoItem, roi_vs_rooms, tornado};
use super::types::Scenario;
use crate::currency::format_idr;

/// Number of years shown on the breakeven timeline.
pub const BREAKEVEN_YEARS: u32 = 3;

/// Cumulative position at the end of a year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakevenPoint {
    pub year: u32,
    /// `−capex + year × ebitda`.
    pub cumulative: f64,
}

/// Chart series consumed by renderers and exporters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub roi_vs_rooms: Vec<RoiPoint>,
    pub tornado: Vec<TornadoItem>,
    pub breakeven: Vec<BreakevenPoint>,
}

/// Complete simulation output for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    #[serde(flatten)]
    pub metrics: Metrics,
    pub charts: Charts,
}

/// Cumulative cash position for years `1..=years`.
pub fn breakeven_timeline(metrics: &Metrics, years: u32) -> Vec<BreakevenPoint> {
    (1..=years)
        .map(|year| BreakevenPoint {
            year,
            cumulative: -metrics.capex + f64::from(year) * metrics.ebitda,
        })
        .collect()
}

/// Runs the base evaluation and both sensitivity sweeps.
pub fn simulate(scenario: &Scenario) -> Results {
    simulate_with_evaluation(scenario).1
}

/// Like [`simulate`], also returning the itemized base evaluation.
pub fn simulate_with_evaluation(scenario: &Scenario) -> (Evaluation, Results) {
    let evaluation = evaluate(scenario);
    let charts = Charts {
        roi_vs_rooms: roi_vs_rooms(scenario),
        tornado: tornado(scenario),
        breakeven: breakeven_timeline(&evaluation.metrics, BREAKEVEN_YEARS),
    };
    tracing::debug!(
        scenario = %scenario.name,
        curve_points = charts.roi_vs_rooms.len(),
        "simulation complete"
    );
    let results = Results {
        metrics: evaluation.metrics.clone(),
        charts,
    };
    (evaluation, results)
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        writeln!(f, "--- Feasibility Report ---")?;
        writeln!(f, "Rooms total:           {}", m.rooms_total)?;
        writeln!(f, "CAPEX total:           Rp {}", format_idr(m.capex))?;
        writeln!(f, "OPEX annual:           Rp {}", format_idr(m.opex))?;
        writeln!(f, "Revenue annual:        Rp {}", format_idr(m.revenue))?;
        writeln!(f, "EBITDA:                Rp {}", format_idr(m.ebitda))?;
        writeln!(f, "ROI:                   {:.2}%", m.roi * 100.0)?;
        if m.payback_years.is_finite() {
            writeln!(f, "Payback:               {:.1} years", m.payback_years)?;
        } else {
            writeln!(f, "Payback:               never")?;
        }
        if let Some(dscr) = m.dscr {
            writeln!(f, "DSCR:                  {dscr:.2}")?;
        }
        if let Some(peak) = super::sensitivity::peak_roi(&self.charts.roi_vs_rooms) {
            writeln!(
                f,
                "Peak ROI:              {:.2}% at {} rooms",
                peak.roi * 100.0,
                peak.rooms
            )?;
        }
        writeln!(f, "\n--- Sensitivity (ROI change) ---")?;
        for item in &self.charts.tornado {
            writeln!(f, "{:<18} {:>+8.2}%", item.key, item.delta_roi_pct)?;
        }
        writeln!(f, "\n--- Breakeven ---")?;
        for (i, point) in self.charts.breakeven.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "Year {}: Rp {}",
                point.year,
                format_idr(point.cumulative)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(capex: f64, ebitda: f64) -> Metrics {
        Metrics {
            rooms_total: 10,
            capex,
            opex: 0.0,
            revenue: ebitda,
            ebitda,
            roi: if capex > 0.0 { ebitda / capex } else { 0.0 },
            payback_years: if ebitda > 0.0 {
                capex / ebitda
            } else {
                f64::INFINITY
            },
            debt_service: None,
            dscr: None,
        }
    }

    #[test]
    fn breakeven_accumulates_ebitda() {
        let points = breakeven_timeline(&metrics(1_000.0, 400.0), BREAKEVEN_YEARS);
        let cumulative: Vec<f64> = points.iter().map(|p| p.cumulative).collect();
        assert_eq!(cumulative, vec![-600.0, -200.0, 200.0]);
        assert_eq!(points[2].year, 3);
    }

    #[test]
    fn display_handles_infinite_payback() {
        let results = Results {
            metrics: metrics(1_000.0, -5.0),
            charts: Charts {
                roi_vs_rooms: vec![],
                tornado: vec![],
                breakeven: breakeven_timeline(&metrics(1_000.0, -5.0), 1),
            },
        };
        let s = results.to_string();
        assert!(s.contains("Payback:               never"));
        assert!(s.contains("Year 1:"));
    }

    #[test]
    fn results_serialize_flat() {
        let results = Results {
            metrics: metrics(1_000.0, 400.0),
            charts: Charts {
                roi_vs_rooms: vec![RoiPoint { rooms: 5, roi: 0.4 }],
                tornado: vec![],
                breakeven: vec![],
            },
        };
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["rooms_total"], 10);
        assert_eq!(json["charts"]["roi_vs_rooms"][0]["rooms"], 5);
    }
}
