//! CSV export of a simulation run.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::finance::engine::Results;
use crate::finance::metrics::Evaluation;

/// Column header of the export.
const HEADER: [&str; 3] = ["section", "key", "value"];

/// Exports a run to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(evaluation: &Evaluation, results: &Results, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(evaluation, results, buf)
}

/// Writes a run as `section,key,value` rows to any writer.
///
/// Sections appear in a fixed order: `summary`, `capex`, `opex`,
/// `roi_vs_rooms`, `tornado`, `breakeven`. Money is rounded to whole rupiah;
/// an infinite payback is written as `inf`.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(evaluation: &Evaluation, results: &Results, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;

    let m = &results.metrics;
    let mut summary = vec![
        ("rooms_total", m.rooms_total.to_string()),
        ("capex", money(m.capex)),
        ("opex", money(m.opex)),
        ("revenue", money(m.revenue)),
        ("ebitda", money(m.ebitda)),
        ("roi", format!("{:.6}", m.roi)),
        ("payback_years", format!("{:.4}", m.payback_years)),
    ];
    if let Some(ds) = m.debt_service {
        summary.push(("debt_service", money(ds)));
    }
    if let Some(dscr) = m.dscr {
        summary.push(("dscr", format!("{dscr:.4}")));
    }
    for (key, value) in &summary {
        wtr.write_record(["summary", *key, value.as_str()])?;
    }

    for (key, value) in evaluation.capex.items() {
        wtr.write_record(["capex", key, money(value).as_str()])?;
    }
    for (key, value) in evaluation.opex.items() {
        wtr.write_record(["opex", key, money(value).as_str()])?;
    }

    let charts = &results.charts;
    for p in &charts.roi_vs_rooms {
        let rooms = p.rooms.to_string();
        let roi = format!("{:.6}", p.roi);
        wtr.write_record(["roi_vs_rooms", rooms.as_str(), roi.as_str()])?;
    }
    for t in &charts.tornado {
        let delta = format!("{:.4}", t.delta_roi_pct);
        wtr.write_record(["tornado", t.key, delta.as_str()])?;
    }
    for b in &charts.breakeven {
        let year = b.year.to_string();
        wtr.write_record(["breakeven", year.as_str(), money(b.cumulative).as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

fn money(value: f64) -> String {
    format!("{:.0}", value.round())
}
