//! End-to-end runs of the `kost-sim` binary.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kost-sim"))
        .args(args)
        .output()
        .expect("kost-sim process should run")
}

fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("kost-sim-{}-{name}", std::process::id()))
}

fn parse_line<'a>(stdout: &'a str, label: &str) -> &'a str {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));
    line.split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"))
}

#[test]
fn default_run_prints_all_reports() {
    let stdout = run_ok(&[]);
    assert!(stdout.starts_with("Jakarta • 24-room Boutique"));
    assert!(stdout.contains("--- Feasibility Report ---"));
    assert_eq!(parse_line(&stdout, "Rooms total:"), "24");
    assert_eq!(parse_line(&stdout, "Payback:"), "never");
    assert!(stdout.contains("--- Sensitivity (ROI change) ---"));
    assert!(stdout.contains("--- Parking ---"));
    assert_eq!(parse_line(&stdout, "Required spots:"), "12");
    assert!(stdout.contains("error: kdb: KDB cannot exceed 55% in Jakarta Central"));
}

#[test]
fn presets_produce_distinct_results() {
    let jakarta = run_ok(&["--preset", "jakarta_24"]);
    let yogya = run_ok(&["--preset", "yogya_16"]);
    let form = run_ok(&["--preset", "form_default"]);
    assert_ne!(parse_line(&jakarta, "ROI:"), parse_line(&yogya, "ROI:"));
    assert_eq!(parse_line(&yogya, "Rooms total:"), "16");
    assert!(form.starts_with("Form scenario"));
}

#[test]
fn json_output_is_results_record() {
    let stdout = run_ok(&["--json"]);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(json["rooms_total"].as_u64(), Some(24));
    assert!(json["payback_years"].is_null());
    assert_eq!(json["charts"]["tornado"].as_array().map(Vec::len), Some(10));
    assert_eq!(json["charts"]["breakeven"].as_array().map(Vec::len), Some(3));
}

#[test]
fn scenario_file_with_financing_reports_dscr() {
    let stdout = run_ok(&["--scenario", "scenarios/bandung_leased.toml"]);
    assert!(stdout.starts_with("Bandung • Leased Student Kost"));
    assert!(stdout.contains("DSCR:"));
}

#[test]
fn city_override_changes_regulation() {
    let stdout = run_ok(&["--preset", "yogya_16", "--city", "SLM", "--area-type", "tourist"]);
    assert!(stdout.contains("Sleman"));
    assert!(!stdout.contains("Yogyakarta City"));
}

#[test]
fn form_file_runs_through_adapter() {
    let path = temp_path("form.json");
    fs::write(
        &path,
        r#"{
            "site_area": 600,
            "kdb": 55,
            "floors": 3,
            "rooms": [
                {"type": "standard", "size": 12, "rent": "1,8jt", "fitout": "10jt", "count": 20, "mix": 100}
            ],
            "opex": {"utilities": "4.000.000", "marketing": 500000}
        }"#,
    )
    .expect("temp form should be written");

    let stdout = run_ok(&["--form", path.to_str().unwrap_or_default(), "--city", "BDG"]);
    let _ = fs::remove_file(&path);
    assert!(stdout.starts_with("Form scenario"));
    assert_eq!(parse_line(&stdout, "Rooms total:"), "20");
    assert!(stdout.contains("Bandung"));
}

#[test]
fn export_writes_csv() {
    let path = temp_path("export.csv");
    run_ok(&["--preset", "yogya_16", "--export", path.to_str().unwrap_or_default()]);
    let content = fs::read_to_string(&path).expect("export file should exist");
    let _ = fs::remove_file(&path);
    assert_eq!(content.lines().next(), Some("section,key,value"));
    assert!(content.contains("summary,rooms_total,16"));
    assert!(content.contains("summary,payback_years,inf"));
    assert!(content.lines().any(|l| l.starts_with("roi_vs_rooms,8,")));
}

#[test]
fn invalid_invocations_fail() {
    let unknown = run(&["--frobnicate"]);
    assert!(!unknown.status.success());

    let preset = run(&["--preset", "nowhere"]);
    assert!(!preset.status.success());
    assert!(String::from_utf8_lossy(&preset.stderr).contains("config error: preset"));

    let both = run(&["--preset", "yogya_16", "--scenario", "scenarios/jakarta_24.toml"]);
    assert!(!both.status.success());
    assert!(String::from_utf8_lossy(&both.stderr).contains("mutually exclusive"));

    let missing = run(&["--scenario", "scenarios/missing.toml"]);
    assert!(!missing.status.success());
}

#[test]
fn help_exits_cleanly() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: kost-sim"));
}
