//! Command-line argument parsing for the `kost-sim` binary.

use std::env;
use std::path::PathBuf;

use crate::regulation::AreaType;

/// Preset used when no project source is given.
pub const DEFAULT_PRESET: &str = "jakarta_24";

/// Port the API listens on unless `--port` is given.
pub const DEFAULT_PORT: u16 = 3000;

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    /// TOML project file.
    pub scenario: Option<PathBuf>,
    /// JSON form-state file.
    pub form: Option<PathBuf>,
    pub preset: Option<String>,
    /// City code override.
    pub city: Option<String>,
    pub area_type: Option<AreaType>,
    /// CSV export destination.
    pub export: Option<PathBuf>,
    /// Print results as JSON instead of the text report.
    pub json: bool,
    pub serve: bool,
    pub port: u16,
    pub help: bool,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_options(&args)
}

/// Parses an argument list (without the program name).
///
/// # Errors
///
/// Returns a message for unknown flags, missing or malformed values,
/// repeated flags, and more than one project source.
pub fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut form = None;
    let mut preset = None;
    let mut city = None;
    let mut area_type = None;
    let mut export = None;
    let mut json = false;
    let mut serve = false;
    let mut port = None;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--form" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --form (expected a JSON file path)")?;
                if form.replace(PathBuf::from(path)).is_some() {
                    return Err("--form provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--city" => {
                i += 1;
                let code = args.next_or_err(i, "missing value for --city (expected a city code)")?;
                if city.replace(code.to_string()).is_some() {
                    return Err("--city provided more than once".to_string());
                }
            }
            "--area-type" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --area-type (expected commercial, tourist, student or residential)",
                )?;
                if area_type.replace(raw.parse::<AreaType>()?).is_some() {
                    return Err("--area-type provided more than once".to_string());
                }
            }
            "--export" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --export (expected a file path)")?;
                if export.replace(PathBuf::from(path)).is_some() {
                    return Err("--export provided more than once".to_string());
                }
            }
            "--json" => json = true,
            "--serve" => serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let parsed = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                if port.replace(parsed).is_some() {
                    return Err("--port provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                return Ok(CliOptions {
                    help: true,
                    ..CliOptions::default()
                });
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    let sources = [scenario.is_some(), form.is_some(), preset.is_some()]
        .iter()
        .filter(|s| **s)
        .count();
    if sources > 1 {
        return Err(
            "arguments `--scenario`, `--form` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }
    if sources == 0 {
        preset = Some(DEFAULT_PRESET.to_string());
    }

    Ok(CliOptions {
        scenario,
        form,
        preset,
        city,
        area_type,
        export,
        json,
        serve,
        port: port.unwrap_or(DEFAULT_PORT),
        help: false,
    })
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            scenario: None,
            form: None,
            preset: Some(DEFAULT_PRESET.to_string()),
            city: None,
            area_type: None,
            export: None,
            json: false,
            serve: false,
            port: DEFAULT_PORT,
            help: false,
        }
    }
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

/// Prints usage to stderr.
pub fn print_usage() {
    eprintln!("kost-sim: boarding-house (kost) feasibility simulator");
    eprintln!();
    eprintln!("Usage: kost-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load project from TOML file");
    eprintln!("  --form <path>            Load project from JSON form state");
    eprintln!("  --preset <name>          Use a built-in preset (jakarta_24, yogya_16, form_default)");
    eprintln!("  --city <code>            Override the city regulation code");
    eprintln!("  --area-type <tag>        commercial | tourist | student | residential");
    eprintln!("  --export <path>          Write results to CSV");
    eprintln!("  --json                   Print results as JSON");
    eprintln!("  --serve                  Start REST API server after simulation (feature `api`)");
    eprintln!("  --port <u16>             API server port (default: {DEFAULT_PORT})");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario, --form or --preset is given, {DEFAULT_PRESET} is used.");
}
