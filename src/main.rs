//! kost-sim entry point: CLI wiring and config-driven feasibility run.

use std::path::Path;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use kost_sim::adapter::FormState;
use kost_sim::cli::{self, CliOptions};
use kost_sim::config::{ConfigError, ProjectConfig};
use kost_sim::finance::engine::simulate_with_evaluation;
use kost_sim::io::export::export_csv;
use kost_sim::regulation::city::DEFAULT_CODE;
use kost_sim::regulation::{CityRegulation, calculate_parking_requirement, validate_land_rules};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the project: `--scenario`, then `--form`, then `--preset`.
fn load_project(cli: &CliOptions) -> Result<ProjectConfig, ConfigError> {
    if let Some(ref path) = cli.scenario {
        ProjectConfig::from_toml_file(path)
    } else if let Some(ref path) = cli.form {
        let form = FormState::from_json_file(path)?;
        let city = cli.city.as_deref().unwrap_or(DEFAULT_CODE);
        Ok(ProjectConfig::from_form(&form, city))
    } else {
        ProjectConfig::from_preset(cli.preset.as_deref().unwrap_or(cli::DEFAULT_PRESET))
    }
}

fn main() {
    init_tracing();

    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        process::exit(0);
    }

    let mut project = load_project(&cli).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(ref code) = cli.city {
        project.project.city = code.clone();
    }
    if let Some(area_type) = cli.area_type {
        project.project.area_type = area_type;
    }

    let errors = project.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let scenario = project.to_scenario();
    info!(name = %project.project.name, city = %scenario.city, "running feasibility");
    let (evaluation, results) = simulate_with_evaluation(&scenario);

    let city = CityRegulation::resolve(&scenario.city);
    if city.code != scenario.city {
        info!(requested = %scenario.city, "unknown city code, using default regulation");
    }
    let parking = calculate_parking_requirement(
        results.metrics.rooms_total,
        &city.parking,
        &project.transport,
        project.project.area_type,
    );
    let validation = validate_land_rules(&scenario, project.site.parking_spots, city);

    if cli.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize results: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{}\n", project.project.name);
        println!("{results}");
        println!("\n{parking}");
        println!("\n{validation}");
    }

    if let Some(ref path) = cli.export {
        if let Err(e) = export_csv(&evaluation, &results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Results written to {}", path.display());
    }

    if cli.serve {
        serve(project.project.name, scenario, results, parking, validation, cli.port);
    }
}

#[cfg(feature = "api")]
fn serve(
    name: String,
    scenario: kost_sim::finance::Scenario,
    results: kost_sim::finance::Results,
    parking: kost_sim::regulation::ParkingAssessment,
    validation: kost_sim::regulation::ValidationReport,
    port: u16,
) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(kost_sim::api::AppState {
        name,
        scenario,
        results,
        parking,
        validation,
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(kost_sim::api::serve(state, addr)) {
        eprintln!("error: API server failed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(
    _name: String,
    _scenario: kost_sim::finance::Scenario,
    _results: kost_sim::finance::Results,
    _parking: kost_sim::regulation::ParkingAssessment,
    _validation: kost_sim::regulation::ValidationReport,
    _port: u16,
) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}
