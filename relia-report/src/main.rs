// RELIA Report - Fleet reliability report
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # RELIA Report
//!
//! Generates a synthetic sensor fleet and prints its reliability report,
//! crew routing plan and replacement schedule.
//!
//! ## Usage
//!
//! ```bash
//! # Default 50-sensor fleet, text output
//! relia-report --seed 42
//!
//! # Degraded fleet as JSON, four crews
//! relia-report --scenario degraded --crews 4 --format json
//! ```

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use relia::report::{render_crews, render_replacements, render_routes};
use relia::{
    crew_status, plan_routes, replacement_schedule, CrewStatus, FleetConfig, FleetReport,
    MaintenanceTask, QueueConfig, ReliaError, ReplacementEntry,
};
use relia_testdata::{generate_fleet_with_config, FleetScenario, GeneratorError};
use serde::Serialize;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// RELIA fleet reliability report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Fleet scenario preset (nominal, aging, degraded)
    #[arg(long, default_value = "nominal")]
    scenario: FleetScenario,

    /// Number of sensors to generate
    #[arg(short = 'n', long, default_value = "50")]
    sensors: usize,

    /// Random seed for fleet generation and routing
    #[arg(short, long)]
    seed: Option<u64>,

    /// Horizon for the fleet reliability figure (hours)
    #[arg(long, default_value = "1000")]
    horizon: f64,

    /// Repair request arrival rate (per hour)
    #[arg(long, default_value = "0.05")]
    arrival_rate: f64,

    /// Repair service rate per crew (per hour)
    #[arg(long, default_value = "0.15")]
    service_rate: f64,

    /// Number of maintenance crews
    #[arg(short, long, default_value = "3")]
    crews: u32,

    /// Reference date for the replacement schedule (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Routing and replacement rows shown in text output
    #[arg(long, default_value = "10")]
    limit: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("fleet generation failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("{0}")]
    Relia(#[from] ReliaError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything printed in JSON mode.
#[derive(Serialize)]
struct FullReport<'a> {
    scenario: &'a str,
    seed: Option<u64>,
    reference_date: NaiveDate,
    report: &'a FleetReport,
    routes: &'a [MaintenanceTask],
    crews: &'a [CrewStatus],
    replacements: &'a [ReplacementEntry],
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("RELIA Report v{}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn fleet_config(args: &Args) -> FleetConfig {
    let mut config = FleetConfig {
        reliability_horizon: args.horizon,
        queue: QueueConfig {
            arrival_rate: args.arrival_rate,
            service_rate: args.service_rate,
            servers: args.crews,
        },
        ..FleetConfig::default()
    };
    config.maintenance.crews = (0..args.crews).map(crew_name).collect();
    config
}

/// CREW-A, CREW-B, ... CREW-Z, CREW-27, ...
fn crew_name(index: u32) -> String {
    match char::from_u32('A' as u32 + index) {
        Some(letter) if index < 26 => format!("CREW-{}", letter),
        _ => format!("CREW-{}", index + 1),
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let mut profile = args.scenario.profile().with_sensor_count(args.sensors);
    if let Some(seed) = args.seed {
        profile = profile.with_seed(seed);
    }

    let fleet = generate_fleet_with_config(&profile, fleet_config(args))?;
    info!(
        "Generated {} fleet: {} sensors",
        args.scenario,
        fleet.len()
    );

    let report = FleetReport::build(&fleet)?;

    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let maintenance = &fleet.config().maintenance;
    let routes = plan_routes(&fleet, maintenance, &mut rng);
    let crews = crew_status(maintenance, &routes);

    let reference_date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let replacements = replacement_schedule(&fleet, maintenance, reference_date)?;
    debug!(
        "{} routing tasks, {} replacement entries",
        routes.len(),
        replacements.len()
    );

    let output = match args.format {
        Format::Json => serde_json::to_string_pretty(&FullReport {
            scenario: args.scenario.name(),
            seed: args.seed,
            reference_date,
            report: &report,
            routes: &routes,
            crews: &crews,
            replacements: &replacements,
        })?,
        Format::Text => {
            let mut text = report.render_text();
            text.push_str(&render_routes(&routes, args.limit));
            text.push_str(&render_crews(&crews));
            text.push_str(&render_replacements(&replacements, args.limit));
            text
        }
    };

    Ok(output)
}
