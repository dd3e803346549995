//! CLI definition and dispatch.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_report_adapter::ConsoleReportAdapter;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::run_backtest;
use crate::domain::config_validation::validate_run_config;
use crate::domain::error::TrendtraderError;
use crate::domain::metrics::RunSummary;
use crate::domain::params::ParameterSet;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

const DEFAULT_DATA_OUTPUT: &str = "simulation_data.csv";
const DEFAULT_SUMMARY_OUTPUT: &str = "simulation_log.csv";

#[derive(Parser, Debug)]
#[command(name = "trendtrader", about = "Trend-following strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Price CSV, overrides [data] prices
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Per-bar output CSV, overrides [report] data_output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Summary log CSV, overrides [report] summary_output
        #[arg(short, long)]
        summary: Option<PathBuf>,
        /// Stop after validating config and loading prices
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a run configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the date range of a price file
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            output,
            summary,
            dry_run,
        } => run_backtest_command(&config, data, output, summary, dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data } => run_info(&data),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TrendtraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Assemble the parameter set from a validated config.
pub fn build_parameter_set(config: &dyn ConfigPort) -> ParameterSet {
    ParameterSet {
        small_window: config.get_int("strategy", "small_window", 0) as usize,
        medium_window: config.get_int("strategy", "medium_window", 0) as usize,
        large_window: config.get_int("strategy", "large_window", 0) as usize,
        slope_window: config.get_int("strategy", "slope_window", 0) as usize,
        slope_min: config.get_double("strategy", "slope_min", 0.0),
        stop_loss: config.get_double("strategy", "stop_loss", 0.0),
        initial_cash: config.get_double("backtest", "initial_cash", 0.0),
    }
}

/// Resolve the price file path: CLI flag first, then `[data] prices`.
pub fn resolve_data_path(
    override_path: Option<PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, TrendtraderError> {
    match override_path {
        Some(path) => Ok(path),
        None => config
            .get_string("data", "prices")
            .map(PathBuf::from)
            .ok_or_else(|| TrendtraderError::ConfigMissing {
                section: "data".into(),
                key: "prices".into(),
            }),
    }
}

fn run_backtest_command(
    config_path: &PathBuf,
    data_override: Option<PathBuf>,
    output_override: Option<PathBuf>,
    summary_override: Option<PathBuf>,
    dry_run: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_run_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = build_parameter_set(&config);
    if let Err(e) = params.validate() {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let data_path = match resolve_data_path(data_override, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Loading prices from {}", data_path.display());
    let series = match CsvAdapter::new(data_path).fetch_prices() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} bars", series.len());

    if dry_run {
        eprintln!("Dry run complete");
        return ExitCode::SUCCESS;
    }

    eprintln!(
        "Running backtest ({}/{}/{} windows, slope {})",
        params.small_window, params.medium_window, params.large_window, params.slope_window
    );
    let result = match run_backtest(&series, &params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let summary = match RunSummary::compute(&result, &params) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let console = ConsoleReportAdapter;
    if let Err(e) = console.write_summary(&summary, &timestamp) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let data_output = output_override
        .or_else(|| config.get_string("report", "data_output").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_OUTPUT));
    let summary_output = summary_override
        .or_else(|| {
            config
                .get_string("report", "summary_output")
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SUMMARY_OUTPUT));

    let reporter = CsvReportAdapter::new(data_output.clone(), summary_output.clone());
    if let Err(e) = reporter.write_bars(&result) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Simulation data saved to {}", data_output.display());

    if let Err(e) = reporter.write_summary(&summary, &timestamp) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Summary appended to {}", summary_output.display());

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_run_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = build_parameter_set(&config);
    if let Err(e) = params.validate() {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Configuration OK");
    ExitCode::SUCCESS
}

fn run_info(data_path: &PathBuf) -> ExitCode {
    let series = match CsvAdapter::new(data_path.clone()).fetch_prices() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match (series.first(), series.last()) {
        (Some(first), Some(last)) => {
            println!(
                "{}: {} bars from {} to {}",
                data_path.display(),
                series.len(),
                first.date,
                last.date
            );
        }
        _ => println!("{}: no usable bars", data_path.display()),
    }

    ExitCode::SUCCESS
}
