use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use etgcalc::data::parser::read_sessions_csv;
use etgcalc::data::time::parse_datetime;
use etgcalc::prelude::*;
use etgcalc::estimate::estimates_to_csv;

#[derive(Parser)]
#[command(name = "etg")]
#[command(about = "Estimate urine EtG levels and test outcomes from drinking sessions", long_about = None)]
struct Cli {
    /// Scenario file (JSON) with profile, sessions, threshold and test time
    scenario: Option<PathBuf>,

    /// Read drinking sessions from a CSV file instead of the scenario
    #[arg(long)]
    sessions_csv: Option<PathBuf>,

    /// Estimation options file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset used when no options file is given
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,

    /// Evaluate as of this time (YYYY-MM-DDTHH:MM, default: local now)
    #[arg(long)]
    now: Option<String>,

    /// Override the scenario's test cutoff in ng/mL
    #[arg(long)]
    threshold: Option<f64>,

    /// Override the scenario's test time (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    test_time: Option<String>,

    /// How sessions are combined into one curve
    #[arg(long, value_enum)]
    model: Option<ModelArg>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    Conservative,
    Optimistic,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Aggregate,
    Superposition,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::from_json_file(path.to_string_lossy())
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::default(),
    };
    if let Some(path) = &cli.sessions_csv {
        scenario.sessions = read_sessions_csv(path.to_string_lossy())
            .with_context(|| format!("loading sessions {}", path.display()))?;
    }
    if let Some(threshold) = cli.threshold {
        scenario.threshold = threshold;
    }
    if let Some(text) = &cli.test_time {
        scenario.test_time = Some(datetime_arg("--test-time", text)?);
    }

    let mut options = match &cli.config {
        Some(path) => EstimateOptions::from_json_file(path.to_string_lossy())
            .with_context(|| format!("loading options {}", path.display()))?,
        None => match cli.preset {
            Preset::Default => EstimateOptions::default(),
            Preset::Conservative => EstimateOptions::conservative(),
            Preset::Optimistic => EstimateOptions::optimistic(),
        },
    };
    if let Some(model) = cli.model {
        options = options.with_model(match model {
            ModelArg::Aggregate => CurveModel::Aggregate,
            ModelArg::Superposition => CurveModel::Superposition,
        });
    }

    let now = match &cli.now {
        Some(text) => datetime_arg("--now", text)?,
        None => chrono::Local::now().naive_local(),
    };
    tracing::info!(
        sessions = scenario.sessions.len(),
        threshold = scenario.threshold,
        %now,
        "running estimate"
    );

    let result = scenario.estimate_at(now, &options)?;

    match cli.format {
        Format::Text => print!("{}", result),
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Csv => print!("{}", estimates_to_csv(std::slice::from_ref(&result))?),
    }
    Ok(())
}

fn datetime_arg(flag: &str, text: &str) -> Result<NaiveDateTime> {
    parse_datetime(text).ok_or_else(|| anyhow!("{flag}: cannot parse '{text}' as a date and time"))
}
