#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line client for the AIGIS ground-water analysis API.
//!
//! Wraps every API operation in a subcommand: analysis and prediction
//! from JSON input files, report generation, and dataset listing and
//! download. The backend is taken from `--base-url`, then
//! `AIGIS_API_URL`, then the built-in production URL.

mod datasets;
mod notify;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aigis_api::models::{PredictionInputData, ServerAnalysisResponse, WaterInputData};
use aigis_api::{ApiClient, ApiConfig};
use clap::{Parser, Subcommand};
use console::style;
use serde::de::DeserializeOwned;

#[derive(Parser)]
#[command(name = "aigis", about = "Client for the AIGIS ground-water analysis API")]
struct Cli {
    /// Backend base URL (overrides `AIGIS_API_URL`)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the backend banner
    Info,
    /// Analyze water measurements read from a JSON file
    Analyze {
        /// `WaterInputData` JSON file
        input: PathBuf,
    },
    /// Predict water quality and levels after projected changes
    Predict {
        /// `WaterInputData` JSON file with current measurements
        existing: PathBuf,
        /// `PredictionInputData` JSON file with projected changes
        prediction: PathBuf,
    },
    /// Generate a report from an analysis and print its URL
    Report {
        /// Analysis JSON file (`quality_analysis`, `level_analysis`)
        analysis: PathBuf,
        /// Language the report is written in
        #[arg(long, default_value = "English")]
        language: String,
        /// Why the report is being requested
        #[arg(long)]
        reason: String,
    },
    /// List or download ground-water datasets
    Datasets {
        #[command(subcommand)]
        command: datasets::DatasetCommands,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.base_url {
        Some(url) => ApiConfig::new(url)?,
        None => ApiConfig::from_env()?,
    };
    log::debug!("Using API at {}", config.base_url());
    let api = ApiClient::new(&config);

    match cli.command {
        Commands::Info => {
            let info = api.info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Analyze { input } => {
            let data: WaterInputData = read_json(&input)?;
            let analysis = api.analyze_water_data(&data).await?;
            print_analysis(&analysis);
        }
        Commands::Predict {
            existing,
            prediction,
        } => {
            let existing: WaterInputData = read_json(&existing)?;
            let prediction: PredictionInputData = read_json(&prediction)?;
            let analysis = api.predict_water_data(&existing, &prediction).await?;
            print_analysis(&analysis);
        }
        Commands::Report {
            analysis,
            language,
            reason,
        } => {
            let analysis: ServerAnalysisResponse = read_json(&analysis)?;
            let url = api.generate_report(&analysis, &language, &reason).await?;
            println!("{url}");
        }
        Commands::Datasets { command } => return datasets::run(&api, command).await,
    }

    Ok(ExitCode::SUCCESS)
}

/// Reads and deserializes a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    Ok(value)
}

fn print_analysis(analysis: &ServerAnalysisResponse) {
    println!("{}", style("Quality analysis").bold().cyan());
    println!("{}", analysis.quality_analysis);
    println!();
    println!("{}", style("Level analysis").bold().cyan());
    println!("{}", analysis.level_analysis);
}
