//! `aigis datasets` subcommands.
//!
//! Lists the registry, resolves blob URLs, and downloads datasets into a
//! local directory. When `download` is given no id, the user picks one
//! interactively.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aigis_api::ApiClient;
use aigis_datasets::{Dataset, DirectorySaver, Notifier};
use clap::Subcommand;
use console::style;
use dialoguer::Select;

use crate::notify::TerminalNotifier;

#[derive(Subcommand)]
pub enum DatasetCommands {
    /// List available datasets
    List,
    /// Print the storage URL for a dataset
    Url {
        /// Dataset id (e.g. `gwq`)
        id: String,
    },
    /// Download a dataset as CSV
    Download {
        /// Dataset id; prompts when omitted
        id: Option<String>,
        /// Directory to save into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

/// Runs a dataset subcommand.
///
/// A failed download has already been reported to the user through the
/// notifier, so it yields [`ExitCode::FAILURE`] instead of an error.
///
/// # Errors
///
/// Returns an error if the dataset id is unknown, the API call fails, or the
/// prompt cannot be shown.
pub async fn run(
    api: &ApiClient,
    command: DatasetCommands,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        DatasetCommands::List => {
            for dataset in aigis_datasets::all_datasets() {
                print_dataset(dataset);
            }
        }
        DatasetCommands::Url { id } => {
            let dataset = lookup(&id)?;
            let url = api.download_dataset(&dataset.id).await?;
            println!("{url}");
        }
        DatasetCommands::Download { id, out } => {
            let dataset = match id {
                Some(id) => lookup(&id)?,
                None => prompt_dataset()?,
            };

            let Some(path) = download(api, dataset, &out, &TerminalNotifier).await else {
                return Ok(ExitCode::FAILURE);
            };

            println!("Saved {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Downloads `dataset` into `out`, returning the saved file's path.
async fn download(
    api: &ApiClient,
    dataset: &Dataset,
    out: &Path,
    notifier: &dyn Notifier,
) -> Option<PathBuf> {
    let saver = DirectorySaver::new(out);
    let file_name = aigis_datasets::download_dataset(api, dataset, &saver, notifier).await?;
    Some(saver.dir().join(file_name))
}

fn lookup(id: &str) -> Result<&'static Dataset, Box<dyn std::error::Error>> {
    aigis_datasets::find(id).ok_or_else(|| {
        let known: Vec<&str> = aigis_datasets::all_datasets()
            .iter()
            .map(Dataset::id)
            .collect();
        format!("Unknown dataset '{id}' (available: {})", known.join(", ")).into()
    })
}

fn prompt_dataset() -> Result<&'static Dataset, Box<dyn std::error::Error>> {
    let datasets = aigis_datasets::all_datasets();
    let labels: Vec<&str> = datasets.iter().map(Dataset::title).collect();

    let idx = Select::new()
        .with_prompt("Which dataset?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(&datasets[idx])
}

fn print_dataset(dataset: &Dataset) {
    println!(
        "{}  {}",
        style(&dataset.id).bold().green(),
        style(&dataset.title).bold()
    );
    println!(
        "     {} | {} | {} | updated {}",
        dataset.category, dataset.format, dataset.size, dataset.last_updated
    );
    println!("     {}", dataset.description);
    println!("     {} fields: {}", dataset.fields.len(), dataset.fields.join(", "));
    println!();
}
