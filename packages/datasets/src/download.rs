//! Dataset download helper.
//!
//! Resolves a dataset's blob URL through the API, fetches the CSV, and
//! hands it to a [`FileSaver`]. Every failure is caught here, logged, and
//! reported through the [`Notifier`] exactly once.

use std::sync::LazyLock;

use aigis_api::ApiClient;
use aigis_datasets_models::Dataset;
use regex::Regex;

use crate::save::{CSV_CONTENT_TYPE, FileSaver, Notifier};
use crate::DownloadError;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").unwrap_or_else(|e| panic!("Invalid whitespace pattern: {e}"))
});

/// Derives the saved file name from a dataset title: lower-cased, each run
/// of whitespace replaced by `-`, with a `.csv` suffix.
///
/// ```
/// # use aigis_datasets::{file_name_for, find};
/// let dataset = find("gwq").unwrap();
/// assert_eq!(file_name_for(dataset), "ground-water-quality-dataset.csv");
/// ```
#[must_use]
pub fn file_name_for(dataset: &Dataset) -> String {
    let lower = dataset.title.to_lowercase();
    format!("{}.csv", WHITESPACE_RE.replace_all(&lower, "-"))
}

/// Downloads a dataset and saves it through `saver`.
///
/// Returns the file name the dataset was saved under, or `None` if any
/// step failed. Failures do not propagate: they are logged and the user is
/// alerted through `notifier`.
pub async fn download_dataset(
    api: &ApiClient,
    dataset: &Dataset,
    saver: &dyn FileSaver,
    notifier: &dyn Notifier,
) -> Option<String> {
    log::info!("Downloading {}...", dataset.title);

    match fetch_and_save(api, dataset, saver).await {
        Ok(file_name) => {
            log::info!("Successfully downloaded {}", dataset.title);
            Some(file_name)
        }
        Err(e) => {
            log::error!("Error downloading {}: {e}", dataset.title);
            notifier.alert(&format!(
                "Failed to download {}. Please try again.",
                dataset.title
            ));
            None
        }
    }
}

async fn fetch_and_save(
    api: &ApiClient,
    dataset: &Dataset,
    saver: &dyn FileSaver,
) -> Result<String, DownloadError> {
    let blob_url = api.download_dataset(&dataset.id).await?;
    log::info!("Backend returned blob URL: {blob_url}");

    let resp = api.http().get(&blob_url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DownloadError::BlobStatus {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    let csv = resp.text().await?;
    log::debug!("Fetched {} bytes from {blob_url}", csv.len());

    let file_name = file_name_for(dataset);
    saver
        .save(&file_name, CSV_CONTENT_TYPE, csv.as_bytes())
        .map_err(|source| DownloadError::Save {
            file_name: file_name.clone(),
            source,
        })?;

    Ok(file_name)
}
