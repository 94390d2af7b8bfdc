#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ground-water dataset registry and download helper.
//!
//! The registry is a fixed list of dataset descriptors defined as TOML files
//! embedded at compile time. The download helper asks the API where a
//! dataset's CSV lives, fetches it, and hands the bytes to a [`FileSaver`].
//! Download failures never propagate: they are logged and reported to the
//! user through a [`Notifier`].

pub mod download;
pub mod registry;
pub mod save;

pub use aigis_datasets_models::{Dataset, DatasetCategory};
pub use download::{download_dataset, file_name_for};
pub use registry::{DATASETS, all_datasets, find};
pub use save::{CSV_CONTENT_TYPE, DirectorySaver, FileSaver, Notifier};

use thiserror::Error;

/// Errors that can occur while downloading a dataset.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The API could not resolve the dataset's blob URL.
    #[error(transparent)]
    Api(#[from] aigis_api::ApiError),

    /// The blob request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Blob storage answered with a non-2xx status.
    #[error("Failed to fetch dataset from blob storage: {status_text}")]
    BlobStatus {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Reason phrase for the status (e.g. `"Not Found"`).
        status_text: String,
    },

    /// The downloaded file could not be saved.
    #[error("Failed to save {file_name}: {source}")]
    Save {
        /// File name the dataset was being saved under.
        file_name: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
