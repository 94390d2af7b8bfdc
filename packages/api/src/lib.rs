#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed HTTP client for the AIGIS water analysis API.
//!
//! Every operation is a single request/response exchange against the
//! configured base URL:
//!
//! | Operation | Endpoint |
//! |---|---|
//! | [`ApiClient::analyze_water_data`] | `POST /analyze` |
//! | [`ApiClient::predict_water_data`] | `POST /predict` |
//! | [`ApiClient::generate_report`] | `POST /gen_report` |
//! | [`ApiClient::download_dataset`] | `POST /get_dataset` |
//! | [`ApiClient::info`] | `GET /` |
//!
//! There are no retries and no timeouts. Failures are returned to the
//! caller as [`ApiError`].

pub mod client;
pub mod config;

pub use aigis_api_models as models;
pub use client::ApiClient;
pub use config::{ApiConfig, BASE_URL, BASE_URL_ENV};

use thiserror::Error;

/// Errors from API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be
    /// read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Human-readable failure message.
        message: String,
    },

    /// A 2xx response body was not the JSON the endpoint promises.
    #[error("Server returned invalid JSON response")]
    InvalidJson {
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A URL could not be built from the base URL and a path.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL or path.
        url: String,
        /// Description of the problem.
        message: String,
    },
}

impl ApiError {
    /// Returns the HTTP status for [`ApiError::Status`] failures.
    #[must_use]
    pub const fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
