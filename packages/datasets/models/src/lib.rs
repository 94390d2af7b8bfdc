#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset descriptor types for the AIGIS ground-water datasets.
//!
//! Descriptors are pure metadata: they say what a dataset contains and
//! where its static copy lives, but carry none of the data itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// What a dataset measures.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DatasetCategory {
    /// Chemical water-quality measurements.
    Quality,
    /// Ground-water resource and draft assessments.
    Resources,
}

/// A downloadable dataset, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Short identifier understood by the backend (e.g. `"gwq"`).
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// One-paragraph summary of the contents.
    pub description: String,
    /// Preview image asset.
    pub image: String,
    /// Column names, in file order.
    pub fields: Vec<String>,
    /// Display size label (e.g. `"7.7 MB"`).
    pub size: String,
    /// Display format label (e.g. `"CSV"`).
    pub format: String,
    /// When the data was last refreshed.
    pub last_updated: NaiveDate,
    /// Static asset path of the bundled copy (e.g. `"/datasets/gwq.csv"`).
    pub download_url: String,
    /// What the dataset measures.
    pub category: DatasetCategory,
}

impl Dataset {
    /// Returns the dataset identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}
