//! Compile-time registry of downloadable datasets.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Order here is the order datasets are listed to the user.

use std::sync::LazyLock;

use aigis_datasets_models::Dataset;

/// Number of registered datasets. Enforced by a test.
#[cfg(test)]
const EXPECTED_DATASET_COUNT: usize = 2;

/// Embedded TOML dataset definitions.
const DATASET_TOMLS: &[(&str, &str)] = &[
    ("gwq", include_str!("../datasets/gwq.toml")),
    ("gwr", include_str!("../datasets/gwr.toml")),
];

/// All registered datasets, parsed once on first use.
///
/// # Panics
///
/// Dereferencing panics if any embedded TOML file fails to parse. These
/// are compile-time constants, so a failure is a development error caught
/// by the tests below.
pub static DATASETS: LazyLock<Vec<Dataset>> = LazyLock::new(|| {
    DATASET_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse dataset '{name}': {e}"))
        })
        .collect()
});

/// Returns all registered datasets in display order.
#[must_use]
pub fn all_datasets() -> &'static [Dataset] {
    &DATASETS
}

/// Looks up a dataset by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Dataset> {
    all_datasets().iter().find(|d| d.id == id)
}
