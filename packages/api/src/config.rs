//! API client configuration.
//!
//! The base URL defaults to the production backend and can be overridden
//! with the `AIGIS_API_URL` environment variable or explicitly by the
//! caller.

use reqwest::Url;

use crate::ApiError;

/// Production backend.
pub const BASE_URL: &str =
    "https://aigis-backend.jollycoast-af517591.southindia.azurecontainerapps.io/";

/// Environment variable that overrides [`BASE_URL`].
pub const BASE_URL_ENV: &str = "AIGIS_API_URL";

/// Where the API client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// Creates a configuration for the given base URL.
    ///
    /// The URL must be absolute `http` or `https`. Any query or fragment is
    /// dropped and the path is given a trailing `/` so endpoint paths join
    /// onto it instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the URL cannot be parsed or is not
    /// an `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut url = Url::parse(base_url.trim()).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self { base_url: url })
    }

    /// Reads the base URL from `AIGIS_API_URL`, falling back to
    /// [`BASE_URL`] when the variable is unset or empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the variable holds an invalid URL.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_env_value(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, ApiError> {
        match value.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => {
                log::debug!("Using API base URL from {BASE_URL_ENV}: {url}");
                Self::new(url)
            }
            None => Self::new(BASE_URL),
        }
    }

    /// The normalized base URL (always ends in `/`).
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Default for ApiConfig {
    /// # Panics
    ///
    /// Panics if [`BASE_URL`] is not a valid URL (it is a constant).
    fn default() -> Self {
        Self::new(BASE_URL).unwrap_or_else(|e| panic!("Invalid built-in base URL: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_production_backend() {
        assert_eq!(ApiConfig::default().base_url().as_str(), BASE_URL);
    }

    #[test]
    fn adds_trailing_slash() {
        let config = ApiConfig::new("http://localhost:8000/api").unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn drops_query_and_fragment() {
        let config = ApiConfig::new("http://localhost:8000/?debug=1#top").unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn rejects_relative_url() {
        assert!(matches!(
            ApiConfig::new("static/report.pdf"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn env_value_overrides_default() {
        let config = ApiConfig::from_env_value(Some("http://localhost:8000")).unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn unset_or_blank_env_value_falls_back_to_default() {
        for value in [None, Some(""), Some("   ")] {
            let config = ApiConfig::from_env_value(value).unwrap();
            assert_eq!(config.base_url().as_str(), BASE_URL, "{value:?}");
        }
    }

    #[test]
    fn invalid_env_value_is_an_error() {
        assert!(matches!(
            ApiConfig::from_env_value(Some("not a url")),
            Err(ApiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(matches!(
            ApiConfig::new("ftp://example.com/"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
