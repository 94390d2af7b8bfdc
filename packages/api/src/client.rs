//! HTTP client for the AIGIS backend.

use aigis_api_models::{
    DatasetRequest, PredictRequest, PredictionInputData, ReportRequest, ServerAnalysisResponse,
    WaterInputData,
};
use reqwest::Url;
use serde::Serialize;

use crate::{ApiConfig, ApiError};

/// How a non-2xx response is reported to the caller.
#[derive(Debug, Clone, Copy)]
enum StatusFailure {
    /// Surface the response body, or the fallback when the body is empty.
    BodyOr(&'static str),
    /// Always report this message. The body is only logged.
    Fixed(&'static str),
}

/// Client for the AIGIS water analysis API.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the given configuration.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a client that sends requests through an existing
    /// [`reqwest::Client`].
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url().clone(),
        }
    }

    /// The base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client, for follow-up requests to URLs the API
    /// hands back (e.g. dataset blob URLs).
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Runs the quality and level models over a set of measurements.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Status`] carrying the server's response body (or
    ///   `"Failed to analyze data"` if it is empty) on a non-2xx status.
    /// * [`ApiError::InvalidJson`] if the body is not an analysis object.
    /// * [`ApiError::Http`] if the request fails.
    pub async fn analyze_water_data(
        &self,
        data: &WaterInputData,
    ) -> Result<ServerAnalysisResponse, ApiError> {
        let resp = self.post_json("analyze", data).await?;
        let body = read_body(resp, StatusFailure::BodyOr("Failed to analyze data")).await?;
        log::debug!("Raw response text: {body}");
        parse_analysis(&body)
    }

    /// Re-runs the models over existing measurements with projected changes
    /// applied.
    ///
    /// Unlike [`Self::analyze_water_data`], a non-2xx status is reported with
    /// a fixed message; the server's response body is logged only.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Status`] with `"Prediction request failed"` on a
    ///   non-2xx status.
    /// * [`ApiError::InvalidJson`] if the body is not an analysis object.
    /// * [`ApiError::Http`] if the request fails.
    pub async fn predict_water_data(
        &self,
        existing: &WaterInputData,
        prediction: &PredictionInputData,
    ) -> Result<ServerAnalysisResponse, ApiError> {
        let request = PredictRequest {
            existing,
            for_prediction: prediction,
        };
        let resp = self.post_json("predict", &request).await?;
        let body = read_body(resp, StatusFailure::Fixed("Prediction request failed")).await?;
        log::debug!("Raw response text: {body}");
        parse_analysis(&body)
    }

    /// Asks the backend to write a report for an analysis and returns the
    /// absolute URL of the generated file.
    ///
    /// The backend answers with a JSON-quoted relative path such as
    /// `"static/report_620968327984.pdf"`. Quotes are stripped and the path
    /// is appended to the base URL.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Status`] carrying the server's response body (or
    ///   `"Failed to generate report"`) on a non-2xx status.
    /// * [`ApiError::Http`] if the request fails.
    pub async fn generate_report(
        &self,
        after_pred: &ServerAnalysisResponse,
        language: &str,
        reason: &str,
    ) -> Result<String, ApiError> {
        let request = ReportRequest {
            after_pred,
            language,
            reason,
        };
        let resp = self.post_json("gen_report", &request).await?;
        let body = read_body(resp, StatusFailure::BodyOr("Failed to generate report")).await?;
        log::debug!("Report generation response: {body}");

        let url = self.resolve(&strip_quotes(&body));
        log::info!("Report available at {url}");
        Ok(url)
    }

    /// Looks up where a dataset's CSV is stored.
    ///
    /// The backend answers with a JSON-quoted absolute blob-storage URL.
    /// Quotes are stripped and an absolute URL is returned untouched. A
    /// relative path is appended to the base URL.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Status`] carrying the server's response body (or
    ///   `"Failed to get dataset URL"`) on a non-2xx status.
    /// * [`ApiError::Http`] if the request fails.
    pub async fn download_dataset(&self, dataset_id: &str) -> Result<String, ApiError> {
        let request = DatasetRequest { id: dataset_id };
        let resp = self.post_json("get_dataset", &request).await?;
        let body = read_body(resp, StatusFailure::BodyOr("Failed to get dataset URL")).await?;
        log::debug!("Dataset blob URL response: {body}");

        Ok(self.resolve(&strip_quotes(&body)))
    }

    /// Fetches the backend's root banner (`{"Info": "AIGIS API"}`).
    ///
    /// # Errors
    ///
    /// * [`ApiError::Status`] on a non-2xx status.
    /// * [`ApiError::InvalidJson`] if the body is not JSON.
    /// * [`ApiError::Http`] if the request fails.
    pub async fn info(&self) -> Result<serde_json::Value, ApiError> {
        let resp = self.client.get(self.base_url.clone()).send().await?;
        let body = read_body(resp, StatusFailure::BodyOr("Failed to reach API")).await?;
        serde_json::from_str(&body).map_err(|source| ApiError::InvalidJson { source })
    }

    /// Sends `body` as JSON to `path` under the base URL.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.join(path)?;
        log::debug!("POST {url}");
        Ok(self.client.post(url).json(body).send().await?)
    }

    fn join(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidUrl {
            url: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Turns a location handed back by the backend into a URL.
    ///
    /// Absolute `http`/`https` URLs are returned as given. Anything else is a
    /// path appended to the base URL, without a doubled `/`.
    fn resolve(&self, location: &str) -> String {
        if is_absolute_url(location) {
            return location.to_string();
        }
        format!("{}{}", self.base_url, location.trim_start_matches('/'))
    }
}

fn is_absolute_url(location: &str) -> bool {
    Url::parse(location).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Reads the response body, turning a non-2xx status into
/// [`ApiError::Status`].
async fn read_body(resp: reqwest::Response, failure: StatusFailure) -> Result<String, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        log::error!("Server error response ({status}): {body}");
        let message = match failure {
            StatusFailure::BodyOr(fallback) if body.is_empty() => fallback.to_string(),
            StatusFailure::BodyOr(_) => body,
            StatusFailure::Fixed(message) => message.to_string(),
        };
        return Err(ApiError::Status { status, message });
    }

    Ok(body)
}

/// Parses an analysis body.
///
/// The backend serializes its result with `json.dumps` before returning it,
/// so the body may be a JSON string that itself contains the object. One
/// level of string encoding is unwrapped.
fn parse_analysis(body: &str) -> Result<ServerAnalysisResponse, ApiError> {
    let invalid = |source: serde_json::Error| {
        log::error!("Error parsing server response as JSON: {source}");
        log::error!("Response text was: {body}");
        ApiError::InvalidJson { source }
    };

    let value: serde_json::Value = serde_json::from_str(body).map_err(invalid)?;
    let value = match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner).map_err(invalid)?,
        other => other,
    };

    serde_json::from_value(value).map_err(invalid)
}

/// Removes every `"` from a response body.
fn strip_quotes(body: &str) -> String {
    body.replace('"', "")
}
