#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and response types for the AIGIS water analysis API.
//!
//! Measurement payloads are opaque JSON objects. They are forwarded to the
//! backend exactly as given: key order, integer versus float, strings and
//! explicit `null`s all survive. The [`keys`] module names the fields the
//! backend reads, and [`WaterInputData::number`] reads one the way the
//! backend does, but nothing here rewrites the payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names the backend reads from measurement payloads.
pub mod keys {
    pub const PH: &str = "ph";
    pub const EC: &str = "ec";
    pub const TDS: &str = "tds";
    pub const TH: &str = "th";
    pub const CA: &str = "ca";
    pub const MG: &str = "mg";
    pub const NA: &str = "na";
    pub const K: &str = "k";
    pub const CL: &str = "cl";
    pub const SO4: &str = "so4";
    pub const NITRATE: &str = "nitrate";
    pub const FLUORIDE: &str = "fluoride";
    pub const URANIUM: &str = "uranium";

    pub const ANNUAL_DOMESTIC_INDUSTRY_DRAFT: &str = "annualDomesticIndustryDraft";
    pub const ANNUAL_IRRIGATION_DRAFT: &str = "annualIrrigationDraft";
    pub const ANNUAL_GROUNDWATER_DRAFT_TOTAL: &str = "annualGroundwaterDraftTotal";
    pub const ANNUAL_REPLENISHABLE_GROUNDWATER_RESOURCES: &str =
        "annualReplenishableGroundwaterResources";
    pub const NATURAL_DISCHARGE_NON_MONSOON: &str = "naturalDischargeNonMonsoon";
    pub const NET_GROUNDWATER_AVAILABILITY: &str = "netGroundwaterAvailability";

    /// Array of [`GroundwaterParameter`](super::GroundwaterParameter)
    /// adjustments in a prediction payload.
    pub const GROUNDWATER_PARAMETERS: &str = "groundwaterParameters";

    /// Water-quality measurements, in the order the quality model takes them.
    pub const QUALITY: &[&str] = &[
        PH, EC, TDS, TH, CA, MG, NA, K, CL, SO4, NITRATE, FLUORIDE, URANIUM,
    ];

    /// Ground-water level measurements, in the order the level model takes
    /// them.
    pub const LEVEL: &[&str] = &[
        ANNUAL_DOMESTIC_INDUSTRY_DRAFT,
        ANNUAL_IRRIGATION_DRAFT,
        ANNUAL_GROUNDWATER_DRAFT_TOTAL,
        ANNUAL_REPLENISHABLE_GROUNDWATER_RESOURCES,
        NATURAL_DISCHARGE_NON_MONSOON,
        NET_GROUNDWATER_AVAILABILITY,
    ];
}

/// Reads a JSON value as a number the way the backend does: numbers as-is,
/// numeric strings parsed. Anything else is `None`.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

macro_rules! json_payload {
    ($name:ident) => {
        impl $name {
            /// Creates an empty payload.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Sets `key`, returning the payload for chaining.
            #[must_use]
            pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
                self.insert(key, value);
                self
            }

            /// Sets `key`, returning the previous value if there was one.
            pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
                self.0.insert(key.to_string(), value.into())
            }

            /// The raw value stored under `key`.
            #[must_use]
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// `key` read as a number (see [`as_number`]). `None` when the key
            /// is missing, `null`, or not numeric.
            #[must_use]
            pub fn number(&self, key: &str) -> Option<f64> {
                self.get(key).and_then(as_number)
            }

            /// The payload as a JSON object.
            #[must_use]
            pub const fn as_map(&self) -> &Map<String, Value> {
                &self.0
            }

            /// Unwraps the payload into its JSON object.
            #[must_use]
            pub fn into_map(self) -> Map<String, Value> {
                self.0
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(map: Map<String, Value>) -> Self {
                Self(map)
            }
        }
    };
}

/// Ground-water quality and level measurements for a single site.
///
/// See [`keys::QUALITY`] and [`keys::LEVEL`] for the fields the backend
/// reads. Missing fields are treated as zero by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaterInputData(Map<String, Value>);

json_payload!(WaterInputData);

/// Projected changes to feed into a prediction run.
///
/// Quality values replace the existing ones. Each entry under
/// [`keys::GROUNDWATER_PARAMETERS`] is added to the matching existing level
/// value by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionInputData(Map<String, Value>);

json_payload!(PredictionInputData);

impl PredictionInputData {
    /// Appends a level adjustment to [`keys::GROUNDWATER_PARAMETERS`],
    /// creating the array if needed.
    ///
    /// A non-array value already stored under that key is replaced.
    #[must_use]
    pub fn with_groundwater_parameter(mut self, kind: &str, value: impl Into<Value>) -> Self {
        let value: Value = value.into();
        let entry = serde_json::json!({ "type": kind, "value": value });
        match self.0.get_mut(keys::GROUNDWATER_PARAMETERS) {
            Some(Value::Array(items)) => items.push(entry),
            _ => {
                self.0
                    .insert(keys::GROUNDWATER_PARAMETERS.to_string(), Value::Array(vec![entry]));
            }
        }
        self
    }

    /// The level adjustments in this payload. Entries without a string
    /// `type` are skipped.
    #[must_use]
    pub fn groundwater_parameters(&self) -> Vec<GroundwaterParameter> {
        self.get(keys::GROUNDWATER_PARAMETERS)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| GroundwaterParameter::deserialize(item).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A single ground-water level adjustment, e.g.
/// `{"type": "annualIrrigationDraft", "value": 12.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundwaterParameter {
    /// Name of the level field this value adjusts.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount added to the existing value, as given.
    #[serde(default)]
    pub value: Value,
}

impl GroundwaterParameter {
    /// The adjustment read as a number (see [`as_number`]).
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        as_number(&self.value)
    }
}

/// Analysis returned by the `/analyze` and `/predict` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerAnalysisResponse {
    /// Narrative water-quality assessment.
    pub quality_analysis: String,
    /// Narrative ground-water level assessment.
    pub level_analysis: String,
}

/// Body of a `/predict` request.
#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    /// Current measurements.
    pub existing: &'a WaterInputData,
    /// Projected changes.
    pub for_prediction: &'a PredictionInputData,
}

/// Body of a `/gen_report` request.
#[derive(Debug, Serialize)]
pub struct ReportRequest<'a> {
    /// Analysis the report is written from.
    pub after_pred: &'a ServerAnalysisResponse,
    /// Language the report should be written in.
    pub language: &'a str,
    /// Why the report is being requested.
    pub reason: &'a str,
}

/// Body of a `/get_dataset` request.
#[derive(Debug, Serialize)]
pub struct DatasetRequest<'a> {
    /// Dataset identifier (e.g. `"gwq"`).
    pub id: &'a str,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn water_input_is_forwarded_verbatim() {
        let raw = r#"{"ph":"7.2","ec":850,"tds":null,"so4":40.5,"location":"Block A","annualIrrigationDraft":12}"#;

        let data: WaterInputData = serde_json::from_str(raw).unwrap();

        assert_eq!(serde_json::to_string(&data).unwrap(), raw);
    }

    #[test]
    fn number_reads_like_the_backend() {
        let data: WaterInputData =
            serde_json::from_value(json!({"ph": "7.2", "ec": 850, "tds": null, "cl": "n/a"}))
                .unwrap();

        assert_eq!(data.number(keys::PH), Some(7.2));
        assert_eq!(data.number(keys::EC), Some(850.0));
        assert_eq!(data.number(keys::TDS), None);
        assert_eq!(data.number(keys::CL), None);
        assert_eq!(data.number(keys::MG), None);
        assert_eq!(data.get(keys::TDS), Some(&Value::Null));
    }

    #[test]
    fn rejects_non_object_payload() {
        assert!(serde_json::from_str::<WaterInputData>("[1, 2]").is_err());
    }

    #[test]
    fn builder_keeps_insertion_order() {
        let data = WaterInputData::new()
            .with(keys::PH, 7.1)
            .with(keys::NET_GROUNDWATER_AVAILABILITY, 9);

        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"ph":7.1,"netGroundwaterAvailability":9}"#
        );
    }

    #[test]
    fn prediction_input_reads_groundwater_parameters() {
        let raw = r#"{"ph":7.0,"groundwaterParameters":[{"type":"annualIrrigationDraft","value":"3"},{"type":"netGroundwaterAvailability","value":-1.5},{"value":2}]}"#;

        let data: PredictionInputData = serde_json::from_str(raw).unwrap();
        let params = data.groundwater_parameters();

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].kind, keys::ANNUAL_IRRIGATION_DRAFT);
        assert_eq!(params[0].value, json!("3"));
        assert_eq!(params[0].amount(), Some(3.0));
        assert_eq!(params[1].amount(), Some(-1.5));
        assert_eq!(serde_json::to_string(&data).unwrap(), raw);
    }

    #[test]
    fn with_groundwater_parameter_appends() {
        let data = PredictionInputData::new()
            .with(keys::NITRATE, 55)
            .with_groundwater_parameter(keys::ANNUAL_IRRIGATION_DRAFT, 1.5)
            .with_groundwater_parameter(keys::NATURAL_DISCHARGE_NON_MONSOON, "2");

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "nitrate": 55,
                "groundwaterParameters": [
                    { "type": "annualIrrigationDraft", "value": 1.5 },
                    { "type": "naturalDischargeNonMonsoon", "value": "2" },
                ],
            })
        );
    }

    #[test]
    fn predict_request_wraps_both_payloads() {
        let existing: WaterInputData = serde_json::from_str(r#"{"ph":7.1,"tds":null}"#).unwrap();
        let prediction: PredictionInputData =
            serde_json::from_str(r#"{"nitrate":"55"}"#).unwrap();

        let body = serde_json::to_string(&PredictRequest {
            existing: &existing,
            for_prediction: &prediction,
        })
        .unwrap();

        assert_eq!(
            body,
            r#"{"existing":{"ph":7.1,"tds":null},"for_prediction":{"nitrate":"55"}}"#
        );
    }

    #[test]
    fn report_request_field_names() {
        let analysis = ServerAnalysisResponse {
            quality_analysis: "Potable".to_string(),
            level_analysis: "Safe".to_string(),
        };

        let body = serde_json::to_value(ReportRequest {
            after_pred: &analysis,
            language: "English",
            reason: "Quarterly review",
        })
        .unwrap();

        assert_eq!(body["after_pred"]["quality_analysis"], "Potable");
        assert_eq!(body["language"], "English");
        assert_eq!(body["reason"], "Quarterly review");
    }
}
