//! Analysis result envelopes and their typed payloads.
//!
//! The backend sends every analysis as a self-describing envelope: a type
//! tag plus a loosely shaped `result_data` mapping. [`AnalysisEnvelope`] is
//! that wire form. [`AnalysisResult`] is the same record after the payload
//! has been parsed once into an [`InsightPayload`] variant, so consumers
//! match on types instead of probing JSON keys.
//!
//! Parsing never fails. Shapes that do not match degrade to empty
//! collections or skipped entries, which keeps the dashboard usable when the
//! backend adds fields or returns partial results.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    KEY_AVG_RESPONSE, KEY_SENTIMENTS, KEY_TOPICS, TAG_RESPONSE_TIME, TAG_SENTIMENT, TAG_TOPICS,
};
use crate::types::{ResponseTime, Sentiment, Topic};

/// Author name -> response-time statistics, in payload order.
pub type ResponseTimes = IndexMap<String, ResponseTime>;

/// Wire form of an analysis result, exactly as the backend sends it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisEnvelope {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub analysis_type: String,
    #[serde(default)]
    pub result_data: Value,
    #[serde(default)]
    pub created_at: String,
}

/// Typed payload of an analysis result, one variant per `analysis_type`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightPayload {
    Topics(Vec<Topic>),
    Sentiments(Vec<Sentiment>),
    ResponseTimes(ResponseTimes),
    /// A tag this client does not know; carried so it can be logged.
    Unrecognized(String),
}

impl InsightPayload {
    /// Parse `result_data` according to its `analysis_type` tag.
    pub fn parse(analysis_type: &str, result_data: &Value) -> Self {
        match analysis_type {
            TAG_TOPICS => Self::Topics(parse_list(result_data, KEY_TOPICS)),
            TAG_SENTIMENT => Self::Sentiments(parse_list(result_data, KEY_SENTIMENTS)),
            TAG_RESPONSE_TIME => Self::ResponseTimes(parse_response_times(result_data)),
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

/// An analysis result with its payload already parsed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "AnalysisEnvelope")]
pub struct AnalysisResult {
    pub id: String,
    pub payload: InsightPayload,
    pub created_at: String,
}

impl AnalysisResult {
    /// The wire tag this result was sent with.
    pub fn analysis_type(&self) -> &str {
        match &self.payload {
            InsightPayload::Topics(_) => TAG_TOPICS,
            InsightPayload::Sentiments(_) => TAG_SENTIMENT,
            InsightPayload::ResponseTimes(_) => TAG_RESPONSE_TIME,
            InsightPayload::Unrecognized(tag) => tag,
        }
    }
}

impl From<AnalysisEnvelope> for AnalysisResult {
    fn from(envelope: AnalysisEnvelope) -> Self {
        Self {
            payload: InsightPayload::parse(&envelope.analysis_type, &envelope.result_data),
            id: envelope.id,
            created_at: envelope.created_at,
        }
    }
}

/// Body of a successful `POST /insights/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResponse<R = AnalysisResult> {
    pub status: String,
    #[serde(default = "Vec::new")]
    pub results: Vec<R>,
}

/// Decode the array under `key`, keeping only the entries that decode.
fn parse_list<T: DeserializeOwned>(data: &Value, key: &str) -> Vec<T> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| T::deserialize(item).ok()).collect())
        .unwrap_or_default()
}

/// Collect every author key whose value is a response-time record.
///
/// The reserved aggregate keys are never authors. Any other key qualifies
/// only if its value is an object carrying `avg_response_minutes`.
fn parse_response_times(data: &Value) -> ResponseTimes {
    let Some(entries) = data.as_object() else {
        return ResponseTimes::new();
    };

    entries
        .iter()
        .filter(|(key, _)| key.as_str() != KEY_TOPICS && key.as_str() != KEY_SENTIMENTS)
        .filter_map(|(author, value)| {
            let record = value.as_object()?;
            if !record.contains_key(KEY_AVG_RESPONSE) {
                return None;
            }
            let stats = ResponseTime::deserialize(value).ok()?;
            Some((author.clone(), stats))
        })
        .collect()
}
