//! HTTP transport to the insights backend.
//!
//! [`ApiClient::request`] is the single choke point for outbound calls: it
//! speaks JSON in both directions and turns every failure (connection
//! refused, error status, undecodable body) into
//! [`ClientError::RequestFailed`] carrying a human-readable message.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use chatlens_shared::constants::{PATH_ANALYZE, PATH_INSIGHTS, PATH_MESSAGES};
use chatlens_shared::{AnalysisResult, AnalyzeResponse, Message};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Error body fields checked, in order, for a human-readable message.
const ERROR_FIELDS: [&str; 3] = ["detail", "message", "error"];

/// Operations the dashboard needs from the backend.
#[async_trait]
pub trait InsightsBackend: Send + Sync {
    /// Persist a batch of raw message objects; returns the stored messages.
    async fn upload_messages(&self, messages: &[Value]) -> Result<Vec<Message>>;

    async fn list_messages(&self) -> Result<Vec<Message>>;

    /// Run the analysis job and wait for its results.
    async fn trigger_analysis(&self) -> Result<AnalyzeResponse>;

    async fn list_insights(&self) -> Result<Vec<AnalysisResult>>;
}

/// JSON-over-HTTP client for the `/api/v1` REST contract.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request against `path` (relative to the API base).
    ///
    /// `method` defaults to `GET`. When `body` is given it is sent as JSON.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Option<Method>,
        body: Option<&Value>,
    ) -> Result<T> {
        let method = method.unwrap_or(Method::GET);
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "API request");

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "Backend unreachable");
            ClientError::request_failed(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            let message = error_message(status, &body);
            warn!(%method, %url, status = status.as_u16(), detail = %message, "API request failed");
            return Err(ClientError::RequestFailed(message));
        }

        resp.json::<T>().await.map_err(|e| {
            warn!(%method, %url, error = %e, "Undecodable response body");
            ClientError::request_failed(format!("Invalid response from server: {e}"))
        })
    }
}

#[async_trait]
impl InsightsBackend for ApiClient {
    async fn upload_messages(&self, messages: &[Value]) -> Result<Vec<Message>> {
        let body = Value::Array(messages.to_vec());
        self.request(PATH_MESSAGES, Some(Method::POST), Some(&body)).await
    }

    async fn list_messages(&self) -> Result<Vec<Message>> {
        self.request(PATH_MESSAGES, None, None).await
    }

    async fn trigger_analysis(&self) -> Result<AnalyzeResponse> {
        self.request(PATH_ANALYZE, Some(Method::POST), None).await
    }

    async fn list_insights(&self) -> Result<Vec<AnalysisResult>> {
        self.request(PATH_INSIGHTS, None, None).await
    }
}

/// Pick the message for a failed response: the first non-empty error field
/// of a JSON body, otherwise the status reason text.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| {
            ERROR_FIELDS.iter().find_map(|field| match json.get(*field)? {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::String(_) | Value::Null => None,
                other => Some(other.to_string()),
            })
        })
        .unwrap_or_else(|| status_text(status))
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
