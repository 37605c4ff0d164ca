use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A chat message as stored by the backend.
///
/// Timestamps are kept as the ISO-8601 text the backend emitted; the
/// dashboard only counts and displays messages, it never reorders them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Backend-assigned identifier
    pub id: String,
    pub channel: String,
    pub author: String,
    pub content: String,
    /// When the message was sent
    pub timestamp: String,
    /// When the backend stored it
    pub created_at: String,
}

/// A discussion topic extracted from a message batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub message_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channels: Vec<String>,
}

/// Overall tone of an author's messages.
///
/// Labels outside the known three are preserved verbatim so they can still
/// be displayed (with neutral styling).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
    Other(String),
}

impl SentimentLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for SentimentLabel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "positive" => Self::Positive,
            "neutral" => Self::Neutral,
            "negative" => Self::Negative,
            _ => Self::Other(s),
        }
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-author sentiment summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    pub author: String,
    pub overall_sentiment: SentimentLabel,
    /// Model confidence in `[0, 1]`
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
}

/// Per-author response-time statistics, in minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResponseTime {
    #[serde(deserialize_with = "null_as_default")]
    pub avg_response_minutes: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_response_minutes: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_response_minutes: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_responses: u64,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A count that may arrive as a float (`4.0`) or `null`.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(0),
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n.round() as u64),
        Some(n) => Err(D::Error::custom(format!("invalid count: {n}"))),
    }
}
