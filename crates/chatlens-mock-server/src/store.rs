//! In-memory message and analysis storage.
//!
//! Messages are unique on `(channel, author, content, timestamp)` and always
//! listed in timestamp order. Analysis records are listed newest first.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use chatlens_shared::{AnalysisEnvelope, Message};

use crate::error::MockError;

/// A message as accepted by `POST /messages/`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub channel: String,
    pub author: String,
    pub content: String,
    pub timestamp: String,
}

/// A stored message with its parsed timestamp (UTC).
#[derive(Debug, Clone)]
pub struct StoredMessage {
    pub message: Message,
    pub at: NaiveDateTime,
}

#[derive(Default)]
struct Inner {
    messages: Vec<StoredMessage>,
    insights: Vec<AnalysisEnvelope>,
}

#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Inner>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw upload batch, rejecting the whole batch on the first
    /// invalid entry.
    pub fn validate_batch(batch: Vec<Value>) -> Result<Vec<(NewMessage, NaiveDateTime)>, MockError> {
        batch
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                let msg: NewMessage = serde_json::from_value(raw)
                    .map_err(|e| MockError::Validation(format!("body[{i}]: {e}")))?;
                let at = parse_timestamp(&msg.timestamp).ok_or_else(|| {
                    MockError::Validation(format!(
                        "body[{i}].timestamp: invalid datetime {:?}",
                        msg.timestamp
                    ))
                })?;
                Ok((msg, at))
            })
            .collect()
    }

    /// Store new messages, skipping duplicates. Returns every stored message.
    pub async fn insert_messages(&self, batch: Vec<(NewMessage, NaiveDateTime)>) -> Vec<Message> {
        let mut inner = self.inner.write().await;
        let mut added = 0usize;

        for (msg, at) in batch {
            let duplicate = inner.messages.iter().any(|stored| {
                stored.at == at
                    && stored.message.channel == msg.channel
                    && stored.message.author == msg.author
                    && stored.message.content == msg.content
            });
            if duplicate {
                continue;
            }

            inner.messages.push(StoredMessage {
                message: Message {
                    id: Uuid::new_v4().to_string(),
                    channel: msg.channel,
                    author: msg.author,
                    content: msg.content,
                    timestamp: msg.timestamp,
                    created_at: now(),
                },
                at,
            });
            added += 1;
        }

        inner.messages.sort_by_key(|stored| stored.at);
        debug!(added, total = inner.messages.len(), "Stored messages");
        inner.messages.iter().map(|s| s.message.clone()).collect()
    }

    /// Every stored message, in timestamp order.
    pub async fn messages(&self) -> Vec<StoredMessage> {
        self.inner.read().await.messages.clone()
    }

    /// Record one analysis result and return it.
    pub async fn add_insight(&self, analysis_type: &str, result_data: Value) -> AnalysisEnvelope {
        let record = AnalysisEnvelope {
            id: Uuid::new_v4().to_string(),
            analysis_type: analysis_type.to_string(),
            result_data,
            created_at: now(),
        };
        self.inner.write().await.insights.push(record.clone());
        record
    }

    /// Every analysis record, newest first.
    pub async fn insights(&self) -> Vec<AnalysisEnvelope> {
        self.inner.read().await.insights.iter().rev().cloned().collect()
    }
}

/// RFC 3339 (normalized to UTC) or a naive ISO-8601 date-time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| raw.parse::<NaiveDateTime>())
        .ok()
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
