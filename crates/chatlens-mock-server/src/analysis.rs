//! Analysis results produced by the mock.
//!
//! Topic and sentiment payloads are canned. Response times are computed
//! from the stored messages: within each channel, the gap before a message
//! counts as a response by that message's author.

use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use chatlens_shared::constants::{TAG_RESPONSE_TIME, TAG_SENTIMENT, TAG_TOPICS};
use chatlens_shared::{ResponseTime, ResponseTimes};

use crate::store::StoredMessage;

const BUILTIN_INSIGHTS: &str = include_str!("../../../fixtures/canned_insights.json");

/// Canned `result_data` payloads keyed by analysis type.
#[derive(Debug, Clone, Deserialize)]
pub struct CannedInsights {
    pub topics: Value,
    pub sentiment: Value,
}

impl CannedInsights {
    pub fn builtin() -> anyhow::Result<Self> {
        serde_json::from_str(BUILTIN_INSIGHTS).context("built-in canned insights are invalid")
    }

    /// Load payloads from `path`, or the built-in ones when `None`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Self::builtin();
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading canned insights from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing canned insights from {}", path.display()))
    }

    /// One `(analysis_type, result_data)` pair per type, in storage order.
    pub fn analyze(&self, messages: &[StoredMessage]) -> Vec<(&'static str, Value)> {
        let response_times = compute_response_times(messages);
        vec![
            (TAG_TOPICS, self.topics.clone()),
            (TAG_SENTIMENT, self.sentiment.clone()),
            (
                TAG_RESPONSE_TIME,
                serde_json::to_value(response_times).unwrap_or_default(),
            ),
        ]
    }
}

/// Per-author response statistics in minutes, rounded to one decimal.
///
/// `messages` must already be in timestamp order.
pub fn compute_response_times(messages: &[StoredMessage]) -> ResponseTimes {
    let mut channels: IndexMap<&str, Vec<&StoredMessage>> = IndexMap::new();
    for stored in messages {
        channels
            .entry(stored.message.channel.as_str())
            .or_default()
            .push(stored);
    }

    let mut gaps: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for msgs in channels.values() {
        for pair in msgs.windows(2) {
            let minutes = (pair[1].at - pair[0].at).num_milliseconds() as f64 / 60_000.0;
            gaps.entry(pair[1].message.author.as_str())
                .or_default()
                .push(round1(minutes));
        }
    }

    gaps.into_iter()
        .map(|(author, times)| {
            let sum: f64 = times.iter().sum();
            let stats = ResponseTime {
                avg_response_minutes: round1(sum / times.len() as f64),
                min_response_minutes: times.iter().copied().fold(f64::INFINITY, f64::min),
                max_response_minutes: times.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                total_responses: times.len() as u64,
            };
            (author.to_string(), stats)
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
