//! Demultiplexing of analysis results into dashboard slices.

use chatlens_shared::{AnalysisResult, InsightPayload, ResponseTimes, Sentiment, Topic};
use tracing::debug;

/// The three view collections produced from one batch of results.
///
/// A `None` slice means the batch carried no result of that type, so the
/// dashboard keeps whatever it was already showing for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightSlices {
    pub topics: Option<Vec<Topic>>,
    pub sentiments: Option<Vec<Sentiment>>,
    pub response_times: Option<ResponseTimes>,
}

impl InsightSlices {
    pub fn is_empty(&self) -> bool {
        self.topics.is_none() && self.sentiments.is_none() && self.response_times.is_none()
    }
}

/// Sort a batch of results into per-type slices.
///
/// Results are visited in order and a later result of a given type fully
/// replaces an earlier one (last write wins per type). Unrecognized types
/// are skipped. Never fails.
pub fn demultiplex(results: &[AnalysisResult]) -> InsightSlices {
    let mut slices = InsightSlices::default();

    for result in results {
        match &result.payload {
            InsightPayload::Topics(topics) => slices.topics = Some(topics.clone()),
            InsightPayload::Sentiments(sentiments) => {
                slices.sentiments = Some(sentiments.clone())
            }
            InsightPayload::ResponseTimes(times) => slices.response_times = Some(times.clone()),
            InsightPayload::Unrecognized(tag) => {
                debug!(id = %result.id, analysis_type = %tag, "Skipping unrecognized analysis type");
            }
        }
    }

    slices
}
