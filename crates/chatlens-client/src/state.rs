//! Dashboard view state and its transitions.
//!
//! [`ViewState`] is the single state object the dashboard renders from.
//! It only changes through [`ViewState::reduce`], which maps the current
//! state and an [`Action`] to the next state without side effects.

use serde::Serialize;

use chatlens_shared::{AnalysisResult, ResponseTimes, Sentiment, Topic};

use crate::insights::{demultiplex, InsightSlices};

/// Render-ready dashboard state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Number of messages the backend holds.
    pub message_count: usize,

    pub topics: Vec<Topic>,

    pub sentiments: Vec<Sentiment>,

    /// Author -> response-time statistics, in backend order.
    pub response_times: ResponseTimes,

    /// Whether any batch of insights has been shown this session.
    pub has_insights: bool,

    /// An upload (or the initial fetch) is in flight.
    pub loading: bool,

    /// An analysis run is in flight.
    pub analyzing: bool,
}

/// Everything that can happen to the view state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    InitialLoadStarted,
    InitialLoadSucceeded {
        message_count: usize,
        insights: Vec<AnalysisResult>,
    },
    InitialLoadFailed,
    UploadStarted,
    UploadSucceeded { message_count: usize },
    UploadFailed,
    AnalysisStarted,
    AnalysisSucceeded { results: Vec<AnalysisResult> },
    AnalysisFailed,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the state that follows `action`.
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::InitialLoadStarted => self.loading = true,
            Action::InitialLoadSucceeded {
                message_count,
                insights,
            } => {
                self.message_count = message_count;
                self.loading = false;
                if !insights.is_empty() {
                    self.merge(demultiplex(&insights));
                    self.has_insights = true;
                }
            }
            // Backend not up yet; keep the empty dashboard.
            Action::InitialLoadFailed => self.loading = false,
            Action::UploadStarted => self.loading = true,
            Action::UploadSucceeded { message_count } => {
                self.message_count = message_count;
                self.loading = false;
            }
            Action::UploadFailed => self.loading = false,
            Action::AnalysisStarted => self.analyzing = true,
            Action::AnalysisSucceeded { results } => {
                self.merge(demultiplex(&results));
                self.has_insights = true;
                self.analyzing = false;
            }
            Action::AnalysisFailed => self.analyzing = false,
        }
        self
    }

    /// In-place form of [`ViewState::reduce`].
    pub fn apply(&mut self, action: Action) {
        *self = std::mem::take(self).reduce(action);
    }

    /// "Run Analysis" is enabled only with messages loaded and no run in flight.
    pub fn can_run_analysis(&self) -> bool {
        self.message_count > 0 && !self.analyzing
    }

    /// "Load Sample Data" is enabled while no upload is in flight.
    pub fn can_load_sample(&self) -> bool {
        !self.loading
    }

    fn merge(&mut self, slices: InsightSlices) {
        if let Some(topics) = slices.topics {
            self.topics = topics;
        }
        if let Some(sentiments) = slices.sentiments {
            self.sentiments = sentiments;
        }
        if let Some(response_times) = slices.response_times {
            self.response_times = response_times;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_shared::AnalysisEnvelope;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn result(analysis_type: &str, data: Value) -> AnalysisResult {
        AnalysisEnvelope {
            id: "r".into(),
            analysis_type: analysis_type.into(),
            result_data: data,
            created_at: String::new(),
        }
        .into()
    }

    fn populated() -> ViewState {
        ViewState::new().reduce(Action::InitialLoadSucceeded {
            message_count: 4,
            insights: vec![
                result("topics", json!({"topics": [{"name": "Release"}]})),
                result(
                    "sentiment",
                    json!({"sentiments": [{"author": "alice", "overall_sentiment": "positive", "confidence": 0.8}]}),
                ),
                result("response_time", json!({"alice": {"avg_response_minutes": 3.0}})),
            ],
        })
    }

    #[test]
    fn test_default_state_is_empty_and_idle() {
        let state = ViewState::new();
        assert_eq!(state.message_count, 0);
        assert!(!state.has_insights);
        assert!(!state.loading && !state.analyzing);
        assert!(!state.can_run_analysis());
        assert!(state.can_load_sample());
    }

    #[test]
    fn test_initial_load_without_insights_keeps_flag_off() {
        let state = ViewState::new().reduce(Action::InitialLoadSucceeded {
            message_count: 12,
            insights: vec![],
        });
        assert_eq!(state.message_count, 12);
        assert!(!state.has_insights);
        assert!(state.can_run_analysis());
    }

    #[test]
    fn test_initial_load_with_insights_populates_slices() {
        let state = populated();
        assert!(state.has_insights);
        assert_eq!(state.topics.len(), 1);
        assert_eq!(state.sentiments.len(), 1);
        assert_eq!(state.response_times.len(), 1);
    }

    #[test]
    fn test_initial_load_failure_returns_to_empty_idle() {
        let state = ViewState::new().reduce(Action::InitialLoadStarted);
        assert!(state.loading);
        assert!(!state.can_load_sample());

        let state = state.reduce(Action::InitialLoadFailed);
        assert_eq!(state, ViewState::new());
    }

    #[test]
    fn test_upload_cycle_toggles_loading() {
        let mut state = ViewState::new();
        state.apply(Action::UploadStarted);
        assert!(state.loading);
        assert!(!state.can_load_sample());

        state.apply(Action::UploadSucceeded { message_count: 25 });
        assert!(!state.loading);
        assert_eq!(state.message_count, 25);
        assert!(!state.has_insights);

        state.apply(Action::UploadStarted);
        state.apply(Action::UploadFailed);
        assert!(!state.loading);
        assert_eq!(state.message_count, 25);
    }

    #[test]
    fn test_analysis_failure_leaves_slices_untouched() {
        let before = populated();
        let mut state = before.clone();
        state.apply(Action::AnalysisStarted);
        assert!(state.analyzing);
        assert!(!state.can_run_analysis());

        state.apply(Action::AnalysisFailed);
        assert_eq!(state, before);
    }

    #[test]
    fn test_analysis_success_replaces_only_present_types() {
        let mut state = populated();
        state.apply(Action::AnalysisStarted);
        state.apply(Action::AnalysisSucceeded {
            results: vec![result(
                "topics",
                json!({"topics": [{"name": "Hiring"}, {"name": "Budget"}]}),
            )],
        });

        assert!(!state.analyzing);
        assert!(state.has_insights);
        assert_eq!(state.topics.len(), 2);
        assert_eq!(state.sentiments.len(), 1);
        assert_eq!(state.response_times.len(), 1);
    }

    #[test]
    fn test_analysis_success_with_empty_results_still_marks_insights() {
        let state = ViewState::new()
            .reduce(Action::UploadSucceeded { message_count: 3 })
            .reduce(Action::AnalysisStarted)
            .reduce(Action::AnalysisSucceeded { results: vec![] });
        assert!(state.has_insights);
        assert!(state.topics.is_empty());
    }

    #[test]
    fn test_busy_flags_are_independent() {
        let state = ViewState::new()
            .reduce(Action::UploadSucceeded { message_count: 1 })
            .reduce(Action::UploadStarted)
            .reduce(Action::AnalysisStarted);
        assert!(state.loading && state.analyzing);

        let state = state.reduce(Action::UploadFailed);
        assert!(!state.loading);
        assert!(state.analyzing);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(populated()).unwrap();
        assert_eq!(json["messageCount"], 4);
        assert_eq!(json["hasInsights"], true);
        assert_eq!(json["responseTimes"]["alice"]["avg_response_minutes"], 3.0);
    }
}
