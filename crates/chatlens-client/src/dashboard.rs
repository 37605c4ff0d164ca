//! Dashboard orchestration.
//!
//! [`Dashboard`] sequences the three user-visible flows (initial load,
//! "Load Sample Data", "Run Analysis") against an [`InsightsBackend`],
//! feeds the outcomes through the [`ViewState`] reducer, and raises
//! notifications. Every state transition is published on a `watch` channel
//! so a renderer can observe the busy flags while a call is in flight.
//!
//! Failures never escape: they become error notifications, the busy flag is
//! reset and the previous view state is kept. There are no retries.

use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::{debug, info};

use crate::api::InsightsBackend;
use crate::error::ClientError;
use crate::events::{Notification, Notifier};
use crate::sample::load_sample_batch;
use crate::state::{Action, ViewState};

/// Result of a user-triggered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The action ran and failed; carries the message shown to the user.
    Failed(String),
    /// The action was disabled and did not run.
    Skipped,
}

pub struct Dashboard<B, N> {
    backend: B,
    notifier: N,
    sample_path: PathBuf,
    state: watch::Sender<ViewState>,
}

impl<B: InsightsBackend, N: Notifier> Dashboard<B, N> {
    pub fn new(backend: B, notifier: N, sample_path: impl Into<PathBuf>) -> Self {
        let (state, _) = watch::channel(ViewState::new());
        Self {
            backend,
            notifier,
            sample_path: sample_path.into(),
            state,
        }
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receive every subsequent view state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn sample_path(&self) -> &Path {
        &self.sample_path
    }

    /// Fetch existing messages and insights together.
    ///
    /// If either call fails both are treated as unavailable and the
    /// dashboard stays empty; the backend may simply not be up yet.
    pub async fn load_existing(&self) {
        self.dispatch(Action::InitialLoadStarted);

        let fetched = tokio::try_join!(self.backend.list_messages(), self.backend.list_insights());

        match fetched {
            Ok((messages, insights)) => {
                info!(
                    messages = messages.len(),
                    insights = insights.len(),
                    "Loaded existing dashboard data"
                );
                self.dispatch(Action::InitialLoadSucceeded {
                    message_count: messages.len(),
                    insights,
                });
            }
            Err(e) => {
                debug!(error = %e, "Backend not available, starting empty");
                self.dispatch(Action::InitialLoadFailed);
            }
        }
    }

    /// "Load Sample Data": upload the sample batch.
    pub async fn load_sample(&self) -> Outcome {
        if !self.begin(ViewState::can_load_sample, Action::UploadStarted) {
            debug!("Load Sample Data is disabled while an upload is in flight");
            return Outcome::Skipped;
        }

        let uploaded = match load_sample_batch(&self.sample_path).await {
            Ok(batch) => self.backend.upload_messages(&batch).await,
            Err(e) => Err(e),
        };

        match uploaded {
            Ok(messages) => {
                let count = messages.len();
                self.dispatch(Action::UploadSucceeded {
                    message_count: count,
                });
                info!(count, "Sample messages uploaded");
                self.notifier
                    .notify(Notification::success(format!("Loaded {count} messages")));
                Outcome::Completed
            }
            Err(e) => {
                self.dispatch(Action::UploadFailed);
                self.fail(&e, "Upload failed")
            }
        }
    }

    /// "Run Analysis": trigger the backend job and show its results.
    pub async fn run_analysis(&self) -> Outcome {
        if !self.begin(ViewState::can_run_analysis, Action::AnalysisStarted) {
            debug!("Run Analysis is disabled (no messages or a run is in flight)");
            return Outcome::Skipped;
        }

        match self.backend.trigger_analysis().await {
            Ok(response) => {
                info!(
                    status = %response.status,
                    results = response.results.len(),
                    "Analysis finished"
                );
                self.dispatch(Action::AnalysisSucceeded {
                    results: response.results,
                });
                self.notifier.notify(Notification::success("Analysis complete"));
                Outcome::Completed
            }
            Err(e) => {
                self.dispatch(Action::AnalysisFailed);
                self.fail(&e, "Analysis failed")
            }
        }
    }

    fn dispatch(&self, action: Action) {
        self.state.send_modify(|state| state.apply(action));
    }

    /// Apply `action` only if `enabled` holds; checked and applied atomically.
    fn begin(&self, enabled: fn(&ViewState) -> bool, action: Action) -> bool {
        self.state.send_if_modified(|state| {
            if enabled(state) {
                state.apply(action);
                true
            } else {
                false
            }
        })
    }

    fn fail(&self, error: &ClientError, fallback: &str) -> Outcome {
        let mut message = error.to_string();
        if message.trim().is_empty() {
            message = fallback.to_string();
        }
        self.notifier.notify(Notification::error(message.clone()));
        Outcome::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chatlens_shared::{AnalysisEnvelope, AnalysisResult, AnalyzeResponse, Message};
    use serde_json::{json, Value};

    use crate::error::Result;
    use crate::events::{NotificationKind, RecordingNotifier};

    fn result(id: &str, analysis_type: &str, data: Value, created_at: &str) -> AnalysisResult {
        AnalysisEnvelope {
            id: id.into(),
            analysis_type: analysis_type.into(),
            result_data: data,
            created_at: created_at.into(),
        }
        .into()
    }

    fn message(i: usize) -> Message {
        Message {
            id: format!("m-{i}"),
            channel: "#general".into(),
            author: "alice".into(),
            content: format!("message {i}"),
            timestamp: "2024-01-15T09:00:00".into(),
            created_at: "2024-06-01T12:00:00Z".into(),
        }
    }

    /// In-memory backend with switchable failures.
    #[derive(Default)]
    struct FakeBackend {
        messages: Mutex<Vec<Message>>,
        insights: Vec<AnalysisResult>,
        analysis: Vec<AnalysisResult>,
        fail_listing: bool,
        fail_insights: bool,
        fail_upload: bool,
        fail_analysis: bool,
        analyze_calls: AtomicUsize,
    }

    #[async_trait]
    impl InsightsBackend for FakeBackend {
        async fn upload_messages(&self, batch: &[Value]) -> Result<Vec<Message>> {
            if self.fail_upload {
                return Err(ClientError::request_failed("Unprocessable Entity"));
            }
            let mut stored = self.messages.lock().unwrap();
            let start = stored.len();
            stored.extend((start..start + batch.len()).map(message));
            Ok(stored.clone())
        }

        async fn list_messages(&self) -> Result<Vec<Message>> {
            if self.fail_listing {
                return Err(ClientError::request_failed("connection refused"));
            }
            Ok(self.messages.lock().unwrap().clone())
        }

        async fn trigger_analysis(&self) -> Result<AnalyzeResponse> {
            self.analyze_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail_analysis {
                return Err(ClientError::request_failed("Service Unavailable"));
            }
            Ok(AnalyzeResponse {
                status: "completed".into(),
                results: self.analysis.clone(),
            })
        }

        async fn list_insights(&self) -> Result<Vec<AnalysisResult>> {
            if self.fail_listing || self.fail_insights {
                return Err(ClientError::request_failed("connection refused"));
            }
            Ok(self.insights.clone())
        }
    }

    fn sample_file(count: usize) -> tempfile::NamedTempFile {
        let batch: Vec<Value> = (0..count)
            .map(|i| json!({"channel": "#general", "author": "bob", "content": format!("m{i}"), "timestamp": "2024-01-15T09:00:00"}))
            .collect();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_string(&batch).unwrap()).unwrap();
        file
    }

    fn canned_analysis() -> Vec<AnalysisResult> {
        vec![
            result("t", "topics", json!({"topics": [{"name": "Release"}, {"name": "Hiring"}]}), ""),
            result(
                "s",
                "sentiment",
                json!({"sentiments": [
                    {"author": "alice", "overall_sentiment": "positive", "confidence": 0.9},
                    {"author": "bob", "overall_sentiment": "neutral", "confidence": 0.6},
                    {"author": "carol", "overall_sentiment": "negative", "confidence": 0.7}
                ]}),
                "",
            ),
            result(
                "r",
                "response_time",
                json!({
                    "alice": {"avg_response_minutes": 4.0},
                    "bob": {"avg_response_minutes": 12.5},
                    "carol": {"avg_response_minutes": 1.5}
                }),
                "",
            ),
        ]
    }

    #[tokio::test]
    async fn test_initial_load_applies_insights_in_received_order() {
        let backend = FakeBackend {
            messages: Mutex::new((0..5).map(message).collect()),
            insights: vec![
                result("new", "topics", json!({"topics": [{"name": "Newest"}]}), "2024-06-02T10:00:00Z"),
                result("old", "topics", json!({"topics": [{"name": "Oldest"}]}), "2024-06-01T10:00:00Z"),
            ],
            ..Default::default()
        };
        let dashboard = Dashboard::new(backend, RecordingNotifier::new(), "unused.json");

        dashboard.load_existing().await;

        let state = dashboard.state();
        assert_eq!(state.message_count, 5);
        assert!(state.has_insights);
        assert_eq!(state.topics[0].name, "Oldest");
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_initial_load_failure_is_swallowed() {
        let backend = FakeBackend {
            fail_listing: true,
            ..Default::default()
        };
        let notifier = Arc::new(RecordingNotifier::new());
        let dashboard = Dashboard::new(backend, notifier.clone(), "unused.json");

        dashboard.load_existing().await;

        assert_eq!(dashboard.state(), ViewState::new());
        assert!(notifier.take().is_empty());
    }

    #[tokio::test]
    async fn test_initial_load_discards_messages_when_insights_fail() {
        let backend = FakeBackend {
            messages: Mutex::new((0..4).map(message).collect()),
            insights: canned_analysis(),
            fail_insights: true,
            ..Default::default()
        };
        let notifier = Arc::new(RecordingNotifier::new());
        let dashboard = Dashboard::new(backend, notifier.clone(), "unused.json");

        dashboard.load_existing().await;

        let state = dashboard.state();
        assert_eq!(state.message_count, 0);
        assert!(!state.has_insights);
        assert_eq!(state, ViewState::new());
        assert!(notifier.take().is_empty());
    }

    #[tokio::test]
    async fn test_run_analysis_disabled_without_messages() {
        let dashboard = Dashboard::new(FakeBackend::default(), RecordingNotifier::new(), "unused.json");

        assert_eq!(dashboard.run_analysis().await, Outcome::Skipped);
        assert_eq!(dashboard.backend.analyze_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upload_then_analyze_end_to_end() {
        let sample = sample_file(25);
        let backend = FakeBackend {
            analysis: canned_analysis(),
            ..Default::default()
        };
        let notifier = Arc::new(RecordingNotifier::new());
        let dashboard = Dashboard::new(backend, notifier.clone(), sample.path());

        dashboard.load_existing().await;
        assert_eq!(dashboard.state().message_count, 0);

        assert_eq!(dashboard.load_sample().await, Outcome::Completed);
        let state = dashboard.state();
        assert_eq!(state.message_count, 25);
        assert!(!state.has_insights);
        assert!(!state.loading);

        assert_eq!(dashboard.run_analysis().await, Outcome::Completed);
        let state = dashboard.state();
        assert!(state.has_insights);
        assert!(!state.analyzing);
        assert_eq!(state.topics.len(), 2);
        assert_eq!(state.sentiments.len(), 3);
        assert_eq!(state.response_times.len(), 3);

        let seen = notifier.take();
        assert_eq!(
            seen,
            vec![
                Notification::success("Loaded 25 messages"),
                Notification::success("Analysis complete"),
            ]
        );
    }

    #[tokio::test]
    async fn test_analysis_failure_keeps_previous_view() {
        let backend = FakeBackend {
            messages: Mutex::new((0..3).map(message).collect()),
            insights: canned_analysis(),
            fail_analysis: true,
            ..Default::default()
        };
        let notifier = Arc::new(RecordingNotifier::new());
        let dashboard = Dashboard::new(backend, notifier.clone(), "unused.json");
        dashboard.load_existing().await;
        let before = dashboard.state();

        let outcome = dashboard.run_analysis().await;

        assert_eq!(outcome, Outcome::Failed("Service Unavailable".into()));
        assert_eq!(dashboard.state(), before);
        assert!(!dashboard.state().analyzing);
        let seen = notifier.take();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Error);
        assert_eq!(seen[0].message, "Service Unavailable");
    }

    #[tokio::test]
    async fn test_upload_failure_resets_loading() {
        let sample = sample_file(2);
        let backend = FakeBackend {
            fail_upload: true,
            ..Default::default()
        };
        let notifier = Arc::new(RecordingNotifier::new());
        let dashboard = Dashboard::new(backend, notifier.clone(), sample.path());

        let outcome = dashboard.load_sample().await;

        assert_eq!(outcome, Outcome::Failed("Unprocessable Entity".into()));
        let state = dashboard.state();
        assert!(!state.loading);
        assert_eq!(state.message_count, 0);
        assert_eq!(notifier.take()[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_unreadable_sample_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let dashboard = Dashboard::new(
            FakeBackend::default(),
            notifier.clone(),
            dir.path().join("missing.json"),
        );

        let outcome = dashboard.load_sample().await;

        assert!(matches!(outcome, Outcome::Failed(ref m) if m.starts_with("Failed to read sample data")));
        assert!(!dashboard.state().loading);
    }

    #[tokio::test]
    async fn test_subscribers_observe_busy_flag() {
        let backend = FakeBackend {
            messages: Mutex::new(vec![message(0)]),
            analysis: canned_analysis(),
            ..Default::default()
        };
        let dashboard = Dashboard::new(backend, RecordingNotifier::new(), "unused.json");
        dashboard.load_existing().await;

        let mut rx = dashboard.subscribe();
        let _ = rx.borrow_and_update();

        let (outcome, saw_analyzing) = tokio::join!(dashboard.run_analysis(), async {
            rx.changed().await.unwrap();
            rx.borrow_and_update().analyzing
        });

        assert_eq!(outcome, Outcome::Completed);
        assert!(saw_analyzing);
    }
}
