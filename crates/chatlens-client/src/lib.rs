//! # chatlens-client
//!
//! Client side of the Communication Insight Extractor: the HTTP transport
//! for the insights backend, the dashboard state machine driving
//! "Load Sample Data" and "Run Analysis", and a terminal renderer.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod insights;
pub mod presentation;
pub mod render;
pub mod sample;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use crate::api::{ApiClient, InsightsBackend};
pub use crate::config::ClientConfig;
pub use crate::dashboard::{Dashboard, Outcome};
pub use crate::error::ClientError;
pub use crate::state::ViewState;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chatlens_client=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
