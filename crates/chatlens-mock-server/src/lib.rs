//! # chatlens-mock-server
//!
//! In-memory stand-in for the insights backend. It serves the same REST
//! contract as the real service: message upload and listing, analysis
//! runs, and the insight history. Topic and sentiment payloads are canned;
//! response times are computed from the uploaded messages.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod store;

pub use crate::analysis::CannedInsights;
pub use crate::api::{build_router, serve, serve_on, AppState};
pub use crate::config::MockConfig;
