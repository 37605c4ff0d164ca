//! # chatlens-shared
//!
//! Shape contract shared by the dashboard client and the mock backend:
//! chat messages, the analysis result envelope and its typed payloads.

pub mod constants;
pub mod insight;
pub mod types;

pub use insight::{AnalysisEnvelope, AnalysisResult, AnalyzeResponse, InsightPayload, ResponseTimes};
pub use types::{Message, ResponseTime, Sentiment, SentimentLabel, Topic};
