//! Sample message batch used by "Load Sample Data".
//!
//! The fixture is uploaded verbatim; the backend validates it.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Read the sample batch at `path` as a list of raw message objects.
pub async fn load_sample_batch(path: &Path) -> Result<Vec<Value>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ClientError::SampleData(format!("{}: {e}", path.display())))?;

    let batch: Vec<Value> = serde_json::from_str(&raw)
        .map_err(|e| ClientError::SampleData(format!("{}: {e}", path.display())))?;

    debug!(path = %path.display(), count = batch.len(), "Loaded sample batch");
    Ok(batch)
}
