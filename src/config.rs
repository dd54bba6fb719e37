//! Run configuration, resolved from CLI flags and environment variables.

use anyhow::{Context, Result};
use tracing::info;

/// The three required parameters of a sync run. Absence of any of them is
/// a fatal startup condition.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Drive folder to enumerate.
    pub folder_id: String,
    /// Destination GCS bucket.
    pub bucket: String,
    /// GCP project the job authenticates under.
    pub project: String,
}

impl SyncConfig {
    /// Resolve configuration: explicit CLI values win, otherwise the
    /// environment variables the Cloud Run job is deployed with.
    pub fn resolve(folder_id: Option<String>, bucket: Option<String>) -> Result<Self> {
        let folder_id = match folder_id {
            Some(value) => value,
            None => require("DRIVE_FOLDER_ID")?,
        };
        let bucket = match bucket {
            Some(value) => value,
            None => require("GCS_BUCKET")?,
        };
        let project = require("GCP_PROJECT")?;

        info!(
            folder_id = %folder_id,
            bucket = %bucket,
            project = %project,
            "configuration resolved"
        );
        Ok(Self {
            folder_id,
            bucket,
            project,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} environment variable not set"))
}
