//! Run driver: list the source folder, push every file through the
//! conversion pipeline, upload the results, and report.
//!
//! Only the listing failure is fatal. Every per-file failure is logged with
//! the file name and stage, counted as a skip, and never aborts the rest of
//! the run.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::SyncConfig;
use crate::contract::{BlobSink, Drive, DriveError, PdfConverter};
use crate::pipeline::process_file;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The source folder could not be enumerated; nothing was processed.
    #[error("failed to list folder {folder_id}: {source}")]
    Listing {
        folder_id: String,
        source: DriveError,
    },
}

/// Outcome of one run: which objects were stored and which files were not.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    /// Destination object names, in processing order.
    pub uploaded: Vec<String>,
    pub skipped: Vec<SkippedFile>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

impl SyncReport {
    pub fn uploaded_count(&self) -> usize {
        self.uploaded.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Synchronise the configured folder into the bucket once.
pub async fn synchronise<D, C, S>(
    config: &SyncConfig,
    drive: &D,
    converter: &C,
    sink: &S,
) -> Result<SyncReport, SyncError>
where
    D: Drive,
    C: PdfConverter,
    S: BlobSink,
{
    info!(
        folder_id = %config.folder_id,
        bucket = %config.bucket,
        "starting sync run"
    );

    let files = drive.list_folder(&config.folder_id).await.map_err(|e| {
        error!(folder_id = %config.folder_id, error = %e, "folder listing failed");
        SyncError::Listing {
            folder_id: config.folder_id.clone(),
            source: e,
        }
    })?;

    info!(count = files.len(), folder_id = %config.folder_id, "listed source folder");

    if files.is_empty() {
        warn!(
            folder_id = %config.folder_id,
            "no files found; the folder may be empty or hold only subfolders, \
             sit in a shared drive that needs extra permissions, be invisible \
             to the service account, or the folder id may be wrong"
        );
        return Ok(SyncReport::default());
    }

    let mut report = SyncReport {
        total: files.len(),
        ..Default::default()
    };

    for desc in &files {
        match process_file(drive, converter, desc).await {
            Ok(Some(output)) => {
                match sink
                    .store(&output.object_name, &output.bytes, "application/pdf")
                    .await
                {
                    Ok(()) => {
                        info!(file = %desc.name, object = %output.object_name, "uploaded");
                        report.uploaded.push(output.object_name);
                    }
                    Err(e) => {
                        error!(
                            file = %desc.name,
                            object = %output.object_name,
                            error = %e,
                            "upload failed"
                        );
                        report.skipped.push(SkippedFile {
                            name: desc.name.clone(),
                            reason: format!("upload failed: {e}"),
                        });
                    }
                }
            }
            Ok(None) => {
                report.skipped.push(SkippedFile {
                    name: desc.name.clone(),
                    reason: format!("unsupported type {}", desc.mime_type),
                });
            }
            Err(e) => {
                error!(file = %desc.name, error = %e, "file skipped");
                report.skipped.push(SkippedFile {
                    name: desc.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        uploaded = report.uploaded_count(),
        skipped = report.skipped_count(),
        total = report.total,
        "sync run complete"
    );
    match serde_json::to_string(&report) {
        Ok(json) => debug!(report = %json, "full run report"),
        Err(e) => error!(error = ?e, "failed to serialize run report"),
    }
    Ok(report)
}
