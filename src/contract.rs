//! Collaborator interfaces for the sync pipeline.
//!
//! The run driver and per-file pipeline are written against these traits so
//! the real Drive/GCS/LibreOffice clients can be swapped for mocks in tests.
//! All traits are async, `Send + Sync`, and annotated for `mockall`; the
//! `test-export-mocks` feature (on by default) exports the generated mocks
//! for integration tests.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// One file discovered in the source folder, as returned by the Drive
/// listing call (`files(id,name,mimeType)`).
#[derive(Debug, Clone, Deserialize)]
pub struct FileDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// A PDF ready for the sink: the derived object name and its bytes.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub object_name: String,
    pub bytes: Vec<u8>,
}

/// Failure talking to the Drive API (listing, download, or export).
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("drive request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("drive returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failure storing a blob in the destination bucket.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("sink returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failure in the external document converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to launch converter for {filename}: {source}")]
    Spawn {
        filename: String,
        source: std::io::Error,
    },
    #[error("workspace I/O failed for {filename}: {source}")]
    Io {
        filename: String,
        source: std::io::Error,
    },
    #[error("converter exited with code {code:?} for {filename}: {stderr}")]
    NonZeroExit {
        filename: String,
        /// `None` when the process was terminated by a signal.
        code: Option<i32>,
        stderr: String,
    },
    #[error("converter timed out after {timeout:?} for {filename}")]
    Timeout {
        filename: String,
        timeout: std::time::Duration,
    },
    #[error("converter produced no output file {expected} for {filename}")]
    MissingOutput { filename: String, expected: String },
}

/// Read-side collaborator: the Google Drive folder being archived.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Drive: Send + Sync {
    /// List the files directly inside the folder. Non-recursive; trashed
    /// items are excluded by the query.
    async fn list_folder(&self, folder_id: &str) -> Result<Vec<FileDescriptor>, DriveError>;

    /// Download the raw bytes of any Drive file.
    async fn download(&self, file_id: &str) -> Result<Vec<u8>, DriveError>;

    /// Export a Google Workspace document to PDF server-side.
    async fn export_pdf(&self, file_id: &str) -> Result<Vec<u8>, DriveError>;
}

/// Write-side collaborator: the destination object store.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait BlobSink: Send + Sync {
    /// Persist a named blob, overwriting any existing object of that name.
    /// Must be safe to call concurrently for distinct names.
    async fn store(&self, name: &str, bytes: &[u8], content_type: &str)
        -> Result<(), SinkError>;
}

/// External document converter: raw Office bytes in, PDF bytes out.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// Convert the document `bytes` (named `filename` so the converter can
    /// infer the format) into PDF bytes.
    async fn convert_to_pdf(&self, bytes: &[u8], filename: &str) -> Result<Vec<u8>, ConvertError>;
}
