//! pdf-bucket: sync a Google Drive folder into a GCS bucket as PDFs.
//!
//! Files already in PDF form are copied through, Google Workspace documents
//! are exported server-side by Drive, and Office documents are converted
//! locally through a headless LibreOffice subprocess.

pub mod auth;
pub mod classify;
pub mod cli;
pub mod config;
pub mod contract;
pub mod convert;
pub mod drive;
pub mod gcs;
pub mod pipeline;
pub mod sync;
