//! LibreOffice adapter: stage bytes in a scoped workspace, shell out to
//! `soffice`, read the produced PDF back.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::contract::{ConvertError, PdfConverter};

/// Converts Office documents to PDF by invoking headless LibreOffice.
///
/// Every invocation stages its input in a fresh, exclusively owned temporary
/// directory, so concurrent conversions never collide on filenames. The
/// directory is removed on every exit path, success or failure.
pub struct SofficeConverter {
    program: String,
    timeout: Option<Duration>,
}

impl SofficeConverter {
    pub fn new() -> Self {
        Self {
            program: "soffice".to_string(),
            timeout: None,
        }
    }

    /// Substitute the converter executable (tests run a stub script).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Bound the subprocess wait. Off by default: without it a hung
    /// converter blocks the run indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for SofficeConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Output name LibreOffice derives: last extension replaced with `.pdf`,
/// or `.pdf` appended when there is no extension.
fn pdf_output_name(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) => format!("{stem}.pdf"),
        None => format!("{filename}.pdf"),
    }
}

#[async_trait]
impl PdfConverter for SofficeConverter {
    async fn convert_to_pdf(&self, bytes: &[u8], filename: &str) -> Result<Vec<u8>, ConvertError> {
        let io_err = |e| ConvertError::Io {
            filename: filename.to_string(),
            source: e,
        };

        // Drive names may contain path separators; stage by basename so the
        // source file always lands inside the workspace.
        let staged_name = match std::path::Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
        {
            Some(name) => name,
            None => {
                return Err(ConvertError::Io {
                    filename: filename.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "file name has no usable basename",
                    ),
                })
            }
        };

        let workspace = TempDir::new().map_err(io_err)?;
        let src_path = workspace.path().join(staged_name);
        tokio::fs::write(&src_path, bytes).await.map_err(io_err)?;

        debug!(
            file = filename,
            workspace = %workspace.path().display(),
            "staged source document for conversion"
        );

        let mut command = Command::new(&self.program);
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(workspace.path())
            .arg(&src_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, command.output()).await {
                Ok(result) => result,
                Err(_) => {
                    error!(file = filename, ?limit, "converter timed out");
                    return Err(ConvertError::Timeout {
                        filename: filename.to_string(),
                        timeout: limit,
                    });
                }
            },
            None => command.output().await,
        };

        let output = waited.map_err(|e| ConvertError::Spawn {
            filename: filename.to_string(),
            source: e,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(
                file = filename,
                code = ?output.status.code(),
                stderr = %stderr,
                "converter exited non-zero"
            );
            return Err(ConvertError::NonZeroExit {
                filename: filename.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        let expected = pdf_output_name(staged_name);
        let out_path = workspace.path().join(&expected);
        if !out_path.exists() {
            error!(
                file = filename,
                expected = %expected,
                "converter exited cleanly but produced no output file"
            );
            return Err(ConvertError::MissingOutput {
                filename: filename.to_string(),
                expected,
            });
        }

        let pdf = tokio::fs::read(&out_path).await.map_err(io_err)?;
        info!(file = filename, size = pdf.len(), "converted document to PDF");
        Ok(pdf)
        // workspace dropped here; the directory and its contents are removed
    }
}

#[cfg(test)]
mod tests {
    use super::pdf_output_name;

    #[test]
    fn replaces_last_extension() {
        assert_eq!(pdf_output_name("report.docx"), "report.pdf");
        assert_eq!(pdf_output_name("archive.tar.xls"), "archive.tar.pdf");
    }

    #[test]
    fn appends_when_no_extension() {
        assert_eq!(pdf_output_name("README"), "README.pdf");
    }
}
