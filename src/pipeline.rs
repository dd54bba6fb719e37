//! Per-file conversion pipeline: classify, fetch or export, convert.
//!
//! Every failure here is local to one file; the run driver records it as a
//! skip and moves on.

use thiserror::Error;
use tracing::{info, warn};

use crate::classify::{classify, Disposition};
use crate::contract::{
    ConversionOutput, ConvertError, Drive, DriveError, FileDescriptor, PdfConverter,
};

/// A per-file failure, naming the stage it occurred in and the file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("download failed for {name}: {source}")]
    Download { name: String, source: DriveError },
    #[error("export failed for {name}: {source}")]
    Export { name: String, source: DriveError },
    #[error("conversion failed for {name}: {source}")]
    Conversion { name: String, source: ConvertError },
}

/// Run one descriptor through classify → fetch → convert.
///
/// `Ok(None)` means the file type is unsupported and nothing is uploaded;
/// no fetch is performed in that case. A file that completes yields exactly
/// one output: the original name for pass-through PDFs, `name + ".pdf"` for
/// everything converted.
pub async fn process_file<D, C>(
    drive: &D,
    converter: &C,
    desc: &FileDescriptor,
) -> Result<Option<ConversionOutput>, FileError>
where
    D: Drive,
    C: PdfConverter,
{
    let disposition = classify(&desc.mime_type, &desc.name);
    info!(
        file = %desc.name,
        mime = %desc.mime_type,
        ?disposition,
        "processing file"
    );

    match disposition {
        Disposition::PassThrough => {
            let bytes = drive.download(&desc.id).await.map_err(|e| {
                FileError::Download {
                    name: desc.name.clone(),
                    source: e,
                }
            })?;
            Ok(Some(ConversionOutput {
                object_name: desc.name.clone(),
                bytes,
            }))
        }
        Disposition::NativeExport => {
            let bytes = drive.export_pdf(&desc.id).await.map_err(|e| {
                FileError::Export {
                    name: desc.name.clone(),
                    source: e,
                }
            })?;
            Ok(Some(ConversionOutput {
                object_name: format!("{}.pdf", desc.name),
                bytes,
            }))
        }
        Disposition::OfficeConvert => {
            let raw = drive.download(&desc.id).await.map_err(|e| {
                FileError::Download {
                    name: desc.name.clone(),
                    source: e,
                }
            })?;
            let bytes = converter.convert_to_pdf(&raw, &desc.name).await.map_err(|e| {
                FileError::Conversion {
                    name: desc.name.clone(),
                    source: e,
                }
            })?;
            Ok(Some(ConversionOutput {
                object_name: format!("{}.pdf", desc.name),
                bytes,
            }))
        }
        Disposition::Unsupported => {
            warn!(file = %desc.name, mime = %desc.mime_type, "unsupported type, skipping");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{MockDrive, MockPdfConverter};

    fn descriptor(id: &str, name: &str, mime: &str) -> FileDescriptor {
        FileDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: mime.to_string(),
        }
    }

    #[tokio::test]
    async fn unsupported_file_is_skipped_without_fetching() {
        let drive = MockDrive::new();
        let converter = MockPdfConverter::new();
        // No expectations set: any download/export call would panic.

        let result = process_file(&drive, &converter, &descriptor("d", "d.txt", "text/plain"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn pass_through_keeps_original_name() {
        let mut drive = MockDrive::new();
        drive
            .expect_download()
            .returning(|_| Ok(b"%PDF-1.4".to_vec()));
        let converter = MockPdfConverter::new();

        let output = process_file(
            &drive,
            &converter,
            &descriptor("a", "a.pdf", "application/pdf"),
        )
        .await
        .unwrap()
        .expect("pass-through yields an output");
        assert_eq!(output.object_name, "a.pdf");
        assert_eq!(output.bytes, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn native_export_appends_pdf_extension() {
        let mut drive = MockDrive::new();
        drive
            .expect_export_pdf()
            .returning(|_| Ok(b"exported".to_vec()));
        let converter = MockPdfConverter::new();

        let output = process_file(
            &drive,
            &converter,
            &descriptor("c", "c.gdoc", "application/vnd.google-apps.document"),
        )
        .await
        .unwrap()
        .expect("native export yields an output");
        assert_eq!(output.object_name, "c.gdoc.pdf");
    }

    #[tokio::test]
    async fn office_convert_routes_through_converter() {
        let mut drive = MockDrive::new();
        drive.expect_download().returning(|_| Ok(b"docx".to_vec()));
        let mut converter = MockPdfConverter::new();
        converter
            .expect_convert_to_pdf()
            .withf(|bytes, name| bytes == b"docx" && name == "b.docx")
            .returning(|_, _| Ok(b"converted".to_vec()));

        let output = process_file(
            &drive,
            &converter,
            &descriptor(
                "b",
                "b.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
        )
        .await
        .unwrap()
        .expect("office convert yields an output");
        assert_eq!(output.object_name, "b.docx.pdf");
        assert_eq!(output.bytes, b"converted");
    }
}
