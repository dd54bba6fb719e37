//! Pure classification: which conversion path a Drive file needs.

/// MIME prefix shared by all Google Workspace document types
/// (Docs, Sheets, Slides, ...). These are exported to PDF by Drive itself.
pub const GOOGLE_APPS_PREFIX: &str = "application/vnd.google-apps.";

/// Office formats handed to LibreOffice. Supporting a new convertible
/// format is a one-line addition here.
pub const OFFICE_MIME_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/msword",
    "application/vnd.ms-excel",
];

/// How a single file must be handled to end up as a PDF in the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Already a PDF; transferred as-is.
    PassThrough,
    /// Google Workspace document; Drive exports it to PDF server-side.
    NativeExport,
    /// Binary/OOXML office document; converted locally via LibreOffice.
    OfficeConvert,
    /// Nothing we can turn into a PDF; the file is skipped.
    Unsupported,
}

/// Decide the disposition for a file from its MIME type and name.
///
/// Total over arbitrary input strings; the `.pdf` name check is a fallback
/// for sources that report a generic MIME type for uploaded PDFs.
pub fn classify(mime_type: &str, name: &str) -> Disposition {
    if mime_type == "application/pdf" || name.to_lowercase().ends_with(".pdf") {
        return Disposition::PassThrough;
    }
    if mime_type.starts_with(GOOGLE_APPS_PREFIX) {
        return Disposition::NativeExport;
    }
    if OFFICE_MIME_TYPES.contains(&mime_type) {
        return Disposition::OfficeConvert;
    }
    Disposition::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_mime_is_pass_through() {
        assert_eq!(classify("application/pdf", "paper"), Disposition::PassThrough);
    }

    #[test]
    fn pdf_extension_wins_regardless_of_mime() {
        assert_eq!(
            classify("application/octet-stream", "scan.PDF"),
            Disposition::PassThrough
        );
        assert_eq!(classify("", "a.pdf"), Disposition::PassThrough);
    }

    #[test]
    fn google_apps_prefix_is_native_export() {
        assert_eq!(
            classify("application/vnd.google-apps.document", "notes"),
            Disposition::NativeExport
        );
        assert_eq!(
            classify("application/vnd.google-apps.spreadsheet", "budget"),
            Disposition::NativeExport
        );
    }

    #[test]
    fn every_office_mime_is_office_convert() {
        for mime in OFFICE_MIME_TYPES {
            assert_eq!(classify(mime, "file.bin"), Disposition::OfficeConvert);
        }
    }

    #[test]
    fn anything_else_is_unsupported() {
        assert_eq!(classify("text/plain", "d.txt"), Disposition::Unsupported);
        assert_eq!(classify("", ""), Disposition::Unsupported);
        assert_eq!(classify("application/", "x"), Disposition::Unsupported);
    }
}
