use pdf_bucket::classify::{classify, Disposition, GOOGLE_APPS_PREFIX, OFFICE_MIME_TYPES};

#[test]
fn office_allow_list_classifies_as_office_convert() {
    for mime in OFFICE_MIME_TYPES {
        assert_eq!(
            classify(mime, "document.bin"),
            Disposition::OfficeConvert,
            "expected OfficeConvert for {mime}"
        );
    }
}

#[test]
fn workspace_mime_types_classify_as_native_export() {
    for suffix in ["document", "spreadsheet", "presentation", "drawing"] {
        let mime = format!("{GOOGLE_APPS_PREFIX}{suffix}");
        assert_eq!(classify(&mime, "untitled"), Disposition::NativeExport);
    }
}

#[test]
fn pdf_by_mime_or_name_is_pass_through_regardless_of_content_type() {
    assert_eq!(classify("application/pdf", "x"), Disposition::PassThrough);
    assert_eq!(classify("text/plain", "report.pdf"), Disposition::PassThrough);
    assert_eq!(classify("text/plain", "REPORT.Pdf"), Disposition::PassThrough);
    // Name rule even wins over the office allow-list.
    assert_eq!(
        classify("application/msword", "scanned.pdf"),
        Disposition::PassThrough
    );
}

#[test]
fn everything_else_is_unsupported() {
    for (mime, name) in [
        ("text/plain", "d.txt"),
        ("image/png", "photo.png"),
        ("application/zip", "bundle.zip"),
        ("", ""),
        ("application/vnd.google-apps", "prefix-without-dot"),
    ] {
        assert_eq!(
            classify(mime, name),
            Disposition::Unsupported,
            "expected Unsupported for ({mime}, {name})"
        );
    }
}
