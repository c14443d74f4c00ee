//! Input acquisition: turn a user gesture into at most one file.
//!
//! Two gestures exist. *Browse* names a single file; it is forwarded as-is,
//! the same way a file picker's type filter is only advisory. *Drop* hands
//! over a batch of items, each with a declared media type; only the first
//! item is considered and it is forwarded only when it declares itself a
//! PDF. A rejected drop is not an error: it is logged and nothing happens.

use crate::error::TokenCountError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Media type a dropped item must declare to be accepted.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Declared type for anything that does not look like a PDF.
pub const OCTET_STREAM_MEDIA_TYPE: &str = "application/octet-stream";

/// A file's raw bytes plus its display name, held only for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// One item of a drop, with the media type it claims to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedItem {
    pub path: PathBuf,
    pub media_type: String,
}

impl DroppedItem {
    /// Build a dropped item whose media type is derived from its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let media_type = declared_media_type(&path).to_string();
        Self { path, media_type }
    }
}

/// A user action that may select a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// A single file was picked.
    Browse(PathBuf),
    /// One or more items were dropped.
    Drop(Vec<DroppedItem>),
}

/// The media type a path declares, judged by its extension.
pub fn declared_media_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => OCTET_STREAM_MEDIA_TYPE,
    }
}

/// Resolve a gesture to the single file that should be processed, if any.
pub fn select(gesture: &Gesture) -> Option<&Path> {
    match gesture {
        Gesture::Browse(path) => Some(path.as_path()),
        Gesture::Drop(items) => {
            let (first, rest) = items.split_first()?;
            if !rest.is_empty() {
                warn!(
                    "{} extra dropped item(s) ignored; only '{}' is considered",
                    rest.len(),
                    first.path.display()
                );
            }
            if first.media_type != PDF_MEDIA_TYPE {
                warn!(
                    "Only PDF files are accepted: '{}' declares '{}'",
                    first.path.display(),
                    first.media_type
                );
                return None;
            }
            Some(first.path.as_path())
        }
    }
}

/// Display name for a path: its final component, or the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a file's bytes asynchronously.
///
/// No content validation happens here; a file that is not a PDF fails
/// later, when the engine tries to open it.
pub async fn read_upload(
    path: &Path,
    soft_limit_bytes: u64,
) -> Result<UploadedFile, TokenCountError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| TokenCountError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let name = display_name(path);
    if bytes.len() as u64 > soft_limit_bytes {
        warn!(
            "'{}' is {} bytes, above the {} byte soft limit; processing anyway",
            name,
            bytes.len(),
            soft_limit_bytes
        );
    }
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(UploadedFile { name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_from_extension() {
        assert_eq!(declared_media_type(Path::new("a/report.pdf")), PDF_MEDIA_TYPE);
        assert_eq!(declared_media_type(Path::new("REPORT.PDF")), PDF_MEDIA_TYPE);
        assert_eq!(declared_media_type(Path::new("notes.txt")), OCTET_STREAM_MEDIA_TYPE);
        assert_eq!(declared_media_type(Path::new("pdf")), OCTET_STREAM_MEDIA_TYPE);
    }

    #[test]
    fn browse_forwards_anything() {
        let gesture = Gesture::Browse(PathBuf::from("notes.txt"));
        assert_eq!(select(&gesture), Some(Path::new("notes.txt")));
    }

    #[test]
    fn drop_forwards_first_pdf_only() {
        let gesture = Gesture::Drop(vec![
            DroppedItem::from_path("first.pdf"),
            DroppedItem::from_path("second.pdf"),
        ]);
        assert_eq!(select(&gesture), Some(Path::new("first.pdf")));
    }

    #[test]
    fn drop_rejects_non_pdf_first_item() {
        let gesture = Gesture::Drop(vec![
            DroppedItem::from_path("photo.png"),
            DroppedItem::from_path("second.pdf"),
        ]);
        assert_eq!(select(&gesture), None);
    }

    #[test]
    fn drop_trusts_declared_type_over_extension() {
        let gesture = Gesture::Drop(vec![DroppedItem {
            path: PathBuf::from("upload.bin"),
            media_type: PDF_MEDIA_TYPE.into(),
        }]);
        assert_eq!(select(&gesture), Some(Path::new("upload.bin")));
    }

    #[test]
    fn empty_drop_selects_nothing() {
        assert_eq!(select(&Gesture::Drop(Vec::new())), None);
    }

    #[test]
    fn display_name_is_file_name() {
        assert_eq!(display_name(Path::new("/tmp/dir/report.pdf")), "report.pdf");
    }

    #[tokio::test]
    async fn read_upload_returns_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.7 fake").unwrap();

        let upload = read_upload(&path, 4).await.unwrap();
        assert_eq!(upload.name, "doc.pdf");
        assert_eq!(upload.bytes, b"%PDF-1.7 fake");
    }

    #[test]
    fn read_upload_missing_file_is_file_read_error() {
        let missing = Path::new("/definitely/not/a/real/file.pdf");
        let err = tokio_test::block_on(read_upload(missing, 1024)).unwrap_err();
        assert!(matches!(err, TokenCountError::FileRead { .. }));
    }
}
