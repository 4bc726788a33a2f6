//! Attachment model types shared by storage backends.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A named file variant ("original", "small", ...).
///
/// The set of styles an attachment carries is configuration data; backends
/// only use the name to resolve paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(String);

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The default style every attachment has.
    pub fn original() -> Self {
        Self("original".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Style {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The host record a file is attached to.
///
/// `filename` is `None` until an original file has been recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentInfo {
    /// Attachment name as declared on the host record (e.g. "photo").
    pub name: String,
    /// Host record ID.
    pub id: i64,
    /// Original filename, if a file has been assigned.
    pub filename: Option<String>,
}

impl AttachmentInfo {
    pub fn new(name: impl Into<String>, id: i64, filename: Option<String>) -> Self {
        Self {
            name: name.into(),
            id,
            filename,
        }
    }

    /// Filename without its final extension.
    pub fn basename(&self) -> Option<&str> {
        let filename = self.filename.as_deref()?;
        match filename.rsplit_once('.') {
            Some((base, _)) if !base.is_empty() => Some(base),
            _ => Some(filename),
        }
    }

    /// Final file extension, if the filename has one.
    pub fn extension(&self) -> Option<&str> {
        let filename = self.filename.as_deref()?;
        if !filename.contains('.') {
            return None;
        }
        filename
            .rsplit('.')
            .next()
            .filter(|ext| !ext.is_empty() && ext.len() <= 10)
    }
}

/// A pending write body with its declared content metadata.
#[derive(Debug, Clone)]
pub struct QueuedFile {
    pub bytes: Bytes,
    pub content_type: String,
}

impl QueuedFile {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// Guess the content type from a filename.
    pub fn from_filename(bytes: impl Into<Bytes>, filename: &str) -> Self {
        let content_type = mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string();
        Self::new(bytes, content_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_display() {
        assert_eq!(Style::original().to_string(), "original");
        assert_eq!(Style::from("small").as_str(), "small");
    }

    #[test]
    fn test_basename_and_extension() {
        let info = AttachmentInfo::new("photo", 7, Some("portrait.jpg".to_string()));
        assert_eq!(info.basename(), Some("portrait"));
        assert_eq!(info.extension(), Some("jpg"));

        let double = AttachmentInfo::new("photo", 7, Some("archive.tar.gz".to_string()));
        assert_eq!(double.basename(), Some("archive.tar"));
        assert_eq!(double.extension(), Some("gz"));

        let no_ext = AttachmentInfo::new("photo", 7, Some("README".to_string()));
        assert_eq!(no_ext.basename(), Some("README"));
        assert_eq!(no_ext.extension(), None);
    }

    #[test]
    fn test_missing_file() {
        let info = AttachmentInfo::new("photo", 7, None);
        assert_eq!(info.basename(), None);
        assert_eq!(info.extension(), None);
    }

    #[test]
    fn test_queued_file_content_type_guess() {
        let file = QueuedFile::from_filename(&b"png bytes"[..], "thumb.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.len(), 9);

        let unknown = QueuedFile::from_filename(&b"?"[..], "mystery.zzz");
        assert_eq!(unknown.content_type, "application/octet-stream");
    }
}
