//! Uploaded artifacts: the files a user has added to the session.
//!
//! An [`Artifact`] is created once on upload and never mutated; the session
//! store keeps them in insertion order for the lifetime of the session. The
//! raw content handle ([`ArtifactData`]) is opaque to everything except the
//! reader and the preview projector: in a browser front-end it would be a
//! File/Blob reference, here it is either captured bytes or a path.

use std::path::PathBuf;
use std::sync::Arc;

/// Classification of an uploaded artifact.
///
/// Only `Text` artifacts are ever resolved to a request payload; `Image`
/// artifacts drive the preview; `Other` artifacts are listed but inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Text,
    Image,
    Other,
}

impl ArtifactKind {
    /// Classify from a MIME media type, e.g. from a drag-and-drop event.
    ///
    /// Accepted images mirror what the preview can display: JPEG, PNG, GIF.
    pub fn from_media_type(media_type: &str) -> Self {
        match media_type.trim().to_ascii_lowercase().as_str() {
            "text/plain" => ArtifactKind::Text,
            "image/jpeg" | "image/png" | "image/gif" => ArtifactKind::Image,
            _ => ArtifactKind::Other,
        }
    }

    /// Classify from a file name's extension, for inputs that carry no
    /// media type (CLI paths, plain file pickers).
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => ArtifactKind::Text,
            "jpg" | "jpeg" | "png" | "gif" => ArtifactKind::Image,
            _ => ArtifactKind::Other,
        }
    }
}

/// Opaque handle to an artifact's raw content.
///
/// Cloning is cheap: captured bytes sit behind an `Arc`, paths are small.
#[derive(Debug, Clone)]
pub enum ArtifactData {
    /// Content captured into memory at upload time (drag-and-drop, paste).
    Bytes(Arc<[u8]>),
    /// Content still on disk; read lazily when resolved or previewed.
    Path(PathBuf),
}

/// A file the user has added to the session.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Display name, usually the original file name.
    pub name: String,
    /// Size in bytes as reported at upload time.
    pub size_bytes: u64,
    /// Classification; fixed at creation.
    pub kind: ArtifactKind,
    /// Raw content handle.
    pub data: ArtifactData,
}

impl Artifact {
    /// Create an artifact from captured bytes and an explicit media type.
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        Self {
            name,
            size_bytes: bytes.len() as u64,
            kind: ArtifactKind::from_media_type(media_type),
            data: ArtifactData::Bytes(bytes),
        }
    }

    /// Create an artifact referencing a file on disk, classified by its
    /// extension. `size_bytes` is taken from the file metadata when
    /// available, otherwise 0 (the size is informational only).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let size_bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        Self {
            kind: ArtifactKind::from_file_name(&name),
            name,
            size_bytes,
            data: ArtifactData::Path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_classification() {
        assert_eq!(ArtifactKind::from_media_type("text/plain"), ArtifactKind::Text);
        assert_eq!(ArtifactKind::from_media_type("image/png"), ArtifactKind::Image);
        assert_eq!(ArtifactKind::from_media_type("image/jpeg"), ArtifactKind::Image);
        assert_eq!(ArtifactKind::from_media_type("image/gif"), ArtifactKind::Image);
        assert_eq!(ArtifactKind::from_media_type("image/webp"), ArtifactKind::Other);
        assert_eq!(ArtifactKind::from_media_type("application/pdf"), ArtifactKind::Other);
        assert_eq!(ArtifactKind::from_media_type(" TEXT/PLAIN "), ArtifactKind::Text);
    }

    #[test]
    fn file_name_classification() {
        assert_eq!(ArtifactKind::from_file_name("notes.txt"), ArtifactKind::Text);
        assert_eq!(ArtifactKind::from_file_name("photo.JPG"), ArtifactKind::Image);
        assert_eq!(ArtifactKind::from_file_name("sketch.png"), ArtifactKind::Image);
        assert_eq!(ArtifactKind::from_file_name("archive.zip"), ArtifactKind::Other);
        assert_eq!(ArtifactKind::from_file_name("no_extension"), ArtifactKind::Other);
    }

    #[test]
    fn from_bytes_records_size_and_kind() {
        let a = Artifact::from_bytes("notes.txt", "text/plain", b"draft".to_vec());
        assert_eq!(a.size_bytes, 5);
        assert_eq!(a.kind, ArtifactKind::Text);
        assert!(matches!(a.data, ArtifactData::Bytes(_)));
    }

    #[test]
    fn from_path_uses_file_name_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poem.txt");
        std::fs::write(&path, "roses are red").unwrap();

        let a = Artifact::from_path(&path);
        assert_eq!(a.name, "poem.txt");
        assert_eq!(a.kind, ArtifactKind::Text);
        assert_eq!(a.size_bytes, 13);
    }

    #[test]
    fn artifact_clone_is_cheap_and_shares_bytes() {
        let a = Artifact::from_bytes("big.txt", "text/plain", vec![0u8; 1024]);
        let b = a.clone();
        match (&a.data, &b.data) {
            (ArtifactData::Bytes(x), ArtifactData::Bytes(y)) => {
                assert!(Arc::ptr_eq(x, y));
            }
            _ => panic!("expected byte-backed artifacts"),
        }
    }
}
