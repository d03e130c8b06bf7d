//! Preview projector: derive what the user should be shown from state.
//!
//! The projection itself is a pure function of the session state — exactly
//! one of image, text, or empty is active at a time:
//!
//! * the most recently added artifact being an image wins;
//! * otherwise typed text, or the first text artifact's content;
//! * otherwise the empty state.
//!
//! What is *not* pure is the image-preview resource. A browser front-end
//! would mint an object URL per preview and must revoke it when superseded;
//! the local analogue is a temp file holding the image bytes. [`PreviewSlot`]
//! owns that backing file: it is acquired on first projection of an image,
//! reused while the same artifact stays previewed (projecting twice on
//! unchanged state re-acquires nothing), and released the moment another
//! preview supersedes it or the slot is dropped.

use crate::artifact::{ArtifactData, ArtifactKind};
use crate::error::PlotpadError;
use crate::state::SessionState;
use tempfile::NamedTempFile;
use tracing::debug;

/// What the session should currently display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// An image artifact, addressable via a local `file://` URL.
    Image { url: String },
    /// Typed text or the content of the first text artifact.
    Text { text: String },
    /// Nothing to show yet.
    Empty,
}

/// Backing resource for the currently previewed image, if any.
struct ImageBacking {
    /// Index of the previewed artifact in the session's artifact list.
    /// Artifacts are append-only, so the index identifies it for the
    /// whole session.
    artifact_index: usize,
    url: String,
    /// Owned temp file for byte-backed artifacts; dropping it deletes the
    /// file. `None` when the artifact already lives on disk.
    _file: Option<NamedTempFile>,
}

/// Owner of the image-preview resource across projections.
#[derive(Default)]
pub struct PreviewSlot {
    image: Option<ImageBacking>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project the current state into a [`Preview`].
    ///
    /// Call after every state change; cheap when nothing relevant changed.
    ///
    /// # Errors
    /// [`PlotpadError::ReadError`] when a text artifact's content cannot be
    /// decoded, [`PlotpadError::Internal`] when the image backing file
    /// cannot be created.
    pub fn project(&mut self, state: &SessionState) -> Result<Preview, PlotpadError> {
        if let Some(last) = state.last_artifact() {
            if last.kind == ArtifactKind::Image {
                let index = state.artifacts().len() - 1;
                return self.project_image(state, index);
            }
        }

        // Not an image preview: whatever backing we held is stale.
        self.release();

        if !state.typed_text().trim().is_empty() {
            return Ok(Preview::Text {
                text: state.typed_text().to_string(),
            });
        }

        if let Some(artifact) = state.first_text_artifact() {
            let text = match &artifact.data {
                ArtifactData::Bytes(bytes) => std::str::from_utf8(bytes)
                    .map_err(|e| PlotpadError::ReadError {
                        name: artifact.name.clone(),
                        detail: format!("not valid UTF-8: {e}"),
                    })?
                    .to_string(),
                ArtifactData::Path(path) => {
                    std::fs::read_to_string(path).map_err(|e| PlotpadError::ReadError {
                        name: artifact.name.clone(),
                        detail: e.to_string(),
                    })?
                }
            };
            return Ok(Preview::Text { text });
        }

        Ok(Preview::Empty)
    }

    /// Drop the image backing resource, if one is held.
    pub fn release(&mut self) {
        if self.image.take().is_some() {
            debug!("released image preview backing");
        }
    }

    fn project_image(
        &mut self,
        state: &SessionState,
        index: usize,
    ) -> Result<Preview, PlotpadError> {
        // Unchanged state: reuse the held resource.
        if let Some(ref backing) = self.image {
            if backing.artifact_index == index {
                return Ok(Preview::Image {
                    url: backing.url.clone(),
                });
            }
        }

        let artifact = &state.artifacts()[index];
        let (url, file) = match &artifact.data {
            ArtifactData::Path(path) => (file_url(path), None),
            ArtifactData::Bytes(bytes) => {
                let file = NamedTempFile::new().map_err(|e| {
                    PlotpadError::Internal(format!("failed to create preview file: {e}"))
                })?;
                std::fs::write(file.path(), bytes).map_err(|e| {
                    PlotpadError::Internal(format!("failed to write preview file: {e}"))
                })?;
                (file_url(file.path()), Some(file))
            }
        };

        debug!(artifact = %artifact.name, url = %url, "acquired image preview backing");
        // Replacing the option drops the previous backing (and its file).
        self.image = Some(ImageBacking {
            artifact_index: index,
            url: url.clone(),
            _file: file,
        });

        Ok(Preview::Image { url })
    }
}

fn file_url(path: &std::path::Path) -> String {
    format!("file://{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Artifact;

    fn text_artifact(name: &str, content: &str) -> Artifact {
        Artifact::from_bytes(name, "text/plain", content.as_bytes().to_vec())
    }

    fn image_artifact(name: &str) -> Artifact {
        Artifact::from_bytes(name, "image/png", b"\x89PNG fake pixels".to_vec())
    }

    #[test]
    fn empty_session_projects_empty() {
        let mut slot = PreviewSlot::new();
        let state = SessionState::new();
        assert_eq!(slot.project(&state).unwrap(), Preview::Empty);
    }

    #[test]
    fn typed_text_projects_text() {
        let mut slot = PreviewSlot::new();
        let mut state = SessionState::new();
        state.set_typed_text("Hello plotter");
        assert_eq!(
            slot.project(&state).unwrap(),
            Preview::Text {
                text: "Hello plotter".into()
            }
        );
    }

    #[test]
    fn text_artifact_projects_its_content() {
        let mut slot = PreviewSlot::new();
        let mut state = SessionState::new();
        state.add_artifact(text_artifact("notes.txt", "draft"));
        assert_eq!(
            slot.project(&state).unwrap(),
            Preview::Text {
                text: "draft".into()
            }
        );
    }

    #[test]
    fn newest_image_wins_over_typed_text() {
        let mut slot = PreviewSlot::new();
        let mut state = SessionState::new();
        state.set_typed_text("Hello");
        state.add_artifact(image_artifact("pic.png"));

        assert!(matches!(
            slot.project(&state).unwrap(),
            Preview::Image { .. }
        ));
    }

    #[test]
    fn text_artifact_after_image_supersedes_image_preview() {
        let mut slot = PreviewSlot::new();
        let mut state = SessionState::new();
        state.add_artifact(image_artifact("pic.png"));
        slot.project(&state).unwrap();

        state.add_artifact(text_artifact("notes.txt", "draft"));
        assert_eq!(
            slot.project(&state).unwrap(),
            Preview::Text {
                text: "draft".into()
            }
        );
        // Image backing was released when superseded.
        assert!(slot.image.is_none());
    }

    #[test]
    fn projection_is_idempotent_and_reuses_backing() {
        let mut slot = PreviewSlot::new();
        let mut state = SessionState::new();
        state.add_artifact(image_artifact("pic.png"));

        let first = slot.project(&state).unwrap();
        let backing_path = match &slot.image.as_ref().unwrap()._file {
            Some(f) => f.path().to_path_buf(),
            None => panic!("byte-backed image must have a temp file"),
        };
        let second = slot.project(&state).unwrap();

        assert_eq!(first, second);
        // Same backing file, still on disk — nothing was re-acquired.
        assert_eq!(
            slot.image.as_ref().unwrap()._file.as_ref().unwrap().path(),
            backing_path
        );
        assert!(backing_path.exists());
    }

    #[test]
    fn replacing_the_image_releases_the_old_backing_file() {
        let mut slot = PreviewSlot::new();
        let mut state = SessionState::new();
        state.add_artifact(image_artifact("first.png"));
        slot.project(&state).unwrap();
        let old_path = slot
            .image
            .as_ref()
            .unwrap()
            ._file
            .as_ref()
            .unwrap()
            .path()
            .to_path_buf();
        assert!(old_path.exists());

        state.add_artifact(image_artifact("second.png"));
        slot.project(&state).unwrap();
        assert!(!old_path.exists(), "old preview file must be deleted");
    }

    #[test]
    fn path_backed_image_uses_its_own_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let mut slot = PreviewSlot::new();
        let mut state = SessionState::new();
        state.add_artifact(Artifact::from_path(&path));

        match slot.project(&state).unwrap() {
            Preview::Image { url } => assert!(url.ends_with("sketch.png")),
            other => panic!("expected image preview, got {other:?}"),
        }
    }

    #[test]
    fn other_kind_artifact_alone_projects_empty() {
        let mut slot = PreviewSlot::new();
        let mut state = SessionState::new();
        state.add_artifact(Artifact::from_bytes(
            "data.bin",
            "application/octet-stream",
            vec![0u8; 8],
        ));
        assert_eq!(slot.project(&state).unwrap(), Preview::Empty);
    }
}
