//! Session state: the single source of truth the preview and the pipeline
//! read from.
//!
//! Mutation rules are deliberately narrow:
//!
//! * artifacts are append-only and keep insertion order — the resolver's
//!   "first text artifact" rule and the preview's "most recent artifact"
//!   rule both depend on it;
//! * typed text is overwritten wholesale (one value per keystroke);
//! * generated output is replaced atomically on a successful conversion and
//!   left untouched on any failure — there is no partially-written state.
//!
//! All of this is plain data scoped to one session; nothing persists.

use crate::artifact::{Artifact, ArtifactKind};

/// In-memory state of one plotter session.
#[derive(Debug, Default)]
pub struct SessionState {
    artifacts: Vec<Artifact>,
    typed_text: String,
    generated_output: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Typed text ────────────────────────────────────────────────────────

    /// Replace the typed text wholesale.
    pub fn set_typed_text(&mut self, text: impl Into<String>) {
        self.typed_text = text.into();
    }

    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    // ── Artifacts ─────────────────────────────────────────────────────────

    /// Append an artifact. Artifacts accumulate for the session; they are
    /// never reordered or removed.
    pub fn add_artifact(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// The most recently added artifact, if any.
    pub fn last_artifact(&self) -> Option<&Artifact> {
        self.artifacts.last()
    }

    /// The first artifact of kind `Text` in insertion order, if any.
    pub fn first_text_artifact(&self) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.kind == ArtifactKind::Text)
    }

    // ── Generated output ──────────────────────────────────────────────────

    /// Atomically replace the generated output with a new conversion result.
    pub fn set_generated_output(&mut self, gcode: impl Into<String>) {
        self.generated_output = Some(gcode.into());
    }

    pub fn generated_output(&self) -> Option<&str> {
        self.generated_output.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_text_is_overwritten_wholesale() {
        let mut state = SessionState::new();
        state.set_typed_text("hel");
        state.set_typed_text("hello");
        assert_eq!(state.typed_text(), "hello");
    }

    #[test]
    fn artifacts_keep_insertion_order() {
        let mut state = SessionState::new();
        state.add_artifact(Artifact::from_bytes("a.txt", "text/plain", b"a".to_vec()));
        state.add_artifact(Artifact::from_bytes("b.png", "image/png", b"b".to_vec()));
        state.add_artifact(Artifact::from_bytes("c.txt", "text/plain", b"c".to_vec()));

        let names: Vec<&str> = state.artifacts().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.png", "c.txt"]);
        assert_eq!(state.last_artifact().unwrap().name, "c.txt");
    }

    #[test]
    fn first_text_artifact_skips_images() {
        let mut state = SessionState::new();
        state.add_artifact(Artifact::from_bytes("pic.png", "image/png", b"p".to_vec()));
        state.add_artifact(Artifact::from_bytes("one.txt", "text/plain", b"1".to_vec()));
        state.add_artifact(Artifact::from_bytes("two.txt", "text/plain", b"2".to_vec()));

        assert_eq!(state.first_text_artifact().unwrap().name, "one.txt");
    }

    #[test]
    fn output_starts_absent_and_replaces_atomically() {
        let mut state = SessionState::new();
        assert!(state.generated_output().is_none());
        state.set_generated_output("G0 X0 Y0");
        state.set_generated_output("G0 X1 Y1");
        assert_eq!(state.generated_output(), Some("G0 X1 Y1"));
    }
}
