//! Content resolver: decide which text payload a dispatch will carry.
//!
//! The priority rule is fixed and must hold no matter what the session
//! contains:
//!
//! 1. typed text, if non-empty after trimming, wins over every artifact;
//! 2. otherwise the *first* text-kind artifact in insertion order;
//! 3. otherwise there is nothing to send (`NoInputAvailable`).
//!
//! Image and Other artifacts are never resolved to text.
//!
//! The decision itself is synchronous and pure ([`resolve_source`]); reading
//! the chosen artifact is the async part ([`resolve_text`]). Splitting the
//! two keeps the priority rule testable without any I/O.
//!
//! The payload for typed text is the trimmed value, not the raw one: the
//! back-end trims before queueing anyway, and sending surrounding whitespace
//! would only desync the preview from what gets plotted.

use crate::artifact::Artifact;
use crate::error::PlotpadError;
use crate::pipeline::read;
use crate::state::SessionState;
use tracing::debug;

/// Which content won the priority decision.
#[derive(Debug, Clone)]
pub enum ResolvedSource<'a> {
    /// Typed text was non-empty; carries the trimmed payload.
    Typed(String),
    /// No typed text; the first text-kind artifact is authoritative.
    TextArtifact(&'a Artifact),
}

/// Apply the priority rule to the current state. Pure, no I/O.
///
/// # Errors
/// [`PlotpadError::NoInputAvailable`] when neither typed text nor a
/// text-kind artifact exists.
pub fn resolve_source(state: &SessionState) -> Result<ResolvedSource<'_>, PlotpadError> {
    let trimmed = state.typed_text().trim();
    if !trimmed.is_empty() {
        return Ok(ResolvedSource::Typed(trimmed.to_string()));
    }

    match state.first_text_artifact() {
        Some(artifact) => {
            debug!(artifact = %artifact.name, "resolved to first text artifact");
            Ok(ResolvedSource::TextArtifact(artifact))
        }
        None => Err(PlotpadError::NoInputAvailable),
    }
}

/// Resolve and, when an artifact won, read its content.
///
/// This is the form the session dispatch chains use: one awaited call that
/// yields the final payload string or the first error on the way there.
pub async fn resolve_text(state: &SessionState) -> Result<String, PlotpadError> {
    match resolve_source(state)? {
        ResolvedSource::Typed(text) => Ok(text),
        ResolvedSource::TextArtifact(artifact) => read::read_text(artifact).await,
    }
}
