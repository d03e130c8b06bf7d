//! Content reader: extract UTF-8 text from an artifact handle.
//!
//! Single attempt, no retry: a file that isn't text now won't be text in
//! 500 ms either, and the user sees the decode failure instead of a silent
//! substitute. The read is the pipeline's first suspend point; because the
//! session awaits the whole resolve→read→dispatch chain linearly, the same
//! artifact is never read twice concurrently for one logical request.

use crate::artifact::{Artifact, ArtifactData};
use crate::error::PlotpadError;
use tracing::debug;

/// Read an artifact's content as UTF-8 text.
///
/// # Errors
/// Returns [`PlotpadError::ReadError`] when the underlying file cannot be
/// opened or the content is not valid UTF-8.
pub async fn read_text(artifact: &Artifact) -> Result<String, PlotpadError> {
    let bytes: Vec<u8> = match &artifact.data {
        ArtifactData::Bytes(bytes) => bytes.to_vec(),
        ArtifactData::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|e| PlotpadError::ReadError {
                    name: artifact.name.clone(),
                    detail: e.to_string(),
                })?
        }
    };

    let text = String::from_utf8(bytes).map_err(|e| PlotpadError::ReadError {
        name: artifact.name.clone(),
        detail: format!("not valid UTF-8: {e}"),
    })?;

    debug!(artifact = %artifact.name, bytes = text.len(), "read artifact text");
    Ok(text)
}
