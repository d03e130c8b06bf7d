//! Export: write the generated instruction stream to a local file.
//!
//! The exported artifact has a fixed name (`output.gcode`) and is written
//! atomically — content goes to a sibling temp path first, then a rename
//! swaps it in, so a crash mid-write never leaves a half-exported file.
//! The temp path is the only transient resource and the rename releases it.

use crate::error::PlotpadError;
use crate::state::SessionState;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed file name of the exported instruction stream.
pub const EXPORT_FILE_NAME: &str = "output.gcode";

/// Export the session's generated output into `dir` as `output.gcode`.
///
/// Returns the path of the written file.
///
/// # Errors
/// * [`PlotpadError::NoOutputAvailable`] when nothing has been generated —
///   no file is created in that case.
/// * [`PlotpadError::ExportFailed`] for any I/O failure.
pub async fn export_output(state: &SessionState, dir: &Path) -> Result<PathBuf, PlotpadError> {
    let path = dir.join(EXPORT_FILE_NAME);
    export_output_to(state, &path).await?;
    Ok(path)
}

/// Export the generated output to an explicit path.
pub async fn export_output_to(state: &SessionState, path: &Path) -> Result<(), PlotpadError> {
    let gcode = state
        .generated_output()
        .ok_or(PlotpadError::NoOutputAvailable)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PlotpadError::ExportFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("gcode.tmp");
    tokio::fs::write(&tmp_path, gcode)
        .await
        .map_err(|e| PlotpadError::ExportFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| PlotpadError::ExportFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!(path = %path.display(), bytes = gcode.len(), "exported G-code");
    Ok(())
}
