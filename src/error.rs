//! Error types for the plotpad library.
//!
//! Every failure a user action can hit is one variant of [`PlotpadError`],
//! so callers (and the notice callback) can always name the failure kind
//! rather than reporting "something went wrong". None of these are fatal to
//! the session: the orchestrator recovers at the initiating action and
//! leaves prior state (generated output, artifact list, preview) untouched.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the plotpad library.
#[derive(Debug, Error)]
pub enum PlotpadError {
    // ── Resolution errors ─────────────────────────────────────────────────
    /// Neither typed text nor a text-kind artifact is present.
    #[error("No input available: type some text or add a .txt file first")]
    NoInputAvailable,

    /// An artifact exists but its content could not be decoded as text.
    #[error("Failed to read '{name}' as text: {detail}")]
    ReadError { name: String, detail: String },

    // ── Dispatch errors ───────────────────────────────────────────────────
    /// The request could not be sent or the response never arrived.
    #[error("Network error talking to '{url}': {reason}\nCheck the plotter service is running and reachable.")]
    NetworkError { url: String, reason: String },

    /// The service answered with a non-success status.
    #[error("Server error from '{url}': HTTP {status}{}", body_suffix(.body))]
    ServerError {
        url: String,
        status: u16,
        body: String,
    },

    /// A request of the same operation kind is already pending.
    #[error("A {operation} request is already in flight — wait for it to finish and try again")]
    RequestInFlight { operation: &'static str },

    // ── Export errors ─────────────────────────────────────────────────────
    /// Export was requested before any successful conversion.
    #[error("No G-code to export yet — generate it first")]
    NoOutputAvailable,

    /// Could not create or write the exported G-code file.
    #[error("Failed to write export file '{path}': {source}")]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlotpadError {
    /// Short machine-friendly name of the failure kind, used by notices
    /// and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            PlotpadError::NoInputAvailable => "no-input-available",
            PlotpadError::ReadError { .. } => "read-error",
            PlotpadError::NetworkError { .. } => "network-error",
            PlotpadError::ServerError { .. } => "server-error",
            PlotpadError::RequestInFlight { .. } => "request-in-flight",
            PlotpadError::NoOutputAvailable => "no-output-available",
            PlotpadError::ExportFailed { .. } => "export-failed",
            PlotpadError::InvalidConfig(_) => "invalid-config",
            PlotpadError::Internal(_) => "internal",
        }
    }
}

/// Render the response body as a `: <body>` suffix, trimmed and capped so a
/// huge HTML error page doesn't flood the notice.
fn body_suffix(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let capped: String = trimmed.chars().take(120).collect();
    if capped.len() < trimmed.len() {
        format!(": {capped}…")
    } else {
        format!(": {capped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_includes_status_and_body() {
        let e = PlotpadError::ServerError {
            url: "http://localhost:10000/gcode".into(),
            status: 429,
            body: "Queue full".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("429"), "got: {msg}");
        assert!(msg.contains("Queue full"), "got: {msg}");
    }

    #[test]
    fn server_error_display_omits_empty_body() {
        let e = PlotpadError::ServerError {
            url: "http://localhost:10000/submit".into(),
            status: 500,
            body: "  ".into(),
        };
        assert!(e.to_string().ends_with("HTTP 500"));
    }

    #[test]
    fn server_error_display_truncates_long_body() {
        let e = PlotpadError::ServerError {
            url: "http://localhost:10000/gcode".into(),
            status: 500,
            body: "x".repeat(500),
        };
        let msg = e.to_string();
        assert!(msg.ends_with('…'), "got: {msg}");
        assert!(msg.len() < 300, "got {} chars", msg.len());
    }

    #[test]
    fn read_error_display_names_artifact() {
        let e = PlotpadError::ReadError {
            name: "notes.txt".into(),
            detail: "invalid utf-8 sequence".into(),
        };
        assert!(e.to_string().contains("notes.txt"));
    }

    #[test]
    fn every_variant_has_a_distinct_kind() {
        use std::collections::HashSet;
        let kinds = [
            PlotpadError::NoInputAvailable.kind(),
            PlotpadError::ReadError {
                name: String::new(),
                detail: String::new(),
            }
            .kind(),
            PlotpadError::NetworkError {
                url: String::new(),
                reason: String::new(),
            }
            .kind(),
            PlotpadError::ServerError {
                url: String::new(),
                status: 0,
                body: String::new(),
            }
            .kind(),
            PlotpadError::RequestInFlight {
                operation: "convert",
            }
            .kind(),
            PlotpadError::NoOutputAvailable.kind(),
            PlotpadError::ExportFailed {
                path: PathBuf::new(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "x"),
            }
            .kind(),
            PlotpadError::InvalidConfig(String::new()).kind(),
            PlotpadError::Internal(String::new()).kind(),
        ];
        let unique: HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
