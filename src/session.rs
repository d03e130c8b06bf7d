//! Session orchestrator: ties the store, projector, and pipeline together.
//!
//! Every public method corresponds to one discrete user action (keystroke,
//! drop, button click). Mutations between suspend points are synchronous;
//! the asynchronous chains (`generate`, `send`) run resolve → read →
//! dispatch as one linear awaited sequence and commit their result only at
//! the very end, and only when their request ticket is still the newest for
//! the operation kind. A failure at any stage raises a kind-naming notice
//! through the [`SessionCallback`] and leaves all prior state untouched.

use crate::artifact::Artifact;
use crate::config::SessionConfig;
use crate::error::PlotpadError;
use crate::notice::{NoopSessionCallback, NoticeCallback, SessionCallback};
use crate::pipeline::dispatch::{Dispatcher, OperationKind, QueueStatus, RequestTickets, SubmitReceipt};
use crate::pipeline::resolve;
use crate::preview::{Preview, PreviewSlot};
use crate::state::SessionState;
use crate::export;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// One plotter session: state, preview, and the dispatch machinery.
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    dispatcher: Dispatcher,
    tickets: RequestTickets,
    preview: PreviewSlot,
    callback: NoticeCallback,
}

impl Session {
    /// Create a session with no notice callback.
    pub fn new(config: SessionConfig) -> Result<Self, PlotpadError> {
        Self::with_callback(config, Arc::new(NoopSessionCallback))
    }

    /// Create a session that reports events through `callback`.
    pub fn with_callback(
        config: SessionConfig,
        callback: Arc<dyn SessionCallback>,
    ) -> Result<Self, PlotpadError> {
        let dispatcher = Dispatcher::new(config.clone())?;
        Ok(Self {
            config,
            state: SessionState::new(),
            dispatcher,
            tickets: RequestTickets::new(),
            preview: PreviewSlot::new(),
            callback,
        })
    }

    /// Read-only view of the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    // ── Synchronous user actions ──────────────────────────────────────────

    /// Replace the typed text (one call per keystroke in a live front-end).
    pub fn set_typed_text(&mut self, text: impl Into<String>) {
        self.state.set_typed_text(text);
    }

    /// Add an uploaded artifact to the session.
    pub fn add_artifact(&mut self, artifact: Artifact) {
        info!(name = %artifact.name, kind = ?artifact.kind, size = artifact.size_bytes, "artifact added");
        self.state.add_artifact(artifact);
    }

    /// Re-derive the preview from current state.
    pub fn preview(&mut self) -> Result<Preview, PlotpadError> {
        self.preview.project(&self.state)
    }

    // ── Asynchronous user actions ─────────────────────────────────────────

    /// Resolve the current input and convert it to G-code.
    ///
    /// On success the generated output is replaced atomically and the
    /// callback's `on_generate_complete` fires; on failure the output is
    /// left unchanged and `on_failure` fires. A result arriving for a
    /// superseded request is dropped without committing anything.
    pub async fn generate(&mut self) -> Result<(), PlotpadError> {
        let result = self.generate_inner().await;
        if let Err(ref e) = result {
            self.callback.on_failure(e.kind(), e.to_string());
        }
        result
    }

    async fn generate_inner(&mut self) -> Result<(), PlotpadError> {
        // Resolution failure short-circuits before any network call.
        let payload = resolve::resolve_text(&self.state).await?;

        let ticket = self
            .tickets
            .issue(OperationKind::Convert, self.config.in_flight)?;
        self.callback.on_generate_start();

        let outcome = self.dispatcher.convert(&payload).await;
        let current = self.tickets.settle(ticket);
        let gcode = outcome?;

        if current {
            let len = gcode.len();
            self.state.set_generated_output(gcode);
            self.callback.on_generate_complete(len);
        }
        Ok(())
    }

    /// Resolve the current input and submit it as a plot job.
    ///
    /// Success or failure surfaces as a notice only; the generated output
    /// is never touched by a submission.
    pub async fn send(&mut self) -> Result<SubmitReceipt, PlotpadError> {
        let result = self.send_inner().await;
        if let Err(ref e) = result {
            self.callback.on_failure(e.kind(), e.to_string());
        }
        result
    }

    async fn send_inner(&mut self) -> Result<SubmitReceipt, PlotpadError> {
        let payload = resolve::resolve_text(&self.state).await?;

        let ticket = self
            .tickets
            .issue(OperationKind::Submit, self.config.in_flight)?;

        let outcome = self.dispatcher.submit(&payload).await;
        let current = self.tickets.settle(ticket);
        let receipt = outcome?;

        if current {
            self.callback.on_submit_complete(&receipt);
        }
        Ok(receipt)
    }

    /// Export the generated output into `dir` as `output.gcode`.
    pub async fn export(&self, dir: &Path) -> Result<PathBuf, PlotpadError> {
        let result = export::export_output(&self.state, dir).await;
        match &result {
            Ok(path) => self.callback.on_export_complete(path),
            Err(e) => self.callback.on_failure(e.kind(), e.to_string()),
        }
        result
    }

    /// Export the generated output to an explicit path.
    pub async fn export_to(&self, path: &Path) -> Result<(), PlotpadError> {
        let result = export::export_output_to(&self.state, path).await;
        match &result {
            Ok(()) => self.callback.on_export_complete(path),
            Err(e) => self.callback.on_failure(e.kind(), e.to_string()),
        }
        result
    }

    /// Ask the plotter service how many jobs it has queued.
    pub async fn queue_status(&self) -> Result<QueueStatus, PlotpadError> {
        self.dispatcher.queue_status().await
    }
}
