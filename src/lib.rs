//! # plotpad
//!
//! Session front-end for a Hershey-text pen plotter: take typed text or an
//! uploaded file, preview it locally, have a remote service convert it to a
//! G-code instruction stream, and either download the result or queue it as
//! a plot job.
//!
//! The interesting part is not the HTTP calls — it is deciding *which*
//! content is authoritative and keeping the session state honest while
//! asynchronous work is in flight. That logic lives here; the conversion
//! service and the plotter hardware stay external.
//!
//! ## Pipeline Overview
//!
//! ```text
//! user action
//!  │
//!  ├─ 1. Store     typed text / artifacts mutate SessionState
//!  ├─ 2. Preview   pure projection of state (image / text / empty)
//!  ├─ 3. Resolve   typed text wins, else first .txt artifact
//!  ├─ 4. Read      async UTF-8 extraction of the chosen artifact
//!  ├─ 5. Dispatch  POST /gcode or /submit, ticketed against stale results
//!  └─ 6. Commit    atomic output replace, or a kind-naming failure notice
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use plotpad::{Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SessionConfig::builder()
//!         .base_url("http://plotter.local:10000")
//!         .build()?;
//!     let mut session = Session::new(config)?;
//!
//!     session.set_typed_text("Hello plotter");
//!     session.generate().await?;
//!     println!("{}", session.state().generated_output().unwrap());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `plotpad` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! plotpad = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod artifact;
pub mod config;
pub mod error;
pub mod export;
pub mod notice;
pub mod pipeline;
pub mod preview;
pub mod session;
pub mod state;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use artifact::{Artifact, ArtifactData, ArtifactKind};
pub use config::{InFlightPolicy, SessionConfig, SessionConfigBuilder, DEFAULT_BASE_URL};
pub use error::PlotpadError;
pub use export::EXPORT_FILE_NAME;
pub use notice::{NoopSessionCallback, NoticeCallback, SessionCallback};
pub use pipeline::dispatch::{Dispatcher, OperationKind, QueueStatus, SubmitReceipt};
pub use preview::{Preview, PreviewSlot};
pub use session::Session;
pub use state::SessionState;
