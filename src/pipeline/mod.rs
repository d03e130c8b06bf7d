//! Pipeline stages between a user action and a committed result.
//!
//! Each submodule implements exactly one step, so each is independently
//! testable and the session orchestrator stays a thin linear sequence.
//!
//! ## Data Flow
//!
//! ```text
//! resolve ──▶ read ──▶ dispatch
//! (priority)  (UTF-8)  (HTTP + tickets)
//! ```
//!
//! 1. [`resolve`]  — decide which content is authoritative (typed text vs.
//!    first text artifact)
//! 2. [`read`]     — extract UTF-8 text from an artifact handle; the only
//!    stage with file I/O
//! 3. [`dispatch`] — POST the payload to the plotter service; the only stage
//!    with network I/O, and the owner of the request-ticket guard

pub mod dispatch;
pub mod read;
pub mod resolve;
