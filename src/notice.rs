//! Notice-callback trait for user-visible session events.
//!
//! The session never prints or renders anything itself; it reports through a
//! [`SessionCallback`] that the host wires to whatever it has — a status
//! line, a toast, a log. Callbacks are the least-invasive integration point:
//! the library stays ignorant of how the host application talks to its user.
//!
//! Every failure from the error taxonomy arrives via [`on_failure`] with its
//! machine-readable kind, so hosts can distinguish "no input" from "server
//! down" without parsing message strings.
//!
//! [`on_failure`]: SessionCallback::on_failure

use crate::pipeline::dispatch::SubmitReceipt;
use std::sync::Arc;

/// Called by the session as user-initiated actions progress and settle.
///
/// Implementations must be `Send + Sync`; all methods default to no-ops so
/// hosts only override what they care about.
pub trait SessionCallback: Send + Sync {
    /// A conversion request is about to be dispatched.
    fn on_generate_start(&self) {}

    /// A conversion succeeded; `gcode_len` is the byte length of the new
    /// generated output.
    fn on_generate_complete(&self, gcode_len: usize) {
        let _ = gcode_len;
    }

    /// A job submission succeeded. The receipt carries the queue position
    /// reported by the service, when it reports one.
    fn on_submit_complete(&self, receipt: &SubmitReceipt) {
        let _ = receipt;
    }

    /// The generated output was exported to a local file.
    fn on_export_complete(&self, path: &std::path::Path) {
        let _ = path;
    }

    /// Any user-initiated action failed.
    ///
    /// # Arguments
    /// * `kind`    — stable failure identifier (see `PlotpadError::kind`)
    /// * `message` — human-readable description
    fn on_failure(&self, kind: &'static str, message: String) {
        let _ = (kind, message);
    }
}

/// A no-op implementation for hosts that don't need notices.
pub struct NoopSessionCallback;

impl SessionCallback for NoopSessionCallback {}

/// Convenience alias matching the type stored in [`crate::session::Session`].
pub type NoticeCallback = Arc<dyn SessionCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct TrackingCallback {
        generates: AtomicUsize,
        failures: Mutex<Vec<&'static str>>,
    }

    impl SessionCallback for TrackingCallback {
        fn on_generate_complete(&self, _gcode_len: usize) {
            self.generates.fetch_add(1, Ordering::SeqCst);
        }

        fn on_failure(&self, kind: &'static str, _message: String) {
            self.failures.lock().unwrap().push(kind);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopSessionCallback;
        cb.on_generate_start();
        cb.on_generate_complete(42);
        cb.on_export_complete(std::path::Path::new("output.gcode"));
        cb.on_failure("server-error", "HTTP 500".into());
    }

    #[test]
    fn tracking_callback_receives_events() {
        let cb = TrackingCallback {
            generates: AtomicUsize::new(0),
            failures: Mutex::new(vec![]),
        };
        cb.on_generate_complete(10);
        cb.on_failure("no-input-available", "no input".into());

        assert_eq!(cb.generates.load(Ordering::SeqCst), 1);
        assert_eq!(*cb.failures.lock().unwrap(), vec!["no-input-available"]);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: NoticeCallback = Arc::new(NoopSessionCallback);
        cb.on_generate_start();
        cb.on_generate_complete(512);
    }
}
