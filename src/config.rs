//! Configuration for a plotter session.
//!
//! Everything tunable lives in one [`SessionConfig`] built via its
//! [`SessionConfigBuilder`]. The surface is deliberately small: there is
//! exactly one knob that matters (where the plotter service lives) plus a
//! timeout and the duplicate-request policy.

use crate::error::PlotpadError;
use serde::{Deserialize, Serialize};

/// Default service URL, matching the back-end's default port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:10000";

/// Configuration for a plotter session.
///
/// Built via [`SessionConfig::builder()`] or [`SessionConfig::default()`].
///
/// # Example
/// ```rust
/// use plotpad::SessionConfig;
///
/// let config = SessionConfig::builder()
///     .base_url("http://plotter.local:10000")
///     .request_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base URL of the plotter service. Both endpoints (`/gcode`, `/submit`)
    /// hang off this. Default: `http://localhost:10000`.
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 30.
    ///
    /// G-code generation for a paragraph of Hershey text completes well
    /// under a second on the back-end; 30 s covers cold starts on free-tier
    /// hosting without leaving the user staring at a hung request forever.
    pub request_timeout_secs: u64,

    /// What to do when a convert or submit is requested while one of the
    /// same kind is still pending. Default: [`InFlightPolicy::Reject`].
    pub in_flight: InFlightPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            in_flight: InFlightPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Create a new builder for `SessionConfig`.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full URL of the conversion endpoint.
    pub fn gcode_url(&self) -> String {
        format!("{}/gcode", self.base_url.trim_end_matches('/'))
    }

    /// Full URL of the job-submission endpoint.
    pub fn submit_url(&self) -> String {
        format!("{}/submit", self.base_url.trim_end_matches('/'))
    }

    /// Full URL of the queue-status endpoint.
    pub fn status_url(&self) -> String {
        format!("{}/status", self.base_url.trim_end_matches('/'))
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn in_flight(mut self, policy: InFlightPolicy) -> Self {
        self.config.in_flight = policy;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SessionConfig, PlotpadError> {
        let c = &self.config;
        if c.base_url.trim().is_empty() {
            return Err(PlotpadError::InvalidConfig("base_url is empty".into()));
        }
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(PlotpadError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}

/// Policy for a duplicate request while one of the same kind is pending.
///
/// The session never needs more than one convert and one submit in flight;
/// a second click before the first answer arrives is almost always the user
/// double-tapping. Rejecting fast keeps the state machine trivial to reason
/// about. `Unguarded` exists for tests that deliberately create overlapping
/// requests to exercise the stale-result guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InFlightPolicy {
    /// Fail the duplicate immediately with `RequestInFlight`. (default)
    #[default]
    Reject,
    /// Allow overlapping requests; only the newest result is committed.
    Unguarded,
}
