//! Remote dispatcher: the two plotter-service calls and the request guard.
//!
//! Both operations POST the resolved text as `{"text": …}`:
//!
//! * **convert** (`/gcode`) — the entire response body, taken as text, is
//!   the new instruction stream; the dispatcher does no parsing beyond that.
//! * **submit** (`/submit`) — enqueues a plot job; the JSON receipt (queue
//!   position) is surfaced to the caller, never stored.
//!
//! [`RequestTickets`] guards against out-of-order completions: every
//! dispatch carries a monotonically increasing per-operation id, and a
//! completion may only be committed when its id is still the newest issued
//! for that operation kind. A response from a superseded request is dropped
//! on arrival. Duplicate in-flight requests are rejected up front under the
//! default policy (see [`InFlightPolicy`]).

use crate::config::{InFlightPolicy, SessionConfig};
use crate::error::PlotpadError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// The two remote operations a session can be waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Convert,
    Submit,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Convert => "convert",
            OperationKind::Submit => "submit",
        }
    }

    fn index(self) -> usize {
        match self {
            OperationKind::Convert => 0,
            OperationKind::Submit => 1,
        }
    }
}

/// A claim on one dispatch of one operation kind.
///
/// Settle it with [`RequestTickets::settle`] when the response (or failure)
/// arrives; the return value says whether the result may be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: OperationKind,
    id: u64,
}

impl Ticket {
    pub fn kind(self) -> OperationKind {
        self.kind
    }
}

/// Monotonic request identifiers with a latest-wins commit check.
///
/// One instance per session; ids never reset. The session is cooperative
/// and single-threaded, so plain `&mut` access is enough — the hazard being
/// guarded against is async ordering (a stale response arriving after a
/// newer one), not parallel mutation.
#[derive(Debug, Default)]
pub struct RequestTickets {
    next_id: u64,
    // per OperationKind::index(): newest issued id, count still pending
    latest: [u64; 2],
    pending: [usize; 2],
}

impl RequestTickets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for one dispatch of `kind`.
    ///
    /// # Errors
    /// [`PlotpadError::RequestInFlight`] when a dispatch of the same kind is
    /// still pending and the policy is [`InFlightPolicy::Reject`].
    pub fn issue(
        &mut self,
        kind: OperationKind,
        policy: InFlightPolicy,
    ) -> Result<Ticket, PlotpadError> {
        if policy == InFlightPolicy::Reject && self.pending[kind.index()] > 0 {
            return Err(PlotpadError::RequestInFlight {
                operation: kind.as_str(),
            });
        }
        self.next_id += 1;
        self.latest[kind.index()] = self.next_id;
        self.pending[kind.index()] += 1;
        Ok(Ticket {
            kind,
            id: self.next_id,
        })
    }

    /// Mark a dispatch as finished, success or failure alike.
    ///
    /// Returns `true` when the ticket is still the newest issued for its
    /// operation kind, i.e. the result may be committed. A `false` return
    /// means a newer request superseded this one while it was in flight and
    /// its result must be discarded.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        let idx = ticket.kind.index();
        self.pending[idx] = self.pending[idx].saturating_sub(1);
        let current = ticket.id == self.latest[idx];
        if !current {
            debug!(
                operation = ticket.kind.as_str(),
                id = ticket.id,
                latest = self.latest[idx],
                "dropping stale dispatch result"
            );
        }
        current
    }

    /// Whether a dispatch of `kind` is currently pending.
    pub fn is_pending(&self, kind: OperationKind) -> bool {
        self.pending[kind.index()] > 0
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TextBody<'a> {
    text: &'a str,
}

/// Receipt returned by the `/submit` endpoint.
///
/// The service answers `{"ok": true, "queued": <text>, "position": N}`;
/// unknown or missing fields deserialise to `None` so a newer back-end
/// can't break the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitReceipt {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub queued: Option<String>,
    #[serde(default)]
    pub position: Option<usize>,
}

/// Answer from the `/status` endpoint: how many jobs the plotter still has
/// queued.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueStatus {
    #[serde(default)]
    pub queue_length: usize,
}

// ── Dispatcher ───────────────────────────────────────────────────────────

/// HTTP client for the plotter service.
///
/// One instance per session; the underlying `reqwest::Client` pools
/// connections, so both operations share it.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    config: SessionConfig,
}

impl Dispatcher {
    /// Build a dispatcher with the configured per-request timeout.
    pub fn new(config: SessionConfig) -> Result<Self, PlotpadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| PlotpadError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Convert `text` to an instruction stream.
    ///
    /// The whole response body becomes the result, verbatim.
    pub async fn convert(&self, text: &str) -> Result<String, PlotpadError> {
        let url = self.config.gcode_url();
        info!(url = %url, payload_bytes = text.len(), "dispatching convert");

        let response = self.post_text(&url, text).await?;
        let gcode = response
            .text()
            .await
            .map_err(|e| PlotpadError::NetworkError {
                url,
                reason: format!("failed to read response body: {e}"),
            })?;

        debug!(gcode_bytes = gcode.len(), "convert succeeded");
        Ok(gcode)
    }

    /// Submit `text` as a plot job.
    pub async fn submit(&self, text: &str) -> Result<SubmitReceipt, PlotpadError> {
        let url = self.config.submit_url();
        info!(url = %url, payload_bytes = text.len(), "dispatching submit");

        let response = self.post_text(&url, text).await?;
        let receipt: SubmitReceipt =
            response
                .json()
                .await
                .map_err(|e| PlotpadError::NetworkError {
                    url,
                    reason: format!("failed to parse submit receipt: {e}"),
                })?;

        debug!(position = ?receipt.position, "submit accepted");
        Ok(receipt)
    }

    /// Ask the service how many jobs it has queued.
    pub async fn queue_status(&self) -> Result<QueueStatus, PlotpadError> {
        let url = self.config.status_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let response = check_status(&url, response).await?;
        response
            .json()
            .await
            .map_err(|e| PlotpadError::NetworkError {
                url,
                reason: format!("failed to parse queue status: {e}"),
            })
    }

    /// POST `{"text": …}` and fail on transport errors or non-2xx statuses.
    async fn post_text(&self, url: &str, text: &str) -> Result<reqwest::Response, PlotpadError> {
        let response = self
            .client
            .post(url)
            .json(&TextBody { text })
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;
        check_status(url, response).await
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> PlotpadError {
    let reason = if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    };
    PlotpadError::NetworkError {
        url: url.to_string(),
        reason,
    }
}

/// Map a non-success response to `ServerError`, carrying the body text for
/// the notice (the back-end puts its reason there, e.g. "Queue full").
async fn check_status(
    url: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, PlotpadError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PlotpadError::ServerError {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}
