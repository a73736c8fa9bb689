//! Connection-health signals: Loading, Error, and the connection phase.

use super::holder::Channel;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the active subscription.
///
/// `Degraded` returns to `Streaming` automatically on the next content
/// message; a restart forces `Connecting` regardless of prior phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPhase {
    /// No connection.
    Idle,
    /// Connection opened, no content received yet.
    Connecting,
    /// Content flowing.
    Streaming,
    /// Transport reported an error; the transport retries on its own.
    Degraded,
}

/// Observable connection-health state, written by the subscription manager.
///
/// Loading is true exactly from the moment a connection attempt starts until
/// the first content message from that connection arrives. Error is set on
/// transport disruption and cleared by the next content message.
pub struct StatusSignal {
    loading: Channel<bool>,
    error: Channel<Option<String>>,
    phase: Channel<ConnectionPhase>,
}

impl StatusSignal {
    pub fn new() -> Self {
        Self {
            loading: Channel::new(false),
            error: Channel::new(None),
            phase: Channel::new(ConnectionPhase::Idle),
        }
    }

    /// Loading flag: the only signal for "awaiting data".
    pub fn loading(&self) -> &Channel<bool> {
        &self.loading
    }

    /// Error advisory: the only signal for "connection trouble".
    pub fn error(&self) -> &Channel<Option<String>> {
        &self.error
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> &Channel<ConnectionPhase> {
        &self.phase
    }

    /// A connection attempt is starting. The error advisory is left in place
    /// until content actually arrives.
    pub(crate) fn mark_connecting(&self) {
        self.loading.set(true);
        self.phase.set(ConnectionPhase::Connecting);
    }

    /// A content message arrived on the active connection.
    pub(crate) fn mark_streaming(&self) {
        self.loading.set(false);
        self.error.set(None);
        self.phase.set(ConnectionPhase::Streaming);
    }

    /// The transport reported a disruption. Loading is left unchanged.
    pub(crate) fn mark_degraded(&self, advisory: &str) {
        self.error.set(Some(advisory.to_string()));
        self.phase.set(ConnectionPhase::Degraded);
    }

    /// The subscription stopped.
    pub(crate) fn mark_idle(&self) {
        self.loading.set(false);
        self.error.set(None);
        self.phase.set(ConnectionPhase::Idle);
    }
}

impl Default for StatusSignal {
    fn default() -> Self {
        Self::new()
    }
}
