//! Subscription manager tying descriptor, connection, and channels together.
//!
//! The manager keeps exactly one live stream connection consistent with the
//! current (path, filter set) descriptor. Whenever the descriptor changes
//! while a subscription is active, the connection is fully torn down and a
//! fresh one opened: the filter set is encoded only at connection-open time
//! in the request URL.

use crate::channels::{Channel, StatusSignal};
use crate::descriptor::{SubscriptionDescriptor, DEFAULT_POLL_INTERVAL_SECS};
use crate::error::{ClientError, Result};
use crate::transport::{StreamEvent, StreamHandle, Transport};
use crate::types::{ContentResponse, Filter, NamespaceList, Navigation};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Advisory shown while the transport recovers from a disruption.
pub const DISRUPTION_ADVISORY: &str = "Lost backend source. Currently retrying...";

/// Manager configuration.
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    /// Resolved API base, e.g. `http://127.0.0.1:7777`.
    pub api_base: String,

    /// Refresh cadence hint passed to the backend in the `poll` parameter.
    pub poll_interval_secs: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:7777".to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

/// Routes inbound stream events into the channels and status signal.
///
/// Each connection is tagged with a generation; events from any generation
/// other than the active one are discarded, so a superseded connection's
/// late events can never overwrite a channel.
struct EventRouter {
    content: Channel<ContentResponse>,
    navigation: Channel<Navigation>,
    namespaces: Channel<Vec<String>>,
    status: StatusSignal,
    active_generation: AtomicU64,
}

impl EventRouter {
    fn new() -> Self {
        Self {
            content: Channel::new(ContentResponse::default()),
            navigation: Channel::new(Navigation::default()),
            namespaces: Channel::new(Vec::new()),
            status: StatusSignal::new(),
            active_generation: AtomicU64::new(0),
        }
    }

    /// Invalidate all outstanding sinks and return the next generation.
    fn advance_generation(&self) -> u64 {
        self.active_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn route(&self, generation: u64, event: StreamEvent) {
        if generation != self.active_generation.load(Ordering::SeqCst) {
            trace!(generation, "discarding event from superseded connection");
            return;
        }

        match event {
            StreamEvent::Message(data) => match serde_json::from_str::<ContentResponse>(&data) {
                Ok(content) => {
                    self.content.set(content);
                    self.status.mark_streaming();
                }
                Err(e) => warn!(error = %e, "malformed content payload, keeping previous value"),
            },
            StreamEvent::Navigation(data) => match serde_json::from_str::<Navigation>(&data) {
                Ok(navigation) => self.navigation.set(navigation),
                Err(e) => warn!(error = %e, "malformed navigation payload, keeping previous value"),
            },
            StreamEvent::Namespaces(data) => match serde_json::from_str::<NamespaceList>(&data) {
                Ok(list) => self.namespaces.set(list.namespaces),
                Err(e) => warn!(error = %e, "malformed namespaces payload, keeping previous value"),
            },
            StreamEvent::Error => {
                // The transport reconnects at its own level; only surface status.
                self.status.mark_degraded(DISRUPTION_ADVISORY);
            }
        }
    }
}

/// Per-connection delivery handle passed to [`Transport::open_stream`].
///
/// Tagged with the generation of the connection it was created for; events
/// delivered after that connection is superseded are discarded.
#[derive(Clone)]
pub struct EventSink {
    router: Arc<EventRouter>,
    generation: u64,
}

impl EventSink {
    /// Deliver one stream event to the manager.
    pub fn deliver(&self, event: StreamEvent) {
        self.router.route(self.generation, event);
    }
}

struct ManagerState {
    /// Normalized path of the active subscription, if any.
    current_path: Option<String>,
    /// Filter set applied at the next connection open.
    filters: Vec<Filter>,
    /// The one active connection. Owned exclusively by the manager.
    connection: Option<Box<dyn StreamHandle>>,
}

/// Client-side subscription manager.
///
/// Consumes one long-lived server-push stream and republishes it as
/// independently observable channels (content, navigation, namespaces) plus
/// connection-health signals. See the module docs for the restart contract.
pub struct SubscriptionManager {
    config: ManagerConfig,
    transport: Arc<dyn Transport>,
    router: Arc<EventRouter>,
    state: Mutex<ManagerState>,
}

impl SubscriptionManager {
    pub fn new(config: ManagerConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            router: Arc::new(EventRouter::new()),
            state: Mutex::new(ManagerState {
                current_path: None,
                filters: Vec::new(),
                connection: None,
            }),
        }
    }

    /// Begin or switch the subscription to `path`.
    ///
    /// The path is normalized, any existing connection is closed before the
    /// new one opens, and Loading goes true before the open.
    pub fn start(&self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(ClientError::EmptyPath);
        }

        let mut state = self.state.lock();
        let path = crate::descriptor::normalize_path(path);
        state.current_path = Some(path.clone());
        self.restart(&mut state, &path)
    }

    /// Close the active connection and clear the subscribed path.
    /// No-op when nothing is active.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if state.connection.is_none() && state.current_path.is_none() {
            return;
        }

        if let Some(mut connection) = state.connection.take() {
            debug!("closing stream connection");
            connection.close();
        }
        // Invalidate stragglers from the closed connection.
        self.router.advance_generation();
        state.current_path = None;
        self.router.status.mark_idle();
    }

    /// Replace the filter set. Restarts the connection against the current
    /// path if a subscription is active; otherwise the filters take effect
    /// on the next [`start`](Self::start).
    pub fn update_filters(&self, filters: Vec<Filter>) -> Result<()> {
        let mut state = self.state.lock();
        state.filters = filters;

        match state.current_path.clone() {
            Some(path) => self.restart(&mut state, &path),
            None => {
                debug!("no active subscription, filters recorded for next start");
                Ok(())
            }
        }
    }

    /// Close-then-open restart. `path` must already be normalized.
    fn restart(&self, state: &mut ManagerState, path: &str) -> Result<()> {
        // Close and drop the old connection first: at most one connection is
        // open at any instant.
        if let Some(mut connection) = state.connection.take() {
            debug!("closing superseded stream connection");
            connection.close();
        }

        let generation = self.router.advance_generation();
        let descriptor = SubscriptionDescriptor::new(path, state.filters.clone());
        let url = descriptor.stream_url(&self.config.api_base, self.config.poll_interval_secs);

        // Loading goes true before the connection opens.
        self.router.status.mark_connecting();

        debug!(%url, generation, "opening stream connection");
        let sink = EventSink {
            router: Arc::clone(&self.router),
            generation,
        };
        let connection = self.transport.open_stream(&url, sink)?;
        state.connection = Some(connection);
        Ok(())
    }

    // --- Channels ---

    /// Content channel: latest streamed content snapshot.
    pub fn content(&self) -> &Channel<ContentResponse> {
        &self.router.content
    }

    /// Navigation channel: latest streamed navigation tree.
    pub fn navigation(&self) -> &Channel<Navigation> {
        &self.router.navigation
    }

    /// Namespaces channel: latest streamed namespace list.
    pub fn namespaces(&self) -> &Channel<Vec<String>> {
        &self.router.namespaces
    }

    /// Connection-health signals.
    pub fn status(&self) -> &StatusSignal {
        &self.router.status
    }

    /// Normalized path of the active subscription, if any.
    pub fn current_path(&self) -> Option<String> {
        self.state.lock().current_path.clone()
    }

    // --- One-shot endpoints ---

    /// Fetch the navigation tree once, outside the stream.
    pub fn fetch_navigation(&self) -> Result<Navigation> {
        let url = format!("{}/api/v1/navigation", self.config.api_base);
        let body = self.transport.fetch(&url)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the namespace list once, outside the stream.
    pub fn fetch_namespaces(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/v1/namespaces", self.config.api_base);
        let body = self.transport.fetch(&url)?;
        let list: NamespaceList = serde_json::from_str(&body)?;
        Ok(list.namespaces)
    }
}
