//! Transport boundary: one-shot requests plus the server-push stream.
//!
//! The concrete HTTP client lives outside this crate; implementations of
//! [`Transport`] adapt it. The manager never touches a socket directly.

use crate::error::Result;
use crate::manager::EventSink;

/// Named event kinds arriving on one stream connection, with their raw JSON
/// payloads. Parsing happens in the manager so transports never need the
/// data model.
#[derive(Clone, Debug)]
pub enum StreamEvent {
    /// Content snapshot (`message` on the wire).
    Message(String),
    /// Navigation tree update.
    Navigation(String),
    /// Namespace list wrapper (`{"namespaces": [...]}`).
    Namespaces(String),
    /// Transport-level disruption; no payload. The transport is expected to
    /// reconnect on its own.
    Error,
}

/// Client-side transport: request/response plus a server-push primitive.
pub trait Transport: Send + Sync {
    /// One-shot GET returning the response body.
    fn fetch(&self, url: &str) -> Result<String>;

    /// Open a server-push stream to `url`, delivering events through `sink`.
    ///
    /// A well-behaved transport stops delivering once the returned handle is
    /// closed; the manager additionally discards events from superseded
    /// connections, so late deliveries are tolerated.
    fn open_stream(&self, url: &str, sink: EventSink) -> Result<Box<dyn StreamHandle>>;
}

/// Handle to one open stream connection.
pub trait StreamHandle: Send {
    /// Close the stream. Fire-and-forget: the manager does not wait for
    /// confirmation before opening a replacement.
    fn close(&mut self);
}
