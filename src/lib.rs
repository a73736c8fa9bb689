//! # Dashstream
//!
//! Client-side subscription manager for a streaming dashboard backend.
//!
//! One long-lived server-push stream carries the current state of a
//! hierarchical, filterable content tree; this crate republishes it as
//! independently observable channels plus connection-health signals.
//!
//! ## Core Concepts
//!
//! - **Descriptor**: the (path, filter set) pair defining what the
//!   subscription currently requests
//! - **Channels**: replay-latest-value holders for content, navigation,
//!   and namespaces; late observers immediately receive the latest value
//! - **Status signal**: observable Loading / Error / phase state
//! - **Restart**: every descriptor change closes the connection and opens a
//!   fresh one; at most one connection is open at any instant
//!
//! ## Example
//!
//! ```ignore
//! use dashstream::{ManagerConfig, SubscriptionManager, Filter};
//!
//! let manager = SubscriptionManager::new(ManagerConfig::default(), transport);
//!
//! manager.start("workloads")?;
//! let content = manager.content().subscribe();
//!
//! // Filter changes tear the connection down and reopen it.
//! manager.update_filters(vec![Filter::new("app", "web")])?;
//! ```

pub mod channels;
pub mod descriptor;
pub mod error;
pub mod manager;
pub mod transport;
pub mod types;

// Re-exports
pub use channels::{Channel, ConnectionPhase, Observer, ObserverId, StatusSignal};
pub use descriptor::{normalize_path, SubscriptionDescriptor, DEFAULT_POLL_INTERVAL_SECS};
pub use error::{ClientError, Result};
pub use manager::{EventSink, ManagerConfig, SubscriptionManager, DISRUPTION_ADVISORY};
pub use transport::{StreamEvent, StreamHandle, Transport};
pub use types::{
    Content, ContentResponse, Filter, NamespaceList, Navigation, NavigationSection,
};
