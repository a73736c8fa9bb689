//! Replay-latest-value channels and connection-health signals.
//!
//! Each channel holds one current value. Subscribing delivers that value
//! immediately, then every future update; late observers never start from
//! the default when data has already arrived.
//!
//! # Example
//!
//! ```ignore
//! let channel = Channel::new(0u32);
//! channel.set(7);
//!
//! let observer = channel.subscribe();
//! assert_eq!(observer.recv().unwrap(), 7); // replayed latest value
//! ```

mod holder;
mod status;

pub use holder::{Channel, Observer, ObserverId};
pub use status::{ConnectionPhase, StatusSignal};
