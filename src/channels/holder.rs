//! Replay-latest-value observable holder.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an observer of one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

struct ChannelInner<T> {
    value: T,
    observers: HashMap<ObserverId, Sender<T>>,
}

/// A holder storing the last value set plus a set of registered observers.
///
/// `set` stores and notifies; `subscribe` immediately delivers the current
/// value, then future ones. Written only by the subscription manager; callers
/// get read-only access.
pub struct Channel<T> {
    inner: RwLock<ChannelInner<T>>,
    next_id: AtomicU64,
}

impl<T: Clone> Channel<T> {
    /// Create a channel holding `initial` as its current value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: RwLock::new(ChannelInner {
                value: initial,
                observers: HashMap::new(),
            }),
            next_id: AtomicU64::new(1),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.read().value.clone()
    }

    /// Register an observer. The current value is delivered immediately,
    /// before any future update.
    pub fn subscribe(&self) -> Observer<T> {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = unbounded();

        let mut inner = self.inner.write();
        // Replay the latest value; the receiver cannot be gone yet.
        let _ = sender.send(inner.value.clone());
        inner.observers.insert(id, sender);

        Observer { id, receiver }
    }

    /// Store a new value and notify all observers. Observers whose receiver
    /// was dropped are pruned.
    pub(crate) fn set(&self, value: T) {
        let mut inner = self.inner.write();
        inner.value = value.clone();

        let mut to_remove = Vec::new();
        for (id, sender) in inner.observers.iter() {
            if sender.send(value.clone()).is_err() {
                to_remove.push(*id);
            }
        }
        for id in to_remove {
            inner.observers.remove(&id);
        }
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.read().observers.len()
    }
}

/// Handle for receiving values from one channel.
pub struct Observer<T> {
    pub id: ObserverId,
    receiver: Receiver<T>,
}

impl<T> Observer<T> {
    /// Receive the next value (blocking).
    pub fn recv(&self) -> Result<T, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a value (non-blocking).
    pub fn try_recv(&self) -> Result<T, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<T, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain buffered values and return the most recent one, if any.
    pub fn latest(&self) -> Option<T> {
        let mut latest = None;
        while let Ok(value) = self.receiver.try_recv() {
            latest = Some(value);
        }
        latest
    }
}
