//! Subscriber registry
//!
//! Tracks every live WebSocket subscriber by a unique, strictly increasing id.
//! All access goes through one mutex; `for_each` holds it for the whole
//! iteration, so a broadcast sees a stable set and concurrent `add`/`remove`
//! calls wait until the broadcast has finished queueing.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::schema::Payload;

/// Unique identifier for a subscriber (never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}

/// Best-effort send capability held for each subscriber
///
/// `send` must not block on the remote peer. Returning `false` reports a
/// failed delivery; the subscriber is still cleaned up by its own connection.
pub trait PayloadSink: Send + Sync {
    fn send(&self, payload: &Payload) -> bool;
}

/// A full queue counts as a failed send; the payload is dropped for that subscriber
impl PayloadSink for mpsc::Sender<Payload> {
    fn send(&self, payload: &Payload) -> bool {
        self.try_send(payload.clone()).is_ok()
    }
}

/// Registry of live subscribers
pub struct SubscriberRegistry {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<SubscriberId, Arc<dyn PayloadSink>>>,
}

impl SubscriberRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Register a sink and return its freshly allocated id
    pub fn add(&self, sink: Arc<dyn PayloadSink>) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.subscribers.lock().insert(id, sink);
        tracing::debug!("Registered subscriber {}", id);
        id
    }

    /// Remove a subscriber; returns false if it was not registered
    pub fn remove(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers.lock().remove(&id).is_some();
        if removed {
            tracing::debug!("Removed subscriber {}", id);
        }
        removed
    }

    /// Register a sink, removing it again when the returned guard is dropped
    pub fn register(self: &Arc<Self>, sink: Arc<dyn PayloadSink>) -> Registration {
        let id = self.add(sink);
        Registration {
            registry: Arc::clone(self),
            id,
        }
    }

    /// Call `f` for every registered subscriber while holding the registry lock
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(SubscriberId, &dyn PayloadSink),
    {
        let subscribers = self.subscribers.lock();
        for (id, sink) in subscribers.iter() {
            f(*id, sink.as_ref());
        }
    }

    pub fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers.lock().contains_key(&id)
    }

    /// Number of live subscribers
    pub fn len(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.lock().is_empty()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a subscriber registered for as long as it lives
pub struct Registration {
    registry: Arc<SubscriberRegistry>,
    id: SubscriberId,
}

impl Registration {
    pub fn id(&self) -> SubscriberId {
        self.id
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}
