//! Snapshot broadcast to every live subscriber
//!
//! Delivery is best-effort: a failed send is counted and otherwise ignored.
//! The subscriber stays registered until its own connection notices the
//! closure and drops its registration.

use crate::schema::Payload;
use crate::socket_server::registry::SubscriberRegistry;

/// Outcome of one broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastStats {
    pub delivered: usize,
    pub failed: usize,
}

impl BroadcastStats {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Send `payload` to every registered subscriber
pub fn broadcast(registry: &SubscriberRegistry, payload: &Payload) -> BroadcastStats {
    let mut stats = BroadcastStats::default();

    registry.for_each(|id, sink| {
        if sink.send(payload) {
            stats.delivered += 1;
        } else {
            tracing::debug!("[BROADCAST] Failed to send to {}", id);
            stats.failed += 1;
        }
    });

    tracing::info!(
        "[BROADCAST] Sent {} bytes to {}/{} subscribers",
        payload.len(),
        stats.delivered,
        stats.attempted()
    );
    stats
}
