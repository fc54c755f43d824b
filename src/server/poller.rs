//! Filesystem polling loop
//!
//! A dedicated thread takes a snapshot of the watched directory every
//! `interval`, serializes it, and broadcasts it when the bytes differ from the
//! last broadcast payload.
//!
//! # Tick
//!
//! ```text
//! ┌──────────────────┐     ┌────────────────┐     ┌─────────────┐
//! │ SnapshotProducer │────>│ ChangeDetector │────>│  broadcast  │
//! │   (walk + read)  │     │ (byte compare) │     │ (registry)  │
//! └──────────────────┘     └────────────────┘     └─────────────┘
//! ```
//!
//! Ticks never overlap: a slow tick simply delays the next one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::schema::Payload;
use crate::socket_server::registry::SubscriberRegistry;

use super::broadcast::{broadcast, BroadcastStats};
use super::change::ChangeDetector;
use super::snapshot::SnapshotProducer;

/// Configuration for filesystem polling
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Pause between ticks (default: 500ms)
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
        }
    }
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Content matched the last broadcast
    Unchanged,
    /// Content changed and was sent to the registry
    Broadcast {
        payload: Payload,
        stats: BroadcastStats,
    },
    /// The snapshot could not be serialized
    Failed,
}

impl TickOutcome {
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Self::Broadcast { .. })
    }
}

/// Snapshot-compare-broadcast loop for one watched directory
pub struct PollLoop {
    producer: SnapshotProducer,
    registry: Arc<SubscriberRegistry>,
    detector: ChangeDetector,
    config: PollerConfig,
}

impl PollLoop {
    pub fn new(
        producer: SnapshotProducer,
        registry: Arc<SubscriberRegistry>,
        config: PollerConfig,
    ) -> Self {
        Self {
            producer,
            registry,
            detector: ChangeDetector::new(),
            config,
        }
    }

    /// Payload of the last broadcast (the empty snapshot before the first one)
    pub fn previous(&self) -> &Payload {
        self.detector.previous()
    }

    /// Run one poll cycle
    pub fn tick(&mut self) -> TickOutcome {
        let snapshot = self.producer.snapshot();
        let payload = match snapshot.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize snapshot: {}", e);
                return TickOutcome::Failed;
            }
        };

        if !self.detector.observe(&payload) {
            return TickOutcome::Unchanged;
        }

        tracing::debug!(
            "Change detected in {} ({} files)",
            self.producer.root().display(),
            snapshot.files.len()
        );
        let stats = broadcast(&self.registry, &payload);
        TickOutcome::Broadcast { payload, stats }
    }

    /// Run ticks on a dedicated thread until the returned handle is stopped or dropped
    pub fn spawn(mut self) -> std::io::Result<PollerHandle> {
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let interval = self.config.interval;

        thread::Builder::new()
            .name("vizbuzz-poller".to_string())
            .spawn(move || {
                tracing::info!(
                    "Polling {} every {:?}",
                    self.producer.root().display(),
                    interval
                );

                while thread_running.load(Ordering::SeqCst) {
                    let started = Instant::now();
                    self.tick();
                    tracing::trace!("Tick took {:?}", started.elapsed());

                    thread::sleep(interval);
                }

                tracing::debug!("Poller for {} stopped", self.producer.root().display());
            })?;

        Ok(PollerHandle { running })
    }
}

/// Handle for controlling a running poller
pub struct PollerHandle {
    running: Arc<AtomicBool>,
}

impl PollerHandle {
    /// Stop the poller after its current tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the poller is still running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

// ============================================================================
// Tests
// ============================================================================
