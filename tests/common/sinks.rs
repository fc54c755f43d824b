//! Subscriber sinks that stand in for WebSocket connections

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use vizbuzz::socket_server::PayloadSink;
use vizbuzz::Payload;

/// Records every payload it receives
#[derive(Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Payload>>,
}

impl RecordingSink {
    pub fn count(&self) -> usize {
        self.received.lock().len()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.received
            .lock()
            .iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }

    pub fn last(&self) -> Option<String> {
        self.received.lock().last().map(|p| p.as_str().to_string())
    }
}

impl PayloadSink for RecordingSink {
    fn send(&self, payload: &Payload) -> bool {
        self.received.lock().push(payload.clone());
        true
    }
}

/// Fails every send, like a connection whose peer went away
#[derive(Default)]
pub struct BrokenSink {
    attempts: AtomicUsize,
}

impl BrokenSink {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl PayloadSink for BrokenSink {
    fn send(&self, _payload: &Payload) -> bool {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        false
    }
}
