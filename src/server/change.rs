//! Content-based change detection
//!
//! Snapshots are compared by their canonical serialization only; there is no
//! structural diff.

use crate::schema::{Payload, Snapshot};

/// True iff the two serialized snapshots differ in any byte
pub fn has_changed(previous: &[u8], current: &[u8]) -> bool {
    previous != current
}

/// Remembers the last broadcast payload
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    previous: Payload,
}

impl ChangeDetector {
    /// Start from the empty snapshot, so an empty directory never reports a change
    pub fn new() -> Self {
        let previous = Snapshot::default()
            .to_payload()
            .unwrap_or_else(|_| Payload::from(r#"{"files":[]}"#));
        Self { previous }
    }

    /// Start from an explicit baseline
    pub fn with_baseline(previous: Payload) -> Self {
        Self { previous }
    }

    pub fn previous(&self) -> &Payload {
        &self.previous
    }

    /// Record `current`; returns true and replaces the baseline only when it differs
    pub fn observe(&mut self, current: &Payload) -> bool {
        if !has_changed(self.previous.as_bytes(), current.as_bytes()) {
            return false;
        }
        self.previous = current.clone();
        true
    }
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}
