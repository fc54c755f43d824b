//! Snapshot polling and broadcast
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        PollLoop (thread)                          │
//! │  ┌──────────────────┐  ┌────────────────┐  ┌──────────────────┐  │
//! │  │ SnapshotProducer │─>│ ChangeDetector │─>│    broadcast     │  │
//! │  └──────────────────┘  └────────────────┘  └────────┬─────────┘  │
//! └─────────────────────────────────────────────────────┼────────────┘
//!                                                       │
//!                              SubscriberRegistry (Mutex) ──► one channel
//!                                                             per WebSocket
//! ```
//!
//! # Modules
//!
//! - `snapshot` - Directory walk and file decoding
//! - `change` - Byte-level change detection
//! - `broadcast` - Best-effort fan-out to subscribers
//! - `poller` - Fixed-interval polling thread

pub mod broadcast;
pub mod change;
pub mod poller;
pub mod snapshot;

pub use broadcast::{broadcast, BroadcastStats};
pub use change::{has_changed, ChangeDetector};
pub use poller::{PollLoop, PollerConfig, PollerHandle, TickOutcome};
pub use snapshot::{read_viz_file, SnapshotProducer, DEFAULT_EXTENSION};
