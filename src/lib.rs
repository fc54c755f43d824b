//! vizbuzz: live polygon visualization server
//!
//! Watches a directory tree for JSON visualization files, serves their
//! aggregated content over HTTP, and pushes every change to connected
//! WebSocket clients.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vizbuzz::server::{PollLoop, PollerConfig, SnapshotProducer};
//! use vizbuzz::socket_server::SubscriberRegistry;
//!
//! let producer = SnapshotProducer::new("./shapes", ".json");
//! println!("{}", producer.snapshot().to_payload()?.as_str());
//!
//! let registry = Arc::new(SubscriberRegistry::new());
//! let handle = PollLoop::new(producer, registry, PollerConfig::default()).spawn()?;
//! # handle.stop();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod error;
pub mod fs_utils;
pub mod schema;
pub mod server;
pub mod socket_server;

// Re-export commonly used types
pub use cli::{Cli, ServeConfig};
pub use error::{Result, VizError};
pub use schema::{Item, Payload, Polygon, Ring, Snapshot, Vertex, VizFile};
