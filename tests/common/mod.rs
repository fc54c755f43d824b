//! Common test utilities and fixtures for vizbuzz integration tests
//!
//! This module provides:
//! - `WatchDir` builder for creating watched directories with visualization files
//! - Recording and failing subscriber sinks
//! - A helper that starts the HTTP/WebSocket server on an ephemeral port

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod server;
pub mod sinks;
pub mod watch_dir;

pub use server::{assert_silent, next_text, TestServer};
pub use sinks::{BrokenSink, RecordingSink};
pub use watch_dir::{square_file, WatchDir};
