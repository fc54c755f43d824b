//! Request server
//!
//! Exposes the watched directory over HTTP and pushes snapshot changes to
//! WebSocket subscribers.
//!
//! # Protocol
//!
//! ```json
//! // GET /api/items -> current disk state
//! {"files":[{"name":"shapes/a","items":[{"name":"box","polygon":{"rings":[[[0,0],[10,0],[10,10]]]}}]}]}
//!
//! // /wsapi/connect, Server -> Client on every change (same shape)
//! {"files":[...]}
//! ```
//!
//! Client -> Server messages are not interpreted; any data or close frame
//! ends the subscription.

pub mod connection;
pub mod registry;
pub mod routes;

pub use connection::{handle_subscriber, SUBSCRIBER_QUEUE_CAPACITY};
pub use registry::{PayloadSink, Registration, SubscriberId, SubscriberRegistry};
pub use routes::{router, serve, AppState, CONNECT_ROUTE, ITEMS_ROUTE};
