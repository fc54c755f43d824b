//! WebSocket subscriber connection
//!
//! A subscriber is registered as soon as its socket is upgraded. From then on
//! the connection task does two things: it forwards queued snapshot payloads
//! to the socket, and it watches the inbound side. Any data or close frame
//! from the client, a read error, or the end of the stream ends the
//! subscription. Client messages are never interpreted.
//!
//! The outbound queue is bounded. While it is full, broadcasts to this
//! subscriber are dropped rather than buffered.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::schema::Payload;
use crate::socket_server::registry::SubscriberRegistry;

/// Payloads queued per subscriber before further broadcasts to it are dropped
pub const SUBSCRIBER_QUEUE_CAPACITY: usize = 16;

/// Handle a single upgraded WebSocket until it closes
pub async fn handle_subscriber(socket: WebSocket, registry: Arc<SubscriberRegistry>) {
    let (tx, mut rx) = mpsc::channel::<Payload>(SUBSCRIBER_QUEUE_CAPACITY);
    let registration = registry.register(Arc::new(tx));
    let id = registration.id();
    tracing::info!("Subscriber {} connected ({} live)", id, registry.len());

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            inbound = receiver.next() => {
                match inbound {
                    // Keep-alive frames are answered by the transport
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) => {
                        tracing::debug!("Subscriber {} requested close", id);
                        break;
                    }
                    Some(Ok(_)) => {
                        tracing::debug!("Subscriber {} sent a message, closing", id);
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::debug!("Subscriber {} read error: {}", id, e);
                        break;
                    }
                    None => break,
                }
            }

            outbound = rx.recv() => {
                let Some(payload) = outbound else { break };
                if let Err(e) = sender.send(Message::Text(payload.as_str().to_string())).await {
                    tracing::debug!("Write to subscriber {} failed: {}", id, e);
                }
            }
        }
    }

    drop(registration);
    let _ = sender.close().await;
    tracing::info!("Subscriber {} disconnected ({} live)", id, registry.len());
}
