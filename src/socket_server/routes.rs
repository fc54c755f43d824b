//! HTTP routes
//!
//! - `GET /api/items`: fresh snapshot of the watched directory as JSON
//! - `GET /wsapi/connect`: WebSocket subscription to snapshot changes

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocketUpgrade},
        State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use crate::server::snapshot::SnapshotProducer;
use crate::socket_server::connection::handle_subscriber;
use crate::socket_server::registry::SubscriberRegistry;

pub const ITEMS_ROUTE: &str = "/api/items";
pub const CONNECT_ROUTE: &str = "/wsapi/connect";

/// Shared state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub producer: SnapshotProducer,
    pub registry: Arc<SubscriberRegistry>,
}

impl AppState {
    pub fn new(producer: SnapshotProducer, registry: Arc<SubscriberRegistry>) -> Self {
        Self { producer, registry }
    }
}

/// Build the router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ITEMS_ROUTE, get(get_items))
        .route(CONNECT_ROUTE, get(connect))
        .with_state(state)
}

/// Serve the router on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Walk the directory now; the poller's cached payload is never used here
async fn get_items(State(state): State<AppState>) -> Response {
    let producer = state.producer.clone();
    let result = tokio::task::spawn_blocking(move || producer.snapshot().to_payload()).await;

    match result {
        Ok(Ok(payload)) => (
            [(header::CONTENT_TYPE, "application/json")],
            payload.as_str().to_string(),
        )
            .into_response(),
        Ok(Err(e)) => {
            tracing::error!("Failed to serialize snapshot: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("Snapshot task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn connect(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<AppState>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::warn!("WS upgrade failed: {}", rejection);
            return rejection.into_response();
        }
    };

    let registry = Arc::clone(&state.registry);
    ws.on_failed_upgrade(|e: axum::Error| tracing::warn!("WS upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_subscriber(socket, registry))
}
