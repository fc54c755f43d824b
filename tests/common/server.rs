//! In-process server for end-to-end tests

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use vizbuzz::server::{PollLoop, PollerConfig, PollerHandle, SnapshotProducer};
use vizbuzz::socket_server::{serve, AppState, SubscriberRegistry, CONNECT_ROUTE, ITEMS_ROUTE};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Poll interval used by end-to-end tests
pub const TEST_INTERVAL: Duration = Duration::from_millis(25);

/// How long a test waits for something asynchronous before failing
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Router bound to an ephemeral port; the poller is started separately
pub struct TestServer {
    pub addr: SocketAddr,
    pub registry: Arc<SubscriberRegistry>,
    producer: SnapshotProducer,
    poller: Option<PollerHandle>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start serving `root` without polling
    pub async fn start(root: &Path) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let producer = SnapshotProducer::new(root, ".json");
        let registry = Arc::new(SubscriberRegistry::new());
        let state = AppState::new(producer.clone(), Arc::clone(&registry));

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async move {
                let _ = rx.await;
            };
            serve(listener, state, shutdown).await.expect("Server failed");
        });

        Self {
            addr,
            registry,
            producer,
            poller: None,
            shutdown: Some(tx),
        }
    }

    /// Start the poll loop against the shared registry
    pub fn start_polling(&mut self) {
        let poll = PollLoop::new(
            self.producer.clone(),
            Arc::clone(&self.registry),
            PollerConfig {
                interval: TEST_INTERVAL,
            },
        );
        self.poller = Some(poll.spawn().expect("Failed to spawn poller"));
    }

    pub fn items_url(&self) -> String {
        format!("http://{}{}", self.addr, ITEMS_ROUTE)
    }

    pub fn connect_url(&self) -> String {
        format!("ws://{}{}", self.addr, CONNECT_ROUTE)
    }

    /// GET /api/items and return the body
    pub async fn get_items(&self) -> String {
        let response = reqwest::get(self.items_url())
            .await
            .expect("Request failed");
        assert!(response.status().is_success());
        response.text().await.expect("Failed to read body")
    }

    /// Open a subscription and wait until the server has registered it
    pub async fn subscribe(&self) -> Client {
        let before = self.registry.len();
        let (client, _) = connect_async(self.connect_url())
            .await
            .expect("WebSocket connect failed");
        self.wait_for_subscribers(before + 1).await;
        client
    }

    /// Wait until exactly `n` subscribers are registered
    pub async fn wait_for_subscribers(&self, n: usize) {
        let deadline = tokio::time::Instant::now() + TEST_TIMEOUT;
        while self.registry.len() != n {
            assert!(
                tokio::time::Instant::now() < deadline,
                "Expected {} subscribers, have {}",
                n,
                self.registry.len()
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Next text frame from the server, failing the test on timeout
pub async fn next_text(client: &mut Client) -> String {
    loop {
        let msg = tokio::time::timeout(TEST_TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Stream ended")
            .expect("WebSocket error");
        match msg {
            Message::Text(text) => return text,
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected message: {:?}", other),
        }
    }
}

/// Assert that no text frame arrives within `window`
pub async fn assert_silent(client: &mut Client, window: Duration) {
    if let Ok(Some(Ok(Message::Text(text)))) = tokio::time::timeout(window, client.next()).await {
        panic!("Expected no message, got {}", text);
    }
}
