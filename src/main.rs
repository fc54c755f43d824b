//! vizbuzz entry point
//!
//! # Usage
//!
//! ```bash
//! vizbuzz ./shapes
//! vizbuzz ./shapes --port 9999 --interval-ms 250
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use vizbuzz::server::{PollLoop, PollerConfig, SnapshotProducer};
use vizbuzz::socket_server::{serve, AppState, SubscriberRegistry};
use vizbuzz::{Cli, ServeConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: vizbuzz <directory to watch>");
            return e.exit_code();
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Server stopped: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let directive = format!("vizbuzz={}", level);
    let filter = match directive.parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        Err(_) => tracing_subscriber::EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config: ServeConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Watching for {} files in {}",
        config.extension,
        config.watch_dir.display()
    );

    let producer = SnapshotProducer::new(&config.watch_dir, &config.extension);
    let registry = Arc::new(SubscriberRegistry::new());

    let poller = PollLoop::new(
        producer.clone(),
        Arc::clone(&registry),
        PollerConfig {
            interval: config.poll_interval,
        },
    )
    .spawn()?;

    let listener = TcpListener::bind(config.addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down");
    };

    serve(listener, AppState::new(producer, registry), shutdown).await?;
    poller.stop();
    Ok(())
}
