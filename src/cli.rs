//! CLI argument parsing for vizbuzz

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{Result, VizError};
use crate::fs_utils::normalize_extension;
use crate::server::DEFAULT_EXTENSION;

/// Watch a directory of polygon visualization files and serve them live
#[derive(Parser, Debug)]
#[command(name = "vizbuzz")]
#[command(about = "Watch a directory of polygon .json files and push changes to browsers")]
#[command(version)]
pub struct Cli {
    /// Directory to watch
    #[arg(value_name = "DIRECTORY")]
    pub watch_dir: PathBuf,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1", env = "VIZBUZZ_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "9999", env = "VIZBUZZ_PORT")]
    pub port: u16,

    /// Milliseconds between directory polls
    #[arg(long, value_name = "MS", default_value = "500")]
    pub interval_ms: u64,

    /// Extension of visualization files
    #[arg(long = "ext", value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated server configuration
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub watch_dir: PathBuf,
    pub addr: SocketAddr,
    pub extension: String,
    pub poll_interval: Duration,
}

impl Cli {
    /// Validate arguments into a [`ServeConfig`]
    pub fn into_config(self) -> Result<ServeConfig> {
        if !self.watch_dir.exists() {
            return Err(VizError::WatchDirNotFound {
                path: self.watch_dir,
            });
        }
        if !self.watch_dir.is_dir() {
            return Err(VizError::NotADirectory {
                path: self.watch_dir,
            });
        }

        let address = format!("{}:{}", self.host, self.port);
        let addr = address
            .to_socket_addrs()
            .map_err(|e| VizError::InvalidAddress {
                address: address.clone(),
                message: e.to_string(),
            })?
            .next()
            .ok_or_else(|| VizError::InvalidAddress {
                address: address.clone(),
                message: "no address resolved".to_string(),
            })?;

        Ok(ServeConfig {
            watch_dir: self.watch_dir,
            addr,
            extension: normalize_extension(&self.extension),
            poll_interval: Duration::from_millis(self.interval_ms.max(1)),
        })
    }
}
