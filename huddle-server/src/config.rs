// Server configuration.
//
// Environment variables first (a `.env` file is loaded by the binary before
// this runs), then command-line flags on top.

use clap::Parser;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host name or IP to listen on.
    pub host: String,
    pub port: u16,
    /// SQLite URL. `None` keeps everything in memory.
    pub database_url: Option<String>,
    /// Log filter directive (e.g. `info`, `huddle_server=debug`).
    pub log_filter: String,
    /// Comma-separated CORS origins, or `*`.
    pub cors_origins: String,
    /// Capacity of the presence hub's command queue.
    pub hub_queue: usize,
}

impl ServerConfig {
    /// | Variable | Default |
    /// |---|---|
    /// | `HUDDLE_HOST` | `0.0.0.0` |
    /// | `HUDDLE_PORT` | `3001` |
    /// | `HUDDLE_DATABASE_URL` | *(none, in-memory)* |
    /// | `HUDDLE_LOG_FILTER` | `info` |
    /// | `HUDDLE_CORS_ORIGINS` | `*` |
    /// | `HUDDLE_HUB_QUEUE` | `256` |
    pub fn from_env() -> Self {
        Self::from_env_fn(|key| std::env::var(key))
    }

    fn from_env_fn<F>(env: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let host = env("HUDDLE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env("HUDDLE_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3001);

        let database_url = env("HUDDLE_DATABASE_URL").ok().filter(|v| !v.is_empty());
        let log_filter = env("HUDDLE_LOG_FILTER").unwrap_or_else(|_| "info".into());
        let cors_origins = env("HUDDLE_CORS_ORIGINS").unwrap_or_else(|_| "*".into());
        let hub_queue = env("HUDDLE_HUB_QUEUE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(256);

        Self {
            host,
            port,
            database_url,
            log_filter,
            cors_origins,
            hub_queue,
        }
    }

    /// Resolves `host` (an IP, a bare IPv6 literal or a name such as
    /// `localhost`) to the first matching socket address.
    pub fn listen_addr(&self) -> io::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("{} resolved to no addresses", self.host),
                )
            })
    }
}

/// Command-line overrides for [`ServerConfig`].
#[derive(Debug, Default, Parser)]
#[command(name = "huddle", about = "Signaling and presence relay for WebRTC meetings")]
pub struct Cli {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long, short)]
    pub port: Option<u16>,

    #[arg(long)]
    pub database_url: Option<String>,

    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = self.database_url {
            config.database_url = Some(url);
        }
        if let Some(filter) = self.log_filter {
            config.log_filter = filter;
        }
        config
    }
}
