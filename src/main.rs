//! cors-dev-proxy
//!
//! A local development server that serves static files and relays GET
//! requests to arbitrary upstream URLs with permissive CORS headers.
//!
//! ```text
//!     Browser ──▶ listener ──▶ router ──┬─▶ /proxy/<url> ──▶ forwarder ──▶ Upstream
//!                                       └─▶ anything else ─▶ static files (cwd)
//!
//!     every response ◀── Access-Control-Allow-Origin: *
//!                        Access-Control-Allow-Methods: GET, OPTIONS
//! ```

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::net::TcpListener;

use cors_dev_proxy::config::loader::{ensure_valid, load_config};
use cors_dev_proxy::config::ServerConfig;
use cors_dev_proxy::lifecycle::{signals, startup, Shutdown};
use cors_dev_proxy::observability::logging;
use cors_dev_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "cors-dev-proxy")]
#[command(about = "Static file server with a CORS proxy for local development", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (default 8080).
    #[arg(short, long)]
    port: Option<u16>,

    /// IP address to bind (default 0.0.0.0).
    #[arg(short, long)]
    bind: Option<IpAddr>,

    /// Directory to serve static files from (default: working directory).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Log level when RUST_LOG is not set.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Apply command-line values on top of the file (or default) config.
    fn apply(self, config: &mut ServerConfig) {
        config.listener.bind_address =
            merge_bind_address(&config.listener.bind_address, self.bind, self.port);
        if let Some(root) = self.root {
            config.static_files.root = root;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }
}

/// Replace the IP and/or port of `current`.
///
/// An address that does not parse is returned untouched so validation
/// reports it rather than the flags papering over it.
fn merge_bind_address(current: &str, bind: Option<IpAddr>, port: Option<u16>) -> String {
    if bind.is_none() && port.is_none() {
        return current.to_string();
    }
    match current.parse::<SocketAddr>() {
        Ok(addr) => {
            let ip = bind.unwrap_or(addr.ip());
            SocketAddr::new(ip, port.unwrap_or(addr.port())).to_string()
        }
        Err(_) => current.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    cli.apply(&mut config);
    ensure_valid(&config)?;

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        root = %config.static_files.root.display(),
        query_endpoint = ?config.proxy.query_endpoint,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    let server = HttpServer::new(config)?;

    println!("{}", startup::banner(local_addr));

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
