//! HTTP server for the mdgate content server.
//!
//! Serves a flat set of uppercase `<PAGE>.md` files, negotiating the
//! representation per request:
//!
//! - bot-like user agents and `.md`/`llms` paths get raw markdown
//! - everything else gets GFM-rendered HTML in a fixed page shell
//! - `/LICENSE` serves the configured license file as plain text
//!
//! The server is stateless: every request reads its file from disk and
//! renders it fresh, so identical requests produce identical responses.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdgate_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 4567,
//!         source_dir: PathBuf::from("."),
//!         license_path: PathBuf::from("LICENSE"),
//!         domain: None,
//!         bot_patterns: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod bots;
mod error;
mod handlers;
mod layout;
mod middleware;
mod routing;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use bots::BotDetector;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the uppercase `<PAGE>.md` source files.
    pub source_dir: PathBuf,
    /// License file served on `/LICENSE`.
    pub license_path: PathBuf,
    /// Domain injected into rendered pages (`None` uses the `Host` header).
    pub domain: Option<String>,
    /// Custom bot user-agent substrings (`None` uses the built-in list).
    pub bot_patterns: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4567,
            source_dir: PathBuf::from("."),
            license_path: PathBuf::from("LICENSE"),
            domain: None,
            bot_patterns: None,
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let detector = config
        .bot_patterns
        .map_or_else(BotDetector::default, BotDetector::new);

    let state = Arc::new(AppState {
        source_dir: config.source_dir,
        license_path: config.license_path,
        detector,
        domain: config.domain,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the application config.
#[must_use]
pub fn server_config_from_config(config: &mdgate_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.content_resolved.source_dir.clone(),
        license_path: config.content_resolved.license_file.clone(),
        domain: config.site.domain.clone(),
        bot_patterns: config.bots.patterns.clone(),
    }
}
