//! `mdgate serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdgate_config::{CliSettings, Config};
use mdgate_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover mdgate.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Domain shown in rendered pages (overrides config and DOMAIN).
    #[arg(long)]
    domain: Option<String>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            domain: self.domain,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        match &config.config_path {
            Some(path) => tracing::debug!(config = %path.display(), "Configuration loaded"),
            None => tracing::debug!("No mdgate.toml found, using defaults"),
        }

        // Print startup info
        output.highlight(&format!(
            "mdgate v{} - markdown for humans and agents alike",
            env!("CARGO_PKG_VERSION")
        ));
        output.info(&format!(
            "Listening on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Source directory: {}",
            config.content_resolved.source_dir.display()
        ));
        if let Some(domain) = &config.site.domain {
            output.info(&format!("Domain: {domain}"));
        } else {
            output.info("Domain: from request Host header");
        }

        // Build server config and run
        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
