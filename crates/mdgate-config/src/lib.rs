//! Configuration management for mdgate.
//!
//! Parses `mdgate.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`]; the
//! `DOMAIN` environment variable overrides the configured site domain
//! (and is itself overridden by an explicit CLI flag).

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdgate.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the domain injected into rendered pages.
    pub domain: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Site presentation configuration.
    pub site: SiteConfig,
    /// Bot detection configuration.
    pub bots: BotsConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4567,
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    license_file: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding the uppercase `<PAGE>.md` source files.
    pub source_dir: PathBuf,
    /// License file served verbatim on its dedicated route.
    pub license_file: PathBuf,
}

/// Site presentation configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Domain injected into the page layout. When unset the request's
    /// `Host` header is used.
    pub domain: Option<String>,
}

/// Bot detection configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BotsConfig {
    /// User-agent substrings classified as bots. When unset the built-in
    /// list is used.
    pub patterns: Option<Vec<String>>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdgate.toml` in the current directory and
    /// parents, falling back to defaults rooted at the working directory.
    ///
    /// Precedence for the site domain: CLI flag, then the `DOMAIN`
    /// environment variable, then the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        config.site.domain = resolve_domain(
            cli_settings.and_then(|s| s.domain.clone()),
            std::env::var("DOMAIN").ok(),
            config.site.domain.take(),
        );

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Search for a config file starting at `start` and walking upward.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to the current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to the given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            site: SiteConfig::default(),
            bots: BotsConfig::default(),
            content_resolved: ContentConfig {
                source_dir: base.to_path_buf(),
                license_file: base.join("LICENSE"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve raw relative paths against the config file's directory.
    fn resolve_paths(&mut self, base: &Path) {
        let source_dir = match &self.content.source_dir {
            Some(dir) => base.join(dir),
            None => base.to_path_buf(),
        };
        let license_file = match &self.content.license_file {
            Some(file) => base.join(file),
            None => source_dir.join("LICENSE"),
        };
        self.content_resolved = ContentConfig {
            source_dir,
            license_file,
        };
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Validation(
                "server.host cannot be empty".to_owned(),
            ));
        }
        if let Some(patterns) = &self.bots.patterns
            && patterns.iter().any(|p| p.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "bots.patterns entries cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Resolve the effective site domain: CLI beats env beats config file.
fn resolve_domain(
    cli: Option<String>,
    env: Option<String>,
    file: Option<String>,
) -> Option<String> {
    cli.or(env).or(file).filter(|d| !d.is_empty())
}
