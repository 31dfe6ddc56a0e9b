//! Configuration management for mdview.
//!
//! Parses `mdview.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `document.base`
//! - `server.host`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdview.toml";

/// Document rendered when none is configured.
pub const DEFAULT_DOCUMENT_PATH: &str = "functional-programming.md";

/// Highlight theme used when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override document origin.
    pub base: Option<String>,
    /// Override document path.
    pub path: Option<String>,
    /// Override HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override highlight theme.
    pub theme: Option<String>,
    /// Override highlighting flag.
    pub highlight: Option<bool>,
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which document to show.
    pub document: DocumentConfig,
    /// HTTP client settings.
    pub http: HttpConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Server configuration.
    pub server: ServerConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Document location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Origin the path is resolved against (empty for a local file or an
    /// absolute URL path).
    pub base: String,
    /// Document path or URL.
    pub path: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            base: String::new(),
            path: DEFAULT_DOCUMENT_PATH.to_owned(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Syntax highlighting theme.
    pub theme: String,
    /// Whether fenced code blocks are highlighted.
    pub highlight: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            highlight: true,
        }
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
            port: 7878,
        }
    }
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`document.base`").
        field: String,
        /// Error message (e.g., "${`DOCS_ORIGIN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use a scheme the loader can fetch.
fn require_document_url(url: &str, field: &str) -> Result<(), ConfigError> {
    let has_scheme = ["http://", "https://", "file://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    if !has_scheme {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http://, https:// or file://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdview.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base) = &settings.base {
            self.document.base.clone_from(base);
        }
        if let Some(path) = &settings.path {
            self.document.path.clone_from(path);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
        if let Some(theme) = &settings.theme {
            self.render.theme.clone_from(theme);
        }
        if let Some(highlight) = settings.highlight {
            self.render.highlight = highlight;
        }
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
    }

    /// Directory containing the loaded config file.
    ///
    /// Relative local document paths are resolved against it.
    #[must_use]
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_path.as_deref().and_then(Path::parent)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_document()?;
        self.validate_http()?;
        self.validate_render()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_document(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.document.path, "document.path")?;
        if !self.document.base.is_empty() {
            require_document_url(&self.document.base, "document.base")?;
        }
        Ok(())
    }

    fn validate_http(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.theme, "render.theme")
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 asks the OS for a random port, which is never what a config file means
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.document.base = expand::expand_env(&self.document.base, "document.base")?;
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        Ok(())
    }
}
