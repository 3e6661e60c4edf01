//! Configuration management for radiation.
//!
//! Configuration is read from `~/.config/radiation/config.toml` (or the path
//! given with `--config`) at startup. Unlike most settings files there is no
//! usable default: the server URL and API token must come from the user, so
//! a missing or invalid file is fatal. `radiation init` writes a commented
//! template to fill in.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::render::RendererConfig;

pub const DEFAULT_ENTRIES_PER_PAGE: usize = 20;
pub const DEFAULT_LINES_PER_PAGE: usize = 40;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration struct.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// API token sent in the `X-Auth-Token` header.
    pub token: String,
    /// Base URL of the server, without the `/v1` suffix.
    pub server_url: String,
    #[serde(default = "default_entries_per_page")]
    pub entries_per_page: usize,
    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub renderer: RendererConfig,
}

fn default_entries_per_page() -> usize {
    DEFAULT_ENTRIES_PER_PAGE
}

fn default_lines_per_page() -> usize {
    DEFAULT_LINES_PER_PAGE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("server_url", &self.server_url)
            .field("entries_per_page", &self.entries_per_page)
            .field("lines_per_page", &self.lines_per_page)
            .field("timeout_secs", &self.timeout_secs)
            .field("renderer", &self.renderer)
            .finish()
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        let content = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::Missing {
                    path: config_path.clone(),
                }
            } else {
                ConfigError::Io {
                    path: config_path.clone(),
                    source: e,
                }
            }
        })?;

        Self::parse(&content, &config_path)
    }

    /// Parse and validate configuration text read from `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::Invalid("token must not be empty".into()));
        }

        let url = Url::parse(&self.server_url)
            .map_err(|e| ConfigError::Invalid(format!("server_url {}: {}", self.server_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "server_url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.entries_per_page == 0 {
            return Err(ConfigError::Invalid("entries_per_page must be at least 1".into()));
        }
        if self.lines_per_page == 0 {
            return Err(ConfigError::Invalid("lines_per_page must be at least 1".into()));
        }
        if self.renderer.wrap_width == 0 {
            return Err(ConfigError::Invalid("renderer.wrap_width must be at least 1".into()));
        }

        Ok(())
    }

    /// Server base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    /// Get the default config file path: `~/.config/radiation/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("radiation").join("config.toml"))
    }

    /// Write the commented template to `path`. Never overwrites.
    pub fn write_template(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::template_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn template_content() -> &'static str {
        r##"# radiation configuration

# API token, created under Settings > API Keys on the server.
token = "REPLACE-ME"

# Server base URL (without /v1).
server_url = "https://reader.example.com"

# Entries shown per list page.
entries_per_page = 20

# Article lines shown per page.
lines_per_page = 40

# HTTP request timeout in seconds.
timeout_secs = 30

[renderer]
# "lynx" pipes article HTML through `lynx -dump -nolist -stdin`,
# "builtin" converts it in-process.
kind = "lynx"
command = "lynx"

# Line width used by the builtin renderer.
wrap_width = 80
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("No config file at {path}; run `radiation init` to create one")]
    Missing { path: PathBuf },

    #[error("Config file already exists at {path}")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
