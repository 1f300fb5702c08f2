//! API credentials and endpoint configuration

use crate::client::NOTION_API_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable consulted for the integration token
pub const TOKEN_ENV_VAR: &str = "NOTION_TOKEN";

/// Configuration file consulted in the working directory
pub const CONFIG_FILE: &str = "pagesmith.toml";

/// Client configuration resolved from flags, environment, or pagesmith.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Integration token used as the bearer credential
    pub token: String,

    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    NOTION_API_URL.to_string()
}

impl ClientConfig {
    /// Create a configuration with the default base URL
    pub fn new(token: String) -> Self {
        Self {
            token,
            base_url: default_base_url(),
        }
    }

    /// Load configuration from a pagesmith.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ClientConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;

        let config: ClientConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        Ok(config)
    }

    /// Resolve configuration from the usual sources.
    ///
    /// Order: an explicit token (CLI flag), then the `NOTION_TOKEN`
    /// environment variable, then `pagesmith.toml` in the working
    /// directory. Having none of the three is an error.
    pub fn resolve(explicit_token: Option<String>) -> Result<Self, ConfigError> {
        if let Some(token) = explicit_token {
            return Ok(Self::new(token));
        }

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                return Ok(Self::new(token));
            }
        }

        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            return Self::load(path);
        }

        Err(ConfigError::MissingToken)
    }
}

/// Errors that can occur when resolving client configuration
#[derive(Debug)]
pub enum ConfigError {
    /// IO error when reading the configuration file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// No token found in any source
    MissingToken,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigError::MissingToken => write!(
                f,
                "no API token found: pass --token, set {}, or put token in {}",
                TOKEN_ENV_VAR, CONFIG_FILE
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
