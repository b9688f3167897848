// Registry configuration from environment, .env and TOML sources

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Prefix for all environment variables read by [`RegistryConfig::from_env`].
pub const ENV_PREFIX: &str = "GRAFT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Settings for a [`Registry`](crate::Registry).
///
/// ```
/// use graft_core::RegistryConfig;
///
/// let config = RegistryConfig::from_toml_str(r#"
///     name = "billing"
///     warn_on_override = false
/// "#).unwrap();
///
/// assert_eq!(config.name, "billing");
/// assert!(!config.warn_on_override);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Label attached to every log event from this registry.
    pub name: String,
    /// Log at warn level when a registration replaces an existing builder.
    pub warn_on_override: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            warn_on_override: true,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_warn_on_override(mut self, enable: bool) -> Self {
        self.warn_on_override = enable;
        self
    }

    /// Read `GRAFT_REGISTRY_NAME` and `GRAFT_WARN_ON_OVERRIDE`.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Load a `.env` file (the nearest one when `path` is `None`), then read
    /// the environment.
    pub fn load_dotenv(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok();
        }
        Self::from_env()
    }

    /// Build from explicit `(name, value)` pairs. Unrelated names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        let prefix = format!("{}_", ENV_PREFIX);

        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(&prefix) else {
                continue;
            };
            let value = value.as_ref();
            match name {
                "REGISTRY_NAME" => config.name = value.to_string(),
                "WARN_ON_OVERRIDE" => {
                    config.warn_on_override = parse_bool(value).ok_or_else(|| {
                        ConfigError::InvalidValue {
                            key: key.as_ref().to_string(),
                            value: value.to_string(),
                        }
                    })?
                }
                _ => {}
            }
        }

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
