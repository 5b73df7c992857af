//! Configuration management for the bncnode client

use bncnode_types::{MAINNET_HRP, TESTNET_HRP};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Name of the configuration file inside the home directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("io error:: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("toml parsing error:: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("toml serialization error:: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("invalid value for {key}:: {value}")]
    InvalidValue { key: String, value: String },

    #[error("unknown configuration key:: {0}")]
    UnknownKey(String),
}

/// Chain network, selecting the address prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Human-readable address prefix
    pub fn hrp(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_HRP,
            Network::Testnet => TESTNET_HRP,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(format!("unknown network {other}")),
        }
    }
}

/// Command output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format {other}")),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Node RPC endpoint
    pub node: String,
    /// Network, selects the address prefix
    pub network: Network,
    /// Default denom for balance queries
    pub denom: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Output format (json, text)
    pub output: OutputFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node: "http://localhost:27147".to_string(),
            network: Network::Mainnet,
            denom: "BNB".to_string(),
            timeout: 30,
            output: OutputFormat::Text,
        }
    }
}

impl ClientConfig {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get default configuration directory
    pub fn default_config_dir() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".bncnode")
        } else {
            PathBuf::from(".bncnode")
        }
    }

    /// Configuration file inside `home`, or inside the default directory
    pub fn config_file(home: Option<&Path>) -> PathBuf {
        match home {
            Some(home) => home.join(CONFIG_FILE_NAME),
            None => Self::default_config_dir().join(CONFIG_FILE_NAME),
        }
    }

    /// Load the configuration file if it exists, defaults otherwise
    pub fn load_or_default(home: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = Self::config_file(home);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize configuration directory and file.
    ///
    /// An existing file is loaded and returned untouched unless `overwrite`.
    pub fn init(home: Option<&Path>, overwrite: bool) -> Result<Self, ConfigError> {
        let config_file = Self::config_file(home);

        if let Some(config_dir) = config_file.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
            }
        }

        if config_file.exists() && !overwrite {
            return Self::load_from_file(config_file);
        }

        let config = Self::default();
        config.save_to_file(config_file)?;
        Ok(config)
    }

    /// Set a configuration value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "node" => {
                Url::parse(value).map_err(|_| invalid())?;
                self.node = value.to_string();
            }
            "network" => self.network = value.parse().map_err(|_| invalid())?,
            "denom" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.denom = value.to_string();
            }
            "timeout" => {
                let timeout: u64 = value.parse().map_err(|_| invalid())?;
                if timeout == 0 {
                    return Err(invalid());
                }
                self.timeout = timeout;
            }
            "output" => self.output = value.parse().map_err(|_| invalid())?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
