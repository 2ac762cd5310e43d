//! Node startup configuration
//!
//! Read from an optional TOML file and overridden by command-line flags.
//!
//! ```toml
//! log_filter = "labh_core=debug"
//!
//! [network]
//! testnet = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::chainparams::NetworkVariant;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("-testnet and -regtest are mutually exclusive; choose at most one")]
    ConflictingNetworkFlags,

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Network selection flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkFlags {
    pub testnet: bool,
    pub regtest: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub network: NetworkFlags,
    /// `tracing` filter directive; `LABH_LOG` / `RUST_LOG` take precedence
    pub log_filter: Option<String>,
}

impl NodeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// A flag set on the command line is added to the file's flags, never cleared
    pub fn merge_flags(&mut self, testnet: bool, regtest: bool) {
        self.network.testnet |= testnet;
        self.network.regtest |= regtest;
    }

    pub fn variant(&self) -> Result<NetworkVariant, ConfigError> {
        NetworkVariant::from_flags(self.network.testnet, self.network.regtest)
    }
}
