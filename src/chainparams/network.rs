//! LABH network variants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::config::ConfigError;
use super::ParamsError;

/// Network variant enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkVariant {
    /// Production network
    Main,
    /// Public test network
    Testnet,
    /// Local regression-test network
    Regtest,
}

impl NetworkVariant {
    pub const ALL: [NetworkVariant; 3] = [Self::Main, Self::Testnet, Self::Regtest];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Testnet => "test",
            Self::Regtest => "regtest",
        }
    }

    /// Sub-directory of the data directory this variant stores its chain in
    pub const fn data_dir(&self) -> &'static str {
        match self {
            Self::Main => "",
            Self::Testnet => "testnet",
            Self::Regtest => "regtest",
        }
    }

    pub const fn is_test_network(&self) -> bool {
        !matches!(self, Self::Main)
    }

    /// Resolve the two mutually exclusive startup flags.
    ///
    /// Regtest takes precedence over Testnet; neither flag means Main.
    pub fn from_flags(is_testnet: bool, is_regtest: bool) -> Result<Self, ConfigError> {
        match (is_testnet, is_regtest) {
            (true, true) => Err(ConfigError::ConflictingNetworkFlags),
            (_, true) => Ok(Self::Regtest),
            (true, false) => Ok(Self::Testnet),
            (false, false) => Ok(Self::Main),
        }
    }
}

impl fmt::Display for NetworkVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkVariant {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Self::Main),
            "test" | "testnet" => Ok(Self::Testnet),
            "regtest" => Ok(Self::Regtest),
            other => Err(ParamsError::InvalidNetwork(other.to_string())),
        }
    }
}

impl TryFrom<u32> for NetworkVariant {
    type Error = ParamsError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Main),
            1 => Ok(Self::Testnet),
            2 => Ok(Self::Regtest),
            other => Err(ParamsError::UnknownVariant(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_precedence() {
        assert_eq!(NetworkVariant::from_flags(false, false).unwrap(), NetworkVariant::Main);
        assert_eq!(NetworkVariant::from_flags(true, false).unwrap(), NetworkVariant::Testnet);
        assert_eq!(NetworkVariant::from_flags(false, true).unwrap(), NetworkVariant::Regtest);
        assert!(matches!(
            NetworkVariant::from_flags(true, true),
            Err(ConfigError::ConflictingNetworkFlags)
        ));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("testnet".parse::<NetworkVariant>().unwrap(), NetworkVariant::Testnet);
        assert_eq!("MAIN".parse::<NetworkVariant>().unwrap(), NetworkVariant::Main);
        assert!("signet".parse::<NetworkVariant>().is_err());
        for variant in NetworkVariant::ALL {
            assert_eq!(variant.to_string().parse::<NetworkVariant>().unwrap(), variant);
        }
    }

    #[test]
    fn test_unknown_numeric_id() {
        assert_eq!(NetworkVariant::try_from(2).unwrap(), NetworkVariant::Regtest);
        assert!(matches!(
            NetworkVariant::try_from(3),
            Err(ParamsError::UnknownVariant(3))
        ));
    }

    #[test]
    fn test_data_dirs() {
        assert_eq!(NetworkVariant::Main.data_dir(), "");
        assert_eq!(NetworkVariant::Testnet.data_dir(), "testnet");
        assert_eq!(NetworkVariant::Regtest.data_dir(), "regtest");
        assert!(!NetworkVariant::Main.is_test_network());
        assert!(NetworkVariant::Regtest.is_test_network());
    }
}
