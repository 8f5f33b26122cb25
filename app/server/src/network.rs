//! Bitcoin network selection
//!
//! The selector travels in two encodings: as a Candid variant in calls to the
//! Bitcoin API canister, and as a single-key JSON object (`{"testnet":null}`)
//! in HTTP responses.

use candid::{CandidType, Deserialize};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(CandidType, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkSelector {
    #[serde(rename = "mainnet")]
    Mainnet,
    #[default]
    #[serde(rename = "testnet")]
    Testnet,
    #[serde(rename = "regtest")]
    Regtest,
}

impl NetworkSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Regtest => "regtest",
        }
    }

    /// Resolve a configured network name. `None` selects the default (testnet).
    pub fn from_name(name: Option<&str>) -> Result<Self, ConfigError> {
        match name {
            None => Ok(Self::default()),
            Some(name) => name.parse(),
        }
    }

    /// Threshold ECDSA key name the platform exposes on this network.
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::Mainnet => "key_1",
            Self::Testnet => "test_key_1",
            Self::Regtest => "dfx_test_key",
        }
    }
}

impl FromStr for NetworkSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "regtest" => Ok(Self::Regtest),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for NetworkSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NetworkSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.as_str(), &())?;
        map.end()
    }
}
