//! Configuration management
//!
//! Everything is read from environment variables once at startup.
//! [`Config::from_lookup`] takes any variable source so tests can supply
//! their own.

use candid::Principal;
use std::env;
use std::path::PathBuf;

use crate::canister::{self, DEFAULT_IC_URL};
use crate::error::ConfigError;
use crate::network::NetworkSelector;
use crate::server::ServerConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3829;
pub const DEFAULT_STATIC_DIR: &str = "/dist";

/// How to reach the Bitcoin API canister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanisterConfig {
    pub url: String,
    /// Defaults to the Bitcoin canister of the configured network.
    pub canister_id: Principal,
    /// Only for local replicas; mainnet keys are built into the agent.
    pub fetch_root_key: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub network: NetworkSelector,
    pub canister: CanisterConfig,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("PORT") {
            Some(p) => p.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: "PORT",
                value: p.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let network = NetworkSelector::from_name(var("BTC_NETWORK").as_deref())?;

        let canister = CanisterConfig {
            url: var("IC_URL").unwrap_or_else(|| DEFAULT_IC_URL.to_string()),
            canister_id: canister::parse_canister_id(
                var("BITCOIN_API_CANISTER")
                    .as_deref()
                    .unwrap_or_else(|| canister::bitcoin_canister_id(network)),
            )?,
            fetch_root_key: var("IC_FETCH_ROOT_KEY").is_some_and(|v| is_truthy(&v)),
        };

        let static_dir = var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            server: ServerConfig::new(host, port),
            network,
            canister,
            static_dir,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
