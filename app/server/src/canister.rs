//! Balance source backed by the Internet Computer Bitcoin API.
//!
//! Issues an update call of `bitcoin_get_balance` through `ic-agent` against
//! the Bitcoin canister of the selected network. The management canister's
//! Bitcoin methods only accept calls from other canisters, so an off-chain
//! agent talks to the Bitcoin canister directly.

use anyhow::{Context, Result};
use async_trait::async_trait;
use candid::{Decode, Encode, Principal};
use ic_agent::Agent;
use tracing::{debug, info};

use crate::balance::{BalanceQuery, BalanceSource, Satoshi};
use crate::error::{ConfigError, UpstreamError};
use crate::network::NetworkSelector;

pub const BITCOIN_MAINNET_CANISTER_ID: &str = "ghsi2-tqaaa-aaaan-aaaca-cai";
pub const BITCOIN_TESTNET_CANISTER_ID: &str = "g4xu7-jiaaa-aaaan-aaaaq-cai";
pub const GET_BALANCE_METHOD: &str = "bitcoin_get_balance";
pub const DEFAULT_IC_URL: &str = "https://icp-api.io";

pub struct CanisterBalanceSource {
    agent: Agent,
    canister_id: Principal,
}

impl CanisterBalanceSource {
    /// Build an agent for `url`. Local replicas need `fetch_root_key` so
    /// certificates can be verified against their throwaway root key.
    pub async fn new(url: &str, canister_id: Principal, fetch_root_key: bool) -> Result<Self> {
        info!(
            "CanisterBalanceSource using IC_URL={} canister={}",
            url, canister_id
        );

        let agent = Agent::builder()
            .with_url(url)
            .build()
            .with_context(|| format!("Failed to build IC agent for {}", url))?;

        if fetch_root_key {
            agent
                .fetch_root_key()
                .await
                .with_context(|| format!("Failed to fetch root key from {}", url))?;
        }

        Ok(Self { agent, canister_id })
    }

    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }
}

#[async_trait]
impl BalanceSource for CanisterBalanceSource {
    async fn get_balance(&self, query: &BalanceQuery) -> Result<Satoshi, UpstreamError> {
        let arg = encode_query(query)?;

        debug!(
            "Calling {}.{} for address={}",
            self.canister_id, GET_BALANCE_METHOD, query.address
        );

        let reply = self
            .agent
            .update(&self.canister_id, GET_BALANCE_METHOD)
            .with_arg(arg)
            .call_and_wait()
            .await?;

        decode_satoshi(&reply)
    }
}

fn encode_query(query: &BalanceQuery) -> Result<Vec<u8>, UpstreamError> {
    Ok(Encode!(query)?)
}

fn decode_satoshi(reply: &[u8]) -> Result<Satoshi, UpstreamError> {
    Ok(Decode!(reply, Satoshi)?)
}

/// Bitcoin canister serving `network`. A local dfx replica installs its
/// regtest Bitcoin canister under the testnet id.
pub fn bitcoin_canister_id(network: NetworkSelector) -> &'static str {
    match network {
        NetworkSelector::Mainnet => BITCOIN_MAINNET_CANISTER_ID,
        NetworkSelector::Testnet | NetworkSelector::Regtest => BITCOIN_TESTNET_CANISTER_ID,
    }
}

/// Parse a textual principal, e.g. `g4xu7-jiaaa-aaaan-aaaaq-cai`.
pub fn parse_canister_id(text: &str) -> Result<Principal, ConfigError> {
    Principal::from_text(text.trim()).map_err(|e| ConfigError::InvalidPrincipal {
        value: text.to_string(),
        reason: e.to_string(),
    })
}
