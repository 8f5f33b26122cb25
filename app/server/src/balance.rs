//! Balance lookup
//!
//! Validates the request, asks the configured [`BalanceSource`] for the
//! satoshi balance of one address and converts it to BTC.

use async_trait::async_trait;
use candid::CandidType;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{ApiError, UpstreamError};
use crate::network::NetworkSelector;
use crate::protocol::{BalanceRequest, BalanceResponse, BTC_UNIT};

pub type Satoshi = u64;

pub const SATOSHI_PER_BTC: f64 = 100_000_000.0;

/// Arguments of the platform's `bitcoin_get_balance` call.
#[derive(CandidType, Debug, Clone, PartialEq, Eq)]
pub struct BalanceQuery {
    pub address: String,
    pub network: NetworkSelector,
    /// `None` leaves the minimum to the balance source's default.
    pub min_confirmations: Option<u32>,
}

impl BalanceQuery {
    pub fn new(address: impl Into<String>, network: NetworkSelector) -> Self {
        Self {
            address: address.into(),
            network,
            min_confirmations: None,
        }
    }
}

/// A remote capability answering "how many satoshi does this address hold".
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn get_balance(&self, query: &BalanceQuery) -> Result<Satoshi, UpstreamError>;
}

pub fn satoshi_to_btc(satoshi: Satoshi) -> f64 {
    satoshi as f64 / SATOSHI_PER_BTC
}

/// Handle one balance request body.
///
/// A body without a usable `address` fails before the source is contacted.
/// Source failures are logged here and returned as [`ApiError::Upstream`].
pub async fn handle_get_balance(
    source: &dyn BalanceSource,
    network: NetworkSelector,
    body: &Value,
) -> Result<BalanceResponse, ApiError> {
    let request = BalanceRequest::from_json(body)?;
    let query = BalanceQuery::new(request.address.clone(), network);

    let satoshi = match source.get_balance(&query).await {
        Ok(v) => v,
        Err(e) => {
            error!(
                "Error getting Bitcoin balance: address={} network={} err={}",
                request.address, network, e
            );
            return Err(ApiError::Upstream(e));
        }
    };

    info!(
        "Balance lookup OK: address={} network={} satoshi={}",
        request.address, network, satoshi
    );

    Ok(BalanceResponse {
        address: request.address,
        balance: satoshi_to_btc(satoshi),
        balance_in_satoshi: satoshi,
        unit: BTC_UNIT,
        network,
    })
}
