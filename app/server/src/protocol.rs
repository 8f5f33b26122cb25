use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::network::NetworkSelector;

pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const WELCOME_MESSAGE: &str = "Welcome to the Bitcoin Canister API";
pub const BTC_UNIT: &str = "BTC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRequest {
    pub address: String,
}

impl BalanceRequest {
    /// Extract the address from a JSON body. Anything other than a non-empty
    /// string under `address` is rejected.
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        match body.get("address").and_then(Value::as_str) {
            Some(address) if !address.is_empty() => Ok(Self {
                address: address.to_string(),
            }),
            _ => Err(ApiError::validation(ADDRESS_REQUIRED)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub address: String,
    pub balance: f64,
    pub balance_in_satoshi: u64,
    pub unit: &'static str,
    pub network: NetworkSelector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WelcomeMessage {
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utxo {
    pub txid: &'static str,
    pub vout: u32,
    pub value: u64,
    pub confirmations: u32,
}

#[derive(Debug, Serialize)]
pub struct P2pkhAddressResponse {
    pub address: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    /// `None` only when the field is absent; an explicit `null` is kept.
    #[serde(default, deserialize_with = "present")]
    pub destination_address: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub amount_in_satoshi: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    pub tx_id: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DummyTestResponse {
    pub status: &'static str,
    pub data: DummyTestData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DummyTestData {
    pub message: &'static str,
    pub timestamp: String,
    pub test_data: DummyTestRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DummyTestRecord {
    pub id: u32,
    pub name: &'static str,
    pub value: f64,
    pub is_test: bool,
}
