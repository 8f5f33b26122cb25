//! HTTP handlers
//!
//! Only `get_balance` talks to anything external. The other endpoints are
//! placeholders that answer with fixed data.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::balance;
use crate::error::ApiError;
use crate::protocol::{
    BalanceResponse, DummyTestData, DummyTestRecord, DummyTestResponse, P2pkhAddressResponse,
    SendRequest, SendResponse, Utxo, WelcomeMessage, WELCOME_MESSAGE,
};
use crate::state::AppState;

pub const DUMMY_P2PKH_ADDRESS: &str = "tb1qdummyaddressxyz1234567890";
pub const DUMMY_SEND_TXID: &str = "dummy-txid-sent-1234567890";

const DUMMY_UTXOS: [Utxo; 2] = [
    Utxo {
        txid: "dummy-txid-1",
        vout: 0,
        value: 25_000,
        confirmations: 5,
    },
    Utxo {
        txid: "dummy-txid-2",
        vout: 1,
        value: 50_000,
        confirmations: 3,
    },
];

pub async fn welcome() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: WELCOME_MESSAGE,
    })
}

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// POST /get-balance
///
/// A body axum cannot read as JSON is treated like one without an address.
pub async fn get_balance(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let body = match body {
        Ok(Json(v)) => v,
        Err(rejection) => {
            debug!("Unreadable get-balance body: {}", rejection);
            Value::Null
        }
    };

    let response = balance::handle_get_balance(state.balances(), state.network(), &body).await?;
    Ok(Json(response))
}

/// POST /get-utxos (placeholder)
pub async fn get_utxos() -> Json<Vec<Utxo>> {
    Json(DUMMY_UTXOS.to_vec())
}

/// POST /get-current-fee-percentiles (placeholder), millisatoshi/byte.
pub async fn get_current_fee_percentiles() -> Json<Vec<u64>> {
    Json((100..200).collect())
}

/// POST /get-p2pkh-address (placeholder)
pub async fn get_p2pkh_address(State(state): State<AppState>) -> Json<P2pkhAddressResponse> {
    debug!(
        "P2PKH address requested: network={} key_name={}",
        state.network(),
        state.network().key_name()
    );
    Json(P2pkhAddressResponse {
        address: DUMMY_P2PKH_ADDRESS,
    })
}

/// POST /send (placeholder). Echoes the request, nothing is broadcast.
pub async fn send(body: Result<Json<SendRequest>, JsonRejection>) -> Json<SendResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    info!(
        "Dummy send: destination={:?} amount={:?}",
        request.destination_address, request.amount_in_satoshi
    );

    Json(SendResponse {
        success: true,
        destination: request.destination_address,
        amount: request.amount_in_satoshi,
        tx_id: DUMMY_SEND_TXID,
    })
}

/// POST /dummy-test
pub async fn dummy_test() -> Json<DummyTestResponse> {
    Json(DummyTestResponse {
        status: "success",
        data: DummyTestData {
            message: "This is a dummy response",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            test_data: DummyTestRecord {
                id: 1,
                name: "Test Bitcoin Data",
                value: 0.001,
                is_test: true,
            },
        },
    })
}
