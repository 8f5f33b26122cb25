use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

use btc_canister_api::balance::{BalanceQuery, BalanceSource, Satoshi};
use btc_canister_api::error::UpstreamError;
use btc_canister_api::network::NetworkSelector;
use btc_canister_api::routes::create_router;
use btc_canister_api::state::AppState;

/// Fixed ledger of address balances; unknown addresses are rejected.
struct Ledger {
    balances: HashMap<String, Satoshi>,
    calls: AtomicUsize,
}

impl Ledger {
    fn new(entries: &[(&str, Satoshi)]) -> Self {
        Self {
            balances: entries.iter().map(|(a, s)| (a.to_string(), *s)).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl BalanceSource for Ledger {
    async fn get_balance(&self, query: &BalanceQuery) -> Result<Satoshi, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.balances
            .get(&query.address)
            .copied()
            .ok_or_else(|| {
                UpstreamError::Candid(candid::Error::msg(format!(
                    "unknown address {}",
                    query.address
                )))
            })
    }
}

fn app(ledger: Arc<Ledger>, network: NetworkSelector) -> Router {
    create_router(AppState::new(ledger, network), "/nonexistent-static-dir")
}

async fn post_balance(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/get-balance")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[rstest]
#[case(0, 0.0)]
#[case(25_000_000, 0.25)]
#[case(150_000_000, 1.5)]
#[tokio::test]
async fn balance_matches_ledger(#[case] satoshi: Satoshi, #[case] btc: f64) {
    let ledger = Arc::new(Ledger::new(&[("tb1qfunded", satoshi)]));

    let (status, json) = post_balance(
        app(ledger, NetworkSelector::Testnet),
        json!({ "address": "tb1qfunded" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["balanceInSatoshi"], satoshi);
    assert_eq!(json["balance"].as_f64(), Some(btc));
    assert_eq!(json["unit"], "BTC");
}

#[rstest]
#[tokio::test]
async fn response_reports_configured_network() {
    let ledger = Arc::new(Ledger::new(&[("bc1qmain", 1)]));

    let (_, json) = post_balance(
        app(ledger, NetworkSelector::Mainnet),
        json!({ "address": "bc1qmain" }),
    )
    .await;

    assert_eq!(json["network"], json!({ "mainnet": null }));
}

#[rstest]
#[tokio::test]
async fn unknown_address_surfaces_as_server_error() {
    let ledger = Arc::new(Ledger::new(&[]));

    let (status, json) = post_balance(
        app(ledger.clone(), NetworkSelector::Testnet),
        json!({ "address": "tb1qmissing" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to get Bitcoin balance");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("unknown address tb1qmissing"));
    assert_eq!(ledger.calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn missing_address_skips_the_ledger() {
    let ledger = Arc::new(Ledger::new(&[("tb1qfunded", 10)]));

    let (status, json) = post_balance(
        app(ledger.clone(), NetworkSelector::Testnet),
        json!({ "addr": "tb1qfunded" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "Address is required" }));
    assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn address_is_echoed_without_normalization() {
    let address = " TB1QMixedCase ";
    let ledger = Arc::new(Ledger::new(&[(address, 42)]));

    let (status, json) = post_balance(
        app(ledger, NetworkSelector::Testnet),
        json!({ "address": address }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["address"], address);
}

#[rstest]
#[tokio::test]
async fn concurrent_requests_are_independent() {
    let ledger = Arc::new(Ledger::new(&[("tb1qa", 1_000), ("tb1qb", 2_000)]));
    let router = app(ledger.clone(), NetworkSelector::Testnet);

    let (a, b, missing) = tokio::join!(
        post_balance(router.clone(), json!({ "address": "tb1qa" })),
        post_balance(router.clone(), json!({ "address": "tb1qb" })),
        post_balance(router, json!({ "address": "tb1qc" })),
    );

    assert_eq!(a.1["balanceInSatoshi"], 1_000);
    assert_eq!(b.1["balanceInSatoshi"], 2_000);
    assert_eq!(missing.0, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ledger.calls.load(Ordering::SeqCst), 3);
}
