use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the API router. Paths that match no route are served from
/// `static_dir`.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health))
        .route("/get-balance", post(handlers::get_balance))
        .route("/get-utxos", post(handlers::get_utxos))
        .route(
            "/get-current-fee-percentiles",
            post(handlers::get_current_fee_percentiles),
        )
        .route("/get-p2pkh-address", post(handlers::get_p2pkh_address))
        .route("/send", post(handlers::send))
        .route("/dummy-test", post(handlers::dummy_test))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
