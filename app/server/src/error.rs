//! Error types for the Bitcoin Canister API server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::protocol::ErrorResponse;

/// Top-level message returned when the balance source fails.
pub const BALANCE_FAILURE_MESSAGE: &str = "Failed to get Bitcoin balance";

/// Detail used when an upstream failure carries no text of its own.
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error occurred";

/// Failure of the external balance lookup.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{0}")]
    Agent(#[from] ic_agent::AgentError),

    #[error("Candid error: {0}")]
    Candid(#[from] candid::Error),

}

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{}", BALANCE_FAILURE_MESSAGE)]
    Upstream(#[source] UpstreamError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Secondary detail for the response body, if this error carries one.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Validation { .. } => None,
            Self::Upstream(e) => Some(upstream_detail(e.to_string())),
        }
    }
}

fn upstream_detail(text: String) -> String {
    if text.trim().is_empty() {
        UNKNOWN_ERROR_DETAIL.to_string()
    } else {
        text
    }
}

impl From<UpstreamError> for ApiError {
    fn from(e: UpstreamError) -> Self {
        Self::Upstream(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            message: self.detail(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Invalid startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var} '{value}': expected a port number")]
    InvalidPort { var: &'static str, value: String },

    #[error("Unknown Bitcoin network '{0}' (expected mainnet, testnet or regtest)")]
    UnknownNetwork(String),

    #[error("Invalid canister principal '{value}': {reason}")]
    InvalidPrincipal { value: String, reason: String },
}
