//! Bitcoin Canister API Library
//!
//! HTTP façade over the Internet Computer Bitcoin API. Balance lookups go to
//! a [`balance::BalanceSource`]; the remaining endpoints are placeholders.

pub mod balance;
pub mod canister;
pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod protocol;
pub mod routes;
pub mod server;
pub mod state;
