use std::sync::Arc;

use crate::balance::BalanceSource;
use crate::network::NetworkSelector;

/// Shared, read-only application state handed to every request.
#[derive(Clone)]
pub struct AppState {
    balances: Arc<dyn BalanceSource>,
    network: NetworkSelector,
}

impl AppState {
    pub fn new(balances: Arc<dyn BalanceSource>, network: NetworkSelector) -> Self {
        Self { balances, network }
    }

    pub fn balances(&self) -> &dyn BalanceSource {
        self.balances.as_ref()
    }

    pub fn network(&self) -> NetworkSelector {
        self.network
    }
}
