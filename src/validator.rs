use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::balance::{BalanceLookup, LookupError};
use crate::models::{NewRecord, Outcome};
use crate::store::RecordStore;
use crate::utils::format::validate_eth_address;

/// Validates an address, fetches its balance and records the result.
///
/// Store and lookup handles are injected; nothing is read from process scope.
pub struct WalletValidator {
    store: Arc<dyn RecordStore>,
    lookup: Arc<dyn BalanceLookup>,
    lookup_timeout: Duration,
}

impl WalletValidator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        lookup: Arc<dyn BalanceLookup>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            store,
            lookup,
            lookup_timeout,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// validate → fetch → persist → respond.
    ///
    /// Returns `Err` only when the store fails; both caller-facing failures
    /// are `Ok` outcomes. At most one lookup and one write happen per call.
    #[tracing::instrument(skip(self))]
    pub async fn handle_validation_request(&self, identifier: &str, address: &str) -> Result<Outcome> {
        if let Err(e) = validate_eth_address(address) {
            info!(reason = %e, "❌ rejected address");
            return Ok(Outcome::InvalidAddressFormat);
        }

        let balance = match self.fetch_balance(address).await {
            Ok(balance) => balance,
            Err(e) => {
                warn!(error = %e, "⚠️ balance lookup failed");
                return Ok(Outcome::BalanceLookupFailed);
            }
        };

        let record = self
            .store
            .append(NewRecord {
                identifier: identifier.to_string(),
                address: address.to_string(),
                balance,
            })
            .await?;

        info!(record_id = record.id, balance, "✅ wallet recorded");
        Ok(Outcome::Success { balance })
    }

    async fn fetch_balance(&self, address: &str) -> Result<f64, LookupError> {
        match timeout(self.lookup_timeout, self.lookup.fetch_balance(address)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::TimedOut(self.lookup_timeout)),
        }
    }
}
