use crate::WalletConnection;
use tracing::{debug, instrument, warn};
use txflow_types::{ExecutionError, WalletConnectionStatus};

/// Ensures the wallet is on a transaction's network before anything is
/// signed.
///
/// A switch request that the wallet accepts but does not apply leaves the
/// session inconsistent. In that case the wallet is disconnected, which is
/// the only compensating action taken.
#[derive(Debug, Clone, Copy)]
pub struct NetworkReconciler<'a, W> {
    wallet: &'a W,
}

impl<'a, W> NetworkReconciler<'a, W> {
    /// Create a reconciler for `wallet`.
    pub const fn new(wallet: &'a W) -> Self {
        Self { wallet }
    }

    /// Get a reference to the wallet.
    pub const fn wallet(&self) -> &'a W {
        self.wallet
    }
}

impl<W> NetworkReconciler<'_, W>
where
    W: WalletConnection + Sync,
{
    /// Put the wallet on `chain_id`, returning the refreshed status.
    ///
    /// Performs no switch when the wallet is already there.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, chain_id: u64) -> Result<WalletConnectionStatus, ExecutionError> {
        let status = self.wallet.status();
        let current = status.connected_chain().ok_or(ExecutionError::WalletNotConnected)?;

        if current == chain_id {
            return Ok(status);
        }

        debug!(current, "requesting network switch");
        if let Err(error) = self.wallet.switch_network(chain_id).await {
            // Nothing changed, so nothing to compensate.
            return Err(ExecutionError::NetworkSwitchFailed { chain_id, source: Box::new(error) });
        }

        let refreshed = self.wallet.status();
        if refreshed.connected_chain() == Some(chain_id) {
            debug!("network switch confirmed");
            return Ok(refreshed);
        }

        warn!(
            reported = ?refreshed.chain_id,
            "wallet accepted the network switch but did not apply it; disconnecting"
        );
        if let Err(error) = self.wallet.disconnect().await {
            warn!(%error, "failed to disconnect wallet after unconfirmed network switch");
        }

        Err(ExecutionError::NetworkSwitchUnconfirmed {
            expected: chain_id,
            actual: refreshed.chain_id,
        })
    }
}
