use crate::{
    observer::emit, ChainClient, ExecutionStrategy, NetworkReconciler, StatusObserver,
    WalletConnection,
};
use tracing::{debug, instrument};
use txflow_types::{
    Credential, EoaExecutionConfig, ExecutionError, ExecutionResult, ExecutionStatus,
    NetworkConfig, TransactionIntent,
};

/// Signs and broadcasts with the connected wallet.
///
/// The wallet is put on [`EoaStrategy::network`] before signing, and the
/// connected address is checked against the configured restriction both
/// before the switch and again immediately before signing.
#[derive(Debug, Clone)]
pub struct EoaStrategy<Chain> {
    chain_client: Chain,
    network: NetworkConfig,
}

impl<Chain> EoaStrategy<Chain> {
    /// Create a strategy for transactions on `network`.
    pub const fn new(chain_client: Chain, network: NetworkConfig) -> Self {
        Self { chain_client, network }
    }

    /// Get a reference to the chain client.
    pub const fn chain_client(&self) -> &Chain {
        &self.chain_client
    }

    /// The target network.
    pub const fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

impl<W, Chain> ExecutionStrategy<W> for EoaStrategy<Chain>
where
    W: WalletConnection + Sync,
    W::SigningClient: Send + Sync,
    Chain: ChainClient<W::SigningClient> + Sync,
{
    type Config = EoaExecutionConfig;

    #[instrument(skip_all, fields(network = %self.network.id, to = %intent.to()))]
    async fn execute<O>(
        &self,
        intent: &TransactionIntent,
        config: &EoaExecutionConfig,
        wallet: &W,
        observer: &O,
        _credential: Option<&Credential>,
    ) -> Result<ExecutionResult, ExecutionError>
    where
        O: StatusObserver + Sync + ?Sized,
    {
        config.validate()?;

        // Reject a wrong signer before prompting a network switch.
        let connected =
            wallet.status().connected_address().ok_or(ExecutionError::WalletNotConnected)?;
        config.check_address(connected)?;

        NetworkReconciler::new(wallet).reconcile(self.network.chain_id).await?;

        let signer = wallet.signing_client().await.ok_or(ExecutionError::WalletNotConnected)?;

        // The account may have changed during the switch.
        let connected =
            wallet.status().connected_address().ok_or(ExecutionError::WalletNotConnected)?;
        config.check_address(connected)?;

        emit(observer, ExecutionStatus::PendingSignature);

        let tx_hash = self
            .chain_client
            .sign_and_broadcast(intent, &signer)
            .await
            .map_err(ExecutionError::transaction_failed)?;

        debug!(%tx_hash, %connected, "transaction broadcast");
        Ok(tx_hash.into())
    }
}
