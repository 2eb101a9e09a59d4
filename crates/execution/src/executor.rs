use crate::{
    discovery, AbiCallEncoder, CallEncoder, ChainClient, EoaStrategy, ExecutionStrategy,
    GatewayConnector, RelayerStrategy, StatusObserver, WalletConnection,
};
use tracing::{debug, instrument};
use txflow_types::{
    config::DiscoveryConfig, Credential, ExecutionConfig, ExecutionError, ExecutionMethod,
    ExecutionResult, RelayerRecord, TransactionIntent,
};
use url::Url;

/// Routes each intent to the strategy its [`ExecutionConfig`] selects.
///
/// Holds one strategy per supported method. Configuration is validated
/// before a strategy runs, so an unsupported method or malformed config
/// never reaches the wallet or a relayer.
#[derive(Debug, Clone)]
pub struct Executor<Chain, Connect, Encode = AbiCallEncoder> {
    eoa: EoaStrategy<Chain>,
    relayer: RelayerStrategy<Connect, Encode>,
}

impl<Chain, Connect, Encode> Executor<Chain, Connect, Encode> {
    /// Create an executor from its strategies.
    pub const fn new(eoa: EoaStrategy<Chain>, relayer: RelayerStrategy<Connect, Encode>) -> Self {
        Self { eoa, relayer }
    }

    /// Get a reference to the direct-signing strategy.
    pub const fn eoa(&self) -> &EoaStrategy<Chain> {
        &self.eoa
    }

    /// Get a reference to the relayer strategy.
    pub const fn relayer(&self) -> &RelayerStrategy<Connect, Encode> {
        &self.relayer
    }

    /// Execute `intent` with the strategy `config` selects.
    #[instrument(skip_all, fields(method = %config.method()))]
    pub async fn execute<W, O>(
        &self,
        intent: &TransactionIntent,
        config: &ExecutionConfig,
        wallet: &W,
        observer: &O,
        credential: Option<&Credential>,
    ) -> Result<ExecutionResult, ExecutionError>
    where
        W: WalletConnection + Sync,
        W::SigningClient: Send + Sync,
        O: StatusObserver + Sync + ?Sized,
        Chain: ChainClient<W::SigningClient> + Sync,
        Connect: GatewayConnector + Sync,
        Connect::Gateway: Send + Sync,
        Encode: CallEncoder + Clone + Send + Sync,
    {
        config.validate()?;
        debug!(function = intent.function_name(), "dispatching execution");

        match config {
            ExecutionConfig::Eoa(eoa) => {
                self.eoa.execute(intent, eoa, wallet, observer, credential).await
            }
            ExecutionConfig::Relayer(relayer) => {
                self.relayer.execute(intent, relayer, wallet, observer, credential).await
            }
            ExecutionConfig::Multisig => {
                Err(ExecutionError::UnsupportedExecutionMethod(ExecutionMethod::Multisig))
            }
        }
    }

    /// List the relayers at `service_url` that can serve this executor's
    /// network.
    pub async fn list_compatible_relayers(
        &self,
        service_url: &Url,
        credential: &Credential,
        config: DiscoveryConfig,
    ) -> Result<Vec<RelayerRecord>, ExecutionError>
    where
        Connect: GatewayConnector,
        Connect::Gateway: Sync,
    {
        discovery::list_compatible_relayers(
            self.relayer.connector(),
            service_url,
            credential,
            self.eoa.network(),
            config,
        )
        .await
    }
}
