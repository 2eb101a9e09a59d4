use crate::{
    observer::emit, AbiCallEncoder, CallEncoder, ExecutionStrategy, GatewayConnector,
    RelayerSubmissionPipeline, StatusObserver, WalletConnection,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use txflow_types::{
    config::PollConfig, Credential, ExecutionError, ExecutionResult, ExecutionStatus,
    RelayerExecutionConfig, TransactionIntent,
};

/// Delegates signing and broadcast to a relayer service.
///
/// The wallet is not consulted. A gateway is opened per execution with the
/// configured service URL and the caller's credential.
#[derive(Debug, Clone)]
pub struct RelayerStrategy<Connect, Encode = AbiCallEncoder> {
    connector: Connect,
    encoder: Encode,
    poll: PollConfig,
    cancel: CancellationToken,
}

impl<Connect> RelayerStrategy<Connect> {
    /// Create a strategy that ABI-encodes intents.
    pub fn new(connector: Connect) -> Self {
        Self::new_with_encoder(connector, AbiCallEncoder)
    }
}

impl<Connect, Encode> RelayerStrategy<Connect, Encode> {
    /// Create a strategy with the given encoder and default polling.
    pub fn new_with_encoder(connector: Connect, encoder: Encode) -> Self {
        Self { connector, encoder, poll: PollConfig::default(), cancel: CancellationToken::new() }
    }

    /// Set the poll timing.
    pub const fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Stop waiting on relayed transactions when `cancel` is cancelled.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Get a reference to the connector.
    pub const fn connector(&self) -> &Connect {
        &self.connector
    }
}

impl<W, Connect, Encode> ExecutionStrategy<W> for RelayerStrategy<Connect, Encode>
where
    W: WalletConnection + Sync,
    Connect: GatewayConnector + Sync,
    Connect::Gateway: Send + Sync,
    Encode: CallEncoder + Clone + Send + Sync,
{
    type Config = RelayerExecutionConfig;

    #[instrument(skip_all, fields(relayer_id = %config.relayer_id, to = %intent.to()))]
    async fn execute<O>(
        &self,
        intent: &TransactionIntent,
        config: &RelayerExecutionConfig,
        _wallet: &W,
        observer: &O,
        credential: Option<&Credential>,
    ) -> Result<ExecutionResult, ExecutionError>
    where
        O: StatusObserver + Sync + ?Sized,
    {
        let credential = credential
            .filter(|credential| !credential.is_empty())
            .ok_or(ExecutionError::MissingCredential)?;
        config.validate()?;

        let gateway = self.connector.connect(&config.service_url, credential);
        let pipeline = RelayerSubmissionPipeline::new_with_encoder(gateway, self.encoder.clone())
            .with_poll_config(self.poll)
            .with_cancellation(self.cancel.clone());

        let transaction_id = pipeline.submit(intent, config).await?;
        emit(observer, ExecutionStatus::PendingRelayer { transaction_id: transaction_id.clone() });

        let tx_hash = pipeline.await_hash(&config.relayer_id, &transaction_id).await?;
        debug!(%tx_hash, %transaction_id, "relayed transaction landed");
        Ok(tx_hash.into())
    }
}
