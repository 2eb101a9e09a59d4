use crate::{AbiCallEncoder, CallEncoder, ChainClient};
use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::TxHash,
    providers::Provider,
    rpc::types::TransactionRequest,
    transports::TransportError,
};
use tracing::{debug, instrument};
use txflow_types::{BoxError, TransactionIntent};

/// Errors returned by [`AlloyChainClient`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AlloyChainError {
    /// The intent could not be encoded.
    #[error("failed to encode call: {0}")]
    Encoding(#[source] BoxError),
    /// The provider failed to sign or broadcast.
    #[error(transparent)]
    Rpc(#[from] TransportError),
}

/// A [`ChainClient`] for wallet-backed alloy providers.
///
/// The signing client is any [`Provider`] whose fillers sign with the
/// connected account (e.g. one built with `ProviderBuilder::wallet`). Gas,
/// nonce and fees are left to the provider's fillers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyChainClient<Encode = AbiCallEncoder> {
    encoder: Encode,
}

impl<Encode> AlloyChainClient<Encode> {
    /// Create a client with the given encoder.
    pub const fn new(encoder: Encode) -> Self {
        Self { encoder }
    }

    /// Get a reference to the encoder.
    pub const fn encoder(&self) -> &Encode {
        &self.encoder
    }
}

impl<Encode: CallEncoder> AlloyChainClient<Encode> {
    /// Build the transaction request for `intent`.
    pub fn transaction_request(
        &self,
        intent: &TransactionIntent,
    ) -> Result<TransactionRequest, AlloyChainError> {
        let data = self
            .encoder
            .encode_call(intent)
            .map_err(|error| AlloyChainError::Encoding(Box::new(error)))?;

        let mut tx = TransactionRequest::default().with_to(intent.to()).with_input(data);
        if let Some(value) = intent.value() {
            tx = tx.with_value(value);
        }
        Ok(tx)
    }
}

impl<Encode, P> ChainClient<P> for AlloyChainClient<Encode>
where
    Encode: CallEncoder + Sync,
    P: Provider<Ethereum> + Sync,
{
    type Error = AlloyChainError;

    #[instrument(skip_all, fields(to = %intent.to(), function = intent.function_name()))]
    async fn sign_and_broadcast(
        &self,
        intent: &TransactionIntent,
        provider: &P,
    ) -> Result<TxHash, Self::Error> {
        let tx = self.transaction_request(intent)?;
        let pending = provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(%tx_hash, "broadcast transaction");
        Ok(tx_hash)
    }
}
