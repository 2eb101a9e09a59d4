//! A mock [`ChainClient`].
use crate::wallet::MockSigner;
use alloy::primitives::{TxHash, B256};
use std::sync::{Arc, Mutex};
use txflow_execution::ChainClient;
use txflow_types::TransactionIntent;

/// The hash [`MockChainClient`] returns unless told otherwise.
pub const MOCK_TX_HASH: TxHash = B256::repeat_byte(0x42);

/// Error returned by a failing [`MockChainClient`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct MockChainError(pub String);

/// A mock [`ChainClient`] that captures what it is asked to sign.
#[derive(Debug, Clone)]
pub struct MockChainClient {
    outcome: Result<TxHash, String>,
    signed: Arc<Mutex<Vec<(TransactionIntent, MockSigner)>>>,
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self::returning(MOCK_TX_HASH)
    }
}

impl MockChainClient {
    /// A client that returns [`MOCK_TX_HASH`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A client that returns `tx_hash`.
    pub fn returning(tx_hash: TxHash) -> Self {
        Self { outcome: Ok(tx_hash), signed: Default::default() }
    }

    /// A client that fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()), signed: Default::default() }
    }

    /// Every intent signed so far, with the signer used.
    pub fn signed(&self) -> Vec<(TransactionIntent, MockSigner)> {
        self.signed.lock().unwrap().clone()
    }
}

impl ChainClient<MockSigner> for MockChainClient {
    type Error = MockChainError;

    async fn sign_and_broadcast(
        &self,
        intent: &TransactionIntent,
        signer: &MockSigner,
    ) -> Result<TxHash, Self::Error> {
        self.signed.lock().unwrap().push((intent.clone(), *signer));
        self.outcome.clone().map_err(MockChainError)
    }
}
