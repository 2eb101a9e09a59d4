use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

/// Progress checkpoints reported while a transaction executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
#[non_exhaustive]
pub enum ExecutionStatus {
    /// Waiting on the wallet to sign.
    PendingSignature,
    /// The relayer accepted the transaction and is processing it.
    #[serde(rename_all = "camelCase")]
    PendingRelayer {
        /// The relayer's transaction id.
        transaction_id: String,
    },
}

/// The outcome of a successful execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// The broadcast transaction hash.
    pub tx_hash: TxHash,
}

impl From<TxHash> for ExecutionResult {
    fn from(tx_hash: TxHash) -> Self {
        Self { tx_hash }
    }
}
