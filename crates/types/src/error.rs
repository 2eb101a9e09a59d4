use crate::{ExecutionMethod, RelayerTransactionStatus};
use alloy::primitives::Address;
use core::fmt;

/// A boxed error from a collaborator (wallet, chain client, encoder).
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// How a connected address failed the direct-execution restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionViolation {
    /// Restricted execution was configured without an address.
    MissingAddress,
    /// The connected address is not the configured one.
    Mismatch {
        /// The configured address.
        expected: Address,
        /// The address the wallet is connected with.
        connected: Address,
    },
}

impl fmt::Display for RestrictionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAddress => f.write_str("no execution address configured"),
            Self::Mismatch { expected, connected } => {
                write!(f, "connected wallet {connected} is not the required address {expected}")
            }
        }
    }
}

/// Errors returned by every execution path.
///
/// Each variant is a stable kind (see [`ExecutionError::kind`]). Server
/// and collaborator messages are carried through unchanged.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExecutionError {
    /// No wallet is connected, or it reports no network.
    #[error("wallet is not connected")]
    WalletNotConnected,
    /// The connected address fails the direct-execution restriction.
    #[error("invalid execution address: {0}")]
    InvalidEoaRestriction(RestrictionViolation),
    /// The relayer configuration cannot be used.
    #[error("invalid relayer configuration: {0}")]
    InvalidRelayerConfig(String),
    /// The wallet rejected the network switch request.
    #[error("failed to switch wallet to chain {chain_id}: {source}")]
    NetworkSwitchFailed {
        /// The requested chain.
        chain_id: u64,
        /// The wallet's error.
        #[source]
        source: BoxError,
    },
    /// The wallet accepted the switch but still reports another network. The
    /// wallet has been disconnected.
    #[error(
        "wallet did not switch to chain {expected} (still on {actual:?}); the wallet was disconnected"
    )]
    NetworkSwitchUnconfirmed {
        /// The requested chain.
        expected: u64,
        /// The chain reported after the switch.
        actual: Option<u64>,
    },
    /// Relayer execution requires a session credential.
    #[error("relayer execution requires an API credential")]
    MissingCredential,
    /// The intent could not be encoded into call data.
    #[error("failed to encode call: {0}")]
    EncodingFailed(#[source] BoxError),
    /// The relayer did not accept the transaction.
    #[error("relayer rejected the transaction: {0}")]
    RelayerSubmissionFailed(String),
    /// A status lookup failed outright.
    #[error("failed to get status of relayer transaction {transaction_id}: {message}")]
    RelayerStatusFailed {
        /// The relayer's transaction id.
        transaction_id: String,
        /// The server or transport message.
        message: String,
    },
    /// The relayer reported success but no transaction hash.
    #[error("relayer transaction {transaction_id} is {status} but has no hash")]
    RelayerConfirmedWithoutHash {
        /// The relayer's transaction id.
        transaction_id: String,
        /// The reported status.
        status: RelayerTransactionStatus,
    },
    /// The relayer reported a terminal failure.
    #[error("relayer transaction {transaction_id} {status}: {reason}")]
    RelayerTransactionFailed {
        /// The relayer's transaction id.
        transaction_id: String,
        /// The reported status.
        status: RelayerTransactionStatus,
        /// The reported reason, or a generic message.
        reason: String,
    },
    /// The transaction did not reach a terminal status in time.
    #[error(
        "timed out waiting for relayer transaction {0}; look it up with the relayer service"
    )]
    PollingTimeout(String),
    /// Waiting for the transaction was cancelled by the caller.
    #[error("stopped waiting for relayer transaction {0}; it may still be processed")]
    Cancelled(String),
    /// A relayer listing page could not be fetched.
    #[error("failed to list relayers (page {page}): {message}")]
    RelayerDiscoveryFailed {
        /// The 1-based page index, or 0 for a single relayer lookup.
        page: u32,
        /// The server or transport message.
        message: String,
    },
    /// The chain client failed to sign or broadcast.
    #[error("transaction failed: {0}")]
    TransactionFailed(#[source] BoxError),
    /// No strategy exists for the configured method.
    #[error("execution method {0} is not supported")]
    UnsupportedExecutionMethod(ExecutionMethod),
}

/// The kind of an [`ExecutionError`], for branching without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ExecutionErrorKind {
    /// See [`ExecutionError::WalletNotConnected`].
    WalletNotConnected,
    /// See [`ExecutionError::InvalidEoaRestriction`].
    InvalidEoaRestriction,
    /// See [`ExecutionError::InvalidRelayerConfig`].
    InvalidRelayerConfig,
    /// See [`ExecutionError::NetworkSwitchFailed`].
    NetworkSwitchFailed,
    /// See [`ExecutionError::NetworkSwitchUnconfirmed`].
    NetworkSwitchUnconfirmed,
    /// See [`ExecutionError::MissingCredential`].
    MissingCredential,
    /// See [`ExecutionError::EncodingFailed`].
    EncodingFailed,
    /// See [`ExecutionError::RelayerSubmissionFailed`].
    RelayerSubmissionFailed,
    /// See [`ExecutionError::RelayerStatusFailed`].
    RelayerStatusFailed,
    /// See [`ExecutionError::RelayerConfirmedWithoutHash`].
    RelayerConfirmedWithoutHash,
    /// See [`ExecutionError::RelayerTransactionFailed`].
    RelayerTransactionFailed,
    /// See [`ExecutionError::PollingTimeout`].
    PollingTimeout,
    /// See [`ExecutionError::Cancelled`].
    Cancelled,
    /// See [`ExecutionError::RelayerDiscoveryFailed`].
    RelayerDiscoveryFailed,
    /// See [`ExecutionError::TransactionFailed`].
    TransactionFailed,
    /// See [`ExecutionError::UnsupportedExecutionMethod`].
    UnsupportedExecutionMethod,
}

impl ExecutionError {
    /// The error's kind.
    pub const fn kind(&self) -> ExecutionErrorKind {
        match self {
            Self::WalletNotConnected => ExecutionErrorKind::WalletNotConnected,
            Self::InvalidEoaRestriction(_) => ExecutionErrorKind::InvalidEoaRestriction,
            Self::InvalidRelayerConfig(_) => ExecutionErrorKind::InvalidRelayerConfig,
            Self::NetworkSwitchFailed { .. } => ExecutionErrorKind::NetworkSwitchFailed,
            Self::NetworkSwitchUnconfirmed { .. } => ExecutionErrorKind::NetworkSwitchUnconfirmed,
            Self::MissingCredential => ExecutionErrorKind::MissingCredential,
            Self::EncodingFailed(_) => ExecutionErrorKind::EncodingFailed,
            Self::RelayerSubmissionFailed(_) => ExecutionErrorKind::RelayerSubmissionFailed,
            Self::RelayerStatusFailed { .. } => ExecutionErrorKind::RelayerStatusFailed,
            Self::RelayerConfirmedWithoutHash { .. } => {
                ExecutionErrorKind::RelayerConfirmedWithoutHash
            }
            Self::RelayerTransactionFailed { .. } => ExecutionErrorKind::RelayerTransactionFailed,
            Self::PollingTimeout(_) => ExecutionErrorKind::PollingTimeout,
            Self::Cancelled(_) => ExecutionErrorKind::Cancelled,
            Self::RelayerDiscoveryFailed { .. } => ExecutionErrorKind::RelayerDiscoveryFailed,
            Self::TransactionFailed(_) => ExecutionErrorKind::TransactionFailed,
            Self::UnsupportedExecutionMethod(_) => ExecutionErrorKind::UnsupportedExecutionMethod,
        }
    }

    /// True for failures detected before any side effect.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEoaRestriction(_)
                | Self::InvalidRelayerConfig(_)
                | Self::MissingCredential
                | Self::UnsupportedExecutionMethod(_)
        )
    }

    /// Wrap a chain client failure.
    pub fn transaction_failed<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::TransactionFailed(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_names_the_submission() {
        let err = ExecutionError::PollingTimeout("tx-123".into());
        assert!(err.to_string().contains("tx-123"));
        assert_eq!(err.kind(), ExecutionErrorKind::PollingTimeout);
    }

    #[test]
    fn transaction_failure_preserves_message() {
        let io = std::io::Error::other("user rejected the request");
        let err = ExecutionError::transaction_failed(io);
        assert_eq!(err.to_string(), "transaction failed: user rejected the request");
    }

    #[test]
    fn relayer_failure_display() {
        let err = ExecutionError::RelayerTransactionFailed {
            transaction_id: "abc".into(),
            status: RelayerTransactionStatus::Expired,
            reason: "valid_until passed".into(),
        };
        assert_eq!(err.to_string(), "relayer transaction abc expired: valid_until passed");
    }

    #[test]
    fn validation_kinds() {
        assert!(ExecutionError::MissingCredential.is_validation());
        assert!(ExecutionError::UnsupportedExecutionMethod(ExecutionMethod::Multisig)
            .is_validation());
        assert!(!ExecutionError::WalletNotConnected.is_validation());
        assert!(!ExecutionError::PollingTimeout("x".into()).is_validation());
    }

    #[test]
    fn mismatch_names_both_addresses() {
        let violation = RestrictionViolation::Mismatch {
            expected: Address::repeat_byte(0xaa),
            connected: Address::repeat_byte(0xbb),
        };
        let message = ExecutionError::InvalidEoaRestriction(violation).to_string();
        assert!(message.to_lowercase().contains(&"aa".repeat(20)));
        assert!(message.to_lowercase().contains(&"bb".repeat(20)));
    }
}
