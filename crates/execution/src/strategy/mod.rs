mod eoa;
pub use eoa::EoaStrategy;

mod relayer;
pub use relayer::RelayerStrategy;

use crate::{StatusObserver, WalletConnection};
use core::future::Future;
use txflow_types::{Credential, ExecutionError, ExecutionResult, TransactionIntent};

/// A way of getting a [`TransactionIntent`] on chain.
///
/// Each strategy takes the configuration for its own method. Validation of
/// that configuration happens before any wallet prompt or gateway call.
/// Progress is reported to the observer at fixed checkpoints.
pub trait ExecutionStrategy<W: WalletConnection> {
    /// The method-specific configuration.
    type Config;

    /// Execute `intent`, returning the broadcast hash.
    ///
    /// `credential` is the session secret for services that need one. It
    /// is forwarded per call and never stored.
    fn execute<O>(
        &self,
        intent: &TransactionIntent,
        config: &Self::Config,
        wallet: &W,
        observer: &O,
        credential: Option<&Credential>,
    ) -> impl Future<Output = Result<ExecutionResult, ExecutionError>> + Send
    where
        O: StatusObserver + Sync + ?Sized;
}
