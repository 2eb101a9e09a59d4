use crate::{AbiCallEncoder, CallEncoder, RelayerGateway};
use alloy::primitives::TxHash;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use txflow_relayer::types::{RelayerTransactionRequest, RelayerTransactionResponse};
use txflow_types::{
    config::PollConfig, ExecutionError, RelayerExecutionConfig, TransactionIntent,
};

/// Reason reported when the relayer fails a transaction without one.
const NO_REASON: &str = "relayer reported no reason";

/// Submits an intent to a relayer and waits for a terminal status.
///
/// Status is polled at [`PollConfig::effective_interval`] until the transaction is
/// mined, confirmed, failed, canceled or expired, or until
/// [`PollConfig::timeout`] has elapsed since polling began. A
/// [`CancellationToken`] stops the wait early.
///
/// Only the "not yet terminal" case is retried. Any failed lookup ends the
/// wait. Callers must not poll the same submission from two tasks.
#[derive(Debug, Clone)]
pub struct RelayerSubmissionPipeline<Gateway, Encode = AbiCallEncoder> {
    gateway: Gateway,
    encoder: Encode,
    poll: PollConfig,
    cancel: CancellationToken,
}

impl<Gateway> RelayerSubmissionPipeline<Gateway> {
    /// Create a pipeline that ABI-encodes intents.
    pub fn new(gateway: Gateway) -> Self {
        Self::new_with_encoder(gateway, AbiCallEncoder)
    }
}

impl<Gateway, Encode> RelayerSubmissionPipeline<Gateway, Encode> {
    /// Create a pipeline with the given encoder and default polling.
    pub fn new_with_encoder(gateway: Gateway, encoder: Encode) -> Self {
        Self { gateway, encoder, poll: PollConfig::default(), cancel: CancellationToken::new() }
    }

    /// Set the poll timing.
    pub const fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Stop waiting when `cancel` is cancelled.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Get a reference to the gateway.
    pub const fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Get the poll timing.
    pub const fn poll_config(&self) -> PollConfig {
        self.poll
    }
}

impl<Gateway, Encode> RelayerSubmissionPipeline<Gateway, Encode>
where
    Gateway: RelayerGateway + Sync,
    Encode: CallEncoder + Sync,
{
    /// Submit `intent`, then wait for its hash.
    pub async fn submit_and_await(
        &self,
        intent: &TransactionIntent,
        config: &RelayerExecutionConfig,
    ) -> Result<TxHash, ExecutionError> {
        let transaction_id = self.submit(intent, config).await?;
        self.await_hash(&config.relayer_id, &transaction_id).await
    }

    /// Encode and submit `intent`, returning the relayer's transaction id.
    ///
    /// Pricing is forwarded from the config's options as given. Only the
    /// gas limit is defaulted.
    #[instrument(skip_all, fields(relayer_id = %config.relayer_id, to = %intent.to()))]
    pub async fn submit(
        &self,
        intent: &TransactionIntent,
        config: &RelayerExecutionConfig,
    ) -> Result<String, ExecutionError> {
        let data = self
            .encoder
            .encode_call(intent)
            .map_err(|error| ExecutionError::EncodingFailed(Box::new(error)))?;

        let request = RelayerTransactionRequest::new(
            intent.to(),
            data,
            intent.value().unwrap_or_default(),
            &config.options_or_default(),
        );

        let response = self
            .gateway
            .send_transaction(&config.relayer_id, &request)
            .await
            .map_err(|error| ExecutionError::RelayerSubmissionFailed(error.to_string()))?;

        let submitted = response.into_data().map_err(ExecutionError::RelayerSubmissionFailed)?;
        if submitted.id.trim().is_empty() {
            return Err(ExecutionError::RelayerSubmissionFailed(
                "relayer returned no transaction id".to_owned(),
            ));
        }

        debug!(transaction_id = %submitted.id, "relayer accepted transaction");
        Ok(submitted.id)
    }

    /// Poll a submitted transaction until it reaches a terminal status.
    #[instrument(skip(self))]
    pub async fn await_hash(
        &self,
        relayer_id: &str,
        transaction_id: &str,
    ) -> Result<TxHash, ExecutionError> {
        let start = Instant::now();

        while start.elapsed() < self.poll.timeout {
            if self.cancel.is_cancelled() {
                return Err(ExecutionError::Cancelled(transaction_id.to_owned()));
            }

            let response = self
                .gateway
                .transaction_status(relayer_id, transaction_id)
                .await
                .map_err(|error| status_failed(transaction_id, error.to_string()))?;
            let transaction =
                response.into_data().map_err(|message| status_failed(transaction_id, message))?;

            if let Some(outcome) = resolve(transaction_id, transaction) {
                return outcome;
            }

            let remaining = self.poll.timeout.saturating_sub(start.elapsed());
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return Err(ExecutionError::Cancelled(transaction_id.to_owned()));
                }
                _ = sleep(self.poll.effective_interval().min(remaining)) => {}
            }
        }

        warn!(timeout = ?self.poll.timeout, "relayer transaction did not reach a terminal status");
        Err(ExecutionError::PollingTimeout(transaction_id.to_owned()))
    }
}

fn status_failed(transaction_id: &str, message: String) -> ExecutionError {
    ExecutionError::RelayerStatusFailed { transaction_id: transaction_id.to_owned(), message }
}

/// Map a terminal status to its outcome. `None` while still in flight.
fn resolve(
    transaction_id: &str,
    transaction: RelayerTransactionResponse,
) -> Option<Result<TxHash, ExecutionError>> {
    let status = transaction.status;

    if status.is_success() {
        return Some(transaction.hash.ok_or_else(|| ExecutionError::RelayerConfirmedWithoutHash {
            transaction_id: transaction_id.to_owned(),
            status,
        }));
    }

    if status.is_failure() {
        let reason = transaction
            .status_reason
            .filter(|reason| !reason.trim().is_empty())
            .unwrap_or_else(|| NO_REASON.to_owned());
        return Some(Err(ExecutionError::RelayerTransactionFailed {
            transaction_id: transaction_id.to_owned(),
            status,
            reason,
        }));
    }

    debug!(%status, "relayer transaction in flight");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;
    use txflow_types::{ExecutionErrorKind, RelayerTransactionStatus};

    fn response(
        status: RelayerTransactionStatus,
        hash: Option<TxHash>,
        reason: Option<&str>,
    ) -> RelayerTransactionResponse {
        RelayerTransactionResponse {
            id: "tx".into(),
            status,
            hash,
            status_reason: reason.map(Into::into),
        }
    }

    #[test]
    fn in_flight_statuses_continue() {
        for status in [RelayerTransactionStatus::Pending, RelayerTransactionStatus::Sent] {
            assert!(resolve("tx", response(status, None, None)).is_none());
        }
    }

    #[test]
    fn success_needs_a_hash() {
        let hash = B256::repeat_byte(0x11);
        let outcome =
            resolve("tx", response(RelayerTransactionStatus::Confirmed, Some(hash), None));
        assert_eq!(outcome.unwrap().unwrap(), hash);

        let err = resolve("tx", response(RelayerTransactionStatus::Mined, None, None))
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind(), ExecutionErrorKind::RelayerConfirmedWithoutHash);
    }

    #[test]
    fn failure_reason_defaults() {
        let err = resolve("tx", response(RelayerTransactionStatus::Failed, None, Some("")))
            .unwrap()
            .unwrap_err();
        let ExecutionError::RelayerTransactionFailed { reason, status, .. } = err else {
            panic!("expected RelayerTransactionFailed");
        };
        assert_eq!(reason, NO_REASON);
        assert_eq!(status, RelayerTransactionStatus::Failed);

        let err =
            resolve("tx", response(RelayerTransactionStatus::Canceled, None, Some("replaced")))
                .unwrap()
                .unwrap_err();
        assert!(err.to_string().contains("replaced"));
    }
}
