use alloy::primitives::{Bytes, TxHash};
use core::future::Future;
use txflow_relayer::types::{
    ApiResponse, RelayerSummary, RelayerTransactionRequest, RelayerTransactionResponse,
    SubmittedTransaction,
};
use txflow_types::{Credential, TransactionIntent, WalletConnectionStatus};
use url::Url;

/// The signer's wallet connection.
///
/// Implementors expose the live connection state and the mutating requests
/// the orchestrator may issue. [`WalletConnection::status`] must read live
/// state on every call; callers never cache it across a wallet request.
pub trait WalletConnection {
    /// The client used to sign transactions.
    type SigningClient;
    /// The error type returned by wallet requests.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Read the current connection state.
    fn status(&self) -> WalletConnectionStatus;

    /// Ask the wallet to switch to `chain_id`.
    fn switch_network(&self, chain_id: u64) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Get a signing client for the connected account, if there is one.
    fn signing_client(&self) -> impl Future<Output = Option<Self::SigningClient>> + Send;

    /// Disconnect the wallet.
    fn disconnect(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// A client that signs and broadcasts an intent with a signing client `S`.
pub trait ChainClient<S> {
    /// The error type returned when signing or broadcasting fails.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Sign and broadcast `intent`, returning the broadcast hash. Does not
    /// wait for inclusion.
    fn sign_and_broadcast(
        &self,
        intent: &TransactionIntent,
        signer: &S,
    ) -> impl Future<Output = Result<TxHash, Self::Error>> + Send;
}

/// Encodes an intent into call data.
pub trait CallEncoder {
    /// The error type returned when encoding fails.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Encode the call.
    fn encode_call(&self, intent: &TransactionIntent) -> Result<Bytes, Self::Error>;
}

/// A relayer service.
///
/// Methods return the raw response envelope. Interpreting `success` and a
/// missing payload is left to the caller.
pub trait RelayerGateway {
    /// The transport error type.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Submit a transaction to a relayer.
    fn send_transaction(
        &self,
        relayer_id: &str,
        request: &RelayerTransactionRequest,
    ) -> impl Future<Output = Result<ApiResponse<SubmittedTransaction>, Self::Error>> + Send;

    /// Look up a relayer transaction.
    fn transaction_status(
        &self,
        relayer_id: &str,
        transaction_id: &str,
    ) -> impl Future<Output = Result<ApiResponse<RelayerTransactionResponse>, Self::Error>> + Send;

    /// List one 1-based page of relayers.
    fn list_relayers(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<ApiResponse<Vec<RelayerSummary>>, Self::Error>> + Send;

    /// Get a single relayer.
    fn get_relayer(
        &self,
        relayer_id: &str,
    ) -> impl Future<Output = Result<ApiResponse<RelayerSummary>, Self::Error>> + Send;
}

/// Opens a [`RelayerGateway`] for a service URL and session credential.
pub trait GatewayConnector {
    /// The gateway produced.
    type Gateway: RelayerGateway;

    /// Open a gateway. The credential is only forwarded with requests.
    fn connect(&self, service_url: &Url, credential: &Credential) -> Self::Gateway;
}
