use crate::{GatewayConnector, RelayerGateway};
use txflow_relayer::{
    types::{
        ApiResponse, RelayerSummary, RelayerTransactionRequest, RelayerTransactionResponse,
        SubmittedTransaction,
    },
    RelayerClient, RelayerClientError,
};
use txflow_types::Credential;
use url::Url;

impl RelayerGateway for RelayerClient {
    type Error = RelayerClientError;

    async fn send_transaction(
        &self,
        relayer_id: &str,
        request: &RelayerTransactionRequest,
    ) -> Result<ApiResponse<SubmittedTransaction>, Self::Error> {
        RelayerClient::send_transaction(self, relayer_id, request).await
    }

    async fn transaction_status(
        &self,
        relayer_id: &str,
        transaction_id: &str,
    ) -> Result<ApiResponse<RelayerTransactionResponse>, Self::Error> {
        self.get_transaction(relayer_id, transaction_id).await
    }

    async fn list_relayers(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<ApiResponse<Vec<RelayerSummary>>, Self::Error> {
        RelayerClient::list_relayers(self, page, per_page).await
    }

    async fn get_relayer(
        &self,
        relayer_id: &str,
    ) -> Result<ApiResponse<RelayerSummary>, Self::Error> {
        RelayerClient::get_relayer(self, relayer_id).await
    }
}

/// A shared [`reqwest::Client`] opens a [`RelayerClient`] per service URL.
impl GatewayConnector for reqwest::Client {
    type Gateway = RelayerClient;

    fn connect(&self, service_url: &Url, credential: &Credential) -> Self::Gateway {
        RelayerClient::new_with_client(service_url.clone(), self.clone(), credential.clone())
    }
}
