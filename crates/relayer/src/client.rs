use crate::{
    types::{
        ApiResponse, RelayerSummary, RelayerTransactionRequest, RelayerTransactionResponse,
        SubmittedTransaction,
    },
    RelayerClientError, Result,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{instrument, warn};
use txflow_types::Credential;

/// The endpoints of the relayer service.
const RELAYERS: &str = "relayers";
const TRANSACTIONS: &str = "transactions";

/// Client for a relayer service.
///
/// Every request carries the session credential as a bearer token. The
/// credential lives only as long as the client.
#[derive(Debug, Clone)]
pub struct RelayerClient {
    /// The base URL of the relayer service.
    url: reqwest::Url,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
    /// The session credential.
    credential: Credential,
}

impl RelayerClient {
    /// Create a new client with the given URL and reqwest client.
    pub const fn new_with_client(
        url: reqwest::Url,
        client: reqwest::Client,
        credential: Credential,
    ) -> Self {
        Self { url, client, credential }
    }

    /// Instantiate a new client with the given URL and a new reqwest client.
    pub fn new(url: reqwest::Url, credential: Credential) -> Self {
        Self::new_with_client(url, reqwest::Client::new(), credential)
    }

    /// Create a new client given a string URL.
    pub fn new_from_string(url: &str, credential: Credential) -> Result<Self> {
        let url = reqwest::Url::parse(url)?;
        Ok(Self::new(url, credential))
    }

    /// Get the client used to send requests
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Get the base URL of the service.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Append path segments to the base URL, percent-encoding each.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| RelayerClientError::CannotBeABase(self.url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read<R: DeserializeOwned>(response: reqwest::Response) -> Result<ApiResponse<R>> {
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<ApiResponse<R>>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) if status.is_success() => {
                warn!(%e, "Failed to parse response from relayer service");
                Err(e.into())
            }
            Err(_) => Err(RelayerClientError::from_status(
                status,
                String::from_utf8_lossy(&body).into_owned(),
            )),
        }
    }

    async fn get_inner<R: DeserializeOwned>(
        &self,
        url: reqwest::Url,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<R>> {
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(self.credential.expose_secret())
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to query relayer service"))?;
        Self::read(response).await
    }

    async fn post_inner<T: Serialize + Sync, R: DeserializeOwned>(
        &self,
        url: reqwest::Url,
        obj: &T,
    ) -> Result<ApiResponse<R>> {
        let response = self
            .client
            .post(url)
            .json(obj)
            .bearer_auth(self.credential.expose_secret())
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to post to relayer service"))?;
        Self::read(response).await
    }

    /// List one page of relayers. Pages are 1-based.
    #[instrument(skip(self))]
    pub async fn list_relayers(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<ApiResponse<Vec<RelayerSummary>>> {
        let url = self.endpoint(&[RELAYERS])?;
        self.get_inner(url, &[("page", page.to_string()), ("per_page", per_page.to_string())])
            .await
    }

    /// Get a single relayer.
    #[instrument(skip(self))]
    pub async fn get_relayer(&self, relayer_id: &str) -> Result<ApiResponse<RelayerSummary>> {
        let url = self.endpoint(&[RELAYERS, relayer_id])?;
        self.get_inner(url, &[]).await
    }

    /// Submit a transaction to a relayer.
    #[instrument(skip(self, request), fields(to = %request.to))]
    pub async fn send_transaction(
        &self,
        relayer_id: &str,
        request: &RelayerTransactionRequest,
    ) -> Result<ApiResponse<SubmittedTransaction>> {
        let url = self.endpoint(&[RELAYERS, relayer_id, TRANSACTIONS])?;
        self.post_inner(url, request).await
    }

    /// Get the state of a relayer transaction.
    #[instrument(skip(self))]
    pub async fn get_transaction(
        &self,
        relayer_id: &str,
        transaction_id: &str,
    ) -> Result<ApiResponse<RelayerTransactionResponse>> {
        let url = self.endpoint(&[RELAYERS, relayer_id, TRANSACTIONS, transaction_id])?;
        self.get_inner(url, &[]).await
    }
}
