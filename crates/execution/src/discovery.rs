use crate::{GatewayConnector, RelayerGateway};
use futures_util::stream::{self, Stream, TryStreamExt};
use tracing::{debug, instrument};
use txflow_relayer::types::RelayerSummary;
use txflow_types::{
    config::DiscoveryConfig, Credential, ExecutionError, NetworkConfig, RelayerRecord,
};
use url::Url;

/// Pages through a relayer service's listing and filters it by network.
#[derive(Debug, Clone)]
pub struct RelayerDiscovery<Gateway> {
    gateway: Gateway,
    config: DiscoveryConfig,
}

impl<Gateway> RelayerDiscovery<Gateway> {
    /// Create a discovery client with default page size and matching.
    pub fn new(gateway: Gateway) -> Self {
        Self::new_with_config(gateway, DiscoveryConfig::default())
    }

    /// Create a discovery client with the given config.
    pub const fn new_with_config(gateway: Gateway, config: DiscoveryConfig) -> Self {
        Self { gateway, config }
    }

    /// Get a reference to the gateway.
    pub const fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Get the config.
    pub const fn config(&self) -> DiscoveryConfig {
        self.config
    }
}

impl<Gateway> RelayerDiscovery<Gateway>
where
    Gateway: RelayerGateway + Sync,
{
    /// Stream every page of the listing, starting at page 1.
    ///
    /// Paging continues while fewer items than the reported total have been
    /// received. A page without pagination info, or an empty page, ends the
    /// stream. The first failed page is yielded as an error and ends the
    /// stream.
    pub fn pages(
        &self,
    ) -> impl Stream<Item = Result<Vec<RelayerSummary>, ExecutionError>> + Send + '_ {
        let per_page = self.config.page_size.max(1);

        stream::unfold(Some((1u32, 0u64)), move |state| async move {
            let (page, fetched) = state?;

            match self.fetch_page(page, per_page).await {
                Ok((relayers, total_items)) => {
                    let fetched = fetched + relayers.len() as u64;
                    let next = match total_items {
                        Some(total) if fetched < total && !relayers.is_empty() => {
                            page.checked_add(1).map(|page| (page, fetched))
                        }
                        _ => None,
                    };
                    Some((Ok(relayers), next))
                }
                Err(error) => Some((Err(error), None)),
            }
        })
    }

    async fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<RelayerSummary>, Option<u64>), ExecutionError> {
        let failed = |message: String| ExecutionError::RelayerDiscoveryFailed { page, message };

        let response = self
            .gateway
            .list_relayers(page, per_page)
            .await
            .map_err(|error| failed(error.to_string()))?;
        let total_items = response.pagination.map(|pagination| pagination.total_items);
        let relayers = response.into_data().map_err(failed)?;

        debug!(page, received = relayers.len(), ?total_items, "fetched relayer page");
        Ok((relayers, total_items))
    }

    /// Fetch the whole listing, unfiltered.
    pub async fn list_relayers(&self) -> Result<Vec<RelayerSummary>, ExecutionError> {
        self.pages().try_concat().await
    }

    /// Fetch the whole listing and keep the relayers that can serve
    /// `network`.
    #[instrument(skip_all, fields(network = %network.id))]
    pub async fn list_compatible_relayers(
        &self,
        network: &NetworkConfig,
    ) -> Result<Vec<RelayerRecord>, ExecutionError> {
        let relayers = self.list_relayers().await?;
        let total = relayers.len();

        let compatible: Vec<RelayerRecord> = relayers
            .into_iter()
            .filter(|relayer| self.is_compatible(relayer, network))
            .map(Into::into)
            .collect();

        debug!(total, compatible = compatible.len(), "filtered relayers");
        Ok(compatible)
    }

    /// Fetch a single relayer.
    #[instrument(skip(self))]
    pub async fn get_relayer(&self, relayer_id: &str) -> Result<RelayerRecord, ExecutionError> {
        let failed = |message: String| ExecutionError::RelayerDiscoveryFailed { page: 0, message };

        self.gateway
            .get_relayer(relayer_id)
            .await
            .map_err(|error| failed(error.to_string()))?
            .into_data()
            .map(Into::into)
            .map_err(failed)
    }

    fn is_compatible(&self, relayer: &RelayerSummary, network: &NetworkConfig) -> bool {
        network.family.matches(&relayer.network_type)
            && self.config.network_match.matches(&network.id, &relayer.network)
    }
}

/// Connect to the relayer service at `service_url` and list the relayers
/// compatible with `network`.
///
/// The credential is forwarded with each request and not retained.
pub async fn list_compatible_relayers<Connect>(
    connector: &Connect,
    service_url: &Url,
    credential: &Credential,
    network: &NetworkConfig,
    config: DiscoveryConfig,
) -> Result<Vec<RelayerRecord>, ExecutionError>
where
    Connect: GatewayConnector,
    Connect::Gateway: Sync,
{
    if credential.is_empty() {
        return Err(ExecutionError::MissingCredential);
    }

    let gateway = connector.connect(service_url, credential);
    RelayerDiscovery::new_with_config(gateway, config).list_compatible_relayers(network).await
}
