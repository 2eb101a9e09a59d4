//! A scriptable [`RelayerGateway`] and its [`GatewayConnector`].
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use txflow_execution::{GatewayConnector, RelayerGateway};
use txflow_relayer::types::{
    ApiResponse, PaginationMeta, RelayerSummary, RelayerTransactionRequest,
    RelayerTransactionResponse, SubmittedTransaction,
};
use txflow_types::Credential;
use url::Url;
use uuid::Uuid;

/// A request made to [`MockGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// `send_transaction`.
    SendTransaction {
        /// The relayer addressed.
        relayer_id: String,
        /// The submitted body.
        request: RelayerTransactionRequest,
    },
    /// `transaction_status`.
    TransactionStatus {
        /// The relayer addressed.
        relayer_id: String,
        /// The transaction looked up.
        transaction_id: String,
    },
    /// `list_relayers`.
    ListRelayers {
        /// The page requested.
        page: u32,
        /// The page size requested.
        per_page: u32,
    },
    /// `get_relayer`.
    GetRelayer(String),
}

/// Transport failure from [`MockGateway`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("connection refused: {0}")]
pub struct MockGatewayError(pub String);

#[derive(Debug, Default)]
struct GatewayState {
    submission: Option<ApiResponse<SubmittedTransaction>>,
    statuses: VecDeque<ApiResponse<RelayerTransactionResponse>>,
    relayers: Vec<RelayerSummary>,
    total_items: Option<u64>,
    omit_pagination: bool,
    failing_page: Option<(u32, String)>,
    transport_error: Option<String>,
    calls: Vec<GatewayCall>,
}

/// A mock [`RelayerGateway`].
///
/// Submissions succeed with a fresh id unless scripted otherwise. Status
/// responses are served in order, and the last one repeats forever. Clones
/// share state.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl MockGateway {
    /// Create a gateway with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer submissions with `response`.
    pub fn with_submission(self, response: ApiResponse<SubmittedTransaction>) -> Self {
        self.state.lock().unwrap().submission = Some(response);
        self
    }

    /// Queue status responses.
    pub fn with_statuses(
        self,
        responses: impl IntoIterator<Item = ApiResponse<RelayerTransactionResponse>>,
    ) -> Self {
        self.state.lock().unwrap().statuses.extend(responses);
        self
    }

    /// Serve `relayers` from the listing.
    pub fn with_relayers(self, relayers: Vec<RelayerSummary>) -> Self {
        self.state.lock().unwrap().relayers = relayers;
        self
    }

    /// Report `total` as the listing's item count instead of the real one.
    pub fn with_total_items(self, total: u64) -> Self {
        self.state.lock().unwrap().total_items = Some(total);
        self
    }

    /// Leave pagination info off listing pages.
    pub fn without_pagination(self) -> Self {
        self.state.lock().unwrap().omit_pagination = true;
        self
    }

    /// Answer `page` of the listing with `success=false`.
    pub fn with_failing_page(self, page: u32, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().failing_page = Some((page, message.into()));
        self
    }

    /// Fail every request at the transport level.
    pub fn with_transport_error(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().transport_error = Some(message.into());
        self
    }

    /// Every request made so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// The bodies submitted so far.
    pub fn submitted(&self) -> Vec<RelayerTransactionRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::SendTransaction { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Number of status lookups.
    pub fn status_calls(&self) -> usize {
        self.count(|call| matches!(call, GatewayCall::TransactionStatus { .. }))
    }

    /// Number of listing requests.
    pub fn list_calls(&self) -> usize {
        self.count(|call| matches!(call, GatewayCall::ListRelayers { .. }))
    }

    fn count(&self, f: impl Fn(&GatewayCall) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|call| f(call)).count()
    }

    fn record(&self, call: GatewayCall) -> Result<(), MockGatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.transport_error.clone().map_or(Ok(()), |message| Err(MockGatewayError(message)))
    }
}

impl RelayerGateway for MockGateway {
    type Error = MockGatewayError;

    async fn send_transaction(
        &self,
        relayer_id: &str,
        request: &RelayerTransactionRequest,
    ) -> Result<ApiResponse<SubmittedTransaction>, Self::Error> {
        self.record(GatewayCall::SendTransaction {
            relayer_id: relayer_id.to_owned(),
            request: request.clone(),
        })?;

        let scripted = self.state.lock().unwrap().submission.clone();
        Ok(scripted.unwrap_or_else(|| {
            ApiResponse::ok(SubmittedTransaction { id: Uuid::new_v4().to_string() })
        }))
    }

    async fn transaction_status(
        &self,
        relayer_id: &str,
        transaction_id: &str,
    ) -> Result<ApiResponse<RelayerTransactionResponse>, Self::Error> {
        self.record(GatewayCall::TransactionStatus {
            relayer_id: relayer_id.to_owned(),
            transaction_id: transaction_id.to_owned(),
        })?;

        let mut state = self.state.lock().unwrap();
        let response = match state.statuses.len() {
            0 => ApiResponse::err("transaction not found"),
            1 => state.statuses[0].clone(),
            _ => state.statuses.pop_front().unwrap(),
        };
        Ok(response)
    }

    async fn list_relayers(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<ApiResponse<Vec<RelayerSummary>>, Self::Error> {
        self.record(GatewayCall::ListRelayers { page, per_page })?;

        let state = self.state.lock().unwrap();
        if let Some((failing, message)) = &state.failing_page {
            if *failing == page {
                return Ok(ApiResponse::err(message.clone()));
            }
        }

        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page as usize);
        let data: Vec<_> =
            state.relayers.iter().skip(start).take(per_page as usize).cloned().collect();
        if state.omit_pagination {
            return Ok(ApiResponse::ok(data));
        }

        let total_items = state.total_items.unwrap_or(state.relayers.len() as u64);
        Ok(ApiResponse::page(data, PaginationMeta { current_page: page, per_page, total_items }))
    }

    async fn get_relayer(
        &self,
        relayer_id: &str,
    ) -> Result<ApiResponse<RelayerSummary>, Self::Error> {
        self.record(GatewayCall::GetRelayer(relayer_id.to_owned()))?;

        let state = self.state.lock().unwrap();
        Ok(state
            .relayers
            .iter()
            .find(|relayer| relayer.id == relayer_id)
            .cloned()
            .map_or_else(|| ApiResponse::err("relayer not found"), ApiResponse::ok))
    }
}

/// A mock [`GatewayConnector`] that hands out one shared [`MockGateway`].
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    gateway: MockGateway,
    connections: Arc<Mutex<Vec<(Url, Credential)>>>,
}

impl MockConnector {
    /// Hand out `gateway` on every connect.
    pub fn new(gateway: MockGateway) -> Self {
        Self { gateway, connections: Default::default() }
    }

    /// The shared gateway.
    pub const fn gateway(&self) -> &MockGateway {
        &self.gateway
    }

    /// Every `(service_url, credential)` connected with.
    pub fn connections(&self) -> Vec<(Url, Credential)> {
        self.connections.lock().unwrap().clone()
    }
}

impl GatewayConnector for MockConnector {
    type Gateway = MockGateway;

    fn connect(&self, service_url: &Url, credential: &Credential) -> Self::Gateway {
        self.connections.lock().unwrap().push((service_url.clone(), credential.clone()));
        self.gateway.clone()
    }
}
