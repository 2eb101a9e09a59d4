//! Wire types of the relayer service's JSON API.
use alloy::primitives::{Address, Bytes, TxHash, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use txflow_types::{
    RelayerRecord, RelayerTransactionOptions, RelayerTransactionStatus, Speed,
};

/// The envelope around every relayer service response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// Whether the service handled the request.
    pub success: bool,
    /// The payload, present on success.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// The service's error message, present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Pagination info, present on listing endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    /// A successful response.
    pub const fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None, pagination: None }
    }

    /// A successful page of a listing.
    pub const fn page(data: T, pagination: PaginationMeta) -> Self {
        Self { success: true, data: Some(data), error: None, pagination: Some(pagination) }
    }

    /// A failed response.
    pub fn err(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()), pagination: None }
    }

    /// The service's error message, or a generic one.
    pub fn error_message(&self) -> String {
        match (&self.error, self.success) {
            (Some(message), _) => message.clone(),
            (None, true) => "response is missing its data".to_owned(),
            (None, false) => "request was not successful".to_owned(),
        }
    }

    /// The payload, if the request succeeded and carried one. Otherwise the
    /// service's error message.
    pub fn into_data(self) -> Result<T, String> {
        let message = self.error_message();
        match self {
            Self { success: true, data: Some(data), .. } => Ok(data),
            _ => Err(message),
        }
    }
}

/// Pagination info on listing responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    /// The 1-based page returned.
    pub current_page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Items across all pages.
    pub total_items: u64,
}

/// A relayer as listed by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayerSummary {
    /// Relayer id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Network identifier.
    pub network: String,
    /// Chain family, e.g. `evm`.
    pub network_type: String,
    /// Signing address.
    #[serde(default)]
    pub address: String,
    /// True if not accepting transactions.
    #[serde(default)]
    pub paused: bool,
}

impl From<RelayerSummary> for RelayerRecord {
    fn from(summary: RelayerSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            address: summary.address,
            network: summary.network,
            paused: summary.paused,
        }
    }
}

/// A transaction submitted to a relayer.
///
/// Carries at most one pricing strategy, taken from
/// [`RelayerTransactionOptions`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayerTransactionRequest {
    /// Recipient.
    pub to: Address,
    /// Call data.
    pub data: Bytes,
    /// Native value.
    pub value: U256,
    /// Gas limit.
    pub gas_limit: u64,
    /// Speed tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Speed>,
    /// Legacy gas price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    /// EIP-1559 max fee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<u128>,
    /// EIP-1559 priority fee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<u128>,
    /// Expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
}

impl RelayerTransactionRequest {
    /// Build a request, copying pricing and expiry from `options`.
    pub fn new(
        to: Address,
        data: Bytes,
        value: U256,
        options: &RelayerTransactionOptions,
    ) -> Self {
        let pricing = options.pricing;
        let (max_fee_per_gas, max_priority_fee_per_gas) =
            pricing.and_then(|p| p.eip1559()).unzip();
        Self {
            to,
            data,
            value,
            gas_limit: options.gas_limit_or_default(),
            speed: pricing.and_then(|p| p.speed()),
            gas_price: pricing.and_then(|p| p.gas_price()),
            max_fee_per_gas,
            max_priority_fee_per_gas,
            valid_until: options.valid_until,
        }
    }

    /// Number of pricing strategies set. Never more than one for requests
    /// built with [`Self::new`].
    pub const fn pricing_strategies(&self) -> usize {
        self.speed.is_some() as usize
            + self.gas_price.is_some() as usize
            + (self.max_fee_per_gas.is_some() || self.max_priority_fee_per_gas.is_some()) as usize
    }
}

/// Acknowledgement of a submitted transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmittedTransaction {
    /// The relayer's transaction id.
    pub id: String,
}

/// A relayer transaction's current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayerTransactionResponse {
    /// The relayer's transaction id.
    #[serde(default)]
    pub id: String,
    /// Lifecycle status.
    pub status: RelayerTransactionStatus,
    /// Broadcast hash, once known.
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub hash: Option<TxHash>,
    /// Why the transaction is in its status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
}

/// Some services send `""` for a hash that is not yet known.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<TxHash>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(hash) if hash.trim().is_empty() => Ok(None),
        Some(hash) => hash.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
