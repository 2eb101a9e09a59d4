use crate::{ExecutionError, RelayerTransactionOptions, RestrictionViolation};
use alloy::primitives::Address;
use core::fmt;
use serde::{Deserialize, Serialize};
use url::Url;

/// The ways a transaction can be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMethod {
    /// Sign and broadcast directly from the connected wallet.
    Eoa,
    /// Delegate signing and broadcast to a relayer service.
    Relayer,
    /// Propose through a multisig. Reserved.
    Multisig,
}

impl ExecutionMethod {
    /// The methods that have an execution strategy.
    pub const SUPPORTED: [Self; 2] = [Self::Eoa, Self::Relayer];

    /// True if an execution strategy exists for this method.
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Eoa | Self::Relayer)
    }

    /// The method's wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eoa => "eoa",
            Self::Relayer => "relayer",
            Self::Multisig => "multisig",
        }
    }
}

impl fmt::Display for ExecutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-submission execution configuration, keyed by method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum ExecutionConfig {
    /// Direct wallet signing.
    Eoa(EoaExecutionConfig),
    /// Relayer delegation.
    Relayer(RelayerExecutionConfig),
    /// Multisig proposal. Reserved.
    Multisig,
}

impl ExecutionConfig {
    /// The method this configuration selects.
    pub const fn method(&self) -> ExecutionMethod {
        match self {
            Self::Eoa(_) => ExecutionMethod::Eoa,
            Self::Relayer(_) => ExecutionMethod::Relayer,
            Self::Multisig => ExecutionMethod::Multisig,
        }
    }

    /// Check the configuration's shape. Performs no I/O, and is run before
    /// any wallet prompt or gateway call.
    pub fn validate(&self) -> Result<(), ExecutionError> {
        match self {
            Self::Eoa(eoa) => eoa.validate(),
            Self::Relayer(relayer) => relayer.validate(),
            Self::Multisig => {
                Err(ExecutionError::UnsupportedExecutionMethod(ExecutionMethod::Multisig))
            }
        }
    }
}

impl From<EoaExecutionConfig> for ExecutionConfig {
    fn from(config: EoaExecutionConfig) -> Self {
        Self::Eoa(config)
    }
}

impl From<RelayerExecutionConfig> for ExecutionConfig {
    fn from(config: RelayerExecutionConfig) -> Self {
        Self::Relayer(config)
    }
}

/// Address restriction for direct wallet execution.
///
/// When `allow_any` is false, the connected wallet address must equal
/// `specific_address`. Addresses compare by value, so hex casing never
/// affects the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EoaExecutionConfig {
    /// Accept any connected address.
    pub allow_any: bool,
    /// The only address allowed to sign, when `allow_any` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_address: Option<Address>,
}

impl EoaExecutionConfig {
    /// Accept any connected address.
    pub const fn allow_any() -> Self {
        Self { allow_any: true, specific_address: None }
    }

    /// Accept only `address`.
    pub const fn specific(address: Address) -> Self {
        Self { allow_any: false, specific_address: Some(address) }
    }

    /// Check that the restriction is well formed.
    pub const fn validate(&self) -> Result<(), ExecutionError> {
        if !self.allow_any && self.specific_address.is_none() {
            return Err(ExecutionError::InvalidEoaRestriction(
                RestrictionViolation::MissingAddress,
            ));
        }
        Ok(())
    }

    /// Check the restriction against the currently connected address.
    pub fn check_address(&self, connected: Address) -> Result<(), ExecutionError> {
        if self.allow_any {
            return Ok(());
        }
        match self.specific_address {
            None => {
                Err(ExecutionError::InvalidEoaRestriction(RestrictionViolation::MissingAddress))
            }
            Some(expected) if expected != connected => Err(ExecutionError::InvalidEoaRestriction(
                RestrictionViolation::Mismatch { expected, connected },
            )),
            Some(_) => Ok(()),
        }
    }
}

/// Relayer delegation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayerExecutionConfig {
    /// Base URL of the relayer service.
    pub service_url: Url,
    /// The relayer that signs and broadcasts.
    pub relayer_id: String,
    /// Chain-specific transaction options forwarded to the relayer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_options: Option<RelayerTransactionOptions>,
}

impl RelayerExecutionConfig {
    /// Create a config with no transaction options.
    pub fn new(service_url: Url, relayer_id: impl Into<String>) -> Self {
        Self { service_url, relayer_id: relayer_id.into(), transaction_options: None }
    }

    /// Set the transaction options.
    pub fn with_options(mut self, options: RelayerTransactionOptions) -> Self {
        self.transaction_options = Some(options);
        self
    }

    /// The options to forward, falling back to defaults.
    pub fn options_or_default(&self) -> RelayerTransactionOptions {
        self.transaction_options.unwrap_or_default()
    }

    /// Check that a relayer is selected.
    pub fn validate(&self) -> Result<(), ExecutionError> {
        if self.relayer_id.trim().is_empty() {
            return Err(ExecutionError::InvalidRelayerConfig("no relayer selected".into()));
        }
        Ok(())
    }
}
