use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gas limit forwarded to the relayer when the caller sets none.
pub const DEFAULT_RELAYER_GAS_LIMIT: u64 = 210_000;

/// Relayer-managed gas price tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Speed {
    /// Cheapest tier.
    SafeLow,
    /// Network average.
    Average,
    /// Above average.
    Fast,
    /// Highest tier.
    Fastest,
}

/// A single pricing strategy for a relayed transaction.
///
/// The relayer accepts exactly one of these. Holding it as an enum makes a
/// second strategy unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasPricing {
    /// Let the relayer price the transaction at a speed tier.
    Speed(Speed),
    /// Legacy gas price, in wei.
    Legacy {
        /// Gas price.
        gas_price: u128,
    },
    /// EIP-1559 fee caps, in wei.
    Eip1559 {
        /// Max fee per gas.
        max_fee_per_gas: u128,
        /// Max priority fee per gas.
        max_priority_fee_per_gas: u128,
    },
}

impl GasPricing {
    /// The speed tier, if this is tier pricing.
    pub const fn speed(&self) -> Option<Speed> {
        match self {
            Self::Speed(speed) => Some(*speed),
            _ => None,
        }
    }

    /// The legacy gas price, if this is legacy pricing.
    pub const fn gas_price(&self) -> Option<u128> {
        match self {
            Self::Legacy { gas_price } => Some(*gas_price),
            _ => None,
        }
    }

    /// The EIP-1559 caps, if this is EIP-1559 pricing.
    pub const fn eip1559(&self) -> Option<(u128, u128)> {
        match self {
            Self::Eip1559 { max_fee_per_gas, max_priority_fee_per_gas } => {
                Some((*max_fee_per_gas, *max_priority_fee_per_gas))
            }
            _ => None,
        }
    }
}

/// Errors from parsing [`RelayerTransactionOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// More than one pricing strategy was set.
    #[error("set only one of speed, gasPrice, or maxFeePerGas + maxPriorityFeePerGas")]
    ConflictingPricing,
    /// Only one of the two EIP-1559 fields was set.
    #[error("maxFeePerGas and maxPriorityFeePerGas must be set together")]
    IncompleteEip1559,
}

/// Chain-specific options forwarded to the relayer with a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTransactionOptions", into = "RawTransactionOptions")]
pub struct RelayerTransactionOptions {
    /// Gas limit. Defaults to [`DEFAULT_RELAYER_GAS_LIMIT`].
    pub gas_limit: Option<u64>,
    /// Pricing strategy. The relayer applies its own when unset.
    pub pricing: Option<GasPricing>,
    /// Deadline after which the relayer drops the transaction.
    pub valid_until: Option<DateTime<Utc>>,
}

impl RelayerTransactionOptions {
    /// Options with nothing set.
    pub const fn new() -> Self {
        Self { gas_limit: None, pricing: None, valid_until: None }
    }

    /// Set the gas limit.
    pub const fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set the pricing strategy, replacing any previous one.
    pub const fn with_pricing(mut self, pricing: GasPricing) -> Self {
        self.pricing = Some(pricing);
        self
    }

    /// Set the expiry.
    pub const fn with_valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    /// The gas limit to forward.
    pub fn gas_limit_or_default(&self) -> u64 {
        self.gas_limit.unwrap_or(DEFAULT_RELAYER_GAS_LIMIT)
    }
}

/// Flat form of [`RelayerTransactionOptions`] as it appears in config JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransactionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gas_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<Speed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gas_price: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_fee_per_gas: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_priority_fee_per_gas: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valid_until: Option<DateTime<Utc>>,
}

impl TryFrom<RawTransactionOptions> for RelayerTransactionOptions {
    type Error = OptionsError;

    fn try_from(raw: RawTransactionOptions) -> Result<Self, Self::Error> {
        let eip1559 = match (raw.max_fee_per_gas, raw.max_priority_fee_per_gas) {
            (Some(max_fee_per_gas), Some(max_priority_fee_per_gas)) => {
                Some(GasPricing::Eip1559 { max_fee_per_gas, max_priority_fee_per_gas })
            }
            (None, None) => None,
            _ => return Err(OptionsError::IncompleteEip1559),
        };
        let candidates = [
            raw.speed.map(GasPricing::Speed),
            raw.gas_price.map(|gas_price| GasPricing::Legacy { gas_price }),
            eip1559,
        ];

        let mut set = candidates.into_iter().flatten();
        let pricing = set.next();
        if set.next().is_some() {
            return Err(OptionsError::ConflictingPricing);
        }

        Ok(Self { gas_limit: raw.gas_limit, pricing, valid_until: raw.valid_until })
    }
}

impl From<RelayerTransactionOptions> for RawTransactionOptions {
    fn from(options: RelayerTransactionOptions) -> Self {
        let pricing = options.pricing;
        let (max_fee_per_gas, max_priority_fee_per_gas) =
            pricing.and_then(|p| p.eip1559()).unzip();
        Self {
            gas_limit: options.gas_limit,
            speed: pricing.and_then(|p| p.speed()),
            gas_price: pricing.and_then(|p| p.gas_price()),
            max_fee_per_gas,
            max_priority_fee_per_gas,
            valid_until: options.valid_until,
        }
    }
}
