use core::fmt;
use serde::{Deserialize, Serialize};

/// Chain families a relayer can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkFamily {
    /// EVM chains.
    Evm,
    /// Solana.
    Solana,
    /// Stellar.
    Stellar,
}

impl NetworkFamily {
    /// The family's name as relayer services report it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Evm => "evm",
            Self::Solana => "solana",
            Self::Stellar => "stellar",
        }
    }

    /// True if `network_type` names this family.
    pub fn matches(self, network_type: &str) -> bool {
        network_type.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for NetworkFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The network a transaction targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Network identifier, e.g. `sepolia`.
    pub id: String,
    /// Numeric chain id the wallet reports.
    pub chain_id: u64,
    /// Chain family.
    pub family: NetworkFamily,
}

impl NetworkConfig {
    /// Create an EVM network.
    pub fn evm(id: impl Into<String>, chain_id: u64) -> Self {
        Self { id: id.into(), chain_id, family: NetworkFamily::Evm }
    }
}

/// How a relayer's network identifier is matched against the target's.
///
/// Relayer services address networks at different granularity: some report
/// `sepolia` where the target is `ethereum-sepolia`. Matching is
/// case-insensitive in both modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMatch {
    /// The identifiers are equal.
    #[default]
    Exact,
    /// The relayer's identifier is contained in the target's.
    Contains,
}

impl NetworkMatch {
    /// True if a relayer on `relayer_network` can serve `target`.
    pub fn matches(self, target: &str, relayer_network: &str) -> bool {
        let target = target.trim().to_ascii_lowercase();
        let relayer_network = relayer_network.trim().to_ascii_lowercase();
        if relayer_network.is_empty() {
            return false;
        }
        match self {
            Self::Exact => target == relayer_network,
            Self::Contains => target.contains(&relayer_network),
        }
    }
}
