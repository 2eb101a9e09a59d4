use core::fmt;
use serde::{Deserialize, Serialize};

/// A relayer that can serve a network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayerRecord {
    /// Relayer id, used to address it on the service.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The relayer's signing address.
    pub address: String,
    /// The network the relayer is configured for.
    pub network: String,
    /// True if the relayer is not accepting transactions.
    pub paused: bool,
}

/// Lifecycle of a transaction held by the relayer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayerTransactionStatus {
    /// Accepted, not yet sent.
    Pending,
    /// Sent to the network.
    Sent,
    /// Included in a block.
    Mined,
    /// Included with enough confirmations.
    Confirmed,
    /// Failed on-chain or in the relayer.
    Failed,
    /// Canceled before inclusion.
    Canceled,
    /// Not included before its deadline.
    Expired,
}

impl RelayerTransactionStatus {
    /// True if no further transition occurs.
    pub const fn is_terminal(self) -> bool {
        self.is_success() || self.is_failure()
    }

    /// True for terminal success.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Mined | Self::Confirmed)
    }

    /// True for terminal failure.
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Canceled | Self::Expired)
    }

    /// The status as the relayer reports it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Mined => "mined",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for RelayerTransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
