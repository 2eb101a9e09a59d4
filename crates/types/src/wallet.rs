use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// A live reading of the signer's wallet connection.
///
/// Read fresh for every check; never held across a wallet interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConnectionStatus {
    /// True if a wallet is connected.
    pub connected: bool,
    /// The connected account.
    pub address: Option<Address>,
    /// The chain the wallet is on.
    pub chain_id: Option<u64>,
}

impl WalletConnectionStatus {
    /// A connected wallet.
    pub const fn connected(address: Address, chain_id: u64) -> Self {
        Self { connected: true, address: Some(address), chain_id: Some(chain_id) }
    }

    /// No wallet.
    pub const fn disconnected() -> Self {
        Self { connected: false, address: None, chain_id: None }
    }

    /// The chain, if connected and known.
    pub const fn connected_chain(&self) -> Option<u64> {
        if self.connected {
            self.chain_id
        } else {
            None
        }
    }

    /// The account, if connected and known.
    pub const fn connected_address(&self) -> Option<Address> {
        if self.connected {
            self.address
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnected_reports_nothing() {
        let stale = WalletConnectionStatus {
            connected: false,
            address: Some(Address::repeat_byte(1)),
            chain_id: Some(1),
        };
        assert_eq!(stale.connected_chain(), None);
        assert_eq!(stale.connected_address(), None);
        assert_eq!(WalletConnectionStatus::connected(Address::ZERO, 5).connected_chain(), Some(5));
    }
}
