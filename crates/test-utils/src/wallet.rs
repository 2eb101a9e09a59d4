//! A scriptable [`WalletConnection`].
use alloy::primitives::Address;
use std::sync::{Arc, Mutex};
use txflow_execution::WalletConnection;
use txflow_types::WalletConnectionStatus;

/// How [`MockWallet`] answers a network switch request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwitchBehavior {
    /// Switch and report the new chain.
    #[default]
    Apply,
    /// Accept the request but stay on the current chain.
    Ignore,
    /// Reject the request.
    Reject,
}

/// A request made to [`MockWallet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletCall {
    /// `switch_network(chain_id)`.
    SwitchNetwork(u64),
    /// `signing_client()`.
    SigningClient,
    /// `disconnect()`.
    Disconnect,
}

/// Errors returned by [`MockWallet`].
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum MockWalletError {
    /// The switch was rejected.
    #[error("user rejected the network switch")]
    SwitchRejected,
    /// Disconnect failed.
    #[error("wallet refused to disconnect")]
    DisconnectFailed,
}

/// The signing client handed out by [`MockWallet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSigner {
    /// The account it signs for.
    pub address: Address,
    /// The chain the wallet was on when it was handed out.
    pub chain_id: Option<u64>,
}

#[derive(Debug)]
struct WalletState {
    status: WalletConnectionStatus,
    switch: SwitchBehavior,
    address_after_switch: Option<Address>,
    has_signer: bool,
    fail_disconnect: bool,
    calls: Vec<WalletCall>,
}

/// A mock [`WalletConnection`] that records every request.
///
/// Clones share state, so a test can keep a handle while the code under
/// test borrows another.
#[derive(Debug, Clone)]
pub struct MockWallet {
    state: Arc<Mutex<WalletState>>,
}

impl MockWallet {
    fn from_status(status: WalletConnectionStatus) -> Self {
        Self {
            state: Arc::new(Mutex::new(WalletState {
                status,
                switch: SwitchBehavior::Apply,
                address_after_switch: None,
                has_signer: true,
                fail_disconnect: false,
                calls: vec![],
            })),
        }
    }

    /// A wallet connected with `address` on `chain_id`.
    pub fn connected(address: Address, chain_id: u64) -> Self {
        Self::from_status(WalletConnectionStatus::connected(address, chain_id))
    }

    /// A wallet with no connection.
    pub fn disconnected() -> Self {
        Self::from_status(WalletConnectionStatus::disconnected())
    }

    /// Set how switch requests are answered.
    pub fn with_switch_behavior(self, switch: SwitchBehavior) -> Self {
        self.state.lock().unwrap().switch = switch;
        self
    }

    /// Change the connected account when a switch is applied.
    pub fn with_address_after_switch(self, address: Address) -> Self {
        self.state.lock().unwrap().address_after_switch = Some(address);
        self
    }

    /// Hand out no signing client.
    pub fn without_signer(self) -> Self {
        self.state.lock().unwrap().has_signer = false;
        self
    }

    /// Fail every disconnect request.
    pub fn with_failing_disconnect(self) -> Self {
        self.state.lock().unwrap().fail_disconnect = true;
        self
    }

    /// Replace the connected account.
    pub fn set_address(&self, address: Address) {
        self.state.lock().unwrap().status.address = Some(address);
    }

    /// Every request made so far, in order.
    pub fn calls(&self) -> Vec<WalletCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of switch requests.
    pub fn switch_calls(&self) -> usize {
        self.count(|call| matches!(call, WalletCall::SwitchNetwork(_)))
    }

    /// Number of disconnect requests.
    pub fn disconnect_calls(&self) -> usize {
        self.count(|call| matches!(call, WalletCall::Disconnect))
    }

    fn count(&self, f: impl Fn(&WalletCall) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|call| f(call)).count()
    }
}

impl WalletConnection for MockWallet {
    type SigningClient = MockSigner;
    type Error = MockWalletError;

    fn status(&self) -> WalletConnectionStatus {
        self.state.lock().unwrap().status
    }

    async fn switch_network(&self, chain_id: u64) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(WalletCall::SwitchNetwork(chain_id));

        match state.switch {
            SwitchBehavior::Apply => {
                state.status.chain_id = Some(chain_id);
                if let Some(address) = state.address_after_switch {
                    state.status.address = Some(address);
                }
                Ok(())
            }
            SwitchBehavior::Ignore => Ok(()),
            SwitchBehavior::Reject => Err(MockWalletError::SwitchRejected),
        }
    }

    async fn signing_client(&self) -> Option<Self::SigningClient> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(WalletCall::SigningClient);

        if !state.has_signer {
            return None;
        }
        state
            .status
            .connected_address()
            .map(|address| MockSigner { address, chain_id: state.status.chain_id })
    }

    async fn disconnect(&self) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(WalletCall::Disconnect);

        if state.fail_disconnect {
            return Err(MockWalletError::DisconnectFailed);
        }
        state.status = WalletConnectionStatus::disconnected();
        Ok(())
    }
}
