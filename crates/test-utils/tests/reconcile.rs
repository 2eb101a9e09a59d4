use txflow_execution::{NetworkReconciler, WalletConnection};
use txflow_test_utils::{
    fixtures::{MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID, SIGNER},
    init_tracing,
    wallet::{MockWallet, SwitchBehavior, WalletCall},
};
use txflow_types::{ExecutionError, ExecutionErrorKind};

#[tokio::test]
async fn same_network_makes_no_wallet_requests() {
    init_tracing();
    let wallet = MockWallet::connected(SIGNER, SEPOLIA_CHAIN_ID);

    let status = NetworkReconciler::new(&wallet).reconcile(SEPOLIA_CHAIN_ID).await.unwrap();

    assert_eq!(status.connected_chain(), Some(SEPOLIA_CHAIN_ID));
    assert!(wallet.calls().is_empty());
}

#[tokio::test]
async fn applied_switch_returns_refreshed_status() {
    let wallet = MockWallet::connected(SIGNER, MAINNET_CHAIN_ID);

    let status = NetworkReconciler::new(&wallet).reconcile(SEPOLIA_CHAIN_ID).await.unwrap();

    assert_eq!(status.connected_chain(), Some(SEPOLIA_CHAIN_ID));
    assert_eq!(wallet.calls(), vec![WalletCall::SwitchNetwork(SEPOLIA_CHAIN_ID)]);
}

#[tokio::test]
async fn unapplied_switch_disconnects_once() {
    let wallet = MockWallet::connected(SIGNER, MAINNET_CHAIN_ID)
        .with_switch_behavior(SwitchBehavior::Ignore);

    let err = NetworkReconciler::new(&wallet).reconcile(SEPOLIA_CHAIN_ID).await.unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::NetworkSwitchUnconfirmed {
            expected: SEPOLIA_CHAIN_ID,
            actual: Some(MAINNET_CHAIN_ID)
        }
    ));
    assert_eq!(wallet.switch_calls(), 1);
    assert_eq!(wallet.disconnect_calls(), 1);
    assert_eq!(wallet.calls().last(), Some(&WalletCall::Disconnect));
    assert!(!wallet.status().connected);
}

#[tokio::test]
async fn failed_disconnect_still_reports_unconfirmed() {
    let wallet = MockWallet::connected(SIGNER, MAINNET_CHAIN_ID)
        .with_switch_behavior(SwitchBehavior::Ignore)
        .with_failing_disconnect();

    let err = NetworkReconciler::new(&wallet).reconcile(SEPOLIA_CHAIN_ID).await.unwrap_err();

    assert_eq!(err.kind(), ExecutionErrorKind::NetworkSwitchUnconfirmed);
    assert_eq!(wallet.disconnect_calls(), 1);
}

#[tokio::test]
async fn rejected_switch_is_not_compensated() {
    let wallet = MockWallet::connected(SIGNER, MAINNET_CHAIN_ID)
        .with_switch_behavior(SwitchBehavior::Reject);

    let err = NetworkReconciler::new(&wallet).reconcile(SEPOLIA_CHAIN_ID).await.unwrap_err();

    let ExecutionError::NetworkSwitchFailed { chain_id, source } = err else {
        panic!("expected NetworkSwitchFailed");
    };
    assert_eq!(chain_id, SEPOLIA_CHAIN_ID);
    assert_eq!(source.to_string(), "user rejected the network switch");
    assert_eq!(wallet.disconnect_calls(), 0);
}

#[tokio::test]
async fn disconnected_wallet_is_rejected() {
    let wallet = MockWallet::disconnected();

    let err = NetworkReconciler::new(&wallet).reconcile(SEPOLIA_CHAIN_ID).await.unwrap_err();

    assert!(matches!(err, ExecutionError::WalletNotConnected));
    assert!(wallet.calls().is_empty());
}
