use alloy::primitives::b256;
use std::time::Duration;
use txflow_execution::{
    EoaStrategy, ExecutionStrategy, Executor, NoopObserver, RelayerStrategy,
};
use txflow_relayer::types::{ApiResponse, SubmittedTransaction};
use txflow_test_utils::{
    chain::{MockChainClient, MOCK_TX_HASH},
    fixtures::{
        relayer_config, relayers, sepolia, service_url, status, transfer_intent, API_KEY,
        MAINNET_CHAIN_ID, OTHER_SIGNER, SEPOLIA_CHAIN_ID, SIGNER,
    },
    gateway::{MockConnector, MockGateway},
    init_tracing,
    observer::{PanickingObserver, RecordingObserver},
    wallet::{MockWallet, SwitchBehavior, WalletCall},
};
use txflow_types::{
    config::{DiscoveryConfig, PollConfig},
    Credential, EoaExecutionConfig, ExecutionConfig, ExecutionError, ExecutionErrorKind,
    ExecutionMethod, ExecutionStatus, RelayerExecutionConfig, RelayerTransactionStatus,
    RestrictionViolation,
};

const RELAYED_HASH: alloy::primitives::TxHash =
    b256!("0x7777777777777777777777777777777777777777777777777777777777777777");

fn eoa() -> EoaStrategy<MockChainClient> {
    EoaStrategy::new(MockChainClient::new(), sepolia())
}

fn relayer(connector: &MockConnector) -> RelayerStrategy<MockConnector> {
    RelayerStrategy::new(connector.clone())
        .with_poll_config(PollConfig::new(Duration::from_secs(2), Duration::from_secs(60)))
}

fn executor(connector: &MockConnector) -> Executor<MockChainClient, MockConnector> {
    Executor::new(eoa(), relayer(connector))
}

fn key() -> Credential {
    Credential::from(API_KEY)
}

#[tokio::test]
async fn eoa_on_target_network_signs_once() {
    init_tracing();
    let wallet = MockWallet::connected(SIGNER, SEPOLIA_CHAIN_ID);
    let connector = MockConnector::default();
    let executor = executor(&connector);
    let observer = RecordingObserver::new();
    let intent = transfer_intent(100);

    let result = executor
        .execute(
            &intent,
            &EoaExecutionConfig::allow_any().into(),
            &wallet,
            &observer,
            None,
        )
        .await
        .unwrap();

    assert_eq!(result.tx_hash, MOCK_TX_HASH);
    assert_eq!(observer.events(), vec![ExecutionStatus::PendingSignature]);
    assert_eq!(wallet.switch_calls(), 0);
    assert!(connector.gateway().calls().is_empty());

    let signed = executor.eoa().chain_client().signed();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0].0, intent);
    assert_eq!(signed[0].1.address, SIGNER);
}

#[tokio::test]
async fn eoa_switches_network_before_signing() {
    let wallet = MockWallet::connected(SIGNER, MAINNET_CHAIN_ID);
    let strategy = eoa();

    strategy
        .execute(
            &transfer_intent(1),
            &EoaExecutionConfig::specific(SIGNER),
            &wallet,
            &NoopObserver,
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        wallet.calls(),
        vec![WalletCall::SwitchNetwork(SEPOLIA_CHAIN_ID), WalletCall::SigningClient]
    );
    assert_eq!(strategy.chain_client().signed()[0].1.chain_id, Some(SEPOLIA_CHAIN_ID));
}

#[tokio::test]
async fn eoa_restriction_mismatch_fails_before_any_wallet_request() {
    let wallet = MockWallet::connected(SIGNER, MAINNET_CHAIN_ID);
    let strategy = eoa();
    let observer = RecordingObserver::new();

    let err = strategy
        .execute(
            &transfer_intent(1),
            &EoaExecutionConfig::specific(OTHER_SIGNER),
            &wallet,
            &observer,
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::InvalidEoaRestriction(RestrictionViolation::Mismatch {
            expected: OTHER_SIGNER,
            connected: SIGNER
        })
    ));
    assert!(wallet.calls().is_empty());
    assert!(observer.events().is_empty());
    assert!(strategy.chain_client().signed().is_empty());
}

#[tokio::test]
async fn eoa_restriction_is_rechecked_after_switch() {
    let wallet =
        MockWallet::connected(SIGNER, MAINNET_CHAIN_ID).with_address_after_switch(OTHER_SIGNER);
    let strategy = eoa();
    let observer = RecordingObserver::new();

    let err = strategy
        .execute(
            &transfer_intent(1),
            &EoaExecutionConfig::specific(SIGNER),
            &wallet,
            &observer,
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExecutionErrorKind::InvalidEoaRestriction);
    assert!(observer.events().is_empty());
    assert!(strategy.chain_client().signed().is_empty());
}

#[tokio::test]
async fn eoa_restriction_without_address_is_invalid() {
    let wallet = MockWallet::connected(SIGNER, SEPOLIA_CHAIN_ID);
    let config = EoaExecutionConfig { allow_any: false, specific_address: None };

    let err = eoa()
        .execute(&transfer_intent(1), &config, &wallet, &NoopObserver, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::InvalidEoaRestriction(RestrictionViolation::MissingAddress)
    ));
    assert!(err.is_validation());
    assert!(wallet.calls().is_empty());
}

#[tokio::test]
async fn eoa_unconfirmed_switch_aborts_signing() {
    let wallet = MockWallet::connected(SIGNER, MAINNET_CHAIN_ID)
        .with_switch_behavior(SwitchBehavior::Ignore);
    let strategy = eoa();

    let err = strategy
        .execute(
            &transfer_intent(1),
            &EoaExecutionConfig::allow_any(),
            &wallet,
            &NoopObserver,
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExecutionErrorKind::NetworkSwitchUnconfirmed);
    assert_eq!(wallet.disconnect_calls(), 1);
    assert!(strategy.chain_client().signed().is_empty());
}

#[tokio::test]
async fn eoa_without_wallet_fails() {
    let err = eoa()
        .execute(
            &transfer_intent(1),
            &EoaExecutionConfig::allow_any(),
            &MockWallet::disconnected(),
            &NoopObserver,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::WalletNotConnected));

    let err = eoa()
        .execute(
            &transfer_intent(1),
            &EoaExecutionConfig::allow_any(),
            &MockWallet::connected(SIGNER, SEPOLIA_CHAIN_ID).without_signer(),
            &NoopObserver,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::WalletNotConnected));
}

#[tokio::test]
async fn eoa_chain_failure_keeps_its_message() {
    let wallet = MockWallet::connected(SIGNER, SEPOLIA_CHAIN_ID);
    let strategy =
        EoaStrategy::new(MockChainClient::failing("user rejected the request"), sepolia());
    let observer = RecordingObserver::new();

    let err = strategy
        .execute(
            &transfer_intent(1),
            &EoaExecutionConfig::allow_any(),
            &wallet,
            &observer,
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExecutionErrorKind::TransactionFailed);
    assert_eq!(err.to_string(), "transaction failed: user rejected the request");
    assert_eq!(observer.events(), vec![ExecutionStatus::PendingSignature]);
}

#[tokio::test]
async fn panicking_observer_does_not_abort_execution() {
    let wallet = MockWallet::connected(SIGNER, SEPOLIA_CHAIN_ID);

    let result = eoa()
        .execute(
            &transfer_intent(1),
            &EoaExecutionConfig::allow_any(),
            &wallet,
            &PanickingObserver,
            None,
        )
        .await
        .unwrap();

    assert_eq!(result.tx_hash, MOCK_TX_HASH);
}

#[tokio::test]
async fn relayer_requires_a_credential() {
    let connector = MockConnector::default();
    let wallet = MockWallet::connected(SIGNER, SEPOLIA_CHAIN_ID);

    for credential in [None, Some(Credential::from(""))] {
        let err = relayer(&connector)
            .execute(
                &transfer_intent(1),
                &relayer_config(),
                &wallet,
                &NoopObserver,
                credential.as_ref(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::MissingCredential));
    }
    assert!(connector.connections().is_empty());
    assert!(connector.gateway().calls().is_empty());
}

#[tokio::test]
async fn relayer_without_selection_is_invalid() {
    let connector = MockConnector::default();
    let config = RelayerExecutionConfig::new(service_url(), " ");

    let err = relayer(&connector)
        .execute(
            &transfer_intent(1),
            &config,
            &MockWallet::disconnected(),
            &NoopObserver,
            Some(&key()),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExecutionErrorKind::InvalidRelayerConfig);
    assert!(connector.gateway().calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn relayer_reports_submission_then_resolves() {
    let gateway = MockGateway::new()
        .with_submission(ApiResponse::ok(SubmittedTransaction { id: "tx-42".into() }))
        .with_statuses([
            status(RelayerTransactionStatus::Pending, None),
            status(RelayerTransactionStatus::Sent, None),
            status(RelayerTransactionStatus::Mined, Some(RELAYED_HASH)),
        ]);
    let connector = MockConnector::new(gateway.clone());
    let observer = RecordingObserver::new();
    // The relayer path never touches the wallet.
    let wallet = MockWallet::disconnected();

    let result = executor(&connector)
        .execute(
            &transfer_intent(100),
            &relayer_config().into(),
            &wallet,
            &observer,
            Some(&key()),
        )
        .await
        .unwrap();

    assert_eq!(result.tx_hash, RELAYED_HASH);
    assert_eq!(
        observer.events(),
        vec![ExecutionStatus::PendingRelayer { transaction_id: "tx-42".into() }]
    );
    assert_eq!(connector.connections(), vec![(service_url(), key())]);
    assert_eq!(gateway.status_calls(), 3);
    assert!(wallet.calls().is_empty());
}

#[tokio::test]
async fn relayer_rejection_emits_nothing() {
    let gateway = MockGateway::new().with_submission(ApiResponse::err("relayer is paused"));
    let connector = MockConnector::new(gateway.clone());
    let observer = RecordingObserver::new();

    let err = relayer(&connector)
        .execute(
            &transfer_intent(1),
            &relayer_config(),
            &MockWallet::disconnected(),
            &observer,
            Some(&key()),
        )
        .await
        .unwrap_err();

    assert!(matches!(&err, ExecutionError::RelayerSubmissionFailed(m) if m == "relayer is paused"));
    assert!(observer.events().is_empty());
    assert_eq!(gateway.status_calls(), 0);
}

#[tokio::test]
async fn relayer_transport_failure_is_a_submission_failure() {
    let connector = MockConnector::new(MockGateway::new().with_transport_error("timed out"));

    let err = relayer(&connector)
        .execute(
            &transfer_intent(1),
            &relayer_config(),
            &MockWallet::disconnected(),
            &NoopObserver,
            Some(&key()),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExecutionErrorKind::RelayerSubmissionFailed);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test(start_paused = true)]
async fn relayer_confirmed_without_hash_is_not_success() {
    let gateway = MockGateway::new()
        .with_statuses([status(RelayerTransactionStatus::Confirmed, None)]);
    let connector = MockConnector::new(gateway);
    let observer = RecordingObserver::new();

    let err = relayer(&connector)
        .execute(
            &transfer_intent(1),
            &relayer_config(),
            &MockWallet::disconnected(),
            &observer,
            Some(&key()),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExecutionErrorKind::RelayerConfirmedWithoutHash);
    assert_eq!(observer.events().len(), 1);
}

#[tokio::test]
async fn multisig_is_unsupported() {
    let connector = MockConnector::default();
    let wallet = MockWallet::connected(SIGNER, MAINNET_CHAIN_ID);
    let observer = RecordingObserver::new();

    let err = executor(&connector)
        .execute(
            &transfer_intent(1),
            &ExecutionConfig::Multisig,
            &wallet,
            &observer,
            Some(&key()),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::UnsupportedExecutionMethod(ExecutionMethod::Multisig)
    ));
    assert!(err.is_validation());
    assert!(wallet.calls().is_empty());
    assert!(observer.events().is_empty());
    assert!(connector.connections().is_empty());
}

#[tokio::test]
async fn executor_lists_relayers_for_its_network() {
    let mut listed = relayers(2, "sepolia");
    listed.extend(relayers(3, "mainnet"));
    let connector = MockConnector::new(MockGateway::new().with_relayers(listed));

    let compatible = executor(&connector)
        .list_compatible_relayers(&service_url(), &key(), DiscoveryConfig::default())
        .await
        .unwrap();

    assert_eq!(compatible.len(), 2);
    assert!(compatible.iter().all(|record| record.network == "sepolia"));
}
