//! Addresses, networks and intents shared by tests.
use alloy::{
    dyn_abi::DynSolValue,
    json_abi::Function,
    primitives::{address, Address, TxHash, U256},
};
use txflow_relayer::types::{ApiResponse, RelayerSummary, RelayerTransactionResponse};
use txflow_types::{
    NetworkConfig, RelayerExecutionConfig, RelayerTransactionStatus, TransactionIntent,
};
use url::Url;

/// The connected signer.
pub const SIGNER: Address = address!("0x1111111111111111111111111111111111111111");
/// Another account.
pub const OTHER_SIGNER: Address = address!("0x2222222222222222222222222222222222222222");
/// The token contract called by [`transfer_intent`].
pub const TOKEN: Address = address!("0x000000000000000000000000000000000000abc0");
/// The transfer recipient.
pub const RECIPIENT: Address = address!("0x000000000000000000000000000000000000def0");

/// Ethereum mainnet.
pub const MAINNET_CHAIN_ID: u64 = 1;
/// Sepolia.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// The relayer used by [`relayer_config`].
pub const RELAYER_ID: &str = "relayer-1";
/// A session credential.
pub const API_KEY: &str = "test-api-key";

/// The Sepolia network.
pub fn sepolia() -> NetworkConfig {
    NetworkConfig::evm("sepolia", SEPOLIA_CHAIN_ID)
}

/// A relayer service URL.
pub fn service_url() -> Url {
    "https://relayer.example.com/api/v1".parse().unwrap()
}

/// An ERC-20 `transfer(RECIPIENT, amount)` on [`TOKEN`].
pub fn transfer_intent(amount: u64) -> TransactionIntent {
    let function = Function::parse("function transfer(address to, uint256 amount) returns (bool)")
        .unwrap();
    TransactionIntent::new(
        TOKEN,
        function,
        vec![DynSolValue::Address(RECIPIENT), DynSolValue::Uint(U256::from(amount), 256)],
    )
}

/// Relayer config for [`RELAYER_ID`] at [`service_url`], without options.
pub fn relayer_config() -> RelayerExecutionConfig {
    RelayerExecutionConfig::new(service_url(), RELAYER_ID)
}

/// A listed relayer.
pub fn relayer(id: &str, network: &str, network_type: &str) -> RelayerSummary {
    RelayerSummary {
        id: id.to_owned(),
        name: format!("Relayer {id}"),
        network: network.to_owned(),
        network_type: network_type.to_owned(),
        address: format!("{:#x}", Address::with_last_byte(id.len() as u8)),
        paused: false,
    }
}

/// `count` EVM relayers on `network`.
pub fn relayers(count: usize, network: &str) -> Vec<RelayerSummary> {
    (0..count).map(|i| relayer(&format!("relayer-{i}"), network, "evm")).collect()
}

/// A successful status response.
pub fn status(
    status: RelayerTransactionStatus,
    hash: Option<TxHash>,
) -> ApiResponse<RelayerTransactionResponse> {
    ApiResponse::ok(RelayerTransactionResponse {
        id: String::new(),
        status,
        hash,
        status_reason: None,
    })
}

/// A successful status response with a reason.
pub fn status_with_reason(
    status: RelayerTransactionStatus,
    reason: &str,
) -> ApiResponse<RelayerTransactionResponse> {
    ApiResponse::ok(RelayerTransactionResponse {
        id: String::new(),
        status,
        hash: None,
        status_reason: Some(reason.to_owned()),
    })
}
