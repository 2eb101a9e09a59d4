mod abi;
pub use abi::AbiCallEncoder;

mod provider;
pub use provider::{AlloyChainClient, AlloyChainError};

mod relayer_client;
