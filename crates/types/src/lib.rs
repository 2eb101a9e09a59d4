//! Types shared by the txflow execution crates.
//!
//! Contains the transaction intent, the per-submission execution
//! configuration, relayer records and statuses, and the error taxonomy
//! returned by every execution path.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

/// Environment-driven configuration.
pub mod config;

mod credential;
pub use credential::Credential;

mod error;
pub use error::{BoxError, ExecutionError, ExecutionErrorKind, RestrictionViolation};

mod execution;
pub use execution::{
    EoaExecutionConfig, ExecutionConfig, ExecutionMethod, RelayerExecutionConfig,
};

mod intent;
pub use intent::TransactionIntent;

mod network;
pub use network::{NetworkConfig, NetworkFamily, NetworkMatch};

mod options;
pub use options::{
    GasPricing, OptionsError, RelayerTransactionOptions, Speed, DEFAULT_RELAYER_GAS_LIMIT,
};

mod relayer;
pub use relayer::{RelayerRecord, RelayerTransactionStatus};

mod status;
pub use status::{ExecutionResult, ExecutionStatus};

mod wallet;
pub use wallet::WalletConnectionStatus;
