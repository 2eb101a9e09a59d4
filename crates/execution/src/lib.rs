//! txflow execution library
//!
//! Executes a [`TransactionIntent`] through one of several strategies:
//! signing directly with the connected wallet, or delegating to a relayer
//! service and tracking the relayed transaction to a terminal status.
//!
//! [`TransactionIntent`]: txflow_types::TransactionIntent

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
#![cfg_attr(docsrs, feature(doc_cfg))]

mod discovery;
pub use discovery::{list_compatible_relayers, RelayerDiscovery};

mod executor;
pub use executor::Executor;

mod impls;
pub use impls::{AbiCallEncoder, AlloyChainClient, AlloyChainError};

mod observer;
pub use observer::{NoopObserver, StatusObserver};

mod pipeline;
pub use pipeline::RelayerSubmissionPipeline;

mod reconcile;
pub use reconcile::NetworkReconciler;

mod strategy;
pub use strategy::{EoaStrategy, ExecutionStrategy, RelayerStrategy};

mod traits;
pub use traits::{CallEncoder, ChainClient, GatewayConnector, RelayerGateway, WalletConnection};
