//! Relayer service client and wire types.

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

/// The [`RelayerClient`] client.
pub mod client;
pub use client::RelayerClient;

mod error;
pub use error::{RelayerClientError, Result};

/// Request and response types for the [`RelayerClient`].
pub mod types;
