pub mod chain;
pub mod fixtures;
pub mod gateway;
pub mod observer;
pub mod wallet;

/// Install a fmt subscriber filtered by `RUST_LOG`. Safe to call from every
/// test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
