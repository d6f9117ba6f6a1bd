//! Helpers shared by the integration tests

#![allow(dead_code)]

use datagen_core::ObjectFactory;
use datagen_test_utils::fixture_catalog;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Seeded factory over the fixture catalog
pub fn fixture_factory(seed: u64) -> ObjectFactory {
    init_tracing();
    ObjectFactory::builder()
        .with_catalog(fixture_catalog())
        .with_seed(seed)
        .build()
        .unwrap()
}
