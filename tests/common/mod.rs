//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use pubsuffix::{Rules, TopLevelDomains};
use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by pubsuffix and the test suite.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable debug level logging:
///   RUST_LOG=DEBUG
///
/// Or to watch the rule tree walk only:
///   RUST_LOG=pubsuffix::psl=TRACE
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}

/// Returns the path of a file in the test data directory.
pub fn test_data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

/// Loads the Public Suffix List used by the tests.
pub fn rules() -> Rules {
    init_logging();
    Rules::from_path(test_data("public_suffix_list.dat")).unwrap()
}

/// Loads the root zone database used by the tests.
pub fn top_level_domains() -> TopLevelDomains {
    init_logging();
    TopLevelDomains::from_path(test_data("tlds-alpha-by-domain.txt")).unwrap()
}
