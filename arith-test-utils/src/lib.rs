//! Helpers shared by the arith test binaries.

use std::sync::Once;

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_TEST_FILTER: &str = "info";

/// Install a `tracing` subscriber for the current test binary.
///
/// Idempotent. Output goes through the libtest writer so it is captured per
/// test and only shown for failures or with `--nocapture`.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;

        let filter = match std::env::var("RUST_LOG") {
            Ok(_) => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER)),
            Err(_) => EnvFilter::new(DEFAULT_TEST_FILTER),
        };
        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}
