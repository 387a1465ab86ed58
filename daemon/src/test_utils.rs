//! utilities used for testing
//!
//! NOTE: most of the stuff related to setting up database state is in the `songbook_storage` crate
//! behind the `test_utils` feature flag.

use std::sync::OnceLock;

use songbook_core::logger::{init_logger, init_tracing};

static INIT: OnceLock<()> = OnceLock::new();

/// Set up logging once per test binary.
pub fn init() {
    INIT.get_or_init(|| {
        init_logger(log::LevelFilter::Debug);
        if let Err(e) = tracing::subscriber::set_global_default(init_tracing()) {
            panic!("Error setting global default tracing subscriber: {e:?}")
        }
    });
}
