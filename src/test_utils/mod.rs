//! Test utilities for samcheck
//!
//! Shared by the unit tests and, through the `test-utils` feature, by the
//! integration suite.
//!
//! # Example
//!
//! ```rust,no_run
//! use samcheck_cli::test_utils::{API_TEMPLATE, write_template};
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! let path = write_template(temp.path(), "template.yaml", API_TEMPLATE);
//! assert!(path.exists());
//! ```

pub mod fixtures;

pub use fixtures::{API_TEMPLATE, INVALID_TEMPLATE, function, graph_of, write_template};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` set that level is used,
/// otherwise `RUST_LOG` is honored; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=samcheck_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
