pub mod build_info;
pub mod clock;
pub mod persistence;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Fallback filter when neither `RUST_LOG` nor a configured filter is set.
pub const DEFAULT_LOG_FILTER: &str = "sponsor_ledger=warn";

/// Initializes the global tracing subscriber, writing to stderr so that
/// rendered ledgers on stdout stay machine-readable.
///
/// `RUST_LOG` wins over `configured`, which wins over [`DEFAULT_LOG_FILTER`].
pub fn init_tracing(configured: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
