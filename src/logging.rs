//! Tracing subscriber setup.

use once_cell::sync::OnceCell;
use tracing_subscriber::filter::EnvFilter;

/// Crate-specific filter variable, consulted when `RUST_LOG` is unset
pub const LOG_ENV_VAR: &str = "VIEWER_LOG";

static INIT: OnceCell<()> = OnceCell::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`, then `VIEWER_LOG`,
/// then `info`. Later calls are no-ops, as is calling this when the host
/// already installed a global subscriber.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let filter = build_filter();
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

fn build_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV_VAR))
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
