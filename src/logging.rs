//! Tracing subscriber setup.

use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_FILTER: &str = "arrowboard=info";

static INIT: OnceCell<()> = OnceCell::new();

/// Install the global fmt subscriber. `RUST_LOG` wins over `directive`;
/// an unparsable directive falls back to [`DEFAULT_FILTER`]. Safe to call
/// more than once.
pub fn init(directive: Option<&str>) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            directive
                .and_then(|d| EnvFilter::try_new(d).ok())
                .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
        });
        // Another subscriber (e.g. a test harness) may already be installed.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
