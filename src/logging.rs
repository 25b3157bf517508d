// src/logging.rs
use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_ENV: &str = "FINCALC_LOG";
const DEFAULT_FILTER: &str = "fincalc=info";

/// Installs the global subscriber. Reads per-module levels from
/// `FINCALC_LOG` (e.g. `fincalc::state=debug`), defaulting to `fincalc=info`.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
