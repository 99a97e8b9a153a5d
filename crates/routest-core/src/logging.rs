//! Diagnostics output for binaries and test harnesses embedding routest

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global subscriber printing compact, leveled log lines.
///
/// `RUST_LOG` selects what is shown (`RUST_LOG=routest_core=debug` traces
/// every document the loader touches). Merge conflicts in metadata are
/// reported at `warn` and so are visible with the default filter.
///
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}
