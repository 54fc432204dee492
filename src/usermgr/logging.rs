//! Diagnostic logging setup for binaries.
//!
//! Library modules only emit `tracing` events. Installing a subscriber is left
//! to the client, which calls [`init`] once at startup.

use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g. `usermgr=debug`.
pub const LOG_ENV: &str = "USERMGR_LOG";

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Build the filter: `USERMGR_LOG` wins, then `--verbose`, then `warn`.
pub fn filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { VERBOSE_LEVEL } else { DEFAULT_LEVEL };
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => {
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(fallback))
        }
        _ => EnvFilter::new(fallback),
    }
}

/// Install a stderr fmt subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter(verbose))
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init();
}
