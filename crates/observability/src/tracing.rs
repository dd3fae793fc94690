//! Log output for the `refresh-templates` binary and for host adapters that
//! embed the invoice hooks.
//!
//! Events go to stdout as one JSON object per line so the host's log shipper
//! can pick up cache refreshes and guard denials next to its own request
//! logs. `RUST_LOG` selects verbosity (e.g. `invoicer_invoicing=debug` shows
//! every cache write).

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// `RUST_LOG` if it parses, otherwise [`DEFAULT_FILTER`].
pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the JSON subscriber. A subscriber that is already set wins, so
/// hosts that configure their own logging keep it.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_is_harmless() {
        super::init();
        super::init();
    }
}
