//! Observability.
//!
//! Structured logging via `tracing`; initialization is owned by the
//! binary so the library never installs a global subscriber on its own.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static OBSERVABILITY_INIT: OnceLock<()> = OnceLock::new();

/// Initializes the global tracing subscriber.
///
/// Filter resolution order: `GLAS_LOG`, then `RUST_LOG`, then `info`
/// (`debug` when `verbose` is set). Safe to call more than once; only
/// the first call installs the subscriber.
pub fn init(verbose: bool) {
    OBSERVABILITY_INIT.get_or_init(|| {
        let default_level = if verbose { "debug" } else { "info" };
        let filter = std::env::var("GLAS_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map_or_else(
                |_| EnvFilter::new(default_level),
                |spec| EnvFilter::try_new(spec).unwrap_or_else(|_| EnvFilter::new(default_level)),
            );

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(false);
        init(true);
    }
}
