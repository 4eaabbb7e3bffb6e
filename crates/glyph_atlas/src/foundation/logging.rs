//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system at `info` unless `RUST_LOG` says otherwise
pub fn init() {
    init_with_level("info");
}

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still takes precedence over `default_filter`. Calling this more
/// than once is harmless; later calls leave the first logger in place.
pub fn init_with_level(default_filter: &str) {
    let result = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp(None)
    .try_init();

    if result.is_err() {
        log::trace!("Logger already initialized, keeping existing configuration");
    }
}
