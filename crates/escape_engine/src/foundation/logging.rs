//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honours `RUST_LOG`; falls back to `info` when it is unset.
pub fn init() {
    init_with_default("info");
}

/// Initialize the logging system with a fallback filter
///
/// # Arguments
/// * `default_filter` - Filter used when `RUST_LOG` is not set (e.g. `"escape=debug"`)
pub fn init_with_default(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // A second init (tests, embedding) keeps the first logger
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
