//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// `default_level` is used as the filter when `RUST_LOG` is not set. Calling
/// this more than once is harmless; later calls are ignored.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}

/// Initialize logging for unit tests, capturing output per test
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
