//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Verbosity is controlled through `RUST_LOG`. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init() {
    let _ = env_logger::try_init();
}
