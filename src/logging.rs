use std::path::Path;

use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};

use crate::{constants::FILE_NAMES, error::Result};

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

/// Starts file logging in `log_dir`. The level comes from `RUST_LOG` when
/// set. With `echo_warnings`, warnings and errors are also printed to stderr,
/// which must stay off while the terminal UI owns the screen.
///
/// The returned handle has to live until the program exits.
pub fn init(log_dir: &Path, echo_warnings: bool) -> Result<LoggerHandle> {
    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?.log_to_file(
        FileSpec::default()
            .directory(log_dir)
            .basename(FILE_NAMES.log_basename)
            .suppress_timestamp(),
    );

    if echo_warnings {
        logger = logger.duplicate_to_stderr(Duplicate::Warn);
    }

    Ok(logger.append().start()?)
}
