//! Log subscriber set-up.
//!
//! The terminal belongs to the user interface, so events are only ever written to a file. Without
//! a log file no subscriber is installed and every event is discarded.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result, WrapErr as _};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Builds the event filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to `log_file`, truncating it first.
///
/// Returns whether a subscriber was installed.
///
/// # Errors
///
/// - The log file cannot be created.
/// - A global subscriber is already installed.
pub fn init(log_file: Option<&Path>) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| eyre!("failed to install the log subscriber: {err}"))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_no_subscriber() {
        assert!(
            !init(None).expect("skipping the subscriber cannot fail"),
            "nothing is installed without a log file"
        );
    }

    #[test]
    fn test_unwritable_file_is_reported() {
        let result = init(Some(Path::new("/nonexistent-directory/mazerace.log")));

        assert!(result.is_err(), "a missing directory should be reported");
    }
}
