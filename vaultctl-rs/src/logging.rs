//! Logging bootstrap for the vaultctl binary.
//!
//! # Responsibility
//! - Route `log` records to stderr so stdout stays reserved for command output.
//! - Map `-q` / `-v` flags to a level; `RUST_LOG` takes precedence when set.
//!
//! # Invariants
//! - Library modules never initialize logging; only `main` does.
//! - The returned handle must be kept alive for the duration of the process.

use crate::error::Result;
use flexi_logger::{Logger, LoggerHandle};

/// Log level spec for the given verbosity flags.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Start the stderr logger.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(level_for(verbose, quiet))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()?;
    log::debug!(
        "event=logging_start level={} version={}",
        level_for(verbose, quiet),
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(5, false), "trace");
        assert_eq!(level_for(3, true), "error");
    }
}
