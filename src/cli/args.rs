//! Command-line argument parsing for the sse-audit CLI.

use std::path::PathBuf;

/// Log file analyzed when no path argument is given.
pub const DEFAULT_LOG_PATH: &str = "server.log";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Analyze a log file (default)
    Analyze {
        /// Path of the log file to scan
        log_path: PathBuf,
    },
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first non-flag argument is taken as the log path; without one the
/// default `server.log` is used. Unknown flags are ignored.
///
/// # Examples
///
/// ```
/// use sse_audit::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["sse-audit".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    for arg in args.skip(1) {
        // Skip the program name
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            flag if flag.starts_with('-') => {}
            path => {
                return CliCommand::Analyze {
                    log_path: PathBuf::from(path),
                }
            }
        }
    }
    CliCommand::Analyze {
        log_path: PathBuf::from(DEFAULT_LOG_PATH),
    }
}
