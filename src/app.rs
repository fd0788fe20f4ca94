//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use concourse_deploy::config::ConfigError;
use concourse_deploy::deploy::ValidationError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable or malformed config file.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Validation error (exit code 2) - the merged deployment flags were rejected.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn validation_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Maps a configuration error to its exit code.
pub fn exit_code_for(error: &ConfigError) -> std::process::ExitCode {
    match error {
        ConfigError::Validation(_) => exit_code::validation_error(),
        _ => exit_code::CONFIG_ERROR,
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. }
        | ConfigError::Validation(ValidationError::MissingRequired { .. }) => {
            eprintln!("\nRun 'concourse-deploy init' to generate a configuration template.");
        }
        ConfigError::Validation(ValidationError::UnsupportedFlag { .. }) => {
            eprintln!("\nThis is a bug: every deploy flag needs an entry in the flag table.");
        }
        ConfigError::Validation(ValidationError::InvalidEnumValue { .. }) => {
            eprintln!("\nSee 'concourse-deploy deploy --help' for accepted sizes.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
