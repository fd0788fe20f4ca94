//! Concourse Deploy: deployment flag validation
//!
//! Entry point for the concourse-deploy application.

use concourse_deploy::config::{Command, Invocation, ValidatedDeploy, write_default_config};
use std::process::ExitCode;

mod app;

use app::{exit_code, exit_code_for, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let invocation = Invocation::parse_args();
    setup_tracing(invocation.cli.verbose);

    // Handle init subcommand
    if let Command::Init { output } = &invocation.cli.command {
        return handle_init(output);
    }

    let Some((deploy, matches)) = invocation.deploy() else {
        return exit_code::CONFIG_ERROR;
    };

    // Load, merge and validate deployment flags
    let deployment = match ValidatedDeploy::load(invocation.cli.config.as_deref(), deploy, matches)
    {
        Ok(deployment) => deployment,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code_for(&e);
        }
    };

    tracing::info!("{deployment}");
    print_deployment(&deployment, invocation.cli.json)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Prints the validated deployment to stdout.
fn print_deployment(deployment: &ValidatedDeploy, json: bool) -> ExitCode {
    if !json {
        println!("{deployment}");
        return exit_code::SUCCESS;
    }

    match serde_json::to_string_pretty(deployment) {
        Ok(rendered) => {
            println!("{rendered}");
            exit_code::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render deployment: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}
