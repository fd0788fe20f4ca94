//! Tests for validated deployments.

use super::ConfigError;
use super::cli::{DeployCli, Invocation};
use super::provided::ProvidedFlags;
use super::toml::TomlConfig;
use super::validated::ValidatedDeploy;

/// Helper to parse `deploy my-ci <args>`
fn deploy(args: &[&str]) -> Invocation {
    let mut full_args = vec!["concourse-deploy", "deploy", "my-ci"];
    full_args.extend(args);
    Invocation::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// Merges and validates the way `ValidatedDeploy::load` does, without a file.
fn validate(
    invocation: &Invocation,
    toml: Option<&TomlConfig>,
) -> Result<ValidatedDeploy, ConfigError> {
    let (cli, matches) = invocation.deploy().unwrap();
    let keys = toml.map(|t| t.deploy_keys.as_slice()).unwrap_or_default();
    let flags = ProvidedFlags::collect(
        &DeployCli::command(),
        matches,
        keys.iter().map(String::as_str),
    );
    ValidatedDeploy::from_raw(cli, toml, &flags)
}

mod loading_tests;
mod precedence_tests;
