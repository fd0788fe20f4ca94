//! Validated deployment after merging CLI and TOML sources.
//!
//! This module contains the final, validated deployment that is handed to
//! manifest generation. All validation is performed during construction.

use std::fmt;
use std::path::Path;

use clap::ArgMatches;
use serde::Serialize;

use crate::deploy::{DeployArgs, FlagSetChecker};

use super::cli::DeployCli;
use super::error::ConfigError;
use super::provided::ProvidedFlags;
use super::toml::{DeploySection, TomlConfig};

/// Fully validated deployment ready for use by the provisioning steps.
///
/// # Construction
///
/// Use [`ValidatedDeploy::from_raw`] to create from CLI args, an optional
/// TOML config, and a flag-presence checker. Values resolve as
/// CLI > TOML > built-in default.
#[derive(Debug, Serialize)]
pub struct ValidatedDeploy {
    /// Deployment name
    pub name: String,

    /// Merged and validated flag values
    pub args: DeployArgs,

    /// Flags the user explicitly provided
    pub explicit_flags: Vec<&'static str>,
}

impl fmt::Display for ValidatedDeploy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deployment {} {{ {} }}", self.name, self.args)
    }
}

impl ValidatedDeploy {
    /// Creates a validated deployment from CLI arguments and optional TOML config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] with the first violated rule, or
    /// an unsupported-flag error if `flags` reports an unknown flag.
    pub fn from_raw(
        cli: &DeployCli,
        toml: Option<&TomlConfig>,
        flags: &impl FlagSetChecker,
    ) -> Result<Self, ConfigError> {
        let empty = DeploySection::default();
        let file = toml.map_or(&empty, |t| &t.deploy);

        let mut args = DeployArgs::default();
        resolve_infrastructure(&mut args, cli, file);
        resolve_sizing(&mut args, cli, file);
        resolve_auth(&mut args, cli, file);
        resolve_network(&mut args, cli, file);

        args.mark_set_flags(flags)?;
        args.validate()?;

        let explicit_flags = args.explicit().flag_names().collect();
        tracing::debug!(name = %cli.name, "Deployment flags validated");

        Ok(Self {
            name: cli.name.clone(),
            args,
            explicit_flags,
        })
    }

    /// Loads the optional config file, merges it with the CLI, and validates.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged deployment flags are invalid
    pub fn load(
        config: Option<&Path>,
        cli: &DeployCli,
        matches: &ArgMatches,
    ) -> Result<Self, ConfigError> {
        let toml = config.map(TomlConfig::load).transpose()?;
        let keys = toml
            .as_ref()
            .map(|t| t.deploy_keys.as_slice())
            .unwrap_or_default();

        let flags = ProvidedFlags::collect(
            &DeployCli::command(),
            matches,
            keys.iter().map(String::as_str),
        );
        tracing::debug!(provided = ?flags.provided().collect::<Vec<_>>(), "Collected provided flags");

        Self::from_raw(cli, toml.as_ref(), &flags)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn resolve_infrastructure(args: &mut DeployArgs, cli: &DeployCli, file: &DeploySection) {
    merge(&mut args.iaas, cli.iaas.as_ref(), file.iaas.as_ref());
    merge(&mut args.region, cli.region.as_ref(), file.region.as_ref());
    merge(&mut args.zone, cli.zone.as_ref(), file.zone.as_ref());
    merge(&mut args.domain, cli.domain.as_ref(), file.domain.as_ref());
    merge(&mut args.tls_cert, cli.tls_cert.as_ref(), file.tls_cert.as_ref());
    merge(&mut args.tls_key, cli.tls_key.as_ref(), file.tls_key.as_ref());
    merge(&mut args.namespace, cli.namespace.as_ref(), file.namespace.as_ref());
    merge(
        &mut args.self_update,
        cli.self_update.as_ref(),
        file.self_update.as_ref(),
    );
    merge(
        &mut args.enable_global_resources,
        cli.enable_global_resources.as_ref(),
        file.enable_global_resources.as_ref(),
    );
    merge(
        &mut args.enable_pipeline_instances,
        cli.enable_pipeline_instances.as_ref(),
        file.enable_pipeline_instances.as_ref(),
    );
    merge(
        &mut args.influxdb_retention,
        cli.influxdb_retention_period.as_ref(),
        file.influxdb_retention_period.as_ref(),
    );
    merge(&mut args.no_metrics, cli.no_metrics.as_ref(), file.no_metrics.as_ref());

    // CLI tags replace file tags entirely.
    let cli_tags = (!cli.tags.is_empty()).then_some(&cli.tags);
    merge(&mut args.tags, cli_tags, file.add_tag.as_ref());
}

fn resolve_sizing(args: &mut DeployArgs, cli: &DeployCli, file: &DeploySection) {
    merge(&mut args.worker_count, cli.workers.as_ref(), file.workers.as_ref());
    merge(
        &mut args.worker_size,
        cli.worker_size.as_ref(),
        file.worker_size.as_ref(),
    );
    merge(
        &mut args.worker_type,
        cli.worker_type.as_ref(),
        file.worker_type.as_ref(),
    );
    merge(&mut args.web_size, cli.web_size.as_ref(), file.web_size.as_ref());
    merge(
        &mut args.persistent_disk_size,
        cli.persistent_disk.as_ref(),
        file.persistent_disk.as_ref(),
    );
    merge(&mut args.db_size, cli.db_size.as_ref(), file.db_size.as_ref());
    merge(
        &mut args.rds_disk_encryption,
        cli.rds_disk_encryption.as_ref(),
        file.rds_disk_encryption.as_ref(),
    );
    merge(&mut args.spot, cli.spot.as_ref(), file.spot.as_ref());
}

fn resolve_auth(args: &mut DeployArgs, cli: &DeployCli, file: &DeploySection) {
    merge(
        &mut args.bitbucket_auth_client_id,
        cli.bitbucket_auth_client_id.as_ref(),
        file.bitbucket_auth_client_id.as_ref(),
    );
    merge(
        &mut args.bitbucket_auth_client_secret,
        cli.bitbucket_auth_client_secret.as_ref(),
        file.bitbucket_auth_client_secret.as_ref(),
    );
    merge(
        &mut args.github_auth_client_id,
        cli.github_auth_client_id.as_ref(),
        file.github_auth_client_id.as_ref(),
    );
    merge(
        &mut args.github_auth_client_secret,
        cli.github_auth_client_secret.as_ref(),
        file.github_auth_client_secret.as_ref(),
    );
    merge(
        &mut args.github_auth_host,
        cli.github_auth_host.as_ref(),
        file.github_auth_host.as_ref(),
    );
    merge(
        &mut args.github_auth_ca_cert,
        cli.github_auth_ca_cert.as_ref(),
        file.github_auth_ca_cert.as_ref(),
    );
    merge(
        &mut args.main_github_users,
        cli.main_team_github_users.as_ref(),
        file.main_team_github_users.as_ref(),
    );
    merge(
        &mut args.main_github_teams,
        cli.main_team_github_teams.as_ref(),
        file.main_team_github_teams.as_ref(),
    );
    merge(
        &mut args.main_github_orgs,
        cli.main_team_github_orgs.as_ref(),
        file.main_team_github_orgs.as_ref(),
    );
    merge(
        &mut args.microsoft_auth_client_id,
        cli.microsoft_auth_client_id.as_ref(),
        file.microsoft_auth_client_id.as_ref(),
    );
    merge(
        &mut args.microsoft_auth_client_secret,
        cli.microsoft_auth_client_secret.as_ref(),
        file.microsoft_auth_client_secret.as_ref(),
    );
    merge(
        &mut args.microsoft_auth_tenant,
        cli.microsoft_auth_tenant.as_ref(),
        file.microsoft_auth_tenant.as_ref(),
    );
}

fn resolve_network(args: &mut DeployArgs, cli: &DeployCli, file: &DeploySection) {
    merge(&mut args.allow_ips, cli.allow_ips.as_ref(), file.allow_ips.as_ref());
    merge(
        &mut args.network_cidr,
        cli.vpc_network_range.as_ref(),
        file.vpc_network_range.as_ref(),
    );
    merge(
        &mut args.public_cidr,
        cli.public_subnet_range.as_ref(),
        file.public_subnet_range.as_ref(),
    );
    merge(
        &mut args.private_cidr,
        cli.private_subnet_range.as_ref(),
        file.private_subnet_range.as_ref(),
    );
    merge(
        &mut args.rds1_cidr,
        cli.rds_subnet_range1.as_ref(),
        file.rds_subnet_range1.as_ref(),
    );
    merge(
        &mut args.rds2_cidr,
        cli.rds_subnet_range2.as_ref(),
        file.rds_subnet_range2.as_ref(),
    );
}

// Priority: CLI explicit > TOML > default already in `target`
fn merge<T: Clone>(target: &mut T, cli: Option<&T>, toml: Option<&T>) {
    if let Some(value) = cli.or(toml) {
        *target = value.clone();
    }
}
