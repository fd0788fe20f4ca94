//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.
//! Only deployment flags live on the `deploy` subcommand, so its argument
//! list is exactly the set of flags the flag table must recognise.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};

/// Name of the deploy subcommand.
pub const DEPLOY: &str = "deploy";

/// Concourse Deploy: validate and plan a managed Concourse CI deployment
#[derive(Debug, Parser)]
#[command(name = "concourse-deploy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML file with a [deploy] table of flag values
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print the validated deployment as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for concourse-deploy
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate deployment flags and print the resulting plan
    Deploy(DeployCli),

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "concourse-deploy.toml")]
        output: PathBuf,
    },
}

/// Deployment flags.
///
/// Every value is optional so that the config file and built-in defaults
/// can fill in whatever the user did not pass.
#[derive(Debug, Clone, Default, Args)]
pub struct DeployCli {
    /// Deployment name
    pub name: String,

    /// Infrastructure provider (AWS or GCP)
    #[arg(long)]
    pub iaas: Option<String>,

    /// Provider region
    #[arg(long)]
    pub region: Option<String>,

    /// Availability zone
    #[arg(long)]
    pub zone: Option<String>,

    /// Domain for the web node
    #[arg(long)]
    pub domain: Option<String>,

    /// TLS certificate (PEM) for the domain
    #[arg(long = "tls-cert")]
    pub tls_cert: Option<String>,

    /// TLS private key (PEM) for the domain
    #[arg(long = "tls-key")]
    pub tls_key: Option<String>,

    /// Number of worker VMs
    #[arg(long = "workers")]
    pub workers: Option<u32>,

    /// Worker VM size
    #[arg(long = "worker-size")]
    pub worker_size: Option<String>,

    /// AWS worker instance family (m4, m5, m5a)
    #[arg(long = "worker-type")]
    pub worker_type: Option<String>,

    /// Web node VM size
    #[arg(long = "web-size")]
    pub web_size: Option<String>,

    /// Worker persistent disk size
    #[arg(long = "persistent-disk")]
    pub persistent_disk: Option<String>,

    /// Database instance size
    #[arg(long = "db-size")]
    pub db_size: Option<String>,

    /// Let the deployment update itself
    #[arg(long = "self-update", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub self_update: Option<bool>,

    /// Encrypt the database disk
    #[arg(long = "rds-disk-encryption", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub rds_disk_encryption: Option<bool>,

    /// Share resource checks across pipelines
    #[arg(long = "enable-global-resources", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub enable_global_resources: Option<bool>,

    /// Allow pipeline instances
    #[arg(long = "enable-pipeline-instances", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub enable_pipeline_instances: Option<bool>,

    /// Metrics retention period
    #[arg(long = "influxdb-retention-period")]
    pub influxdb_retention_period: Option<String>,

    /// Disable the metrics stack
    #[arg(long = "no-metrics", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub no_metrics: Option<bool>,

    /// Namespace for secrets and state
    #[arg(long)]
    pub namespace: Option<String>,

    /// Source ranges allowed to reach the web node
    #[arg(long = "allow-ips")]
    pub allow_ips: Option<String>,

    /// Use spot/preemptible workers
    #[arg(long, visible_alias = "preemptible", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub spot: Option<bool>,

    /// Resource tag in 'key=value' format (can be specified multiple times)
    #[arg(long = "add-tag", value_name = "KEY=VALUE")]
    pub tags: Vec<String>,

    /// Bitbucket OAuth client id
    #[arg(long = "bitbucket-auth-client-id")]
    pub bitbucket_auth_client_id: Option<String>,

    /// Bitbucket OAuth client secret
    #[arg(long = "bitbucket-auth-client-secret")]
    pub bitbucket_auth_client_secret: Option<String>,

    /// GitHub OAuth client id
    #[arg(long = "github-auth-client-id")]
    pub github_auth_client_id: Option<String>,

    /// GitHub OAuth client secret
    #[arg(long = "github-auth-client-secret")]
    pub github_auth_client_secret: Option<String>,

    /// GitHub Enterprise host, without protocol
    #[arg(long = "github-auth-host")]
    pub github_auth_host: Option<String>,

    /// GitHub Enterprise CA certificate (PEM)
    #[arg(long = "github-auth-ca-cert")]
    pub github_auth_ca_cert: Option<String>,

    /// Comma-separated GitHub users in the main team
    #[arg(long = "main-team-github-users")]
    pub main_team_github_users: Option<String>,

    /// Comma-separated 'org:team' entries in the main team
    #[arg(long = "main-team-github-teams")]
    pub main_team_github_teams: Option<String>,

    /// Comma-separated GitHub organizations in the main team
    #[arg(long = "main-team-github-orgs")]
    pub main_team_github_orgs: Option<String>,

    /// Microsoft OAuth client id
    #[arg(long = "microsoft-auth-client-id")]
    pub microsoft_auth_client_id: Option<String>,

    /// Microsoft OAuth client secret
    #[arg(long = "microsoft-auth-client-secret")]
    pub microsoft_auth_client_secret: Option<String>,

    /// Microsoft tenant
    #[arg(long = "microsoft-auth-tenant")]
    pub microsoft_auth_tenant: Option<String>,

    /// VPC network range
    #[arg(long = "vpc-network-range")]
    pub vpc_network_range: Option<String>,

    /// Public subnet range
    #[arg(long = "public-subnet-range")]
    pub public_subnet_range: Option<String>,

    /// Private subnet range
    #[arg(long = "private-subnet-range")]
    pub private_subnet_range: Option<String>,

    /// First database subnet range
    #[arg(long = "rds-subnet-range1")]
    pub rds_subnet_range1: Option<String>,

    /// Second database subnet range
    #[arg(long = "rds-subnet-range2")]
    pub rds_subnet_range2: Option<String>,
}

impl DeployCli {
    /// Returns the clap definition of the deploy subcommand.
    #[must_use]
    pub fn command() -> clap::Command {
        Self::augment_args(clap::Command::new(DEPLOY))
    }
}

/// Parsed CLI together with the raw matches, which remember where each
/// value came from.
#[derive(Debug)]
pub struct Invocation {
    /// Typed arguments
    pub cli: Cli,
    matches: ArgMatches,
}

impl Invocation {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::from_matches(Cli::command().get_matches())
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_matches(Cli::command().get_matches_from(iter))
    }

    /// Parses CLI arguments from an iterator, returning parse errors.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown flags or malformed values.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Cli::command().try_get_matches_from(iter)?;
        let cli = Cli::from_arg_matches(&matches)?;
        Ok(Self { cli, matches })
    }

    fn from_matches(matches: ArgMatches) -> Self {
        let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
        Self { cli, matches }
    }

    /// Returns the deploy arguments and their matches, if this is a deploy.
    #[must_use]
    pub fn deploy(&self) -> Option<(&DeployCli, &ArgMatches)> {
        match &self.cli.command {
            Command::Deploy(deploy) => self
                .matches
                .subcommand_matches(DEPLOY)
                .map(|matches| (deploy, matches)),
            Command::Init { .. } => None,
        }
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.cli.command, Command::Init { .. })
    }
}
