//! The deployment flag overlay: current values plus explicitly-set status.

use std::fmt;

use serde::{Serialize, Serializer};

use super::defaults;
use super::error::ValidationError;
use super::flags::{ExplicitFlags, FlagSetChecker};
use super::rules;

/// Values for every deployment flag, with defaults already applied, and a
/// record of which flags the user explicitly provided.
///
/// Built once per invocation. After [`DeployArgs::mark_set_flags`] it is
/// treated as read-only input to [`DeployArgs::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)] // Deployment toggles are naturally boolean
pub struct DeployArgs {
    /// Target infrastructure provider (`AWS` or `GCP`)
    pub iaas: String,
    /// Provider region
    pub region: String,
    /// Domain for the Concourse web node
    pub domain: String,
    /// Custom TLS certificate (PEM)
    #[serde(serialize_with = "redact")]
    pub tls_cert: String,
    /// Custom TLS private key (PEM)
    #[serde(serialize_with = "redact")]
    pub tls_key: String,
    /// Number of worker VMs
    pub worker_count: u32,
    /// Worker VM size
    pub worker_size: String,
    /// AWS worker instance family
    pub worker_type: String,
    /// Web node VM size
    pub web_size: String,
    /// Worker persistent disk size
    pub persistent_disk_size: String,
    /// Database instance size
    pub db_size: String,
    /// Let the deployment update itself
    pub self_update: bool,
    /// Encrypt the database disk
    pub rds_disk_encryption: bool,
    /// Share resource checks across pipelines
    pub enable_global_resources: bool,
    /// Allow pipeline instances
    pub enable_pipeline_instances: bool,
    /// Metrics retention period
    pub influxdb_retention: String,
    /// Namespace for secrets and state
    pub namespace: String,
    /// Source ranges allowed to reach the web node
    pub allow_ips: String,
    /// Bitbucket OAuth client id
    pub bitbucket_auth_client_id: String,
    /// Bitbucket OAuth client secret
    #[serde(serialize_with = "redact")]
    pub bitbucket_auth_client_secret: String,
    /// GitHub OAuth client id
    pub github_auth_client_id: String,
    /// GitHub OAuth client secret
    #[serde(serialize_with = "redact")]
    pub github_auth_client_secret: String,
    /// GitHub Enterprise host (no scheme)
    pub github_auth_host: String,
    /// GitHub Enterprise CA certificate (PEM)
    #[serde(serialize_with = "redact")]
    pub github_auth_ca_cert: String,
    /// Comma-separated GitHub users in the main team
    pub main_github_users: String,
    /// Comma-separated `org:team` entries in the main team
    pub main_github_teams: String,
    /// Comma-separated GitHub organizations in the main team
    pub main_github_orgs: String,
    /// Microsoft OAuth client id
    pub microsoft_auth_client_id: String,
    /// Microsoft OAuth client secret
    #[serde(serialize_with = "redact")]
    pub microsoft_auth_client_secret: String,
    /// Microsoft tenant
    pub microsoft_auth_tenant: String,
    /// Disable the metrics stack
    pub no_metrics: bool,
    /// `key=value` resource tags
    pub tags: Vec<String>,
    /// Use spot/preemptible workers
    pub spot: bool,
    /// Availability zone
    pub zone: String,
    /// VPC network range
    pub network_cidr: String,
    /// Public subnet range
    pub public_cidr: String,
    /// Private subnet range
    pub private_cidr: String,
    /// First database subnet range
    pub rds1_cidr: String,
    /// Second database subnet range
    pub rds2_cidr: String,

    #[serde(skip)]
    explicit: ExplicitFlags,
}

impl Default for DeployArgs {
    fn default() -> Self {
        Self {
            iaas: String::new(),
            region: String::new(),
            domain: String::new(),
            tls_cert: String::new(),
            tls_key: String::new(),
            worker_count: defaults::WORKER_COUNT,
            worker_size: defaults::WORKER_SIZE.to_string(),
            worker_type: defaults::WORKER_TYPE.to_string(),
            web_size: defaults::WEB_SIZE.to_string(),
            persistent_disk_size: defaults::PERSISTENT_DISK_SIZE.to_string(),
            db_size: defaults::DB_SIZE.to_string(),
            self_update: false,
            rds_disk_encryption: defaults::RDS_DISK_ENCRYPTION,
            enable_global_resources: false,
            enable_pipeline_instances: false,
            influxdb_retention: defaults::INFLUXDB_RETENTION.to_string(),
            namespace: String::new(),
            allow_ips: defaults::ALLOW_IPS.to_string(),
            bitbucket_auth_client_id: String::new(),
            bitbucket_auth_client_secret: String::new(),
            github_auth_client_id: String::new(),
            github_auth_client_secret: String::new(),
            github_auth_host: String::new(),
            github_auth_ca_cert: String::new(),
            main_github_users: String::new(),
            main_github_teams: String::new(),
            main_github_orgs: String::new(),
            microsoft_auth_client_id: String::new(),
            microsoft_auth_client_secret: String::new(),
            microsoft_auth_tenant: String::new(),
            no_metrics: false,
            tags: Vec::new(),
            spot: defaults::SPOT,
            zone: String::new(),
            network_cidr: String::new(),
            public_cidr: String::new(),
            private_cidr: String::new(),
            rds1_cidr: String::new(),
            rds2_cidr: String::new(),
            explicit: ExplicitFlags::new(),
        }
    }
}

impl DeployArgs {
    /// Records which flags the user explicitly provided.
    ///
    /// Replaces any previously recorded flags. On error the recorded flags
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedFlag`] if `checker` reports a
    /// flag name with no entry in the flag table.
    pub fn mark_set_flags(&mut self, checker: &impl FlagSetChecker) -> Result<(), ValidationError> {
        self.explicit = ExplicitFlags::from_checker(checker)?;
        tracing::debug!(count = self.explicit.len(), "Marked explicitly set flags");
        Ok(())
    }

    /// Runs every validation rule in order and returns the first violation.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        rules::validate(self)
    }

    /// Returns the explicitly-set flags, including the derived ones.
    #[must_use]
    pub const fn explicit(&self) -> ExplicitFlags {
        self.explicit
    }
}

impl fmt::Display for DeployArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iaas: {}, region: {}, workers: {}x{}, web: {}, db: {}, disk: {}, domain: {}, \
             custom_cert: {}, spot: {}, tags: {}, explicit_flags: {}",
            self.iaas,
            or_default(&self.region),
            self.worker_count,
            self.worker_size,
            self.web_size,
            self.db_size,
            self.persistent_disk_size,
            or_default(&self.domain),
            !self.tls_cert.is_empty(),
            self.spot,
            self.tags.len(),
            self.explicit.len(),
        )
    }
}

fn or_default(value: &str) -> &str {
    if value.is_empty() { "default" } else { value }
}

#[allow(clippy::ptr_arg)] // serde's `serialize_with` hands us `&String`
fn redact<S: Serializer>(value: &String, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_empty() {
        serializer.serialize_str("")
    } else {
        serializer.serialize_str("<redacted>")
    }
}
