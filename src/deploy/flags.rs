//! Explicitly-set tracking for deployment flags.
//!
//! The parser collaborator only answers "was this flag provided?". This
//! module turns those answers into an [`ExplicitFlags`] set through a static
//! name table, and derives the composite "feature configured" flags from it.
//!
//! # Design
//!
//! - **Fail-closed table**: every name the [`FlagSetChecker`] reports must
//!   appear in [`FLAG_TABLE`]. A flag added to the parser without a table
//!   entry surfaces as [`ValidationError::UnsupportedFlag`] instead of being
//!   silently ignored.
//! - **Derived flags are computed**: [`ExplicitFlags::github_auth`] and
//!   friends are read from the primitive set on every call, so they can
//!   never go stale or be set on their own.

use std::fmt;

use super::error::ValidationError;

/// Answers which flags exist and which of them the user provided.
///
/// Implemented by the CLI layer over clap matches; tests use fixed lists.
pub trait FlagSetChecker {
    /// All flag names the user could have provided, in declaration order.
    fn flag_names(&self) -> Vec<String>;

    /// Returns `true` if the user explicitly provided `name`.
    fn is_set(&self, name: &str) -> bool;
}

/// A deployment parameter that can be explicitly set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Param {
    Iaas,
    Region,
    Domain,
    TlsCert,
    TlsKey,
    WorkerCount,
    WorkerSize,
    WorkerType,
    WebSize,
    PersistentDisk,
    DbSize,
    SelfUpdate,
    RdsDiskEncryption,
    EnableGlobalResources,
    EnablePipelineInstances,
    InfluxDbRetention,
    Namespace,
    AllowIps,
    BitbucketAuthClientId,
    BitbucketAuthClientSecret,
    GithubAuthClientId,
    GithubAuthClientSecret,
    GithubAuthHost,
    GithubAuthCaCert,
    MainGithubUsers,
    MainGithubTeams,
    MainGithubOrgs,
    MicrosoftAuthClientId,
    MicrosoftAuthClientSecret,
    MicrosoftAuthTenant,
    NoMetrics,
    Tags,
    Spot,
    Zone,
    NetworkCidr,
    PublicCidr,
    PrivateCidr,
    Rds1Cidr,
    Rds2Cidr,
}

/// Flag name to parameter mapping. Several names may map to one parameter.
pub const FLAG_TABLE: &[(&str, Param)] = &[
    ("iaas", Param::Iaas),
    ("region", Param::Region),
    ("domain", Param::Domain),
    ("tls-cert", Param::TlsCert),
    ("tls-key", Param::TlsKey),
    ("workers", Param::WorkerCount),
    ("worker-size", Param::WorkerSize),
    ("worker-type", Param::WorkerType),
    ("web-size", Param::WebSize),
    ("persistent-disk", Param::PersistentDisk),
    ("db-size", Param::DbSize),
    ("self-update", Param::SelfUpdate),
    ("rds-disk-encryption", Param::RdsDiskEncryption),
    ("enable-global-resources", Param::EnableGlobalResources),
    ("enable-pipeline-instances", Param::EnablePipelineInstances),
    ("influxdb-retention-period", Param::InfluxDbRetention),
    ("namespace", Param::Namespace),
    ("allow-ips", Param::AllowIps),
    ("bitbucket-auth-client-id", Param::BitbucketAuthClientId),
    ("bitbucket-auth-client-secret", Param::BitbucketAuthClientSecret),
    ("github-auth-client-id", Param::GithubAuthClientId),
    ("github-auth-client-secret", Param::GithubAuthClientSecret),
    ("github-auth-host", Param::GithubAuthHost),
    ("github-auth-ca-cert", Param::GithubAuthCaCert),
    ("main-team-github-users", Param::MainGithubUsers),
    ("main-team-github-teams", Param::MainGithubTeams),
    ("main-team-github-orgs", Param::MainGithubOrgs),
    ("microsoft-auth-client-id", Param::MicrosoftAuthClientId),
    ("microsoft-auth-client-secret", Param::MicrosoftAuthClientSecret),
    ("microsoft-auth-tenant", Param::MicrosoftAuthTenant),
    ("no-metrics", Param::NoMetrics),
    ("add-tag", Param::Tags),
    ("spot", Param::Spot),
    ("preemptible", Param::Spot),
    ("zone", Param::Zone),
    ("vpc-network-range", Param::NetworkCidr),
    ("public-subnet-range", Param::PublicCidr),
    ("private-subnet-range", Param::PrivateCidr),
    ("rds-subnet-range1", Param::Rds1Cidr),
    ("rds-subnet-range2", Param::Rds2Cidr),
];

impl Param {
    /// Looks up the parameter for a flag name.
    #[must_use]
    pub fn from_flag_name(name: &str) -> Option<Self> {
        FLAG_TABLE
            .iter()
            .find(|(flag, _)| *flag == name)
            .map(|(_, param)| *param)
    }

    /// Returns the primary flag name for this parameter.
    #[must_use]
    pub fn flag_name(self) -> &'static str {
        FLAG_TABLE
            .iter()
            .find(|(_, param)| *param == self)
            .map_or("unknown", |(flag, _)| flag)
    }

    const fn bit(self) -> u64 {
        1 << (self as u8)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.flag_name())
    }
}

/// The set of parameters the user explicitly provided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitFlags {
    bits: u64,
}

impl ExplicitFlags {
    /// Creates an empty set (everything left at its default).
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Builds the set from a flag-presence capability.
    ///
    /// Every name reported by `checker` is looked up in [`FLAG_TABLE`],
    /// whether or not it was provided.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedFlag`] for the first name with
    /// no table entry.
    pub fn from_checker(checker: &impl FlagSetChecker) -> Result<Self, ValidationError> {
        let mut flags = Self::new();

        for name in checker.flag_names() {
            let param = Param::from_flag_name(&name)
                .ok_or_else(|| ValidationError::UnsupportedFlag { flag: name.clone() })?;

            if checker.is_set(&name) {
                tracing::trace!(flag = %name, "Flag explicitly set");
                flags.mark(param);
            }
        }

        Ok(flags)
    }

    /// Marks a parameter as explicitly set.
    pub const fn mark(&mut self, param: Param) {
        self.bits |= param.bit();
    }

    /// Returns `true` if `param` was explicitly set.
    #[must_use]
    pub const fn is_set(self, param: Param) -> bool {
        self.bits & param.bit() != 0
    }

    /// Returns the number of explicitly set parameters.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.bits.count_ones()
    }

    /// Returns `true` if nothing was explicitly set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the primary flag name of every explicitly set parameter.
    pub fn flag_names(self) -> impl Iterator<Item = &'static str> {
        FLAG_TABLE
            .iter()
            .filter(move |(name, param)| self.is_set(*param) && param.flag_name() == *name)
            .map(|(name, _)| *name)
    }

    /// Both Bitbucket client id and secret were provided.
    #[must_use]
    pub const fn bitbucket_auth(self) -> bool {
        self.is_set(Param::BitbucketAuthClientId) && self.is_set(Param::BitbucketAuthClientSecret)
    }

    /// Both GitHub client id and secret were provided.
    #[must_use]
    pub const fn github_auth(self) -> bool {
        self.is_set(Param::GithubAuthClientId) && self.is_set(Param::GithubAuthClientSecret)
    }

    /// Both GitHub Enterprise host and CA certificate were provided.
    #[must_use]
    pub const fn github_enterprise_auth(self) -> bool {
        self.is_set(Param::GithubAuthHost) && self.is_set(Param::GithubAuthCaCert)
    }

    /// Both Microsoft client id and secret were provided.
    #[must_use]
    pub const fn microsoft_auth(self) -> bool {
        self.is_set(Param::MicrosoftAuthClientId) && self.is_set(Param::MicrosoftAuthClientSecret)
    }

    /// Any of the main-team GitHub users, teams, or orgs was provided.
    #[must_use]
    pub const fn main_team_auth(self) -> bool {
        self.is_set(Param::MainGithubUsers)
            || self.is_set(Param::MainGithubTeams)
            || self.is_set(Param::MainGithubOrgs)
    }
}
