//! Cross-field validation rules for deployment flags.
//!
//! Rules run in the fixed order of [`RULES`] and stop at the first failure.
//! Each rule is a pure function of the overlay; callers see exactly one
//! error per attempt.

use super::args::DeployArgs;
use super::defaults;
use super::error::ValidationError;
use super::flags::Param;
use super::format;

/// A named validation rule.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short name used in logs
    pub name: &'static str,
    check: fn(&DeployArgs) -> Result<(), ValidationError>,
}

impl Rule {
    /// Applies the rule to `args`.
    ///
    /// # Errors
    ///
    /// Returns the violation found by this rule.
    pub fn check(&self, args: &DeployArgs) -> Result<(), ValidationError> {
        (self.check)(args)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Every rule, in execution order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "iaas",
        check: check_iaas,
    },
    Rule {
        name: "cert",
        check: check_cert,
    },
    Rule {
        name: "worker",
        check: check_worker,
    },
    Rule {
        name: "web",
        check: check_web,
    },
    Rule {
        name: "persistent-disk",
        check: check_persistent_disk,
    },
    Rule {
        name: "db",
        check: check_db,
    },
    Rule {
        name: "github-auth",
        check: check_github_auth,
    },
    Rule {
        name: "network-ranges",
        check: check_network_ranges,
    },
    Rule {
        name: "tags",
        check: check_tags,
    },
    Rule {
        name: "main-team-auth",
        check: check_main_team_auth,
    },
];

/// Runs [`RULES`] against `args`, returning the first violation.
///
/// # Errors
///
/// Returns the error of the first failing rule.
pub fn validate(args: &DeployArgs) -> Result<(), ValidationError> {
    for rule in RULES {
        tracing::trace!(rule = rule.name, "Running validation rule");
        if let Err(e) = rule.check(args) {
            tracing::debug!(rule = rule.name, error = %e, "Validation failed");
            return Err(e);
        }
    }
    Ok(())
}

fn check_iaas(args: &DeployArgs) -> Result<(), ValidationError> {
    if args.explicit().is_set(Param::Iaas) {
        Ok(())
    } else {
        Err(ValidationError::MissingRequired { flag: "iaas" })
    }
}

fn check_cert(args: &DeployArgs) -> Result<(), ValidationError> {
    let has_key = !args.tls_key.is_empty();
    let has_cert = !args.tls_cert.is_empty();

    if has_key && !has_cert {
        return Err(ValidationError::MissingRequiredCompanion {
            subject: "tls-key",
            requires: vec!["tls-cert"],
        });
    }
    if has_cert && !has_key {
        return Err(ValidationError::MissingRequiredCompanion {
            subject: "tls-cert",
            requires: vec!["tls-key"],
        });
    }
    if (has_key || has_cert) && args.domain.is_empty() {
        return Err(ValidationError::MissingRequiredCompanion {
            subject: "tls-cert",
            requires: vec!["domain"],
        });
    }
    Ok(())
}

fn check_worker(args: &DeployArgs) -> Result<(), ValidationError> {
    if args.worker_count < defaults::MIN_WORKER_COUNT {
        return Err(ValidationError::BelowMinimum {
            flag: "workers",
            minimum: defaults::MIN_WORKER_COUNT,
        });
    }

    if args.explicit().is_set(Param::WorkerType) {
        if !args.iaas.eq_ignore_ascii_case(defaults::WORKER_TYPE_IAAS) {
            return Err(ValidationError::IaasRestricted {
                flag: "worker-type",
                iaas: defaults::WORKER_TYPE_IAAS,
            });
        }
        if !format::is_worker_type(&args.worker_type) {
            return Err(ValidationError::InvalidEnumValue {
                field: "worker type",
                value: args.worker_type.clone(),
                allowed: defaults::WORKER_TYPES,
            });
        }
    }

    check_member("worker size", &args.worker_size, defaults::WORKER_SIZES)
}

fn check_web(args: &DeployArgs) -> Result<(), ValidationError> {
    let explicit = args.explicit();
    let metrics_disabled = explicit.is_set(Param::NoMetrics) && args.no_metrics;
    if metrics_disabled && explicit.is_set(Param::InfluxDbRetention) {
        return Err(ValidationError::MutuallyExclusive {
            first: "no-metrics",
            second: "influxdb-retention-period",
        });
    }

    check_member("web node size", &args.web_size, defaults::WEB_SIZES)
}

fn check_persistent_disk(args: &DeployArgs) -> Result<(), ValidationError> {
    check_member(
        "persistent disk size",
        &args.persistent_disk_size,
        defaults::PERSISTENT_DISK_SIZES,
    )
}

fn check_db(args: &DeployArgs) -> Result<(), ValidationError> {
    check_member("DB size", &args.db_size, defaults::DB_SIZES)
}

fn check_github_auth(args: &DeployArgs) -> Result<(), ValidationError> {
    let has_id = !args.github_auth_client_id.is_empty();
    let has_secret = !args.github_auth_client_secret.is_empty();
    let has_host = !args.github_auth_host.is_empty();
    let has_ca_cert = !args.github_auth_ca_cert.is_empty();
    let explicit = args.explicit();

    if has_id && !has_secret {
        return Err(ValidationError::MissingRequiredCompanion {
            subject: "github-auth-client-id",
            requires: vec!["github-auth-client-secret"],
        });
    }
    if has_secret && !has_id {
        return Err(ValidationError::MissingRequiredCompanion {
            subject: "github-auth-client-secret",
            requires: vec!["github-auth-client-id"],
        });
    }
    if has_host && (!explicit.github_auth() || !has_ca_cert) {
        return Err(ValidationError::MissingRequiredCompanion {
            subject: "github-auth-host",
            requires: vec![
                "github-auth-ca-cert",
                "github-auth-client-id",
                "github-auth-client-secret",
            ],
        });
    }
    if has_ca_cert && (!explicit.github_auth() || !has_host) {
        return Err(ValidationError::MissingRequiredCompanion {
            subject: "github-auth-ca-cert",
            requires: vec![
                "github-auth-host",
                "github-auth-client-id",
                "github-auth-client-secret",
            ],
        });
    }

    if explicit.github_enterprise_auth() {
        if !format::is_pem_decodable(&args.github_auth_ca_cert) {
            return Err(ValidationError::InvalidFormat {
                flag: "github-auth-ca-cert",
                value: None,
                reason: "unable to decode value, provide a CA certificate in PEM format",
            });
        }
        if !format::is_dns_name(&args.github_auth_host) {
            return Err(ValidationError::invalid_format(
                "github-auth-host",
                &args.github_auth_host,
                "must be a valid DNS address (omitting protocol)",
            ));
        }
    }
    Ok(())
}

fn check_network_ranges(args: &DeployArgs) -> Result<(), ValidationError> {
    let missing = format::missing_pair_half(
        (Param::PublicCidr, args.public_cidr.as_str()),
        (Param::PrivateCidr, args.private_cidr.as_str()),
    );

    match missing {
        Some((present, absent)) => Err(ValidationError::MissingRequiredCompanion {
            subject: present.flag_name(),
            requires: vec![absent.flag_name()],
        }),
        None => Ok(()),
    }
}

fn check_tags(args: &DeployArgs) -> Result<(), ValidationError> {
    match args.tags.iter().find(|tag| !format::is_tag(tag)) {
        Some(tag) => Err(ValidationError::invalid_format(
            "add-tag",
            tag,
            "not in the format `key=value`",
        )),
        None => Ok(()),
    }
}

// Partial check against Concourse's main-team format and GitHub's naming
// limits; catches typos, not every name GitHub would refuse.
fn check_main_team_auth(args: &DeployArgs) -> Result<(), ValidationError> {
    let explicit = args.explicit();
    if !explicit.main_team_auth() {
        return Ok(());
    }

    if explicit.is_set(Param::MainGithubUsers) {
        check_github_names("main-team-github-users", &args.main_github_users)?;
    }
    if explicit.is_set(Param::MainGithubOrgs) {
        check_github_names("main-team-github-orgs", &args.main_github_orgs)?;
    }
    if explicit.is_set(Param::MainGithubTeams) {
        check_github_teams(&args.main_github_teams)?;
    }
    Ok(())
}

fn check_github_names(flag: &'static str, list: &str) -> Result<(), ValidationError> {
    match list
        .split(',')
        .find(|name| !format::is_github_name(name.trim()))
    {
        Some(name) => Err(ValidationError::invalid_format(
            flag,
            name,
            "not a valid GitHub name",
        )),
        None => Ok(()),
    }
}

fn check_github_teams(list: &str) -> Result<(), ValidationError> {
    const FLAG: &str = "main-team-github-teams";

    for entry in list.split(',') {
        let parts: Vec<&str> = entry.split(':').collect();
        let org = parts[0].trim();

        let [_, team] = parts.as_slice() else {
            return Err(ValidationError::invalid_format(
                FLAG,
                org,
                "team must be given as `org:team`",
            ));
        };
        if !format::is_github_name(org) {
            return Err(ValidationError::invalid_format(
                FLAG,
                org,
                "not a valid GitHub organization",
            ));
        }
        if !format::is_github_team(team.trim()) {
            return Err(ValidationError::invalid_format(
                FLAG,
                entry,
                "not a valid GitHub team",
            ));
        }
    }
    Ok(())
}

fn check_member(
    field: &'static str,
    value: &str,
    allowed: &'static [&'static str],
) -> Result<(), ValidationError> {
    if format::is_member(value, allowed) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEnumValue {
            field,
            value: value.to_string(),
            allowed,
        })
    }
}
