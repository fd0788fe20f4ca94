//! Shared test fixtures for deployment flag tests.

use super::{DeployArgs, FLAG_TABLE, FlagSetChecker};

/// Flag checker backed by fixed name lists.
pub struct FixedFlags {
    names: Vec<String>,
    set: Vec<String>,
}

impl FixedFlags {
    /// Every flag in the table is known; only `set` were provided.
    pub fn provided(set: &[&str]) -> Self {
        Self {
            names: FLAG_TABLE.iter().map(|(name, _)| (*name).to_string()).collect(),
            set: set.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Only `names` are known; `set` were provided.
    pub fn new(names: &[&str], set: &[&str]) -> Self {
        Self {
            names: names.iter().map(|s| (*s).to_string()).collect(),
            set: set.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl FlagSetChecker for FixedFlags {
    fn flag_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn is_set(&self, name: &str) -> bool {
        self.set.iter().any(|s| s == name)
    }
}

/// Builds args on AWS with `configure` applied and `set` (plus `iaas`) marked.
pub fn aws_args(set: &[&str], configure: impl FnOnce(&mut DeployArgs)) -> DeployArgs {
    let mut args = DeployArgs::default();
    args.iaas = "AWS".to_string();
    configure(&mut args);

    let mut provided = vec!["iaas"];
    provided.extend_from_slice(set);
    args.mark_set_flags(&FixedFlags::provided(&provided)).unwrap();
    args
}

/// A minimal valid PEM block.
pub const CA_CERT: &str = "-----BEGIN CERTIFICATE-----\n\
MIIBszCCAVmgAwIBAgIUVGVzdA==\n\
-----END CERTIFICATE-----\n";
