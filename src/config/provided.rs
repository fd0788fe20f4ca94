//! Which deployment flags the user explicitly provided.
//!
//! A flag counts as provided when it was passed on the command line or its
//! key appears in the config file's `[deploy]` table. Defaults never count.

use std::collections::BTreeSet;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::deploy::FlagSetChecker;

/// Snapshot of provided flags for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvidedFlags {
    names: Vec<String>,
    provided: BTreeSet<String>,
}

impl ProvidedFlags {
    /// Collects provided flags from the deploy subcommand and config file keys.
    ///
    /// `command` is the clap definition whose long flags form the name list.
    /// Config keys that are not already a long flag (e.g. aliases) are
    /// appended to the list so the flag table still sees them.
    #[must_use]
    pub fn collect<'a>(
        command: &clap::Command,
        matches: &ArgMatches,
        config_keys: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut flags = Self::default();

        for arg in command.get_arguments() {
            if is_builtin(arg) {
                continue;
            }
            let Some(long) = arg.get_long() else {
                continue;
            };

            flags.names.push(long.to_string());
            if matches.value_source(arg.get_id().as_str()) == Some(ValueSource::CommandLine) {
                flags.provided.insert(long.to_string());
            }
        }

        for key in config_keys {
            if !flags.names.iter().any(|name| name == key) {
                flags.names.push(key.to_string());
            }
            flags.provided.insert(key.to_string());
        }

        flags
    }

    /// Returns the provided flag names, sorted.
    pub fn provided(&self) -> impl Iterator<Item = &str> {
        self.provided.iter().map(String::as_str)
    }
}

impl FlagSetChecker for ProvidedFlags {
    fn flag_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn is_set(&self, name: &str) -> bool {
        self.provided.contains(name)
    }
}

fn is_builtin(arg: &clap::Arg) -> bool {
    matches!(
        arg.get_action(),
        clap::ArgAction::Help
            | clap::ArgAction::HelpShort
            | clap::ArgAction::HelpLong
            | clap::ArgAction::Version
    )
}
