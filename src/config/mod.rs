//! Configuration layer for Concourse Deploy.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`], [`DeployCli`], [`Invocation`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Provided-flag collection ([`ProvidedFlags`])
//! - Validated deployment ([`ValidatedDeploy`])
//! - Configuration file generation ([`write_default_config`])
//!
//! # Priority
//!
//! Deployment values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the `[deploy]` table
//! 3. **Built-in defaults** - See [`crate::deploy::defaults`]
//!
//! Repeated tags (`--add-tag`) on the CLI **replace** the file's `add-tag`
//! list entirely (not merged).
//!
//! # Explicitly Set
//!
//! A flag is explicitly set if it was passed on the command line *or* its
//! key is present in the config file. Built-in defaults are never explicit.
//! Several validation rules depend on this distinction, so a value copied
//! from the defaults into the config file *does* count as set.

mod cli;
mod error;
mod provided;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, DEPLOY, DeployCli, Invocation};
pub use error::ConfigError;
pub use provided::ProvidedFlags;
pub use toml::{DeploySection, TomlConfig, default_config_template};
pub use validated::{ValidatedDeploy, write_default_config};
