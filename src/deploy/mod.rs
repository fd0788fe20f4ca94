//! Deployment flag validation.
//!
//! This module provides:
//! - The flag overlay ([`DeployArgs`]) holding values and explicitly-set status
//! - Explicitly-set tracking ([`ExplicitFlags`], [`FlagSetChecker`])
//! - The ordered validation rules ([`rules`])
//! - Pure format predicates ([`format`])
//! - Defaults and permitted values ([`defaults`])
//!
//! # Flow
//!
//! 1. The caller builds a [`DeployArgs`] with defaults already applied and
//!    user-supplied values overlaid.
//! 2. [`DeployArgs::mark_set_flags`] records which flags were explicitly
//!    provided, according to a [`FlagSetChecker`].
//! 3. [`DeployArgs::validate`] runs the rules in order and returns the first
//!    violation, if any.
//!
//! Only a successfully validated overlay should be handed to manifest
//! generation.
//!
//! # Explicit vs. Non-Empty
//!
//! Some rules look at whether a flag was *explicitly set* (e.g. `--iaas`,
//! `--worker-type`, `--no-metrics`), others at whether its value is
//! *non-empty* (e.g. TLS and GitHub credentials). The distinction matters on
//! reconfiguration, where defaults and inherited values must not trip rules
//! meant for user input.

mod args;
pub mod defaults;
mod error;
mod flags;
pub mod format;
pub mod rules;

#[cfg(test)]
mod test_fixtures;

pub use args::DeployArgs;
pub use error::ValidationError;
pub use flags::{ExplicitFlags, FLAG_TABLE, FlagSetChecker, Param};
