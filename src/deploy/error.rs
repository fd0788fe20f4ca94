//! Error type for deployment flag validation.

use thiserror::Error;

/// The first rule violation found while marking or validating deployment flags.
///
/// Validation is fail-fast: exactly one of these is produced per attempt,
/// and it is terminal for the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A flag name has no entry in the flag table.
    #[error("flag {flag:?} is not supported by deployment flags")]
    UnsupportedFlag {
        /// The unrecognised flag name
        flag: String,
    },

    /// A mandatory flag was not provided.
    #[error("--{flag} flag not set")]
    MissingRequired {
        /// Name of the missing flag
        flag: &'static str,
    },

    /// One part of a group of flags was provided without the others.
    #[error("--{subject} requires {} to also be provided", flag_list(.requires))]
    MissingRequiredCompanion {
        /// The flag that was provided
        subject: &'static str,
        /// Flags that must accompany it
        requires: Vec<&'static str>,
    },

    /// A value is outside its permitted set.
    #[error("unknown {field}: `{value}`. Valid values are: {allowed:?}")]
    InvalidEnumValue {
        /// Human-readable name of the field
        field: &'static str,
        /// The rejected value
        value: String,
        /// Permitted values, in presentation order
        allowed: &'static [&'static str],
    },

    /// A value failed a structural check.
    #[error("invalid value{} for --{flag}: {reason}", quoted(.value))]
    InvalidFormat {
        /// Flag carrying the value
        flag: &'static str,
        /// The offending value, when it is short enough to echo back
        value: Option<String>,
        /// What was expected
        reason: &'static str,
    },

    /// Two flags were provided that cannot be combined.
    #[error("--{first} is invalid when used with --{second}")]
    MutuallyExclusive {
        /// First flag
        first: &'static str,
        /// Second flag
        second: &'static str,
    },

    /// A numeric value is below its minimum.
    #[error("minimum value for --{flag} is {minimum}")]
    BelowMinimum {
        /// Flag carrying the value
        flag: &'static str,
        /// Smallest accepted value
        minimum: u32,
    },

    /// A flag is only meaningful on one infrastructure provider.
    #[error("--{flag} is only defined on {iaas}")]
    IaasRestricted {
        /// The restricted flag
        flag: &'static str,
        /// Provider the flag applies to
        iaas: &'static str,
    },
}

impl ValidationError {
    /// Creates an `InvalidFormat` error that echoes the offending value.
    #[must_use]
    pub fn invalid_format(flag: &'static str, value: &str, reason: &'static str) -> Self {
        Self::InvalidFormat {
            flag,
            value: Some(value.to_string()),
            reason,
        }
    }

    /// Returns the offending value carried by this error, if any.
    #[must_use]
    pub fn offending_value(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFlag { flag } => Some(flag),
            Self::InvalidEnumValue { value, .. } => Some(value),
            Self::InvalidFormat { value, .. } => value.as_deref(),
            _ => None,
        }
    }
}

fn flag_list(flags: &[&str]) -> String {
    flags
        .iter()
        .map(|f| format!("--{f}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn quoted(value: &Option<String>) -> String {
    value
        .as_ref()
        .map_or_else(String::new, |v| format!(" `{v}`"))
}
