//! Concourse Deploy: deployment flag validation
//!
//! A library for checking the flags of a managed Concourse CI deployment
//! before any infrastructure is provisioned.

pub mod config;
pub mod deploy;
