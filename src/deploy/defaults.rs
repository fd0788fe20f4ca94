//! Built-in defaults and permitted values for deployment flags.
//!
//! Centralized constants to avoid magic values scattered across the codebase.
//! The permitted-value lists are ordered; that order is what users see in
//! error messages.

/// Permitted Concourse worker sizes.
pub const WORKER_SIZES: &[&str] = &[
    "medium", "large", "xlarge", "2xlarge", "4xlarge", "12xlarge", "24xlarge",
];

/// Permitted Concourse web node sizes.
pub const WEB_SIZES: &[&str] = &["small", "medium", "large", "xlarge", "2xlarge"];

/// Permitted persistent disk sizes for workers.
pub const PERSISTENT_DISK_SIZES: &[&str] = &["small", "default", "medium", "large"];

/// Permitted database instance sizes.
pub const DB_SIZES: &[&str] = &["small", "medium", "large", "xlarge", "2xlarge", "4xlarge"];

/// Permitted AWS worker instance families.
pub const WORKER_TYPES: &[&str] = &["m4", "m5", "m5a"];

/// The only provider that supports `--worker-type`.
pub const WORKER_TYPE_IAAS: &str = "AWS";

/// Default number of workers.
pub const WORKER_COUNT: u32 = 1;

/// Minimum number of workers.
pub const MIN_WORKER_COUNT: u32 = 1;

/// Default worker size.
pub const WORKER_SIZE: &str = "xlarge";

/// Default worker instance family.
pub const WORKER_TYPE: &str = "m4";

/// Default web node size.
pub const WEB_SIZE: &str = "small";

/// Default persistent disk size.
pub const PERSISTENT_DISK_SIZE: &str = "default";

/// Default database size.
pub const DB_SIZE: &str = "small";

/// Default metrics retention period.
pub const INFLUXDB_RETENTION: &str = "28d";

/// Default source range allowed to reach the web node.
pub const ALLOW_IPS: &str = "0.0.0.0/0";

/// Spot/preemptible workers are used unless disabled.
pub const SPOT: bool = true;

/// Database disk encryption is on unless disabled.
pub const RDS_DISK_ENCRYPTION: bool = true;
