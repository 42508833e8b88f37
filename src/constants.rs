//! Global constants used throughout the samcheck codebase.
//!
//! This module contains default file names, SAM property defaults, service
//! limits and pricing figures that are used across multiple modules. Defining
//! them centrally makes magic numbers more discoverable.

/// Template file name used when no `--template` path is given.
pub const DEFAULT_TEMPLATE_FILE: &str = "template.yaml";

/// Placeholder URI substituted for local code locations before translation.
///
/// The translation engine only accepts uploaded artifacts, so local paths are
/// swapped for this value. It never leaves the process.
pub const PLACEHOLDER_S3_URI: &str = "s3://bucket/value";

/// Default Lambda memory size in MB when neither the function nor `Globals` set one.
pub const DEFAULT_MEMORY_SIZE_MB: u32 = 128;

/// Default Lambda timeout in seconds when neither the function nor `Globals` set one.
pub const DEFAULT_TIMEOUT_SECS: u32 = 3;

/// Default regional concurrency limit of an AWS account.
pub const DEFAULT_CONCURRENCY_LIMIT: u32 = 1000;

/// Capacity (percent of the concurrency limit) up to which a function is healthy.
pub const GREEN_CAPACITY_PERCENT: u64 = 70;

/// Capacity (percent of the concurrency limit) below which a function only gets a warning.
pub const YELLOW_CAPACITY_PERCENT: u64 = 90;

/// Number of times a numeric question is asked before giving up.
pub const MAX_PROMPT_ATTEMPTS: usize = 3;

/// Seconds in a 30-day month, used to derive monthly request volume from TPS.
pub const SECONDS_PER_MONTH: u64 = 30 * 24 * 60 * 60;

/// Lambda price per one million requests (USD).
pub const DEFAULT_REQUEST_PRICE_PER_MILLION: f64 = 0.20;

/// Lambda compute price per GB-second on x86_64 (USD).
pub const DEFAULT_GB_SECOND_PRICE_X86: f64 = 0.000_016_666_7;

/// Lambda compute price per GB-second on arm64 (USD).
pub const DEFAULT_GB_SECOND_PRICE_ARM: f64 = 0.000_013_333_4;
