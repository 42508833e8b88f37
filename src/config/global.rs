//! Global configuration management for samcheck.
//!
//! The global configuration lives in `~/.samcheck/config.toml` (or
//! `%LOCALAPPDATA%\samcheck\config.toml` on Windows) and holds user-wide
//! defaults for the check pipeline: session settings, service limits, pricing
//! rates and additional managed policies.
//!
//! # Example
//!
//! ```toml
//! region = "eu-west-1"
//! profile = "dev"
//! concurrency_limit = 3000
//!
//! [pricing]
//! request_price_per_million = 0.20
//! gb_second_price_x86 = 0.0000166667
//! gb_second_price_arm = 0.0000133334
//!
//! [managed_policies]
//! CompanyBaseline = "arn:aws:iam::123456789012:policy/CompanyBaseline"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    DEFAULT_CONCURRENCY_LIMIT, DEFAULT_GB_SECOND_PRICE_ARM, DEFAULT_GB_SECOND_PRICE_X86,
    DEFAULT_REQUEST_PRICE_PER_MILLION,
};
use crate::core::CheckError;

const fn default_concurrency_limit() -> u32 {
    DEFAULT_CONCURRENCY_LIMIT
}

/// Lambda pricing rates used by the cost calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRates {
    /// Price per one million requests (USD).
    pub request_price_per_million: f64,
    /// Compute price per GB-second on x86_64 (USD).
    pub gb_second_price_x86: f64,
    /// Compute price per GB-second on arm64 (USD).
    pub gb_second_price_arm: f64,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self {
            request_price_per_million: DEFAULT_REQUEST_PRICE_PER_MILLION,
            gb_second_price_x86: DEFAULT_GB_SECOND_PRICE_X86,
            gb_second_price_arm: DEFAULT_GB_SECOND_PRICE_ARM,
        }
    }
}

/// Global configuration structure for samcheck.
///
/// Every field is optional in the file; a missing file yields
/// [`GlobalConfig::default`].
///
/// # Examples
///
/// ```rust,no_run
/// use samcheck_cli::config::GlobalConfig;
///
/// let config = GlobalConfig::default();
/// assert_eq!(config.concurrency_limit, 1000);
/// assert!(config.region.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default AWS region when neither `--region` nor `AWS_REGION` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Default credential profile when neither `--profile` nor `AWS_PROFILE` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Account-level concurrent execution limit used by the bottleneck calculation.
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: u32,

    /// Lambda pricing rates.
    #[serde(default)]
    pub pricing: PricingRates,

    /// Extra managed policy names mapped to ARNs, merged over the bundled map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub managed_policies: BTreeMap<String, String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            pricing: PricingRates::default(),
            managed_policies: BTreeMap::new(),
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from an optional path.
    ///
    /// If a path is provided, loads from that path. Otherwise, loads from the
    /// default location. A file that does not exist yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, contains invalid
    /// TOML, or holds values that fail [`GlobalConfig::validate`].
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!("No default config location: {e}");
                    return Ok(Self::default());
                }
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load global configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (permissions, not found, etc.)
    /// - The file contains invalid TOML syntax
    /// - A value is out of range
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| CheckError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that TOML typing alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ConfigError`] for a zero concurrency limit or a
    /// negative price.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency_limit == 0 {
            return Err(CheckError::ConfigError {
                message: "concurrency_limit must be greater than zero".to_string(),
            }
            .into());
        }

        let rates = [
            ("request_price_per_million", self.pricing.request_price_per_million),
            ("gb_second_price_x86", self.pricing.gb_second_price_x86),
            ("gb_second_price_arm", self.pricing.gb_second_price_arm),
        ];
        if let Some((name, _)) = rates.iter().find(|(_, rate)| *rate < 0.0) {
            return Err(CheckError::ConfigError {
                message: format!("pricing.{name} must not be negative"),
            }
            .into());
        }

        Ok(())
    }

    /// Get the default file path for global configuration.
    ///
    /// - **Unix/macOS**: `~/.samcheck/config.toml`
    /// - **Windows**: `%LOCALAPPDATA%\samcheck\config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("samcheck")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".samcheck")
        };

        Ok(config_dir.join("config.toml"))
    }
}
