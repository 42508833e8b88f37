//! Managed policy name → ARN lookup.
//!
//! SAM lets functions list AWS managed policies by name
//! (`Policies: [AmazonDynamoDBReadOnlyAccess]`). The translation engine needs
//! the ARN for each of them, which it gets from a [`ManagedPolicyMapProvider`].

use anyhow::Result;
use std::collections::BTreeMap;

/// Managed policy name → ARN.
pub type PolicyMap = BTreeMap<String, String>;

/// Source of the managed policy map handed to the translation engine.
///
/// Implementations must be pure lookups: they never see or modify the template.
pub trait ManagedPolicyMapProvider {
    /// Return the full policy map.
    fn managed_policy_map(&self) -> Result<PolicyMap>;
}

/// Managed policies commonly attached to Lambda functions, bundled with the binary.
const BUNDLED_POLICIES: &[(&str, &str)] = &[
    ("AWSLambdaBasicExecutionRole", "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole"),
    ("AWSLambdaVPCAccessExecutionRole", "arn:aws:iam::aws:policy/service-role/AWSLambdaVPCAccessExecutionRole"),
    ("AWSLambdaSQSQueueExecutionRole", "arn:aws:iam::aws:policy/service-role/AWSLambdaSQSQueueExecutionRole"),
    ("AWSLambdaDynamoDBExecutionRole", "arn:aws:iam::aws:policy/service-role/AWSLambdaDynamoDBExecutionRole"),
    ("AWSLambdaKinesisExecutionRole", "arn:aws:iam::aws:policy/service-role/AWSLambdaKinesisExecutionRole"),
    ("AWSLambdaRole", "arn:aws:iam::aws:policy/service-role/AWSLambdaRole"),
    ("AWSLambdaExecute", "arn:aws:iam::aws:policy/AWSLambdaExecute"),
    ("AWSXrayWriteOnlyAccess", "arn:aws:iam::aws:policy/AWSXrayWriteOnlyAccess"),
    ("AmazonDynamoDBFullAccess", "arn:aws:iam::aws:policy/AmazonDynamoDBFullAccess"),
    ("AmazonDynamoDBReadOnlyAccess", "arn:aws:iam::aws:policy/AmazonDynamoDBReadOnlyAccess"),
    ("AmazonS3FullAccess", "arn:aws:iam::aws:policy/AmazonS3FullAccess"),
    ("AmazonS3ReadOnlyAccess", "arn:aws:iam::aws:policy/AmazonS3ReadOnlyAccess"),
    ("AmazonSQSFullAccess", "arn:aws:iam::aws:policy/AmazonSQSFullAccess"),
    ("AmazonSNSFullAccess", "arn:aws:iam::aws:policy/AmazonSNSFullAccess"),
    ("CloudWatchLogsFullAccess", "arn:aws:iam::aws:policy/CloudWatchLogsFullAccess"),
    ("SecretsManagerReadWrite", "arn:aws:iam::aws:policy/SecretsManagerReadWrite"),
];

/// Policy map bundled with the binary, optionally extended by configuration.
///
/// # Examples
///
/// ```rust
/// use samcheck_cli::template::{BundledPolicyMap, ManagedPolicyMapProvider};
///
/// let map = BundledPolicyMap::default().managed_policy_map().unwrap();
/// assert!(map.contains_key("AWSLambdaBasicExecutionRole"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BundledPolicyMap {
    extra: PolicyMap,
}

impl BundledPolicyMap {
    /// Bundled map with `extra` entries layered on top (extra wins on conflicts).
    #[must_use]
    pub const fn with_extra(extra: PolicyMap) -> Self {
        Self {
            extra,
        }
    }
}

impl ManagedPolicyMapProvider for BundledPolicyMap {
    fn managed_policy_map(&self) -> Result<PolicyMap> {
        let mut map: PolicyMap = BUNDLED_POLICIES
            .iter()
            .map(|(name, arn)| ((*name).to_string(), (*arn).to_string()))
            .collect();
        map.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(map)
    }
}
