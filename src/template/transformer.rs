//! SAM → CloudFormation transformation.

use anyhow::{Context, Result};
use serde_yaml::Mapping;

use super::codeuri::replace_local_codeuri;
use super::policy::{BundledPolicyMap, ManagedPolicyMapProvider};
use super::translator::{LocalTranslator, SessionConfig, TemplateTranslator};
use super::Template;
use crate::core::CheckError;

/// Runs a template through code-location rewriting and a translation engine.
///
/// Both collaborators are trait objects so the engine and the policy source
/// can be swapped without touching the pipeline.
///
/// # Examples
///
/// ```rust,no_run
/// use samcheck_cli::template::{SessionConfig, TemplateTransformer, parse_template_str};
///
/// let template = parse_template_str("Resources: {}").unwrap();
/// let transformer = TemplateTransformer::default();
/// let normalized = transformer.transform(&template, &SessionConfig::default());
/// ```
pub struct TemplateTransformer {
    translator: Box<dyn TemplateTranslator>,
    policies: Box<dyn ManagedPolicyMapProvider>,
}

impl Default for TemplateTransformer {
    fn default() -> Self {
        Self::new(Box::new(LocalTranslator), Box::new(BundledPolicyMap::default()))
    }
}

impl TemplateTransformer {
    /// Transformer using `translator` and the policy map from `policies`.
    #[must_use]
    pub fn new(
        translator: Box<dyn TemplateTranslator>,
        policies: Box<dyn ManagedPolicyMapProvider>,
    ) -> Self {
        Self {
            translator,
            policies,
        }
    }

    /// Transform `template` into a normalized CloudFormation template.
    ///
    /// The input is never modified. Parameter overrides and plugins are always
    /// empty.
    ///
    /// # Errors
    ///
    /// - [`CheckError::InvalidTemplate`] when the engine rejects the template;
    ///   its message is the engine's aggregated diagnostic.
    /// - Any error from the policy map provider.
    pub fn transform(&self, template: &Template, session: &SessionConfig) -> Result<Template> {
        let policy_map =
            self.policies.managed_policy_map().context("Failed to load managed policy map")?;
        let prepared = replace_local_codeuri(template);

        self.translator
            .translate(&prepared, &Mapping::new(), &policy_map, &[], session)
            .map_err(|e| {
                tracing::debug!("Translation failed with {} cause(s)", e.causes.len());
                anyhow::Error::from(CheckError::InvalidTemplate {
                    message: e.aggregated_message(),
                })
            })
    }
}
