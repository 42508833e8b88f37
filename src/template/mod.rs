//! Template loading and translation.
//!
//! A [`Template`] is an untyped, insertion-ordered mapping parsed from YAML or
//! JSON. This module reads templates from disk ([`loader`]), prepares them for
//! translation ([`codeuri`], [`policy`]) and drives the translation engine
//! ([`translator`], [`transformer`]).
//!
//! Templates are never mutated in place: every transformation step clones its
//! input and returns a new mapping.

pub mod codeuri;
pub mod loader;
pub mod policy;
pub mod transformer;
pub mod translator;

use serde_yaml::{Mapping, Value};

pub use codeuri::replace_local_codeuri;
pub use loader::{parse_template_str, read_template};
pub use policy::{BundledPolicyMap, ManagedPolicyMapProvider, PolicyMap};
pub use transformer::TemplateTransformer;
pub use translator::{LocalTranslator, SessionConfig, TemplateTranslator, TranslationError};

/// Parsed template document.
pub type Template = Mapping;

/// The `Resources` section of a template, if present and a mapping.
#[must_use]
pub fn resources(template: &Template) -> Option<&Mapping> {
    template.get("Resources").and_then(Value::as_mapping)
}

/// The `Globals.Function` section of a SAM template, if present.
#[must_use]
pub fn function_globals(template: &Template) -> Option<&Mapping> {
    template
        .get("Globals")
        .and_then(Value::as_mapping)
        .and_then(|globals| globals.get("Function"))
        .and_then(Value::as_mapping)
}

/// `Type` of a resource declaration.
#[must_use]
pub fn resource_type(resource: &Value) -> Option<&str> {
    resource.get("Type").and_then(Value::as_str)
}

/// `Properties` of a resource declaration.
#[must_use]
pub fn resource_properties(resource: &Value) -> Option<&Mapping> {
    resource.get("Properties").and_then(Value::as_mapping)
}
