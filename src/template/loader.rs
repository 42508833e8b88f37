//! Reading template files into [`Template`] mappings.
//!
//! Templates are parsed as YAML, which also accepts JSON documents.
//! CloudFormation short-form intrinsic functions (`!Ref`, `!GetAtt`, `!Sub`,
//! ...) are expanded to their long form while parsing, so the rest of the
//! crate only ever sees plain mappings:
//!
//! ```yaml
//! Role: !GetAtt MyRole.Arn     # becomes {"Fn::GetAtt": ["MyRole", "Arn"]}
//! Bucket: !Ref ArtifactBucket  # becomes {"Ref": "ArtifactBucket"}
//! ```

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

use super::Template;
use crate::core::CheckError;

/// Read and parse the template at `path`.
///
/// No schema validation happens here: any YAML/JSON document whose root is a
/// mapping is returned as-is. An empty document yields an empty mapping.
///
/// # Errors
///
/// - [`CheckError::TemplateNotFound`] if `path` does not exist. This check runs
///   before the file is opened.
/// - [`CheckError::TemplateParse`] if the text is not valid YAML or its root
///   is not a mapping.
/// - I/O errors while reading an existing file.
pub fn read_template(path: &Path) -> Result<Template> {
    if !path.exists() {
        tracing::error!("Template not found: {}", path.display());
        return Err(CheckError::TemplateNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;

    parse_template_str(&content).map_err(|e| {
        let e = match e {
            CheckError::TemplateParse {
                reason, ..
            } => CheckError::TemplateParse {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        };
        anyhow::Error::from(e)
    })
}

/// Parse template text.
///
/// The returned error carries an empty `path`; [`read_template`] fills it in.
///
/// # Errors
///
/// Returns [`CheckError::TemplateParse`] for invalid YAML or a non-mapping root.
pub fn parse_template_str(content: &str) -> Result<Template, CheckError> {
    let value: Value = serde_yaml::from_str(content).map_err(|e| CheckError::TemplateParse {
        path: String::new(),
        reason: e.to_string(),
    })?;

    match expand_intrinsics(value) {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(CheckError::TemplateParse {
            path: String::new(),
            reason: format!("expected a mapping at the top level, found {}", value_kind(&other)),
        }),
    }
}

/// Recursively replace tagged values with their long-form intrinsic mapping.
fn expand_intrinsics(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            let name = tag.trim_start_matches('!');
            let inner = expand_intrinsics(tagged.value);

            let (key, body) = match name {
                "Ref" | "Condition" => (name.to_string(), inner),
                "GetAtt" => ("Fn::GetAtt".to_string(), split_get_att(inner)),
                other => (format!("Fn::{other}"), inner),
            };

            let mut mapping = Mapping::new();
            mapping.insert(Value::String(key), body);
            Value::Mapping(mapping)
        }
        Value::Mapping(mapping) => Value::Mapping(
            mapping.into_iter().map(|(k, v)| (k, expand_intrinsics(v))).collect(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(expand_intrinsics).collect())
        }
        scalar => scalar,
    }
}

/// `!GetAtt Resource.Attr.Sub` → `[Resource, Attr.Sub]`; sequences pass through.
fn split_get_att(value: Value) -> Value {
    match value {
        Value::String(s) => match s.split_once('.') {
            Some((resource, attribute)) => Value::Sequence(vec![
                Value::String(resource.to_string()),
                Value::String(attribute.to_string()),
            ]),
            None => Value::String(s),
        },
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
