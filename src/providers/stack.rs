//! Nested stack discovery.

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

use crate::core::{CheckError, NestedStackContext};
use crate::core::resource::{AWS_CLOUDFORMATION_STACK, AWS_SERVERLESS_APPLICATION};
use crate::template::{Template, read_template, resource_properties, resource_type, resources};

const REMOTE_PREFIXES: &[&str] = &["http://", "https://", "s3://"];

/// A template and its position in the nested stack tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    /// Stack path of the parent (empty for the root and its direct children).
    pub parent_stack_path: String,
    /// Logical id of the nested stack resource (empty for the root).
    pub name: String,
    /// Template file the stack was loaded from.
    pub location: PathBuf,
    /// Parsed template.
    pub template: Template,
}

impl Stack {
    /// `parent/name`, `name` for direct children of the root, empty for the root.
    #[must_use]
    pub fn stack_path(&self) -> String {
        if self.parent_stack_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.parent_stack_path, self.name)
        }
    }

    /// Whether this is the root stack.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name.is_empty() && self.parent_stack_path.is_empty()
    }
}

/// Loads a template and every local nested stack below it.
pub struct StackProvider;

impl StackProvider {
    /// Flatten the stack tree rooted at `path`.
    ///
    /// Stacks come back pre-order: every parent precedes its children, and
    /// siblings keep their declaration order. Nested stacks whose location is
    /// remote or not a plain path are skipped.
    ///
    /// # Errors
    ///
    /// - Any [`read_template`] error for the root or a nested template.
    /// - [`CheckError::NestedStackCycle`] when a nested stack includes one of
    ///   its ancestors.
    pub fn get_stacks(path: &Path) -> Result<Vec<Stack>> {
        let mut stacks = Vec::new();
        let mut ancestors = Vec::new();
        collect(String::new(), String::new(), path, &mut ancestors, &mut stacks)?;
        tracing::debug!("Found {} stack(s) under {}", stacks.len(), path.display());
        Ok(stacks)
    }
}

fn collect(
    parent_stack_path: String,
    name: String,
    location: &Path,
    ancestors: &mut Vec<PathBuf>,
    stacks: &mut Vec<Stack>,
) -> Result<()> {
    let template = read_template(location)?;
    let identity = location.canonicalize().unwrap_or_else(|_| location.to_path_buf());
    if ancestors.contains(&identity) {
        return Err(CheckError::NestedStackCycle {
            path: location.display().to_string(),
        }
        .into());
    }

    let children = nested_stack_locations(&template, location);
    let stack = Stack {
        parent_stack_path,
        name,
        location: location.to_path_buf(),
        template,
    };
    let stack_path = stack.stack_path();
    stacks.push(stack);

    ancestors.push(identity);
    for (child_name, child_location) in children {
        collect(stack_path.clone(), child_name.clone(), &child_location, ancestors, stacks)
            .with_context(|| NestedStackContext {
                name: child_name.clone(),
            })?;
    }
    ancestors.pop();

    Ok(())
}

/// Local nested stack templates declared by `template`, in declaration order.
fn nested_stack_locations(template: &Template, template_path: &Path) -> Vec<(String, PathBuf)> {
    let Some(resources) = resources(template) else {
        return Vec::new();
    };
    let base = template_path.parent().unwrap_or_else(|| Path::new(""));

    resources
        .iter()
        .filter_map(|(logical_id, resource)| {
            let location_key = match resource_type(resource)? {
                AWS_SERVERLESS_APPLICATION => "Location",
                AWS_CLOUDFORMATION_STACK => "TemplateURL",
                _ => return None,
            };
            let name = logical_id.as_str()?;
            let location = resource_properties(resource)?.get(location_key);

            match location {
                Some(Value::String(uri)) if !is_remote(uri) => {
                    Some((name.to_string(), base.join(uri.trim_start_matches("file://"))))
                }
                other => {
                    tracing::debug!("Skipping nested stack {name} with non-local location {other:?}");
                    None
                }
            }
        })
        .collect()
}

fn is_remote(uri: &str) -> bool {
    REMOTE_PREFIXES.iter().any(|prefix| uri.starts_with(prefix))
}
