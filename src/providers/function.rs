//! Compute function discovery.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fmt;

use super::Stack;
use crate::constants::{DEFAULT_MEMORY_SIZE_MB, DEFAULT_TIMEOUT_SECS};
use crate::core::ResourceKind;
use crate::core::resource::AWS_SERVERLESS_FUNCTION;
use crate::template::{function_globals, resource_properties, resource_type, resources};

/// How a function's code is packaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PackageType {
    /// Zip archive (the default).
    #[default]
    Zip,
    /// Container image.
    Image,
}

/// Instruction set a function runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Architecture {
    /// `x86_64` (the default).
    #[default]
    #[serde(rename = "x86_64")]
    X86_64,
    /// `arm64`.
    #[serde(rename = "arm64")]
    Arm64,
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86_64 => f.write_str("x86_64"),
            Self::Arm64 => f.write_str("arm64"),
        }
    }
}

/// A compute function declared in a stack.
///
/// `(stack_path, name)` identifies the function across the whole stack tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Logical id in the declaring template.
    pub name: String,
    /// Physical `FunctionName`, when set as a plain string.
    pub function_name: Option<String>,
    /// Stack path of the declaring stack (empty for the root).
    pub stack_path: String,
    /// Runtime identifier (`python3.12`, `nodejs20.x`, ...).
    pub runtime: Option<String>,
    /// Handler entry point.
    pub handler: Option<String>,
    /// Configured memory in MB.
    pub memory_size: u32,
    /// Configured timeout in seconds.
    pub timeout: u32,
    /// Code location (`CodeUri`, S3 object or image URI).
    pub code_uri: Option<String>,
    /// Packaging of the function code.
    pub package_type: PackageType,
    /// Instruction set.
    pub architecture: Architecture,
    /// Event source types (`Api`, `SQS`, ...) in declaration order.
    pub event_types: Vec<String>,
}

impl Function {
    /// `stack_path/name`, or just `name` in the root stack.
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.stack_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.stack_path, self.name)
        }
    }
}

/// Enumerates the functions declared across a list of stacks.
pub struct FunctionProvider<'a> {
    stacks: &'a [Stack],
}

impl<'a> FunctionProvider<'a> {
    /// Provider over `stacks`.
    #[must_use]
    pub const fn new(stacks: &'a [Stack]) -> Self {
        Self {
            stacks,
        }
    }

    /// Every `AWS::Serverless::Function` and `AWS::Lambda::Function`, in stack
    /// order then declaration order.
    ///
    /// `Globals.Function` of the owning stack supplies defaults for serverless
    /// functions. Values that are not plain scalars (intrinsics) fall back to
    /// the defaults.
    #[must_use]
    pub fn get_all(&self) -> Vec<Function> {
        let mut functions = Vec::new();

        for stack in self.stacks {
            let Some(declared) = resources(&stack.template) else {
                continue;
            };
            let stack_path = stack.stack_path();
            let globals = function_globals(&stack.template);

            for (logical_id, resource) in declared {
                let Some(name) = logical_id.as_str() else {
                    continue;
                };
                let empty = Mapping::new();
                let props = resource_properties(resource).unwrap_or(&empty);

                let Some(declared_type) = resource_type(resource) else {
                    continue;
                };
                let Some(kind) = ResourceKind::from_resource_type(declared_type) else {
                    continue;
                };

                let function = match kind {
                    // Globals and CodeUri only exist on the serverless form
                    ResourceKind::LambdaFunction if declared_type == AWS_SERVERLESS_FUNCTION => {
                        serverless_function(name, &stack_path, props, globals)
                    }
                    ResourceKind::LambdaFunction => lambda_function(name, &stack_path, props),
                };
                tracing::trace!("Found function {}", function.full_path());
                functions.push(function);
            }
        }

        functions
    }
}

fn serverless_function(
    name: &str,
    stack_path: &str,
    props: &Mapping,
    globals: Option<&Mapping>,
) -> Function {
    let lookup = |key: &str| props.get(key).or_else(|| globals.and_then(|g| g.get(key)));
    let package_type = package_type(lookup("PackageType"));
    let code_uri = match package_type {
        PackageType::Zip => lookup("CodeUri").and_then(Value::as_str).map(str::to_owned),
        PackageType::Image => lookup("ImageUri").and_then(Value::as_str).map(str::to_owned),
    };

    let event_types = props
        .get("Events")
        .and_then(Value::as_mapping)
        .map(|events| {
            events
                .values()
                .filter_map(|event| event.get("Type").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    Function {
        name: name.to_string(),
        function_name: string_value(lookup("FunctionName")),
        stack_path: stack_path.to_string(),
        runtime: string_value(lookup("Runtime")),
        handler: string_value(lookup("Handler")),
        memory_size: number_value(lookup("MemorySize")).unwrap_or(DEFAULT_MEMORY_SIZE_MB),
        timeout: number_value(lookup("Timeout")).unwrap_or(DEFAULT_TIMEOUT_SECS),
        code_uri,
        package_type,
        architecture: architecture(lookup("Architectures")),
        event_types,
    }
}

fn lambda_function(name: &str, stack_path: &str, props: &Mapping) -> Function {
    let package_type = package_type(props.get("PackageType"));
    let code = props.get("Code").and_then(Value::as_mapping);
    let code_uri = code.and_then(|code| {
        if let Some(image) = code.get("ImageUri").and_then(Value::as_str) {
            return Some(image.to_string());
        }
        let bucket = code.get("S3Bucket").and_then(Value::as_str)?;
        let key = code.get("S3Key").and_then(Value::as_str).unwrap_or_default();
        Some(format!("s3://{bucket}/{key}"))
    });

    Function {
        name: name.to_string(),
        function_name: string_value(props.get("FunctionName")),
        stack_path: stack_path.to_string(),
        runtime: string_value(props.get("Runtime")),
        handler: string_value(props.get("Handler")),
        memory_size: number_value(props.get("MemorySize")).unwrap_or(DEFAULT_MEMORY_SIZE_MB),
        timeout: number_value(props.get("Timeout")).unwrap_or(DEFAULT_TIMEOUT_SECS),
        code_uri,
        package_type,
        architecture: architecture(props.get("Architectures")),
        event_types: Vec::new(),
    }
}

fn string_value(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

/// Integer properties may be written as numbers or numeric strings.
fn number_value(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn package_type(value: Option<&Value>) -> PackageType {
    match value.and_then(Value::as_str) {
        Some("Image") => PackageType::Image,
        _ => PackageType::Zip,
    }
}

fn architecture(value: Option<&Value>) -> Architecture {
    let first = value.and_then(Value::as_sequence).and_then(|archs| archs.first());
    match first.and_then(Value::as_str) {
        Some("arm64") => Architecture::Arm64,
        _ => Architecture::X86_64,
    }
}
