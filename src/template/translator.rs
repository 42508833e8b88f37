//! Translation engine boundary.
//!
//! The [`TemplateTranslator`] trait is the seam between samcheck and whatever
//! turns a SAM template into plain CloudFormation. It receives the template,
//! parameter overrides, the managed policy map, a plugin list and the session
//! settings, and either returns the normalized template or a structured
//! [`TranslationError`].
//!
//! [`LocalTranslator`] is the engine bundled with samcheck. It works offline
//! and covers what the check pipeline needs: structural validation with
//! ordered diagnostics, `Globals` expansion, and the translation of serverless
//! functions and nested applications into their CloudFormation equivalents.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::policy::PolicyMap;
use super::{Template, function_globals, resource_properties, resource_type, resources};
use crate::core::resource::{
    AWS_CLOUDFORMATION_STACK, AWS_IAM_ROLE, AWS_LAMBDA_FUNCTION, AWS_SERVERLESS_APPLICATION,
    AWS_SERVERLESS_FUNCTION,
};

const BASIC_EXECUTION_POLICY: &str = "AWSLambdaBasicExecutionRole";
const BASIC_EXECUTION_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

/// Function properties copied verbatim from the SAM function to the Lambda function.
const PASSTHROUGH_FUNCTION_PROPERTIES: &[&str] = &[
    "FunctionName",
    "Description",
    "Handler",
    "Runtime",
    "MemorySize",
    "Timeout",
    "Environment",
    "Architectures",
    "PackageType",
    "Layers",
    "VpcConfig",
    "ReservedConcurrentExecutions",
    "EphemeralStorage",
];

/// Credential and region settings handed opaquely to the translation engine.
///
/// Building one performs no I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Credential profile name.
    pub profile: Option<String>,
    /// AWS region.
    pub region: Option<String>,
}

impl SessionConfig {
    /// Session for `profile` in `region`.
    #[must_use]
    pub const fn new(profile: Option<String>, region: Option<String>) -> Self {
        Self {
            profile,
            region,
        }
    }
}

/// Structured failure reported by a translation engine.
///
/// Carries a top-level message and the ordered list of underlying causes.
/// [`aggregated_message`](Self::aggregated_message) renders both as a single
/// diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TranslationError {
    /// Top-level message.
    pub message: String,
    /// Underlying causes, in the order the engine found them.
    pub causes: Vec<String>,
}

impl TranslationError {
    /// Error with a message and ordered causes.
    pub fn new(message: impl Into<String>, causes: Vec<String>) -> Self {
        Self {
            message: message.into(),
            causes,
        }
    }

    /// Error for an invalid SAM document, counting its causes in the message.
    #[must_use]
    pub fn invalid_document(causes: Vec<String>) -> Self {
        Self::new(
            format!(
                "Invalid Serverless Application Specification document. Number of errors found: {}.",
                causes.len()
            ),
            causes,
        )
    }

    /// The top-level message followed by every cause, separated by single spaces.
    ///
    /// ```rust
    /// use samcheck_cli::template::TranslationError;
    ///
    /// let error = TranslationError::new("bad template", vec!["missing Runtime".into()]);
    /// assert_eq!(error.aggregated_message(), "bad template missing Runtime");
    /// ```
    #[must_use]
    pub fn aggregated_message(&self) -> String {
        self.causes.iter().fold(self.message.clone(), |mut message, cause| {
            message.push(' ');
            message.push_str(cause);
            message
        })
    }
}

/// A template translation engine.
pub trait TemplateTranslator {
    /// Translate `template` into a normalized CloudFormation template.
    ///
    /// # Errors
    ///
    /// Returns a [`TranslationError`] when the template is structurally invalid.
    fn translate(
        &self,
        template: &Template,
        parameter_values: &Mapping,
        policy_map: &PolicyMap,
        plugins: &[String],
        session: &SessionConfig,
    ) -> Result<Template, TranslationError>;
}

/// Offline translation engine bundled with samcheck.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTranslator;

impl TemplateTranslator for LocalTranslator {
    fn translate(
        &self,
        template: &Template,
        parameter_values: &Mapping,
        policy_map: &PolicyMap,
        plugins: &[String],
        session: &SessionConfig,
    ) -> Result<Template, TranslationError> {
        tracing::debug!(
            profile = session.profile.as_deref().unwrap_or("default"),
            region = session.region.as_deref().unwrap_or("unset"),
            parameters = parameter_values.len(),
            plugins = plugins.len(),
            "Translating template"
        );

        let causes = validate(template, policy_map);
        if !causes.is_empty() {
            return Err(TranslationError::invalid_document(causes));
        }

        Ok(translate_valid(template, policy_map))
    }
}

fn validate(template: &Template, policy_map: &PolicyMap) -> Vec<String> {
    let Some(resources) = resources(template).filter(|resources| !resources.is_empty()) else {
        return vec![
            "Structure of the SAM template is invalid. 'Resources' section is required".to_string(),
        ];
    };

    let globals = function_globals(template);
    let mut causes = Vec::new();

    for (logical_id, resource) in resources {
        let id = logical_id.as_str().unwrap_or("<non-string id>");
        match resource_type(resource) {
            None => causes.push(format!(
                "Resource with id [{id}] is invalid. Missing required property 'Type'."
            )),
            Some(AWS_SERVERLESS_FUNCTION) => {
                validate_function(id, resource, globals, policy_map, &mut causes);
            }
            Some(_) => {}
        }
    }

    causes
}

fn validate_function(
    id: &str,
    resource: &Value,
    globals: Option<&Mapping>,
    policy_map: &PolicyMap,
    causes: &mut Vec<String>,
) {
    let empty = Mapping::new();
    let props = resource_properties(resource).unwrap_or(&empty);
    let lookup = |key: &str| props.get(key).or_else(|| globals.and_then(|g| g.get(key)));

    let required: &[&str] = match lookup("PackageType").and_then(Value::as_str).unwrap_or("Zip") {
        "Zip" => &["Runtime", "Handler"],
        "Image" => &["ImageUri"],
        other => {
            causes.push(format!(
                "Resource with id [{id}] is invalid. PackageType '{other}' must be Zip or Image."
            ));
            return;
        }
    };

    for key in required {
        if lookup(key).is_none() {
            causes.push(format!("Resource with id [{id}] is invalid. Missing required property '{key}'."));
        }
    }

    let unknown_policies = policy_entries(props.get("Policies"))
        .into_iter()
        .filter_map(Value::as_str)
        .filter(|name| !name.starts_with("arn:") && !policy_map.contains_key(*name));
    for name in unknown_policies {
        causes.push(format!(
            "Resource with id [{id}] is invalid. Policy '{name}' is not a known managed policy."
        ));
    }
}

fn policy_entries(policies: Option<&Value>) -> Vec<&Value> {
    match policies {
        Some(Value::Sequence(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => Vec::new(),
    }
}

fn translate_valid(template: &Template, policy_map: &PolicyMap) -> Template {
    let empty = Mapping::new();
    let globals = function_globals(template).unwrap_or(&empty);
    let mut output = Mapping::new();

    for (key, value) in template {
        match key.as_str() {
            Some("Transform" | "Globals") => {}
            Some("Resources") => {
                let translated = value
                    .as_mapping()
                    .map(|resources| translate_resources(resources, globals, policy_map))
                    .unwrap_or_default();
                output.insert(key.clone(), Value::Mapping(translated));
            }
            _ => {
                output.insert(key.clone(), value.clone());
            }
        }
    }

    output
}

fn translate_resources(resources: &Mapping, globals: &Mapping, policy_map: &PolicyMap) -> Mapping {
    let mut translated = Mapping::new();

    for (logical_id, resource) in resources {
        let id = logical_id.as_str().unwrap_or_default();
        match resource_type(resource) {
            Some(AWS_SERVERLESS_FUNCTION) => {
                let (function, role) = translate_function(id, resource, globals, policy_map);
                translated.insert(logical_id.clone(), function);
                if let Some(role) = role {
                    translated.insert(Value::String(format!("{id}Role")), role);
                }
            }
            Some(AWS_SERVERLESS_APPLICATION) => {
                translated.insert(logical_id.clone(), translate_application(resource));
            }
            _ => {
                translated.insert(logical_id.clone(), resource.clone());
            }
        }
    }

    translated
}

/// Translate a serverless function; the second value is the generated execution role.
fn translate_function(
    id: &str,
    resource: &Value,
    globals: &Mapping,
    policy_map: &PolicyMap,
) -> (Value, Option<Value>) {
    let mut merged = globals.clone();
    if let Some(props) = resource_properties(resource) {
        for (key, value) in props {
            merged.insert(key.clone(), value.clone());
        }
    }

    let mut props = Mapping::new();
    props.insert(string("Code"), code_property(&merged));
    for key in PASSTHROUGH_FUNCTION_PROPERTIES {
        if let Some(value) = merged.get(*key) {
            props.insert(string(key), value.clone());
        }
    }
    if let Some(Value::Mapping(tags)) = merged.get("Tags") {
        props.insert(string("Tags"), tag_list(tags));
    }

    let role = if let Some(role) = merged.get("Role") {
        props.insert(string("Role"), role.clone());
        None
    } else {
        props.insert(
            string("Role"),
            mapping([("Fn::GetAtt", Value::Sequence(vec![string(&format!("{id}Role")), string("Arn")]))]),
        );
        Some(execution_role(id, merged.get("Policies"), policy_map))
    };

    let mut function = Mapping::new();
    function.insert(string("Type"), string(AWS_LAMBDA_FUNCTION));
    for key in ["Condition", "DependsOn", "Metadata"] {
        if let Some(value) = resource.get(key) {
            function.insert(string(key), value.clone());
        }
    }
    function.insert(string("Properties"), Value::Mapping(props));

    (Value::Mapping(function), role)
}

fn code_property(props: &Mapping) -> Value {
    if let Some(image) = props.get("ImageUri") {
        return mapping([("ImageUri", image.clone())]);
    }
    if let Some(code) = props.get("InlineCode") {
        return mapping([("ZipFile", code.clone())]);
    }

    match props.get("CodeUri") {
        Some(Value::String(uri)) => {
            let (bucket, key) =
                uri.trim_start_matches("s3://").split_once('/').unwrap_or((uri.as_str(), ""));
            mapping([("S3Bucket", string(bucket)), ("S3Key", string(key))])
        }
        Some(Value::Mapping(location)) => {
            let mut code = Mapping::new();
            for (from, to) in [("Bucket", "S3Bucket"), ("Key", "S3Key"), ("Version", "S3ObjectVersion")] {
                if let Some(value) = location.get(from) {
                    code.insert(string(to), value.clone());
                }
            }
            Value::Mapping(code)
        }
        _ => Value::Mapping(Mapping::new()),
    }
}

fn execution_role(id: &str, policies: Option<&Value>, policy_map: &PolicyMap) -> Value {
    let basic = policy_map
        .get(BASIC_EXECUTION_POLICY)
        .map_or(BASIC_EXECUTION_POLICY_ARN, String::as_str);
    let mut managed = vec![string(basic)];
    let mut inline = Vec::new();

    for (index, policy) in policy_entries(policies).into_iter().enumerate() {
        match policy {
            Value::String(name) if name.starts_with("arn:") => managed.push(policy.clone()),
            Value::String(name) => {
                if let Some(arn) = policy_map.get(name) {
                    managed.push(string(arn));
                }
            }
            Value::Mapping(document) if document.contains_key("Statement") => {
                inline.push(mapping([
                    ("PolicyName", string(&format!("{id}RolePolicy{index}"))),
                    ("PolicyDocument", policy.clone()),
                ]));
            }
            Value::Mapping(document) if document.contains_key("Ref") => managed.push(policy.clone()),
            other => tracing::debug!("Skipping unsupported policy entry on {id}: {other:?}"),
        }
    }

    let assume_role = mapping([
        ("Version", string("2012-10-17")),
        (
            "Statement",
            Value::Sequence(vec![mapping([
                ("Action", Value::Sequence(vec![string("sts:AssumeRole")])),
                ("Effect", string("Allow")),
                ("Principal", mapping([("Service", Value::Sequence(vec![string("lambda.amazonaws.com")]))])),
            ])]),
        ),
    ]);

    let mut props = Mapping::new();
    props.insert(string("AssumeRolePolicyDocument"), assume_role);
    props.insert(string("ManagedPolicyArns"), Value::Sequence(managed));
    if !inline.is_empty() {
        props.insert(string("Policies"), Value::Sequence(inline));
    }
    props.insert(
        string("Tags"),
        Value::Sequence(vec![mapping([("Key", string("lambda:createdBy")), ("Value", string("SAM"))])]),
    );

    mapping([("Type", string(AWS_IAM_ROLE)), ("Properties", Value::Mapping(props))])
}

fn translate_application(resource: &Value) -> Value {
    let mut props = Mapping::new();
    if let Some(source) = resource_properties(resource) {
        for (key, value) in source {
            match key.as_str() {
                Some("Location") => {
                    props.insert(string("TemplateURL"), value.clone());
                }
                Some("Tags") => {
                    if let Value::Mapping(tags) = value {
                        props.insert(string("Tags"), tag_list(tags));
                    }
                }
                _ => {
                    props.insert(key.clone(), value.clone());
                }
            }
        }
    }

    let mut stack = Mapping::new();
    stack.insert(string("Type"), string(AWS_CLOUDFORMATION_STACK));
    for key in ["Condition", "DependsOn", "Metadata"] {
        if let Some(value) = resource.get(key) {
            stack.insert(string(key), value.clone());
        }
    }
    stack.insert(string("Properties"), Value::Mapping(props));
    Value::Mapping(stack)
}

/// SAM tag map → CloudFormation `[{Key, Value}]` list.
fn tag_list(tags: &Mapping) -> Value {
    Value::Sequence(
        tags.iter().map(|(key, value)| mapping([("Key", key.clone()), ("Value", value.clone())])).collect(),
    )
}

fn string(value: &str) -> Value {
    Value::String(value.to_string())
}

fn mapping<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Mapping(entries.into_iter().map(|(key, value)| (string(key), value)).collect())
}
