//! Resource kinds and CloudFormation resource type names.

use serde::Serialize;

/// `AWS::Serverless::Function` resource type.
pub const AWS_SERVERLESS_FUNCTION: &str = "AWS::Serverless::Function";
/// `AWS::Serverless::LayerVersion` resource type.
pub const AWS_SERVERLESS_LAYERVERSION: &str = "AWS::Serverless::LayerVersion";
/// `AWS::Serverless::Api` resource type.
pub const AWS_SERVERLESS_API: &str = "AWS::Serverless::Api";
/// `AWS::Serverless::HttpApi` resource type.
pub const AWS_SERVERLESS_HTTPAPI: &str = "AWS::Serverless::HttpApi";
/// `AWS::Serverless::StateMachine` resource type.
pub const AWS_SERVERLESS_STATEMACHINE: &str = "AWS::Serverless::StateMachine";
/// `AWS::Serverless::Application` resource type (nested SAM application).
pub const AWS_SERVERLESS_APPLICATION: &str = "AWS::Serverless::Application";
/// `AWS::Lambda::Function` resource type.
pub const AWS_LAMBDA_FUNCTION: &str = "AWS::Lambda::Function";
/// `AWS::CloudFormation::Stack` resource type (nested stack).
pub const AWS_CLOUDFORMATION_STACK: &str = "AWS::CloudFormation::Stack";
/// `AWS::IAM::Role` resource type.
pub const AWS_IAM_ROLE: &str = "AWS::IAM::Role";

/// Kind of a resource held in the check graph.
///
/// The set is closed: supporting a new kind of resource means adding a variant
/// here and an extraction pass for it, so every `match` over the kind is
/// revisited by the compiler.
///
/// # Examples
///
/// ```rust
/// use samcheck_cli::core::ResourceKind;
///
/// let kind = ResourceKind::LambdaFunction;
/// assert_eq!(kind.to_string(), "AWS::Lambda::Function");
/// assert_eq!(ResourceKind::from_resource_type("AWS::Serverless::Function"), Some(kind));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    /// A compute function (`AWS::Lambda::Function`, including the
    /// `AWS::Serverless::Function` it is translated from)
    #[serde(rename = "AWS::Lambda::Function")]
    LambdaFunction,
}

impl ResourceKind {
    /// CloudFormation resource type name for this kind.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::LambdaFunction => AWS_LAMBDA_FUNCTION,
        }
    }

    /// Kind for a declared CloudFormation/SAM resource type, if the graph tracks it.
    #[must_use]
    pub fn from_resource_type(resource_type: &str) -> Option<Self> {
        match resource_type {
            AWS_LAMBDA_FUNCTION | AWS_SERVERLESS_FUNCTION => Some(Self::LambdaFunction),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_display() {
        assert_eq!(ResourceKind::LambdaFunction.to_string(), "AWS::Lambda::Function");
    }

    #[test]
    fn test_resource_kind_from_resource_type() {
        assert_eq!(
            ResourceKind::from_resource_type(AWS_SERVERLESS_FUNCTION),
            Some(ResourceKind::LambdaFunction)
        );
        assert_eq!(
            ResourceKind::from_resource_type(AWS_LAMBDA_FUNCTION),
            Some(ResourceKind::LambdaFunction)
        );
        assert_eq!(ResourceKind::from_resource_type("AWS::DynamoDB::Table"), None);
    }

    #[test]
    fn test_resource_kind_serialization() {
        let json = serde_json::to_string(&ResourceKind::LambdaFunction).unwrap();
        assert_eq!(json, "\"AWS::Lambda::Function\"");
    }
}
