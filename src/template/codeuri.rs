//! Rewriting local code locations before translation.
//!
//! SAM templates usually point `CodeUri` (and friends) at local directories.
//! The translation engine only understands uploaded artifacts, so every local
//! location is replaced by [`PLACEHOLDER_S3_URI`]. Locations that are already
//! S3 URIs, or that are mappings (`{Bucket, Key}` or intrinsics), are kept.

use serde_yaml::{Mapping, Value};

use super::Template;
use crate::constants::PLACEHOLDER_S3_URI;
use crate::core::resource::{
    AWS_SERVERLESS_API, AWS_SERVERLESS_FUNCTION, AWS_SERVERLESS_HTTPAPI,
    AWS_SERVERLESS_LAYERVERSION, AWS_SERVERLESS_STATEMACHINE,
};

const PACKAGE_TYPE_ZIP: &str = "Zip";

/// Return a copy of `template` with local code locations replaced.
///
/// Rewritten properties:
///
/// | Resource | Property | Condition |
/// |---|---|---|
/// | `Globals.Function` | `CodeUri` | every resource and `Globals.Function` is Zip-packaged |
/// | `AWS::Serverless::Function` | `CodeUri` | `PackageType` (or the Globals one) is `Zip` (default) |
/// | `AWS::Serverless::LayerVersion` | `ContentUri` | always |
/// | `AWS::Serverless::Api` / `HttpApi` | `DefinitionUri` | no `DefinitionBody` |
/// | `AWS::Serverless::StateMachine` | `DefinitionUri` | no `Definition` |
///
/// A property that is missing defaults to `.` (the template directory) and is
/// therefore rewritten as well.
#[must_use]
pub fn replace_local_codeuri(template: &Template) -> Template {
    let mut updated = template.clone();

    // Functions without their own PackageType inherit the Globals one
    let default_package_type = super::function_globals(template)
        .and_then(|globals| globals.get("PackageType"))
        .and_then(Value::as_str)
        .unwrap_or(PACKAGE_TYPE_ZIP)
        .to_owned();
    let is_zip = |props: Option<&Mapping>| -> bool {
        props
            .and_then(|props| props.get("PackageType"))
            .and_then(Value::as_str)
            .unwrap_or(default_package_type.as_str())
            == PACKAGE_TYPE_ZIP
    };

    let all_zip = default_package_type == PACKAGE_TYPE_ZIP
        && super::resources(template).is_none_or(|resources| {
            resources.values().all(|resource| is_zip(super::resource_properties(resource)))
        });

    if all_zip {
        let globals = updated
            .get_mut("Globals")
            .and_then(Value::as_mapping_mut)
            .and_then(|globals| globals.get_mut("Function"))
            .and_then(Value::as_mapping_mut);
        if let Some(globals) = globals.filter(|globals| globals.contains_key("CodeUri")) {
            update_to_s3_uri("CodeUri", globals);
        }
    }

    let Some(resources) = updated.get_mut("Resources").and_then(Value::as_mapping_mut) else {
        return updated;
    };

    for (logical_id, resource) in resources.iter_mut() {
        let Some(resource_type) = super::resource_type(resource).map(str::to_owned) else {
            continue;
        };
        let Some(props) = resource.get_mut("Properties").and_then(Value::as_mapping_mut) else {
            continue;
        };

        match resource_type.as_str() {
            AWS_SERVERLESS_FUNCTION => {
                if is_zip(Some(&*props)) {
                    update_to_s3_uri("CodeUri", props);
                }
            }
            AWS_SERVERLESS_LAYERVERSION => update_to_s3_uri("ContentUri", props),
            AWS_SERVERLESS_API | AWS_SERVERLESS_HTTPAPI => {
                if !props.contains_key("DefinitionBody") {
                    update_to_s3_uri("DefinitionUri", props);
                }
            }
            AWS_SERVERLESS_STATEMACHINE => {
                if !props.contains_key("Definition") {
                    update_to_s3_uri("DefinitionUri", props);
                }
            }
            _ => continue,
        }
        tracing::trace!("Rewrote code location of {:?}", logical_id.as_str());
    }

    updated
}

/// Whether `uri` already points at S3.
#[must_use]
pub fn is_s3_uri(uri: &str) -> bool {
    uri.starts_with("s3://")
}

fn update_to_s3_uri(key: &str, props: &mut Mapping) {
    let keep = match props.get(key) {
        Some(Value::Mapping(_)) => true,
        Some(Value::String(uri)) => is_s3_uri(uri),
        _ => false,
    };

    if !keep {
        props.insert(Value::String(key.to_string()), Value::String(PLACEHOLDER_S3_URI.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_template_str;

    fn property<'a>(template: &'a Template, resource: &str, key: &str) -> Option<&'a Value> {
        template["Resources"][resource]["Properties"].get(key)
    }

    #[test]
    fn test_local_codeuri_replaced() {
        let template = parse_template_str(
            r#"
Resources:
  FnA:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: src/fn_a
      Handler: app.handler
"#,
        )
        .unwrap();

        let updated = replace_local_codeuri(&template);
        assert_eq!(
            property(&updated, "FnA", "CodeUri").and_then(Value::as_str),
            Some(PLACEHOLDER_S3_URI)
        );
        // Input is untouched
        assert_eq!(property(&template, "FnA", "CodeUri").and_then(Value::as_str), Some("src/fn_a"));
    }

    #[test]
    fn test_missing_codeuri_defaults_to_placeholder() {
        let template = parse_template_str(
            "Resources:\n  FnA:\n    Type: AWS::Serverless::Function\n    Properties:\n      Handler: a.b\n",
        )
        .unwrap();
        let updated = replace_local_codeuri(&template);
        assert_eq!(
            property(&updated, "FnA", "CodeUri").and_then(Value::as_str),
            Some(PLACEHOLDER_S3_URI)
        );
    }

    #[test]
    fn test_s3_and_mapping_locations_kept() {
        let template = parse_template_str(
            r#"
Resources:
  FromS3:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: s3://my-bucket/code.zip
  FromMapping:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri:
        Bucket: my-bucket
        Key: code.zip
"#,
        )
        .unwrap();

        let updated = replace_local_codeuri(&template);
        assert_eq!(updated, template);
    }

    #[test]
    fn test_image_functions_untouched() {
        let template = parse_template_str(
            r#"
Resources:
  ImageFn:
    Type: AWS::Serverless::Function
    Properties:
      PackageType: Image
      ImageUri: 123456789012.dkr.ecr.us-east-1.amazonaws.com/repo:latest
"#,
        )
        .unwrap();
        assert_eq!(replace_local_codeuri(&template), template);
    }

    #[test]
    fn test_api_with_inline_definition_untouched() {
        let template = parse_template_str(
            r#"
Resources:
  InlineApi:
    Type: AWS::Serverless::Api
    Properties:
      DefinitionBody: {openapi: "3.0"}
  FileApi:
    Type: AWS::Serverless::HttpApi
    Properties:
      DefinitionUri: ./api.yaml
  Machine:
    Type: AWS::Serverless::StateMachine
    Properties:
      DefinitionUri: statemachine/flow.asl.json
  Layer:
    Type: AWS::Serverless::LayerVersion
    Properties:
      ContentUri: layers/deps
"#,
        )
        .unwrap();

        let updated = replace_local_codeuri(&template);
        assert!(property(&updated, "InlineApi", "DefinitionUri").is_none());
        for (resource, key) in
            [("FileApi", "DefinitionUri"), ("Machine", "DefinitionUri"), ("Layer", "ContentUri")]
        {
            assert_eq!(
                property(&updated, resource, key).and_then(Value::as_str),
                Some(PLACEHOLDER_S3_URI),
                "{resource}.{key}"
            );
        }
    }

    #[test]
    fn test_globals_codeuri_only_when_all_zip() {
        let text = r#"
Globals:
  Function:
    CodeUri: src/
Resources:
  FnA:
    Type: AWS::Serverless::Function
    Properties:
      Handler: a.b
"#;
        let updated = replace_local_codeuri(&parse_template_str(text).unwrap());
        assert_eq!(updated["Globals"]["Function"]["CodeUri"].as_str(), Some(PLACEHOLDER_S3_URI));

        let mixed = format!(
            "{text}  ImageFn:\n    Type: AWS::Serverless::Function\n    Properties:\n      PackageType: Image\n"
        );
        let updated = replace_local_codeuri(&parse_template_str(&mixed).unwrap());
        assert_eq!(updated["Globals"]["Function"]["CodeUri"].as_str(), Some("src/"));
    }

    #[test]
    fn test_globals_image_package_type_blocks_rewrite() {
        let template = parse_template_str(
            r#"
Globals:
  Function:
    PackageType: Image
    CodeUri: src/
Resources:
  ImageFn:
    Type: AWS::Serverless::Function
    Properties:
      ImageUri: repo:latest
  ZipFn:
    Type: AWS::Serverless::Function
    Properties:
      PackageType: Zip
      CodeUri: src/zip
"#,
        )
        .unwrap();

        let updated = replace_local_codeuri(&template);
        assert_eq!(updated["Globals"]["Function"]["CodeUri"].as_str(), Some("src/"));
        assert!(property(&updated, "ImageFn", "CodeUri").is_none());
        assert_eq!(
            property(&updated, "ZipFn", "CodeUri").and_then(Value::as_str),
            Some(PLACEHOLDER_S3_URI)
        );
    }
}
