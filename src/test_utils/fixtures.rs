//! Template and graph fixtures.

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_MEMORY_SIZE_MB, DEFAULT_TIMEOUT_SECS};
use crate::graph::{CheckGraph, GraphNode};
use crate::providers::{Architecture, Function, PackageType};

/// An API-backed function plus a queue worker, both valid SAM.
pub const API_TEMPLATE: &str = r#"AWSTemplateFormatVersion: '2010-09-09'
Transform: AWS::Serverless-2016-10-31
Globals:
  Function:
    Runtime: python3.12
    MemorySize: 256
Resources:
  ApiFunction:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: src/api
      Handler: app.handler
      Timeout: 10
      Events:
        GetItems:
          Type: Api
          Properties:
            Path: /items
            Method: get
  Queue:
    Type: AWS::SQS::Queue
  WorkerFunction:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: src/worker
      Handler: worker.handler
      Architectures:
        - arm64
      Events:
        Jobs:
          Type: SQS
          Properties:
            Queue: !GetAtt Queue.Arn
"#;

/// A SAM function missing both `Runtime` and `Handler`.
pub const INVALID_TEMPLATE: &str = r#"Transform: AWS::Serverless-2016-10-31
Resources:
  BrokenFunction:
    Type: AWS::Serverless::Function
    Properties:
      CodeUri: src/broken
"#;

/// Write `content` to `dir/name`, creating parent directories.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_template(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create template directory");
    }
    std::fs::write(&path, content).expect("Failed to write template");
    path
}

/// A Zip function with default settings.
pub fn function(stack_path: &str, name: &str) -> Function {
    Function {
        name: name.to_string(),
        function_name: None,
        stack_path: stack_path.to_string(),
        runtime: Some("python3.12".to_string()),
        handler: Some("app.handler".to_string()),
        memory_size: DEFAULT_MEMORY_SIZE_MB,
        timeout: DEFAULT_TIMEOUT_SECS,
        code_uri: None,
        package_type: PackageType::Zip,
        architecture: Architecture::X86_64,
        event_types: Vec::new(),
    }
}

/// Graph with one node per function.
///
/// # Panics
///
/// Panics if two functions share an identity.
pub fn graph_of(functions: Vec<Function>) -> CheckGraph {
    CheckGraph::new(functions.into_iter().map(GraphNode::lambda_function).collect())
        .expect("Fixture functions must be unique")
}
