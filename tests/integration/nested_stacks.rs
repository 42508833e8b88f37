use predicates::prelude::*;

use crate::common::TestProject;

const ROOT: &str = r#"
Transform: AWS::Serverless-2016-10-31
Resources:
  Orders:
    Type: AWS::Serverless::Application
    Properties:
      Location: orders/template.yaml
  Frontend:
    Type: AWS::Serverless::Function
    Properties:
      Runtime: nodejs20.x
      Handler: index.handler
      Events:
        Site:
          Type: HttpApi
"#;

const ORDERS: &str = r#"
Transform: AWS::Serverless-2016-10-31
Resources:
  Process:
    Type: AWS::Serverless::Function
    Properties:
      Runtime: python3.12
      Handler: process.handler
      MemorySize: 1024
"#;

#[test]
fn test_nested_functions_are_analysed() {
    let project = TestProject::new();
    project.write("template.yaml", ROOT);
    project.write("orders/template.yaml", ORDERS);
    project.write(
        "answers.yaml",
        "Frontend.tps: 20\nFrontend.duration: 100\nOrders/Process.requests: 500000\n",
    );

    let output = project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<(&str, &str)> = report["functions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["stack_path"].as_str().unwrap(), f["name"].as_str().unwrap()))
        .collect();
    assert_eq!(names, vec![("", "Frontend"), ("Orders", "Process")]);
    assert_eq!(report["functions"][1]["monthly_requests"], 500_000);
}

#[test]
fn test_self_including_stack() {
    let project = TestProject::new();
    project.write(
        "template.yaml",
        r#"
Resources:
  Loop:
    Type: AWS::CloudFormation::Stack
    Properties:
      TemplateURL: ./template.yaml
"#,
    );

    project
        .samcheck()
        .args(["--quiet", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("includes itself"));
}

#[test]
fn test_missing_nested_template_names_the_stack() {
    let project = TestProject::new();
    project.write(
        "template.yaml",
        r#"
Resources:
  Gone:
    Type: AWS::CloudFormation::Stack
    Properties:
      TemplateURL: gone.yaml
"#,
    );

    project
        .samcheck()
        .args(["--quiet", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not found"))
        .stderr(predicate::str::contains("Failed to load nested stack 'Gone'"))
        .stderr(predicate::str::contains("TemplateURL of nested stack 'Gone'"))
        .stderr(predicate::str::contains("--template").not());
}
