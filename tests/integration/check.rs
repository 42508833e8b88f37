use predicates::prelude::*;
use samcheck_cli::test_utils::API_TEMPLATE;

use crate::common::TestProject;

const ANSWERS: &str = r#"
ApiFunction.tps: 100
ApiFunction.duration: 250
WorkerFunction.requests: 1000000
WorkerFunction.duration: 500
"#;

#[test]
fn test_check_json_report() {
    let project = TestProject::new();
    project.write("template.yaml", API_TEMPLATE);
    project.write("answers.yaml", ANSWERS);

    let output = project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let functions = report["functions"].as_array().unwrap();
    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0]["name"], "ApiFunction");
    assert_eq!(functions[0]["entry_point"], true);
    assert_eq!(functions[0]["concurrency"]["required"], 25);
    assert_eq!(functions[0]["monthly_requests"], 259_200_000u64);
    assert_eq!(functions[1]["name"], "WorkerFunction");
    assert_eq!(functions[1]["entry_point"], false);
    assert_eq!(functions[1]["monthly_requests"], 1_000_000);
    assert!(report["total_monthly_cost"].as_f64().unwrap() > 0.0);
    assert_eq!(report["findings"][0]["severity"], "green");
}

#[test]
fn test_check_text_report() {
    let project = TestProject::new();
    project.write("template.yaml", API_TEMPLATE);
    project.write("answers.yaml", ANSWERS);

    project
        .samcheck()
        .args(["check", "--answers", "answers.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bottleneck analysis"))
        .stdout(predicate::str::contains("ApiFunction needs 25 concurrent executions"))
        .stdout(predicate::str::contains("Monthly cost estimate"))
        .stderr(predicate::str::contains("analyzing application template"));
}

#[test]
fn test_explicit_entry_points_and_timeout_finding() {
    let project = TestProject::new();
    project.write("app/template.yaml", API_TEMPLATE);
    project.write(
        "answers.yaml",
        r#"
entry_points: WorkerFunction
WorkerFunction.tps: 2
WorkerFunction.duration: 5000
ApiFunction.requests: 10
"#,
    );

    project
        .samcheck()
        .args(["--quiet", "check", "--template", "app/template.yaml", "--answers", "answers.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WorkerFunction needs 10 concurrent executions"))
        .stdout(predicate::str::contains("exceeds its timeout of 3000 ms"));
}

#[test]
fn test_template_without_functions() {
    let project = TestProject::new();
    project.write("template.yaml", "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n");

    project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("answers.yaml"));

    project.write("answers.yaml", "");
    project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No functions found"));
}

#[test]
fn test_separate_graph_template() {
    let project = TestProject::new();
    project.write("template.yaml", API_TEMPLATE);
    project.write(
        "built.yaml",
        r#"
Resources:
  Single:
    Type: AWS::Lambda::Function
    Properties:
      Runtime: nodejs20.x
      Handler: index.handler
      Code: {S3Bucket: artifacts, S3Key: single.zip}
"#,
    );
    project.write("answers.yaml", "Single.tps: 1\n");

    let output = project
        .samcheck()
        .args([
            "--quiet",
            "check",
            "--graph-template",
            "built.yaml",
            "--answers",
            "answers.yaml",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["functions"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["functions"][0]["name"], "Single");
    assert_eq!(report["functions"][0]["monthly_requests"], 2_592_000);
}

#[test]
fn test_terminal_prompts_use_defaults() {
    let project = TestProject::new();
    project.write(
        "template.yaml",
        r#"
Resources:
  OnlyFunction:
    Type: AWS::Serverless::Function
    Properties:
      Runtime: python3.12
      Handler: app.handler
"#,
    );

    // entry_points default, tps answer, duration default, requests default
    project
        .samcheck()
        .args(["--quiet", "check"])
        .write_stdin("\n4\n\n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Which functions receive external traffic?"))
        .stderr(predicate::str::contains("[3000]"))
        .stdout(predicate::str::contains("OnlyFunction needs 12 concurrent executions"))
        .stdout(predicate::str::contains("Which functions").not());
}

#[test]
fn test_terminal_prompts_keep_json_report_parseable() {
    let project = TestProject::new();
    project.write(
        "template.yaml",
        r#"
Resources:
  OnlyFunction:
    Type: AWS::Serverless::Function
    Properties:
      Runtime: python3.12
      Handler: app.handler
"#,
    );

    let output = project
        .samcheck()
        .args(["--quiet", "check", "--format", "json"])
        .write_stdin("\n4\n\n\n")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Expected requests per second for OnlyFunction"));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["functions"][0]["name"], "OnlyFunction");
    assert_eq!(report["functions"][0]["tps"], 4.0);
    assert_eq!(report["functions"][0]["concurrency"]["required"], 12);
}
