use predicates::prelude::*;

use crate::common::TestProject;

const POLICY_TEMPLATE: &str = r#"
Resources:
  Reporter:
    Type: AWS::Serverless::Function
    Properties:
      Runtime: python3.12
      Handler: report.handler
      Policies:
        - CompanyBaseline
"#;

#[test]
fn test_extra_managed_policies_from_config() {
    let project = TestProject::new();
    project.write("template.yaml", POLICY_TEMPLATE);
    project.write("answers.yaml", "Reporter.tps: 1\n");

    project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Policy 'CompanyBaseline' is not a known managed policy"));

    project.write_config(
        "[managed_policies]\nCompanyBaseline = \"arn:aws:iam::123456789012:policy/CompanyBaseline\"\n",
    );
    project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml"])
        .assert()
        .success();
}

#[test]
fn test_concurrency_limit_from_config() {
    let project = TestProject::new();
    project.write("template.yaml", POLICY_TEMPLATE);
    project.write("answers.yaml", "Reporter.tps: 100\nReporter.duration: 1000\n");
    project.write_config(
        "concurrency_limit = 100\n\n[managed_policies]\nCompanyBaseline = \"arn:aws:iam::123456789012:policy/CompanyBaseline\"\n",
    );

    project
        .samcheck()
        .args(["check", "--quiet", "--answers", "answers.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100% of the account limit of 100"));
}

#[test]
fn test_invalid_config_rejected() {
    let project = TestProject::new();
    project.write("template.yaml", POLICY_TEMPLATE);
    project.write_config("concurrency_limit = 0\n");

    project
        .samcheck()
        .args(["--quiet", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("concurrency_limit must be greater than zero"));
}
