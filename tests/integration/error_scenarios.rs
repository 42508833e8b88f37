use predicates::prelude::*;
use samcheck_cli::test_utils::{API_TEMPLATE, INVALID_TEMPLATE};

use crate::common::TestProject;

#[test]
fn test_missing_template() {
    let project = TestProject::new();

    project
        .samcheck()
        .args(["check", "--answers", "answers.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Template at template.yaml is not found"))
        .stderr(predicate::str::contains("--template"));
}

#[test]
fn test_invalid_template_lists_every_cause() {
    let project = TestProject::new();
    project.write("template.yaml", INVALID_TEMPLATE);
    project.write("answers.yaml", "");

    project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Invalid Serverless Application Specification document. Number of errors found: 2. \
             Resource with id [BrokenFunction] is invalid. Missing required property 'Runtime'. \
             Resource with id [BrokenFunction] is invalid. Missing required property 'Handler'.",
        ))
        // Nothing is asked for an invalid template
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_malformed_yaml() {
    let project = TestProject::new();
    project.write("template.yaml", "Resources: [unclosed\n");

    project
        .samcheck()
        .args(["--quiet", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse template"))
        .stderr(predicate::str::contains("template.yaml"));
}

#[test]
fn test_missing_answer() {
    let project = TestProject::new();
    project.write("template.yaml", API_TEMPLATE);
    project.write("answers.yaml", "ApiFunction.tps: 5\n");

    project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No answer provided for 'WorkerFunction.requests'"));
}

#[test]
fn test_invalid_answer() {
    let project = TestProject::new();
    project.write("template.yaml", API_TEMPLATE);
    project.write("answers.yaml", "entry_points: ApiFunction, Nope\n");

    project
        .samcheck()
        .args(["--quiet", "check", "--answers", "answers.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid answer 'Nope' for 'entry_points'"));
}

#[test]
fn test_missing_answers_file() {
    let project = TestProject::new();
    project.write("template.yaml", API_TEMPLATE);

    project
        .samcheck()
        .args(["--quiet", "check", "--answers", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.yaml"));
}
