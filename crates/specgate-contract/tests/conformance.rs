use std::fs;
use std::path::PathBuf;

use specgate_contract::{
    ContractError, ContractSyntax, RuleBlock, check_conformance, check_contract_files,
    extract_rule_blocks,
};
use specgate_core::{ExitStatus, Group, Status};

const CONTRACT: &str = r#"version: 1
pipeline_name: validation_ci
contract:
  - id: "checkout"
    must_contain:
      - actions/checkout
  - id: "build"
    name: Build and test
    must_contain:
      - actions/checkout
      - "run: pytest"
  - id: "lint"
    must_contain:
      - ruff check
notes:
  - id: ignored
    must_contain:
      - never-checked
"#;

const WORKFLOW: &str = r#"name: ci
on: [push]
jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - run: ruff check .
"#;

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("specgate_contract_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn extracts_blocks_in_document_order() {
    let blocks = extract_rule_blocks(CONTRACT);
    let ids: Vec<&str> = blocks.iter().map(|block| block.id.as_str()).collect();
    assert_eq!(ids, vec!["checkout", "build", "lint"]);
    assert_eq!(blocks[1].required, vec!["actions/checkout", "run: pytest"]);
}

#[test]
fn extraction_is_idempotent() {
    let first = extract_rule_blocks(CONTRACT);
    let second = extract_rule_blocks(CONTRACT);
    assert_eq!(first, second);
}

#[test]
fn reports_missing_pattern_for_build_rule() {
    let mut build = RuleBlock::new("build");
    build.require("actions/checkout");
    build.require("run: pytest");

    let report = check_conformance(&[build], "steps:\n  - uses: actions/checkout@v4\n");
    assert!(!report.is_ok());

    let violations: Vec<_> = report.violations().collect();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].id, "build");
    assert_eq!(violations[0].missing, vec!["run: pytest"]);

    let results = report.into_result_set("spec.yaml", "ci.yml");
    assert_eq!(results.exit_status(), ExitStatus::Violations);
}

#[test]
fn zero_blocks_pass_vacuously_with_warning() {
    let blocks = extract_rule_blocks("version: 1\npipeline_name: empty\n");
    assert!(blocks.is_empty());

    let report = check_conformance(&blocks, WORKFLOW);
    assert!(report.is_ok());
    assert_eq!(report.violations().count(), 0);

    let results = report.into_result_set("empty.yaml", "ci.yml");
    assert_eq!(results.exit_status(), ExitStatus::Conformant);
    assert_eq!(results.warnings(), ["no rule blocks extracted from empty.yaml"]);
}

#[test]
fn adding_an_absent_requirement_never_removes_violations() {
    let blocks = extract_rule_blocks(CONTRACT);
    let before: Vec<String> = check_conformance(&blocks, WORKFLOW)
        .violations()
        .map(|outcome| outcome.id.clone())
        .collect();

    let mut stricter = blocks.clone();
    stricter[0].require("docker/build-push-action");
    let after: Vec<String> = check_conformance(&stricter, WORKFLOW)
        .violations()
        .map(|outcome| outcome.id.clone())
        .collect();

    for id in &before {
        assert!(after.contains(id), "violation for {id} disappeared");
    }
    assert!(after.contains(&"checkout".to_string()));
}

#[test]
fn matching_is_literal_and_case_sensitive() {
    let mut block = RuleBlock::new("glob");
    block.require("run: *");
    block.require("Actions/Checkout");
    let report = check_conformance(&[block], "run: pytest\nactions/checkout\n");
    assert_eq!(report.outcomes[0].missing, vec!["run: *", "Actions/Checkout"]);
}

#[test]
fn file_check_preserves_rule_order_in_result_set() {
    let dir = temp_dir("files");
    let contract = dir.join("validation_ci.spec.yaml");
    let workflow = dir.join("ci.yml");
    fs::write(&contract, CONTRACT).expect("write contract");
    fs::write(&workflow, WORKFLOW).expect("write workflow");

    let results = check_contract_files(&contract, &workflow, &ContractSyntax::default())
        .expect("check contract");

    let subjects: Vec<&str> = results
        .entries()
        .iter()
        .map(|entry| entry.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["checkout", "build", "lint"]);
    assert!(results.entries().iter().all(|entry| entry.group == Group::Contract));
    assert_eq!(results.entries()[0].status, Status::ExpectedPass);
    assert_eq!(results.entries()[1].status, Status::UnexpectedFail);
    assert_eq!(results.entries()[1].missing, vec!["run: pytest"]);
    assert_eq!(results.entries()[2].status, Status::ExpectedPass);
    assert_eq!(results.exit_status(), ExitStatus::Violations);
}

#[test]
fn missing_contract_is_an_error() {
    let dir = temp_dir("missing");
    let workflow = dir.join("ci.yml");
    fs::write(&workflow, WORKFLOW).expect("write workflow");

    let err = check_contract_files(
        &dir.join("absent.yaml"),
        &workflow,
        &ContractSyntax::default(),
    )
    .expect_err("missing contract must fail");
    assert!(matches!(err, ContractError::ContractNotFound(_)));
}
