//! Contract extraction and conformance checking.
//!
//! A contract document lists rule blocks with required literal substrings;
//! a target text (typically a CI workflow) conforms when it contains every
//! substring of every block.

pub mod check;
pub mod errors;
pub mod extract;

use std::path::Path;

pub use check::{ConformanceReport, RuleOutcome, check_conformance, missing_substrings};
pub use errors::{ContractError, Result};
pub use extract::{
    ContractParser, ContractSyntax, LineKind, ParseState, RuleBlock, classify_line,
    extract_rule_blocks, extract_rule_blocks_with,
};
use specgate_core::ResultSet;

/// Read a contract and a target from disk and check conformance.
pub fn check_contract_files(
    contract_path: &Path,
    target_path: &Path,
    syntax: &ContractSyntax,
) -> Result<ResultSet> {
    if !contract_path.is_file() {
        return Err(ContractError::ContractNotFound(contract_path.to_path_buf()));
    }
    if !target_path.is_file() {
        return Err(ContractError::TargetNotFound(target_path.to_path_buf()));
    }

    let contract_text = read_text(contract_path)?;
    let target_text = read_text(target_path)?;

    let blocks = extract_rule_blocks_with(&contract_text, syntax);
    tracing::info!(
        event = "contract_extracted",
        path = %contract_path.display(),
        blocks = blocks.len()
    );
    if blocks.is_empty() {
        tracing::warn!(
            event = "contract_empty",
            path = %contract_path.display(),
            "no rule blocks extracted; conformance passes vacuously"
        );
    }

    let report = check_conformance(&blocks, &target_text);
    tracing::info!(
        event = "conformance_checked",
        target_path = %target_path.display(),
        violations = report.violations().count()
    );

    Ok(report.into_result_set(
        &contract_path.display().to_string(),
        &target_path.display().to_string(),
    ))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ContractError::Read {
        path: path.to_path_buf(),
        source,
    })
}
