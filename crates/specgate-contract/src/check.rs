use specgate_core::{CheckEntry, CheckMode, Group, ResultSet, Status};

use crate::extract::RuleBlock;

/// Missing substrings for one rule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub id: String,
    pub missing: Vec<String>,
}

impl RuleOutcome {
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Per-rule outcomes in contract order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConformanceReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl ConformanceReport {
    /// Returns true when no rule has missing substrings.
    pub fn is_ok(&self) -> bool {
        self.outcomes.iter().all(RuleOutcome::is_satisfied)
    }

    /// Violated rules, in contract order.
    pub fn violations(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_satisfied())
    }

    /// Convert into a result set with one `contract` entry per rule.
    pub fn into_result_set(self, contract: &str, target: &str) -> ResultSet {
        let mut results = ResultSet::new(CheckMode::Contract, contract).with_subject(target);
        if self.outcomes.is_empty() {
            results.warn(format!("no rule blocks extracted from {contract}"));
        }

        for outcome in self.outcomes {
            let satisfied = outcome.is_satisfied();
            let status = Status::classify(Group::Contract.expects_valid(), satisfied);
            let detail = (!satisfied).then(|| format!("missing: {}", outcome.missing.join(", ")));
            results.push(
                CheckEntry::new(outcome.id, Group::Contract, status, detail)
                    .with_missing(outcome.missing),
            );
        }

        results
    }
}

/// Required substrings of `block` that do not occur in `target`.
pub fn missing_substrings(block: &RuleBlock, target: &str) -> Vec<String> {
    block
        .required
        .iter()
        .filter(|pattern| !target.contains(pattern.as_str()))
        .cloned()
        .collect()
}

/// Check every rule block against the target text.
pub fn check_conformance(blocks: &[RuleBlock], target: &str) -> ConformanceReport {
    let outcomes = blocks
        .iter()
        .map(|block| RuleOutcome {
            id: block.id.clone(),
            missing: missing_substrings(block, target),
        })
        .collect();

    ConformanceReport { outcomes }
}
