use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::exit::ExitStatus;

/// Which engine produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Paired `good/` and `bad/` fixture groups.
    Fixtures,
    /// One artifact checked directly, always expected to validate.
    Single,
    /// Rule blocks of a contract document checked against a target text.
    Contract,
}

/// Expectation group an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Expect-valid fixture.
    Good,
    /// Expect-invalid fixture.
    Bad,
    /// Single-file mode artifact.
    Single,
    /// Contract rule block.
    Contract,
}

impl Group {
    /// Whether members of this group are expected to pass validation.
    pub fn expects_valid(self) -> bool {
        !matches!(self, Group::Bad)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Group::Good => "good",
            Group::Bad => "bad",
            Group::Single => "single",
            Group::Contract => "contract",
        }
    }
}

/// Four-way classification of actual versus expected validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    ExpectedPass,
    ExpectedFail,
    UnexpectedPass,
    UnexpectedFail,
}

impl Status {
    /// Classify an outcome given the group expectation.
    pub fn classify(expect_valid: bool, valid: bool) -> Self {
        match (expect_valid, valid) {
            (true, true) => Status::ExpectedPass,
            (true, false) => Status::UnexpectedFail,
            (false, false) => Status::ExpectedFail,
            (false, true) => Status::UnexpectedPass,
        }
    }

    /// Returns true for the two states that make a run fail.
    pub fn is_unexpected(self) -> bool {
        matches!(self, Status::UnexpectedPass | Status::UnexpectedFail)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::ExpectedPass => "expected_pass",
            Status::ExpectedFail => "expected_fail",
            Status::UnexpectedPass => "unexpected_pass",
            Status::UnexpectedFail => "unexpected_fail",
        }
    }
}

/// One classified artifact or rule block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckEntry {
    /// Artifact path or rule identifier.
    #[serde(rename = "path")]
    pub subject: String,
    pub group: Group,
    pub status: Status,
    /// Violation diagnostic (path + reason, or missing-pattern list).
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Required substrings absent from the target, in contract order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl CheckEntry {
    pub fn new(
        subject: impl Into<String>,
        group: Group,
        status: Status,
        detail: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            group,
            status,
            detail,
            missing: Vec::new(),
        }
    }

    /// Attach the list of missing required substrings.
    pub fn with_missing(mut self, missing: Vec<String>) -> Self {
        self.missing = missing;
        self
    }
}

/// Aggregate counts, shaped per check mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Counts {
    Fixtures {
        good_total: usize,
        good_pass: usize,
        good_fail: usize,
        bad_total: usize,
        bad_expected_fail: usize,
        bad_unexpected_pass: usize,
    },
    Single {
        pass: usize,
        fail: usize,
    },
    Contract {
        rules_total: usize,
        rules_passed: usize,
        rules_violated: usize,
    },
}

/// Ordered classification results for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub mode: CheckMode,
    /// Schema path (fixture modes) or contract path (contract mode).
    pub reference: String,
    /// Base directory holding the fixture groups.
    pub base: Option<String>,
    /// Single artifact path or conformance target path.
    pub subject: Option<String>,
    entries: Vec<CheckEntry>,
    warnings: Vec<String>,
}

impl ResultSet {
    pub fn new(mode: CheckMode, reference: impl Into<String>) -> Self {
        Self {
            mode,
            reference: reference.into(),
            base: None,
            subject: None,
            entries: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Append a classified entry, preserving evaluation order.
    pub fn push(&mut self, entry: CheckEntry) {
        self.entries.push(entry);
    }

    /// Record a non-fatal warning that does not affect the exit status.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn entries(&self) -> &[CheckEntry] {
        &self.entries
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose status is unexpected, in order.
    pub fn violations(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.status.is_unexpected())
    }

    /// Fold the entries into mode-shaped counts.
    pub fn counts(&self) -> Counts {
        let mut tally = Tally::default();
        for entry in &self.entries {
            tally.add(entry);
        }

        match self.mode {
            CheckMode::Fixtures => Counts::Fixtures {
                good_total: tally.good_pass + tally.good_fail,
                good_pass: tally.good_pass,
                good_fail: tally.good_fail,
                bad_total: tally.bad_expected_fail + tally.bad_unexpected_pass,
                bad_expected_fail: tally.bad_expected_fail,
                bad_unexpected_pass: tally.bad_unexpected_pass,
            },
            CheckMode::Single => Counts::Single {
                pass: tally.single_pass,
                fail: tally.single_fail,
            },
            CheckMode::Contract => Counts::Contract {
                rules_total: tally.rules_passed + tally.rules_violated,
                rules_passed: tally.rules_passed,
                rules_violated: tally.rules_violated,
            },
        }
    }

    /// Derive the exit status from the entries alone.
    pub fn exit_status(&self) -> ExitStatus {
        if self.violations().next().is_some() {
            ExitStatus::Violations
        } else {
            ExitStatus::Conformant
        }
    }
}

#[derive(Default)]
struct Tally {
    good_pass: usize,
    good_fail: usize,
    bad_expected_fail: usize,
    bad_unexpected_pass: usize,
    single_pass: usize,
    single_fail: usize,
    rules_passed: usize,
    rules_violated: usize,
}

impl Tally {
    fn add(&mut self, entry: &CheckEntry) {
        let passed = matches!(entry.status, Status::ExpectedPass | Status::UnexpectedPass);
        match (entry.group, passed) {
            (Group::Good, true) => self.good_pass += 1,
            (Group::Good, false) => self.good_fail += 1,
            (Group::Bad, true) => self.bad_unexpected_pass += 1,
            (Group::Bad, false) => self.bad_expected_fail += 1,
            (Group::Single, true) => self.single_pass += 1,
            (Group::Single, false) => self.single_fail += 1,
            (Group::Contract, true) => self.rules_passed += 1,
            (Group::Contract, false) => self.rules_violated += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(subject: &str, group: Group, valid: bool) -> CheckEntry {
        let status = Status::classify(group.expects_valid(), valid);
        CheckEntry::new(subject, group, status, None)
    }

    #[test]
    fn classify_covers_all_four_states() {
        assert_eq!(Status::classify(true, true), Status::ExpectedPass);
        assert_eq!(Status::classify(true, false), Status::UnexpectedFail);
        assert_eq!(Status::classify(false, false), Status::ExpectedFail);
        assert_eq!(Status::classify(false, true), Status::UnexpectedPass);
    }

    #[test]
    fn fixture_counts_fold_over_entries() {
        let mut results = ResultSet::new(CheckMode::Fixtures, "schema.json");
        results.push(entry("good/a.json", Group::Good, true));
        results.push(entry("good/b.json", Group::Good, false));
        results.push(entry("bad/c.json", Group::Bad, false));
        results.push(entry("bad/d.json", Group::Bad, true));
        results.push(entry("bad/e.json", Group::Bad, false));

        assert_eq!(
            results.counts(),
            Counts::Fixtures {
                good_total: 2,
                good_pass: 1,
                good_fail: 1,
                bad_total: 3,
                bad_expected_fail: 2,
                bad_unexpected_pass: 1,
            }
        );
        assert_eq!(results.violations().count(), 2);
        assert_eq!(results.exit_status(), ExitStatus::Violations);
    }

    #[test]
    fn expected_outcomes_are_conformant() {
        let mut results = ResultSet::new(CheckMode::Fixtures, "schema.json");
        results.push(entry("good/a.json", Group::Good, true));
        results.push(entry("bad/b.json", Group::Bad, false));
        assert_eq!(results.exit_status(), ExitStatus::Conformant);
    }

    #[test]
    fn empty_result_set_is_conformant() {
        let results = ResultSet::new(CheckMode::Contract, "spec.yaml");
        assert!(results.is_empty());
        assert_eq!(results.exit_status(), ExitStatus::Conformant);
        assert_eq!(
            results.counts(),
            Counts::Contract {
                rules_total: 0,
                rules_passed: 0,
                rules_violated: 0,
            }
        );
    }

    #[test]
    fn warnings_do_not_change_exit_status() {
        let mut results = ResultSet::new(CheckMode::Contract, "spec.yaml");
        results.warn("no rule blocks extracted");
        assert_eq!(results.warnings().len(), 1);
        assert_eq!(results.exit_status(), ExitStatus::Conformant);
    }

    #[test]
    fn single_counts_use_pass_fail_shape() {
        let mut results = ResultSet::new(CheckMode::Single, "schema.json");
        results.push(entry("doc.json", Group::Single, false));
        let counts = serde_json::to_value(results.counts()).expect("serialize counts");
        assert_eq!(counts, serde_json::json!({ "pass": 0, "fail": 1 }));
        assert_eq!(results.exit_status().code(), 1);
    }
}
