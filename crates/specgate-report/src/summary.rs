use schemars::JsonSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::{Deserialize, Serialize};
use specgate_core::{CheckEntry, CheckMode, Counts, ResultSet};

/// Machine-readable run summary consumed by CI orchestrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub mode: CheckMode,
    /// Schema used for fixture classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Contract document used for conformance checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    /// Base directory holding `good/` and `bad/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Artifact checked in single-file mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Target text checked against the contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub counts: Counts,
    /// Entries in evaluation order.
    pub files: Vec<CheckEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Summary {
    pub fn from_results(results: &ResultSet) -> Self {
        let reference = Some(results.reference.clone());
        let (schema, contract) = match results.mode {
            CheckMode::Contract => (None, reference),
            CheckMode::Fixtures | CheckMode::Single => (reference, None),
        };
        let (file, target) = match results.mode {
            CheckMode::Single => (results.subject.clone(), None),
            CheckMode::Contract => (None, results.subject.clone()),
            CheckMode::Fixtures => (None, None),
        };

        Self {
            mode: results.mode,
            schema,
            contract,
            base: results.base.clone(),
            file,
            target,
            counts: results.counts(),
            files: results.entries().to_vec(),
            warnings: results.warnings().to_vec(),
        }
    }
}

/// Emit the JSON Schema for the summary document.
pub fn summary_json_schema() -> RootSchema {
    schema_for!(Summary)
}
