use serde::{Deserialize, Serialize};
use specgate_core::{CheckEntry, CheckMode, Counts, ResultSet, Status};

use crate::errors::Result;
use crate::summary::Summary;

/// Default maximum length of a diagnostic in the Markdown table.
pub const DEFAULT_DETAIL_LIMIT: usize = 140;

/// Presentation format for the primary stdout rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Md,
}

/// Knobs shared by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub detail_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            detail_limit: DEFAULT_DETAIL_LIMIT,
        }
    }
}

/// Render a result set in the requested format.
pub fn render(
    results: &ResultSet,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(results)),
        OutputFormat::Json => render_json(results),
        OutputFormat::Md => Ok(render_markdown(results, options)),
    }
}

/// Single-line JSON summary document.
pub fn render_json(results: &ResultSet) -> Result<String> {
    Ok(serde_json::to_string(&Summary::from_results(results))?)
}

/// Human-readable listing: one line per entry, then the breakdown.
pub fn render_text(results: &ResultSet) -> String {
    let mut lines = Vec::new();

    for entry in results.entries() {
        push_text_entry(&mut lines, results.mode, entry);
    }

    if results.mode == CheckMode::Contract {
        let violations: Vec<&CheckEntry> = results.violations().collect();
        if violations.is_empty() {
            lines.push("Contract check: OK".to_string());
        } else {
            lines.push("Contract violations detected:".to_string());
            for entry in violations {
                lines.push(format!("  - Rule '{}':", entry.subject));
                for pattern in &entry.missing {
                    lines.push(format!("      missing pattern: {pattern}"));
                }
            }
        }
    } else {
        lines.push(String::new());
        lines.push(format!("Totals: {}", totals(&results.counts())));
    }

    for warning in results.warnings() {
        lines.push(format!("warning: {warning}"));
    }

    lines.join("\n")
}

fn push_text_entry(lines: &mut Vec<String>, mode: CheckMode, entry: &CheckEntry) {
    let subject = &entry.subject;
    if mode == CheckMode::Contract {
        let marker = if entry.status.is_unexpected() { "FAIL" } else { "OK" };
        lines.push(format!("[{marker}] rule '{subject}'"));
        return;
    }

    match entry.status {
        Status::ExpectedPass => lines.push(format!("[OK] {subject}")),
        Status::ExpectedFail => lines.push(format!("[OK] {subject} (expected fail)")),
        Status::UnexpectedPass => lines.push(format!(
            "[FAIL: expected fail] {subject} validated but should fail"
        )),
        Status::UnexpectedFail => {
            lines.push(format!("[FAIL: expected pass] {subject}"));
            if let Some(detail) = &entry.detail {
                lines.push(format!("  {detail}"));
            }
        }
    }
}

/// Markdown summary with a bounded-width detail column.
pub fn render_markdown(results: &ResultSet, options: &RenderOptions) -> String {
    let mut lines = Vec::new();

    let (title, subject_column) = match results.mode {
        CheckMode::Contract => ("## Contract conformance summary", "Rule"),
        CheckMode::Fixtures | CheckMode::Single => ("## Fixture validation summary", "File"),
    };
    lines.push(title.to_string());
    lines.push(String::new());

    match results.mode {
        CheckMode::Contract => {
            lines.push(format!("- **Contract**: `{}`", results.reference));
            if let Some(target) = &results.subject {
                lines.push(format!("- **Target**: `{target}`"));
            }
        }
        CheckMode::Fixtures | CheckMode::Single => {
            lines.push(format!("- **Schema**: `{}`", results.reference));
            if let Some(base) = &results.base {
                lines.push(format!("- **Base**: `{base}`"));
            }
            if let Some(file) = &results.subject {
                lines.push(format!("- **File**: `{file}`"));
            }
        }
    }
    lines.push(String::new());

    lines.push(format!("| Group | {subject_column} | Status | Detail |"));
    lines.push("|---|---|---|---|".to_string());
    for entry in results.entries() {
        let detail = entry
            .detail
            .as_deref()
            .map(|detail| truncate_detail(&escape_cell(detail), options.detail_limit))
            .unwrap_or_default();
        lines.push(format!(
            "| {} | `{}` | {} | {} |",
            entry.group.as_str(),
            escape_cell(&entry.subject),
            entry.status.as_str(),
            detail
        ));
    }
    lines.push(String::new());
    lines.push(format!("**Totals:** {}", totals(&results.counts())));

    if !results.warnings().is_empty() {
        lines.push(String::new());
        for warning in results.warnings() {
            lines.push(format!("> warning: {warning}"));
        }
    }

    lines.join("\n")
}

/// Cut `detail` to at most `limit` characters, ending with `...` when cut.
pub fn truncate_detail(detail: &str, limit: usize) -> String {
    if detail.chars().count() <= limit {
        return detail.to_string();
    }
    let keep = limit.saturating_sub(3);
    let mut truncated: String = detail.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}

fn totals(counts: &Counts) -> String {
    match counts {
        Counts::Fixtures {
            good_total,
            good_pass,
            bad_total,
            bad_expected_fail,
            bad_unexpected_pass,
            ..
        } => format!(
            "good {good_pass}/{good_total} pass; bad expected-fail {bad_expected_fail}/{bad_total}; bad unexpected-pass {bad_unexpected_pass}"
        ),
        Counts::Single { pass, fail } => format!("pass {pass}; fail {fail}"),
        Counts::Contract {
            rules_total,
            rules_passed,
            rules_violated,
        } => format!("rules {rules_passed}/{rules_total} satisfied; violated {rules_violated}"),
    }
}
