use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Environment variable GitHub Actions uses for the job summary file.
pub const DEFAULT_STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

/// Optional destination for the Markdown summary.
pub trait SummarySink {
    fn publish(&self, markdown: &str) -> io::Result<()>;

    /// Human-readable name of the destination, for logs.
    fn describe(&self) -> String;
}

/// Appends to the CI step summary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSummaryFile {
    path: PathBuf,
}

impl StepSummaryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the sink from `var`; `None` when unset or empty.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var_os(var)
            .filter(|value| !value.is_empty())
            .map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SummarySink for StepSummaryFile {
    fn publish(&self, markdown: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(markdown.as_bytes())?;
        file.write_all(b"\n")
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Publish to the sink if one was provided. Failures are logged, never raised.
///
/// Returns whether the summary was written.
pub fn publish_best_effort(sink: Option<&dyn SummarySink>, markdown: &str) -> bool {
    let Some(sink) = sink else {
        tracing::debug!(event = "step_summary_skipped", reason = "not_configured");
        return false;
    };

    match sink.publish(markdown) {
        Ok(()) => {
            tracing::info!(event = "step_summary_written", destination = %sink.describe());
            true
        }
        Err(err) => {
            tracing::warn!(
                event = "step_summary_skipped",
                destination = %sink.describe(),
                error = %err,
                "failed to write step summary"
            );
            false
        }
    }
}
