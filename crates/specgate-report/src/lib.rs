//! Rendering and persistence of specgate result sets.

pub mod errors;
pub mod render;
pub mod sink;
pub mod summary;
pub mod write;

pub use errors::{ReportError, Result};
pub use render::{
    DEFAULT_DETAIL_LIMIT, OutputFormat, RenderOptions, render, render_json, render_markdown,
    render_text, truncate_detail,
};
pub use sink::{DEFAULT_STEP_SUMMARY_ENV, StepSummaryFile, SummarySink, publish_best_effort};
pub use summary::{Summary, summary_json_schema};
pub use write::write_summary_file;
