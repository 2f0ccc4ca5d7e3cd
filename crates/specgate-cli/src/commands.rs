use std::path::{Path, PathBuf};

use specgate_contract::check_contract_files;
use specgate_core::{ExitStatus, ResultSet};
use specgate_fixtures::{JsonSchemaValidator, check_schema_file, classify_fixtures, classify_single};
use specgate_report::{
    OutputFormat, StepSummaryFile, Summary, SummarySink, publish_best_effort, render,
    render_markdown, summary_json_schema, write_summary_file,
};

use crate::CliError;
use crate::config::{Settings, render_settings};

/// Where the result set goes once a check has finished.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub output: Option<OutputFormat>,
    pub summary: Option<PathBuf>,
    pub gh_summary: bool,
}

pub enum FixtureInput {
    Base(PathBuf),
    File(PathBuf),
}

pub fn run_fixtures(
    settings: &Settings,
    schema: &Path,
    input: &FixtureInput,
    emit: &EmitOptions,
) -> Result<ExitStatus, CliError> {
    let validator = JsonSchemaValidator::from_path(schema)?;
    tracing::info!(event = "schema_compiled", path = %schema.display());

    let schema_ref = schema.display().to_string();
    let results = match input {
        FixtureInput::Base(base) => {
            classify_fixtures(&validator, &schema_ref, base, &settings.fixtures.layout())?
        }
        FixtureInput::File(file) => classify_single(&validator, &schema_ref, file)?,
    };

    emit_results(settings, &results, emit)
}

pub fn run_contract(
    settings: &Settings,
    contract: &Path,
    target: &Path,
    emit: &EmitOptions,
) -> Result<ExitStatus, CliError> {
    let results = check_contract_files(contract, target, &settings.contract.syntax())?;
    emit_results(settings, &results, emit)
}

pub fn run_schema_check(schema: &Path) -> Result<ExitStatus, CliError> {
    check_schema_file(schema)?;
    println!("SCHEMA OK: {}", schema.display());
    Ok(ExitStatus::Conformant)
}

pub fn run_schema_summary() -> Result<ExitStatus, CliError> {
    let schema = summary_json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitStatus::Conformant)
}

pub fn run_config_show(settings: &Settings) -> Result<ExitStatus, CliError> {
    print!("{}", render_settings(settings)?);
    Ok(ExitStatus::Conformant)
}

/// Render to stdout, then run the opt-in side effects.
fn emit_results(
    settings: &Settings,
    results: &ResultSet,
    emit: &EmitOptions,
) -> Result<ExitStatus, CliError> {
    let format = emit.output.unwrap_or(settings.report.format);
    let options = settings.report.render_options();

    println!("{}", render(results, format, &options)?);

    if let Some(path) = &emit.summary {
        write_summary_file(path, &Summary::from_results(results))?;
    }

    if emit.gh_summary {
        let sink = StepSummaryFile::from_env(&settings.step_summary.env_var);
        let sink = sink.as_ref().map(|sink| sink as &dyn SummarySink);
        publish_best_effort(sink, &render_markdown(results, &options));
    }

    let status = results.exit_status();
    tracing::info!(
        event = "run_finished",
        status = status.as_str(),
        entries = results.entries().len(),
        violations = results.violations().count()
    );
    Ok(status)
}
