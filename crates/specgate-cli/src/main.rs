mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Args, Parser, Subcommand};
use commands::{EmitOptions, FixtureInput};
use config::{ConfigError, load_settings};
use specgate_contract::ContractError;
use specgate_core::ExitStatus;
use specgate_fixtures::FixtureError;
use specgate_report::{OutputFormat, ReportError};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("{0}")]
    Fixture(#[from] FixtureError),
    #[error("{0}")]
    Contract(#[from] ContractError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "specgate", version, about = "Contract conformance checks for CI")]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log filter directive (defaults to RUST_LOG, then "warn").
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,
    /// Append NDJSON logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify good/bad fixtures (or one file) against a JSON Schema.
    Fixtures(FixturesArgs),
    /// Check a target text against the rule blocks of a contract.
    Contract(ContractArgs),
    /// Schema utilities.
    #[command(subcommand)]
    Schema(SchemaCommand),
    /// Print the effective configuration.
    Config,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["base", "file"])))]
struct FixturesArgs {
    /// Path to the JSON Schema.
    #[arg(long)]
    schema: PathBuf,
    /// Base directory with good/ and bad/ subdirectories.
    #[arg(long)]
    base: Option<PathBuf>,
    /// Single JSON file to validate.
    #[arg(long)]
    file: Option<PathBuf>,
    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Args, Debug)]
struct ContractArgs {
    /// Contract document holding the rule section.
    #[arg(long, visible_alias = "spec")]
    contract: PathBuf,
    /// Text artifact checked against the contract.
    #[arg(long, visible_alias = "workflow")]
    target: PathBuf,
    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Format of the main output.
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,
    /// Path to write the JSON summary file.
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
    /// Append a Markdown summary to the CI step summary file, if configured.
    #[arg(long, default_value_t = false)]
    gh_summary: bool,
}

#[derive(Subcommand, Debug)]
enum SchemaCommand {
    /// Check a schema against its meta-schema.
    Check {
        /// Path to the JSON Schema.
        schema: PathBuf,
    },
    /// Print the JSON Schema of the summary document.
    Summary,
}

impl From<ReportArgs> for EmitOptions {
    fn from(value: ReportArgs) -> Self {
        Self {
            output: value.output,
            summary: value.summary,
            gh_summary: value.gh_summary,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(status) => status.into(),
        Err(err) => {
            tracing::error!(event = "run_aborted", error = %err);
            eprintln!("error: {err}");
            ExitStatus::Usage.into()
        }
    }
}

fn run(cli: Cli) -> Result<ExitStatus, CliError> {
    let Cli {
        config,
        log_level,
        log_file,
        command,
    } = cli;

    let settings = load_settings(config.as_deref())?;
    logging::init_logging(log_level.as_deref(), log_file.as_deref()).map_err(CliError::Logging)?;

    match command {
        Command::Fixtures(args) => {
            let FixturesArgs {
                schema,
                base,
                file,
                report,
            } = args;
            let input = base
                .map(FixtureInput::Base)
                .or_else(|| file.map(FixtureInput::File))
                .ok_or_else(|| CliError::Usage("one of --base or --file is required".into()))?;
            tracing::info!(event = "run_started", mode = "fixtures", schema = %schema.display());
            commands::run_fixtures(&settings, &schema, &input, &report.into())
        }
        Command::Contract(args) => {
            tracing::info!(
                event = "run_started",
                mode = "contract",
                contract = %args.contract.display()
            );
            commands::run_contract(&settings, &args.contract, &args.target, &args.report.into())
        }
        Command::Schema(SchemaCommand::Check { schema }) => commands::run_schema_check(&schema),
        Command::Schema(SchemaCommand::Summary) => commands::run_schema_summary(),
        Command::Config => commands::run_config_show(&settings),
    }
}
