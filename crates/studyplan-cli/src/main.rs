mod logging;
mod settings;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use studyplan_core::{PlanDraft, PlanError, PlanStatus, ValidationResult};
use studyplan_rules::{
    CreationOptions, non_study_time_blocks_json_schema, plan_draft_json_schema,
    validate_creation, validate_status_transition,
};
use studyplan_wizard::{WizardContext, WizardStep, finalize, validate_all_with, validate_step_with};
use thiserror::Error;

use logging::init_logging;
use settings::{Settings, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "studyplan", version, about = "Study plan draft validator")]
struct Cli {
    /// Settings file (defaults to ./studyplan.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a single wizard step.
    Step(StepArgs),
    /// Validate every step that can block submission.
    All(DraftArgs),
    /// Validate and, when admissible, print the draft for scheduling.
    Submit(DraftArgs),
    /// Run the creation rules on a complete draft.
    Create(CreateArgs),
    /// Check a plan lifecycle transition.
    Transition(TransitionArgs),
    /// Print a JSON Schema.
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
struct StepArgs {
    /// Wizard step identifier (1, 2, 2.5, 3, 4, 5, 6, 7).
    step: WizardStep,
    /// Path to the draft JSON.
    draft: PathBuf,
}

#[derive(Args, Debug)]
struct DraftArgs {
    /// Path to the draft JSON.
    draft: PathBuf,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Path to the draft JSON.
    draft: PathBuf,
    /// Defer content checks (camp submissions).
    #[arg(long, default_value_t = false)]
    skip_contents: bool,
}

#[derive(Args, Debug)]
struct TransitionArgs {
    from: PlanStatus,
    to: PlanStatus,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    #[arg(value_enum, default_value_t = SchemaKind::Draft)]
    kind: SchemaKind,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SchemaKind {
    Draft,
    NonStudyBlocks,
}

fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    init_logging(&settings.logging)?;

    match cli.command {
        Command::Step(args) => run_step(args, &settings),
        Command::All(args) => run_all(args, &settings),
        Command::Submit(args) => run_submit(args, &settings),
        Command::Create(args) => run_create(args, &settings),
        Command::Transition(args) => {
            let result = validate_status_transition(args.from, args.to);
            tracing::info!(event = "transition_checked", from = %args.from, to = %args.to);
            report(&result)
        }
        Command::Schema(args) => {
            let schema = match args.kind {
                SchemaKind::Draft => plan_draft_json_schema(),
                SchemaKind::NonStudyBlocks => non_study_time_blocks_json_schema(),
            };
            print_json(&schema)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_step(args: StepArgs, settings: &Settings) -> Result<ExitCode, CliError> {
    let draft = load_draft(&args.draft)?;
    let ctx = WizardContext::new(settings.validation.today());
    let result = validate_step_with(args.step, &draft, &ctx);
    tracing::info!(event = "step_finished", step = %args.step, valid = result.is_valid());
    report(&result)
}

fn run_all(args: DraftArgs, settings: &Settings) -> Result<ExitCode, CliError> {
    let draft = load_draft(&args.draft)?;
    let ctx = WizardContext::new(settings.validation.today());
    let result = validate_all_with(&draft, &ctx);
    tracing::info!(event = "all_steps_finished", valid = result.is_valid());
    report(&result)
}

fn run_submit(args: DraftArgs, settings: &Settings) -> Result<ExitCode, CliError> {
    let draft = load_draft(&args.draft)?;
    let ctx = WizardContext::new(settings.validation.today());
    match finalize(&draft, &ctx) {
        Ok(validated) => {
            tracing::info!(event = "draft_accepted", warnings = validated.warnings.len());
            print_json(&validated)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(result) => {
            tracing::warn!(event = "draft_rejected", errors = result.errors.len());
            report(&result)
        }
    }
}

fn run_create(args: CreateArgs, settings: &Settings) -> Result<ExitCode, CliError> {
    let draft = load_draft(&args.draft)?;
    let mut options = CreationOptions::new(settings.validation.today());
    if args.skip_contents || settings.validation.skip_content_validation {
        options = options.skip_contents();
    }
    let result = validate_creation(&draft, &options)?;
    tracing::info!(event = "creation_finished", valid = result.is_valid());
    report(&result)
}

fn load_draft(path: &Path) -> Result<PlanDraft, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let draft = serde_json::from_str(&contents)?;
    tracing::debug!(event = "draft_loaded", path = %path.display());
    Ok(draft)
}

fn report(result: &ValidationResult) -> Result<ExitCode, CliError> {
    print_json(result)?;
    if result.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
