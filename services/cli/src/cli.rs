use crate::commands::{run_batch, run_score, run_validate, BatchArgs, ScoreArgs, ValidateArgs};
use crate::demo::{run_demo, DemoArgs};
use clap::{Parser, Subcommand};
use talent_radar::config::AppConfig;
use talent_radar::error::AppError;
use talent_radar::telemetry;
use talent_radar::workflows::screening::ScreeningEngine;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "talent-radar",
    about = "Score extracted candidate data against graduated position criteria",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one candidate against a position definition
    Score(ScoreArgs),
    /// Score every candidate in a CSV export against a position definition
    Batch(BatchArgs),
    /// Check a position definition for criteria that cannot be scored
    Validate(ValidateArgs),
    /// Run the senior accountant walkthrough with built-in data
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, ?config.screening, "configuration loaded");

    let engine = ScreeningEngine::new(config.screening.evaluation_config());

    match cli.command {
        Command::Score(args) => run_score(&engine, args),
        Command::Batch(args) => run_batch(&engine, args),
        Command::Validate(args) => run_validate(&engine, args),
        Command::Demo(args) => run_demo(&engine, args),
    }
}
