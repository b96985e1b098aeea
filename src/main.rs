//! commit-planner - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use commit_planner::apply::{
    ApplyEngine, ExternalEditor, Interrupt, TerminalOperator, render_table,
};
use commit_planner::config::Config;
use commit_planner::error::OperatorError;
use commit_planner::git::{GitCommitter, GitDiffSource};
use commit_planner::llm::{Granularity, OpenAiClient};
use commit_planner::logging::init_logging;
use commit_planner::plan::{PlanOutcome, PlanSettings, build_plan};

/// Split the uncommitted diff into commits proposed by a language model.
#[derive(Parser, Debug)]
#[command(name = "commit-planner")]
#[command(about = "Split the uncommitted diff into commits proposed by a language model")]
#[command(version)]
struct Cli {
    /// Show and commit full multi-line messages instead of the first line only
    #[arg(short = 'm', long)]
    multiline: bool,

    /// Model to request (defaults to COMMIT_PLANNER_MODEL or gpt-3.5-turbo)
    #[arg(long)]
    model: Option<String>,

    /// How finely to split changes, from 0.0 (few large commits) to 1.0 (many small ones)
    #[arg(short = 'g', long, default_value = "0.5")]
    granularity: Granularity,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Dry run - print the proposed commits without prompting or committing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env();
    init_logging(cli.debug, &config.log_level);

    // Ctrl-C only raises the flag; each step unwinds on its own so scoped
    // resources (the edit buffer, the editor child) are cleaned up
    let interrupt = Interrupt::new();
    let listener = interrupt.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            listener.raise();
        }
    });

    // Step 1: Locate the repository
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let source = GitDiffSource::discover(&cwd)?;

    // Step 2: Diff, prompt, and request the plan
    let client = OpenAiClient::new(
        &config.api_base,
        config.api_key.clone(),
        config.request_timeout,
    )
    .context("Failed to set up completion client")?;

    let settings = PlanSettings {
        model: cli.model.unwrap_or_else(|| config.default_model.clone()),
        multiline: cli.multiline,
        granularity: cli.granularity,
    };

    let outcome = tokio::select! {
        outcome = build_plan(&source, &client, &settings) => outcome?,
        _ = tokio::signal::ctrl_c() => {
            println!("Interrupted");
            return Ok(());
        }
    };

    let plan = match outcome {
        PlanOutcome::NoChanges => {
            println!("No changes");
            return Ok(());
        }
        PlanOutcome::Planned { plan, .. } => plan,
    };

    if cli.dry_run {
        println!("{}", render_table(&plan, cli.multiline));
        return Ok(());
    }

    // Step 3: Walk the operator through the plan
    let mut engine = ApplyEngine::new(
        plan,
        cli.multiline,
        TerminalOperator::new(),
        GitCommitter::new(source.workdir()),
        ExternalEditor::new(&config.editor).with_interrupt(interrupt.clone()),
    )
    .with_interrupt(interrupt);

    match engine.run() {
        Ok(_) => Ok(()),
        Err(OperatorError::Interrupted) => {
            println!("Interrupted");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
