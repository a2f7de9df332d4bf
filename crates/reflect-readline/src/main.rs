use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio::sync::mpsc;

use reflect_core::Phase;
use reflect_interaction::{HttpAnalysisService, SubmissionCoordinator};
use reflect_readline::cli::Cli;
use reflect_readline::logging::init_logging;
use reflect_readline::{SessionDriver, UiCommand, analyze_once, repl};

/// The main entry point for the Emotion Reflection REPL.
///
/// 1. Resolves configuration and initializes logging
/// 2. Builds the HTTP analysis service and the submission coordinator
/// 3. Either analyzes `--text` once, or runs the rustyline loop on a blocking
///    thread while the session driver owns all state on the async side
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(&cli.log_config()).context("Failed to initialize logging")?;

    // ===== Backend Initialization =====
    let config = cli.client_config()?;
    let service = HttpAnalysisService::new(&config)?;
    tracing::info!(endpoint = %service.endpoint(), "Analysis service configured");
    let coordinator = Arc::new(SubmissionCoordinator::new(Arc::new(service)));

    if let Some(text) = &cli.text {
        let session = analyze_once(coordinator, text, io::stdout()).await;
        return Ok(if session.phase() == Phase::Success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // ===== REPL =====
    let (command_tx, command_rx) = mpsc::channel::<UiCommand>(32);
    let reader = tokio::task::spawn_blocking(move || repl::read_loop(command_tx));

    SessionDriver::new(coordinator, io::stdout())
        .run(command_rx)
        .await;

    reader.await.context("REPL thread panicked")??;
    println!("{}", "Goodbye!".bright_green());
    Ok(ExitCode::SUCCESS)
}
