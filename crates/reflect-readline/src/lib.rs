//! Terminal front end for Emotion Reflection.

pub mod cli;
pub mod command;
pub mod driver;
pub mod logging;
pub mod render;
pub mod repl;

use std::io::Write;
use std::sync::Arc;

use reflect_core::Session;
use reflect_interaction::SubmissionCoordinator;
use tokio::sync::mpsc;

pub use command::UiCommand;
pub use driver::SessionDriver;

/// Runs a single analysis through the same driver as the REPL and returns
/// the settled session.
pub async fn analyze_once<W: Write>(
    coordinator: Arc<SubmissionCoordinator>,
    text: &str,
    out: W,
) -> Session {
    let (tx, rx) = mpsc::channel(4);
    for command in [UiCommand::Start, UiCommand::Analyze(text.to_string())] {
        if let Err(err) = tx.try_send(command) {
            tracing::error!(error = %err, "Failed to queue command");
        }
    }
    drop(tx);
    SessionDriver::new(coordinator, out).run(rx).await
}
