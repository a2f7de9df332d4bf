//! The single actor that owns the session.
//!
//! Input arrives on an mpsc channel from the REPL thread; analysis requests
//! run as tasks on a `JoinSet`. Both are multiplexed in one `select!` loop,
//! so the controller is only ever touched from here.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use reflect_core::analysis::GENERIC_FAILURE_MESSAGE;
use reflect_core::{
    Dispatch, Generation, PendingRequest, Phase, Session, SessionEvent, SubmitOutcome,
    ViewController,
};
use reflect_interaction::SubmissionCoordinator;
use tokio::sync::mpsc;
use tokio::task::{Id, JoinError, JoinSet};

use crate::command::UiCommand;
use crate::render;

type Completion = (Generation, SubmitOutcome);

/// Outstanding request tasks and the generation each one answers.
#[derive(Default)]
struct InFlight {
    tasks: JoinSet<Completion>,
    generations: HashMap<Id, Generation>,
}

impl InFlight {
    fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }
}

pub struct SessionDriver<W: Write> {
    controller: ViewController,
    coordinator: Arc<SubmissionCoordinator>,
    out: W,
}

impl<W: Write> SessionDriver<W> {
    pub fn new(coordinator: Arc<SubmissionCoordinator>, out: W) -> Self {
        Self::with_controller(ViewController::new(), coordinator, out)
    }

    pub fn with_controller(
        controller: ViewController,
        coordinator: Arc<SubmissionCoordinator>,
        out: W,
    ) -> Self {
        Self {
            controller,
            coordinator,
            out,
        }
    }

    /// Processes commands until `Quit`, or until the channel closes and every
    /// outstanding request has finished. Returns the final session.
    pub async fn run(mut self, mut input: mpsc::Receiver<UiCommand>) -> Session {
        let mut in_flight = InFlight::default();
        let mut input_open = true;
        self.paint();

        loop {
            tokio::select! {
                command = input.recv(), if input_open => match command {
                    Some(UiCommand::Quit) => break,
                    Some(command) => self.handle_command(command, &mut in_flight),
                    None => input_open = false,
                },
                Some(joined) = in_flight.tasks.join_next_with_id(), if !in_flight.is_empty() => {
                    self.handle_completion(joined, &mut in_flight);
                }
                else => break,
            }
        }

        tracing::debug!(
            session_id = %self.controller.session().id(),
            abandoned = in_flight.len(),
            "Session driver finished"
        );
        self.controller.into_session()
    }

    fn handle_command(&mut self, command: UiCommand, in_flight: &mut InFlight) {
        match command {
            UiCommand::Continue => {
                if self.controller.session().phase() == Phase::Intro {
                    self.apply(vec![SessionEvent::Start], in_flight);
                }
            }
            UiCommand::Start => {
                self.apply(vec![SessionEvent::Start], in_flight);
            }
            UiCommand::Draft(text) => {
                if !self.apply(vec![SessionEvent::edit_text(text)], in_flight) {
                    self.notice_refusal();
                }
            }
            UiCommand::Submit => {
                if !self.apply(vec![SessionEvent::Submit], in_flight) {
                    self.notice_refusal();
                }
            }
            UiCommand::Analyze(text) => {
                if !self.controller.session().accepts_edits() {
                    self.notice_refusal();
                    return;
                }
                let events = vec![SessionEvent::edit_text(text), SessionEvent::Submit];
                let changed = self.apply(events, in_flight);
                if !changed || self.controller.session().phase() != Phase::InFlight {
                    self.notice_refusal();
                }
            }
            UiCommand::Reset => {
                self.apply(vec![SessionEvent::Reset], in_flight);
            }
            UiCommand::Status => self.paint(),
            UiCommand::Help => self.emit(&render::render_help()),
            UiCommand::Unknown(name) => self.emit(&render::render_unknown(&name)),
            UiCommand::Quit => {}
        }
    }

    /// Applies `events` in order and repaints once if anything changed.
    /// Returns whether anything changed.
    fn apply(&mut self, events: Vec<SessionEvent>, in_flight: &mut InFlight) -> bool {
        let mut changed = false;
        for event in events {
            match self.controller.dispatch(event) {
                Dispatch::Ignored => {}
                Dispatch::Updated => changed = true,
                Dispatch::Requested(request) => {
                    changed = true;
                    self.spawn_request(request, in_flight);
                }
            }
        }
        if changed {
            self.paint();
        }
        changed
    }

    fn spawn_request(&self, request: PendingRequest, in_flight: &mut InFlight) {
        let coordinator = Arc::clone(&self.coordinator);
        let generation = request.generation;
        let handle = in_flight.tasks.spawn(async move {
            let outcome = coordinator.submit(&request.text).await;
            (request.generation, outcome)
        });
        in_flight.generations.insert(handle.id(), generation);
    }

    /// Applies a finished request. A task that panicked or was cancelled
    /// fails its own generation, so the session never stays `InFlight`.
    fn handle_completion(
        &mut self,
        joined: Result<(Id, Completion), JoinError>,
        in_flight: &mut InFlight,
    ) {
        let (generation, outcome) = match joined {
            Ok((id, completion)) => {
                in_flight.generations.remove(&id);
                completion
            }
            Err(err) => {
                let Some(generation) = in_flight.generations.remove(&err.id()) else {
                    tracing::error!(error = %err, "Untracked analysis task did not complete");
                    return;
                };
                tracing::error!(error = %err, %generation, "Analysis task did not complete");
                (
                    generation,
                    SubmitOutcome::Failed(GENERIC_FAILURE_MESSAGE.to_string()),
                )
            }
        };
        if self.controller.complete(generation, outcome).changed() {
            self.paint();
        }
    }

    fn notice_refusal(&mut self) {
        if let Some(notice) = render::refusal_notice(self.controller.session()) {
            self.emit(&format!("{notice}\n"));
        }
    }

    fn paint(&mut self) {
        let frame = render::render(self.controller.session());
        self.emit(&frame);
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %err, "Failed to write output");
        }
    }
}
