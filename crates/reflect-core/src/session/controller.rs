//! Owner of the live session.

use tracing::{debug, info};

use super::{Generation, PendingRequest, Session, SessionEvent, transition};
use crate::analysis::SubmitOutcome;

/// What applying an event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The event was not valid for the current state.
    Ignored,
    /// The session changed and should be re-rendered.
    Updated,
    /// The session entered `InFlight`; the request must be sent.
    Requested(PendingRequest),
}

impl Dispatch {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Holds the one [`Session`] for a screen visit and feeds events through
/// [`transition`].
///
/// The controller never talks to the network. A [`Dispatch::Requested`] tells
/// the caller to run the request and report back through
/// [`ViewController::complete`].
#[derive(Debug, Default)]
pub struct ViewController {
    session: Session,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Dispatch {
        let kind = event.kind();
        let is_completion = event.is_completion();
        let previous_phase = self.session.phase();
        let previous_generation = self.session.generation();

        let next = transition(self.session.clone(), event);
        if next == self.session {
            if is_completion {
                info!(
                    session_id = %self.session.id(),
                    phase = %previous_phase,
                    generation = %previous_generation,
                    "Dropping analysis outcome that is no longer awaited"
                );
            } else {
                debug!(session_id = %self.session.id(), event = kind, phase = %previous_phase, "Event ignored");
            }
            return Dispatch::Ignored;
        }

        self.session = next;
        debug!(
            session_id = %self.session.id(),
            event = kind,
            from = %previous_phase,
            to = %self.session.phase(),
            "Session transition"
        );

        if self.session.generation() != previous_generation {
            if let Some(request) = self.session.pending_request() {
                info!(
                    session_id = %self.session.id(),
                    generation = %request.generation,
                    chars = request.text.chars().count(),
                    "Analysis requested"
                );
                return Dispatch::Requested(request);
            }
        }
        Dispatch::Updated
    }

    /// Reports the outcome of the request stamped with `generation`.
    pub fn complete(&mut self, generation: Generation, outcome: SubmitOutcome) -> Dispatch {
        self.dispatch(SessionEvent::completed(generation, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResult;
    use crate::session::Phase;

    #[test]
    fn test_submit_issues_one_request() {
        let mut controller = ViewController::new();
        assert_eq!(controller.dispatch(SessionEvent::Start), Dispatch::Updated);
        assert_eq!(
            controller.dispatch(SessionEvent::edit_text("I feel great")),
            Dispatch::Updated
        );

        let Dispatch::Requested(request) = controller.dispatch(SessionEvent::Submit) else {
            panic!("expected a request");
        };
        assert_eq!(request.text, "I feel great");
        assert_eq!(controller.dispatch(SessionEvent::Submit), Dispatch::Ignored);
    }

    #[test]
    fn test_complete_applies_current_generation() {
        let mut controller = ViewController::new();
        controller.dispatch(SessionEvent::Start);
        controller.dispatch(SessionEvent::edit_text("I feel great"));
        let Dispatch::Requested(request) = controller.dispatch(SessionEvent::Submit) else {
            panic!("expected a request");
        };

        let result = AnalysisResult::new("joy", 0.87).unwrap();
        let dispatch = controller.complete(request.generation, SubmitOutcome::Succeeded(result));
        assert_eq!(dispatch, Dispatch::Updated);
        assert_eq!(controller.session().phase(), Phase::Success);
    }

    #[test]
    fn test_complete_after_reset_is_ignored() {
        let mut controller = ViewController::new();
        controller.dispatch(SessionEvent::Start);
        controller.dispatch(SessionEvent::edit_text("hello"));
        let Dispatch::Requested(request) = controller.dispatch(SessionEvent::Submit) else {
            panic!("expected a request");
        };
        controller.dispatch(SessionEvent::Reset);

        let dispatch = controller.complete(request.generation, SubmitOutcome::Failed("late".into()));
        assert_eq!(dispatch, Dispatch::Ignored);
        assert_eq!(controller.session().phase(), Phase::Ready);
        assert!(controller.session().error_message().is_none());
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut controller = ViewController::new();
        controller.dispatch(SessionEvent::Start);
        controller.dispatch(SessionEvent::edit_text("   "));
        assert_eq!(controller.dispatch(SessionEvent::Submit), Dispatch::Ignored);
        assert!(!controller.dispatch(SessionEvent::Submit).changed());
    }
}
