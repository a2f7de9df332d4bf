use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Phase, SessionEvent};
use crate::analysis::AnalysisResult;

/// Per-session request counter.
///
/// Every accepted submission advances it, and every completion carries the
/// value it was issued with. A completion whose generation differs from the
/// session's current one is stale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A submission the caller must hand to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub generation: Generation,
    /// The draft, trimmed.
    pub text: String,
}

// Outcome data lives inside the variant so a result and an error message
// can never be held at the same time.
#[derive(Debug, Clone, PartialEq)]
enum View {
    Intro,
    Ready,
    InFlight,
    Success(AnalysisResult),
    Failed(String),
}

/// One interaction with the screen, from first render until it is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: String,
    input_text: String,
    view: View,
    generation: Generation,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session in the introduction with an empty draft.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            input_text: String::new(),
            view: View::Intro,
            generation: Generation::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started(&self) -> bool {
        self.phase().is_started()
    }

    /// The draft exactly as last edited.
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn phase(&self) -> Phase {
        match self.view {
            View::Intro => Phase::Intro,
            View::Ready => Phase::Ready,
            View::InFlight => Phase::InFlight,
            View::Success(_) => Phase::Success,
            View::Failed(_) => Phase::Failed,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.view {
            View::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.view {
            View::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether a `Submit` would be accepted right now.
    pub fn can_submit(&self) -> bool {
        self.started() && self.view != View::InFlight && !self.input_text.trim().is_empty()
    }

    /// Whether the draft can currently be edited.
    pub fn accepts_edits(&self) -> bool {
        !matches!(self.view, View::Intro | View::InFlight)
    }

    /// Whether a completion stamped with `generation` would be applied.
    pub fn is_awaiting(&self, generation: Generation) -> bool {
        self.view == View::InFlight && self.generation == generation
    }

    /// The outstanding request, if one is pending.
    pub fn pending_request(&self) -> Option<PendingRequest> {
        (self.view == View::InFlight).then(|| PendingRequest {
            generation: self.generation,
            text: self.input_text.trim().to_string(),
        })
    }

    /// Applies `event`, returning the next session. See [`transition`].
    pub fn apply(self, event: SessionEvent) -> Self {
        transition(self, event)
    }
}

/// The session state machine.
///
/// Pure and total: an event that is not valid for the current state returns
/// the session unchanged.
pub fn transition(mut session: Session, event: SessionEvent) -> Session {
    match event {
        SessionEvent::Start => {
            if session.view == View::Intro {
                session.view = View::Ready;
            }
        }
        SessionEvent::EditText { text } => {
            if session.accepts_edits() {
                session.input_text = text;
            }
        }
        SessionEvent::Submit => {
            if session.can_submit() {
                session.generation = session.generation.next();
                session.view = View::InFlight;
            }
        }
        SessionEvent::SubmitSucceeded { generation, result } => {
            if session.is_awaiting(generation) {
                session.view = View::Success(result);
            }
        }
        SessionEvent::SubmitFailed {
            generation,
            message,
        } => {
            if session.is_awaiting(generation) {
                session.view = View::Failed(message);
            }
        }
        SessionEvent::Reset => {
            if session.started() {
                session.input_text.clear();
                session.view = View::Ready;
            }
        }
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joy() -> AnalysisResult {
        AnalysisResult::new("joy", 0.87).unwrap()
    }

    fn ready_with(text: &str) -> Session {
        Session::with_id("test")
            .apply(SessionEvent::Start)
            .apply(SessionEvent::edit_text(text))
    }

    fn assert_exclusive(session: &Session) {
        assert!(
            !(session.result().is_some() && session.error_message().is_some()),
            "result and error message present together: {session:?}"
        );
        if session.phase() == Phase::InFlight {
            assert!(session.result().is_none());
            assert!(session.error_message().is_none());
        }
    }

    #[test]
    fn test_new_session_starts_in_intro() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Intro);
        assert!(!session.started());
        assert_eq!(session.input_text(), "");
        assert!(session.result().is_none());
        assert!(session.error_message().is_none());
        assert!(!session.id().is_empty());
    }

    #[test]
    fn test_start_is_irreversible() {
        let session = Session::with_id("s").apply(SessionEvent::Start);
        assert_eq!(session.phase(), Phase::Ready);

        let again = session.clone().apply(SessionEvent::Start);
        assert_eq!(again, session);

        let reset = session.apply(SessionEvent::Reset);
        assert_eq!(reset.phase(), Phase::Ready);
    }

    #[test]
    fn test_edit_stores_text_verbatim() {
        let session = ready_with("  I feel great  ");
        assert_eq!(session.input_text(), "  I feel great  ");
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn test_edit_ignored_in_intro() {
        let session = Session::with_id("s").apply(SessionEvent::edit_text("hello"));
        assert_eq!(session.input_text(), "");
        assert_eq!(session.phase(), Phase::Intro);
    }

    #[test]
    fn test_submit_whitespace_is_noop() {
        let session = ready_with("   ");
        let after = session.clone().apply(SessionEvent::Submit);
        assert_eq!(after, session);
        assert_eq!(after.phase(), Phase::Ready);
        assert!(after.pending_request().is_none());
    }

    #[test]
    fn test_submit_in_intro_is_noop() {
        let session = Session::with_id("s");
        let after = session.clone().apply(SessionEvent::Submit);
        assert_eq!(after, session);
    }

    #[test]
    fn test_submit_enters_in_flight_with_trimmed_request() {
        let session = ready_with("  I feel great ").apply(SessionEvent::Submit);
        assert_eq!(session.phase(), Phase::InFlight);
        assert_exclusive(&session);

        let pending = session.pending_request().unwrap();
        assert_eq!(pending.text, "I feel great");
        assert_eq!(pending.generation, session.generation());
        assert_eq!(session.input_text(), "  I feel great ");
    }

    #[test]
    fn test_submit_while_in_flight_is_noop() {
        let session = ready_with("hello").apply(SessionEvent::Submit);
        let generation = session.generation();

        let after = session.clone().apply(SessionEvent::Submit);
        assert_eq!(after, session);
        assert_eq!(after.generation(), generation);
    }

    #[test]
    fn test_edit_ignored_while_in_flight() {
        let session = ready_with("hello").apply(SessionEvent::Submit);
        let after = session.clone().apply(SessionEvent::edit_text("changed"));
        assert_eq!(after.input_text(), "hello");
    }

    #[test]
    fn test_success_and_failure_paths() {
        let in_flight = ready_with("I feel great").apply(SessionEvent::Submit);
        let generation = in_flight.generation();

        let success = in_flight.clone().apply(SessionEvent::SubmitSucceeded {
            generation,
            result: joy(),
        });
        assert_eq!(success.phase(), Phase::Success);
        assert_eq!(success.result(), Some(&joy()));
        assert_exclusive(&success);

        let failed = in_flight.apply(SessionEvent::SubmitFailed {
            generation,
            message: "text too long".into(),
        });
        assert_eq!(failed.phase(), Phase::Failed);
        assert_eq!(failed.error_message(), Some("text too long"));
        assert_exclusive(&failed);
    }

    #[test]
    fn test_editing_keeps_displayed_result() {
        let session = ready_with("I feel great").apply(SessionEvent::Submit);
        let generation = session.generation();
        let session = session
            .apply(SessionEvent::SubmitSucceeded {
                generation,
                result: joy(),
            })
            .apply(SessionEvent::edit_text("something else"));

        assert_eq!(session.phase(), Phase::Success);
        assert_eq!(session.result(), Some(&joy()));
        assert_eq!(session.input_text(), "something else");
    }

    #[test]
    fn test_resubmit_clears_previous_outcome() {
        let session = ready_with("first").apply(SessionEvent::Submit);
        let generation = session.generation();
        let session = session
            .apply(SessionEvent::SubmitFailed {
                generation,
                message: "boom".into(),
            })
            .apply(SessionEvent::Submit);

        assert_eq!(session.phase(), Phase::InFlight);
        assert!(session.error_message().is_none());
        assert!(session.generation() > generation);
    }

    #[test]
    fn test_reset_from_terminal_states() {
        let in_flight = ready_with("hello").apply(SessionEvent::Submit);
        let generation = in_flight.generation();
        let terminals = [
            in_flight.clone().apply(SessionEvent::SubmitSucceeded {
                generation,
                result: joy(),
            }),
            in_flight.apply(SessionEvent::SubmitFailed {
                generation,
                message: "boom".into(),
            }),
        ];

        for terminal in terminals {
            let reset = terminal.apply(SessionEvent::Reset);
            assert_eq!(reset.phase(), Phase::Ready);
            assert_eq!(reset.input_text(), "");
            assert!(reset.result().is_none());
            assert!(reset.error_message().is_none());
        }
    }

    #[test]
    fn test_reset_is_idempotent() {
        let session = ready_with("hello").apply(SessionEvent::Submit);
        let once = session.clone().apply(SessionEvent::Reset);
        let twice = session.apply(SessionEvent::Reset).apply(SessionEvent::Reset);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reset_in_intro_is_noop() {
        let session = Session::with_id("s");
        assert_eq!(session.clone().apply(SessionEvent::Reset), session);
    }

    #[test]
    fn test_late_outcome_after_reset_is_dropped() {
        let in_flight = ready_with("hello").apply(SessionEvent::Submit);
        let generation = in_flight.generation();

        let reset = in_flight.apply(SessionEvent::Reset);
        let after = reset.clone().apply(SessionEvent::SubmitSucceeded {
            generation,
            result: joy(),
        });
        assert_eq!(after, reset);
    }

    #[test]
    fn test_outcome_from_superseded_request_is_dropped() {
        let first = ready_with("first").apply(SessionEvent::Submit);
        let stale = first.generation();

        let second = first
            .apply(SessionEvent::Reset)
            .apply(SessionEvent::edit_text("second"))
            .apply(SessionEvent::Submit);
        let current = second.generation();
        assert_ne!(stale, current);

        let after_stale = second.clone().apply(SessionEvent::SubmitFailed {
            generation: stale,
            message: "late".into(),
        });
        assert_eq!(after_stale, second);

        let after_current = after_stale.apply(SessionEvent::SubmitSucceeded {
            generation: current,
            result: joy(),
        });
        assert_eq!(after_current.phase(), Phase::Success);
    }

    #[test]
    fn test_exclusivity_holds_over_event_sequence() {
        let mut session = Session::with_id("walk");
        let events = vec![
            SessionEvent::Submit,
            SessionEvent::Start,
            SessionEvent::edit_text("hi"),
            SessionEvent::Submit,
            SessionEvent::SubmitFailed {
                generation: Generation::default().next(),
                message: "nope".into(),
            },
            SessionEvent::Submit,
            SessionEvent::SubmitSucceeded {
                generation: Generation::default().next().next(),
                result: joy(),
            },
            SessionEvent::SubmitFailed {
                generation: Generation::default().next().next(),
                message: "late".into(),
            },
            SessionEvent::Reset,
            SessionEvent::Reset,
        ];

        for event in events {
            session = session.apply(event);
            assert_exclusive(&session);
        }
        assert_eq!(session.phase(), Phase::Ready);
    }
}
