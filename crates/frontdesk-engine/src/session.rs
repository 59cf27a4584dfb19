//! Conversation session state and its pure transition function.
//!
//! A [`Session`] is a plain value. [`transition`] takes the current session
//! and an [`Event`] and returns the next session plus the [`Effect`]s the
//! caller must perform. It does no I/O.
//!
//! ```text
//!            Submit                     Resolve / Fail / TimedOut
//!   Idle ─────────────▶ Awaiting ─────────────────────────────────▶ Idle
//!    │ ▲
//!    └─┘ Reset
//! ```

use crate::api::{ChatRequest, ChatResponse};
use crate::config::Notices;
use crate::message::Message;

/// Which of the two states a session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No request outstanding.
    Idle,
    /// Exactly one request outstanding.
    Awaiting,
}

/// The state of one conversation as displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    messages: Vec<Message>,
    pending: bool,
    conversation_id: Option<String>,
    suggested_actions: Vec<String>,
    follow_up_requested: bool,
}

impl Session {
    /// A fresh session: idle, seeded with the greeting.
    pub fn new(notices: &Notices) -> Self {
        Self::seeded(Message::assistant(&notices.greeting))
    }

    fn seeded(first: Message) -> Self {
        Self {
            messages: vec![first],
            pending: false,
            conversation_id: None,
            suggested_actions: Vec::new(),
            follow_up_requested: false,
        }
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn state(&self) -> SessionState {
        if self.pending {
            SessionState::Awaiting
        } else {
            SessionState::Idle
        }
    }

    /// Conversation id assigned by the service, if any.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Suggested follow-ups from the last reply.
    pub fn suggested_actions(&self) -> &[String] {
        &self.suggested_actions
    }

    /// Suggestions that may be offered right now (none while pending).
    pub fn offered_actions(&self) -> &[String] {
        if self.pending {
            &[]
        } else {
            &self.suggested_actions
        }
    }

    /// Whether the last reply said a person will follow up.
    pub fn follow_up_requested(&self) -> bool {
        self.follow_up_requested
    }

    /// Whether the clear control should be offered.
    ///
    /// Only after at least one exchange, and never while a request is pending.
    pub fn can_reset(&self) -> bool {
        !self.pending && self.messages.len() > 1
    }

    /// The most recent message.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Inputs to the session state machine.
#[derive(Debug, Clone)]
pub enum Event {
    /// The user committed text (typed or picked from a suggestion).
    Submit { text: String },
    /// The outstanding request succeeded.
    Resolve(ChatResponse),
    /// The outstanding request failed.
    Fail { reason: String },
    /// The outstanding request exceeded the request timeout.
    TimedOut,
    /// The user asked to start over.
    Reset,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue a chat request.
    SendMessage(ChatRequest),
    /// Best-effort notification that a conversation can be discarded.
    ClearConversation { conversation_id: String },
}

/// Result of a state transition.
#[derive(Debug)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(session: Session) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Why an event was rejected. The session is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a reply is still pending")]
    Busy,
    #[error("no request is pending")]
    NotAwaiting,
}

/// Pure transition function.
pub fn transition(
    session: &Session,
    event: Event,
    notices: &Notices,
) -> Result<Transition, TransitionError> {
    match (session.state(), event) {
        (SessionState::Idle, Event::Submit { text }) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }

            let mut next = session.clone();
            next.messages.push(Message::user(text));
            next.suggested_actions.clear();
            next.follow_up_requested = false;
            next.pending = true;

            let request = ChatRequest::new(text, next.conversation_id.clone());
            Ok(Transition::new(next).with_effect(Effect::SendMessage(request)))
        }

        (SessionState::Awaiting, Event::Resolve(response)) => {
            let mut next = session.clone();
            next.messages.push(Message::assistant(response.reply));
            // An empty id means the service did not assign one.
            if let Some(id) = response.conversation_id.filter(|id| !id.is_empty()) {
                next.conversation_id = Some(id);
            }
            if let Some(actions) = response.suggested_actions {
                next.suggested_actions = actions;
            }
            next.follow_up_requested = response.requires_followup;
            next.pending = false;
            Ok(Transition::new(next))
        }

        (SessionState::Awaiting, Event::Fail { .. }) => {
            Ok(Transition::new(settle_with_notice(session, &notices.failure)))
        }

        (SessionState::Awaiting, Event::TimedOut) => {
            Ok(Transition::new(settle_with_notice(session, &notices.timeout)))
        }

        (SessionState::Idle, Event::Reset) => {
            let transition = Transition::new(Session::seeded(Message::assistant(&notices.cleared)));
            match &session.conversation_id {
                Some(id) => Ok(transition.with_effect(Effect::ClearConversation {
                    conversation_id: id.clone(),
                })),
                None => Ok(transition),
            }
        }

        (SessionState::Awaiting, Event::Submit { .. } | Event::Reset) => {
            Err(TransitionError::Busy)
        }

        (SessionState::Idle, Event::Resolve(_) | Event::Fail { .. } | Event::TimedOut) => {
            Err(TransitionError::NotAwaiting)
        }
    }
}

/// Leave `Awaiting` by appending a local notice; nothing else changes.
fn settle_with_notice(session: &Session, notice: &str) -> Session {
    let mut next = session.clone();
    next.messages.push(Message::assistant(notice));
    next.pending = false;
    next
}
