//! Conversation controller.
//!
//! Owns the [`Session`] and drives it through [`transition`], performing the
//! resulting effects against a [`ChatService`]. The network call is split
//! out into a [`PendingReply`] so an event loop can spawn it and feed the
//! [`ReplyOutcome`] back later with [`ConversationController::complete`].

use crate::api::{ChatRequest, ChatResponse, ChatService, ServiceError};
use crate::config::{Config, Notices};
use crate::session::{transition, Effect, Event, Session, TransitionError};
use std::sync::Arc;
use std::time::Duration;

/// How an outstanding request ended.
#[derive(Debug)]
pub enum ReplyOutcome {
    Reply(ChatResponse),
    Failed(ServiceError),
    TimedOut,
}

/// An issued chat request that has not been awaited yet.
///
/// Owns everything it needs, so it can be moved into a spawned task.
#[must_use = "the request is only sent when `wait` is awaited"]
pub struct PendingReply {
    request: ChatRequest,
    service: Arc<dyn ChatService>,
    timeout: Option<Duration>,
}

impl PendingReply {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Perform the request and wait for it to finish or time out.
    pub async fn wait(self) -> ReplyOutcome {
        let call = self.service.send_message(&self.request);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => return ReplyOutcome::TimedOut,
            },
            None => call.await,
        };

        match result {
            Ok(response) => ReplyOutcome::Reply(response),
            Err(e) => ReplyOutcome::Failed(e),
        }
    }
}

impl std::fmt::Debug for PendingReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingReply")
            .field("request", &self.request)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Best-effort notification that the service can discard a conversation.
#[must_use = "the service is only notified when `run` is awaited"]
pub struct PendingClear {
    conversation_id: String,
    service: Arc<dyn ChatService>,
}

impl PendingClear {
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Notify the service. Failures are logged and swallowed.
    pub async fn run(self) {
        match self.service.clear_conversation(&self.conversation_id).await {
            Ok(()) => {
                tracing::info!(
                    conversation_id = %self.conversation_id,
                    "cleared conversation on server"
                );
            }
            Err(e) => {
                tracing::warn!(
                    conversation_id = %self.conversation_id,
                    error = %e,
                    "failed to clear conversation on server"
                );
            }
        }
    }
}

impl std::fmt::Debug for PendingClear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingClear")
            .field("conversation_id", &self.conversation_id)
            .finish_non_exhaustive()
    }
}

/// Owns a session and mediates every change to it.
pub struct ConversationController {
    session: Session,
    service: Arc<dyn ChatService>,
    notices: Notices,
    timeout: Option<Duration>,
    user_name: Option<String>,
    user_email: Option<String>,
}

impl ConversationController {
    /// Create a controller with a fresh session.
    pub fn new(service: Arc<dyn ChatService>, notices: Notices) -> Self {
        Self {
            session: Session::new(&notices),
            service,
            notices,
            timeout: None,
            user_name: None,
            user_email: None,
        }
    }

    /// Create a controller using the notices, timeout and user details from `config`.
    pub fn from_config(service: Arc<dyn ChatService>, config: &Config) -> Self {
        let mut controller = Self::new(service, config.notices.clone())
            .with_timeout(config.request_timeout());
        controller.user_name.clone_from(&config.user_name);
        controller.user_email.clone_from(&config.user_email);
        controller
    }

    /// Bound every request by `timeout` (`None` waits forever).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Submit text. On success the session is `Awaiting` and the returned
    /// [`PendingReply`] must be awaited and fed to [`Self::complete`].
    pub fn submit(&mut self, text: &str) -> Result<PendingReply, TransitionError> {
        let effects = self.apply(Event::Submit { text: text.into() })?;

        let mut request = effects
            .into_iter()
            .find_map(|effect| match effect {
                Effect::SendMessage(request) => Some(request),
                Effect::ClearConversation { .. } => None,
            })
            .ok_or(TransitionError::NotAwaiting)?;
        request.user_name.clone_from(&self.user_name);
        request.user_email.clone_from(&self.user_email);

        Ok(PendingReply {
            request,
            service: Arc::clone(&self.service),
            timeout: self.timeout,
        })
    }

    /// Submit the suggested action at `index`, exactly as if it had been typed.
    pub fn submit_suggestion(&mut self, index: usize) -> Option<PendingReply> {
        let action = self.session.offered_actions().get(index)?.clone();
        self.submit(&action).ok()
    }

    /// Feed back the result of a [`PendingReply`].
    pub fn complete(&mut self, outcome: ReplyOutcome) -> Result<(), TransitionError> {
        let event = match outcome {
            ReplyOutcome::Reply(response) => {
                if let Some(id) = &response.conversation_id {
                    if self.session.conversation_id() != Some(id.as_str()) {
                        tracing::info!(conversation_id = %id, "adopted conversation id");
                    }
                }
                Event::Resolve(response)
            }
            ReplyOutcome::Failed(e) => {
                tracing::warn!(error = %e, "chat request failed");
                Event::Fail {
                    reason: e.to_string(),
                }
            }
            ReplyOutcome::TimedOut => {
                tracing::warn!(timeout = ?self.timeout, "chat request timed out");
                Event::TimedOut
            }
        };
        self.apply(event).map(|_| ())
    }

    /// Submit, wait for the reply and apply it.
    pub async fn send(&mut self, text: &str) -> Result<(), TransitionError> {
        let pending = self.submit(text)?;
        let outcome = pending.wait().await;
        self.complete(outcome)
    }

    /// Reset the local session. Returns the clear notification to run when
    /// the service had assigned a conversation id.
    pub fn reset(&mut self) -> Result<Option<PendingClear>, TransitionError> {
        let effects = self.apply(Event::Reset)?;
        tracing::info!("conversation reset");

        Ok(effects.into_iter().find_map(|effect| match effect {
            Effect::ClearConversation { conversation_id } => Some(PendingClear {
                conversation_id,
                service: Arc::clone(&self.service),
            }),
            Effect::SendMessage(_) => None,
        }))
    }

    /// Reset and notify the service before returning.
    pub async fn reset_and_clear(&mut self) -> Result<(), TransitionError> {
        if let Some(clear) = self.reset()? {
            clear.run().await;
        }
        Ok(())
    }

    fn apply(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        match transition(&self.session, event, &self.notices) {
            Ok(result) => {
                self.session = result.session;
                Ok(result.effects)
            }
            Err(e) => {
                tracing::debug!(error = %e, "event rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::mock::MockChatService;

    fn controller_with(mock: &Arc<MockChatService>) -> ConversationController {
        ConversationController::new(Arc::clone(mock) as Arc<dyn ChatService>, Notices::default())
    }

    #[tokio::test]
    async fn test_submit_appends_before_reply_arrives() {
        let mock = Arc::new(MockChatService::new());
        mock.queue_reply(ChatResponse::reply("Hi there!"));
        let mut controller = controller_with(&mock);

        let pending = controller.submit("Hello").unwrap();
        assert!(controller.session().is_pending());
        assert_eq!(controller.session().messages().len(), 2);
        assert_eq!(controller.session().messages()[1].text(), "Hello");
        assert!(mock.recorded_requests().is_empty());

        let outcome = pending.wait().await;
        controller.complete(outcome).unwrap();
        assert!(!controller.session().is_pending());
        assert_eq!(controller.session().messages().len(), 3);
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_noop() {
        let mock = Arc::new(MockChatService::new());
        let mut controller = controller_with(&mock);

        let _pending = controller.submit("first").unwrap();
        let before = controller.session().clone();

        assert!(matches!(
            controller.submit("second"),
            Err(TransitionError::Busy)
        ));
        assert_eq!(controller.session(), &before);
    }

    #[tokio::test]
    async fn test_hello_scenario() {
        let mock = Arc::new(MockChatService::new());
        mock.queue_reply(ChatResponse::reply("Hi there!").with_conversation_id("abc123"));
        let mut controller = controller_with(&mock);

        controller.send("Hello").await.unwrap();

        assert_eq!(
            mock.recorded_requests(),
            vec![ChatRequest::new("Hello", None)]
        );
        let log: Vec<_> = controller
            .session()
            .messages()
            .iter()
            .map(|m| (m.role(), m.text().to_string()))
            .collect();
        assert_eq!(
            log,
            vec![
                (Role::Assistant, Notices::default().greeting),
                (Role::User, "Hello".to_string()),
                (Role::Assistant, "Hi there!".to_string()),
            ]
        );
        assert_eq!(controller.session().conversation_id(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_suggestion_behaves_like_typed_input() {
        let mock = Arc::new(MockChatService::new());
        mock.queue_reply(
            ChatResponse::reply("Which date?")
                .with_conversation_id("c1")
                .with_suggested_actions(["Check availability", "Talk to staff"]),
        );
        mock.queue_reply(ChatResponse::reply("We have rooms."));
        let mut controller = controller_with(&mock);

        controller.send("book a room").await.unwrap();
        assert_eq!(
            controller.session().offered_actions(),
            ["Check availability", "Talk to staff"]
        );

        let pending = controller.submit_suggestion(0).unwrap();
        assert!(controller.session().suggested_actions().is_empty());
        assert_eq!(
            pending.request(),
            &ChatRequest::new("Check availability", Some("c1".into()))
        );
        controller.complete(pending.wait().await).unwrap();

        let last_user = &controller.session().messages()[3];
        assert_eq!(last_user.role(), Role::User);
        assert_eq!(last_user.text(), "Check availability");
        assert_eq!(
            mock.recorded_requests()[1],
            ChatRequest::new("Check availability", Some("c1".into()))
        );
    }

    #[tokio::test]
    async fn test_suggestion_out_of_range_or_pending() {
        let mock = Arc::new(MockChatService::new());
        mock.queue_reply(ChatResponse::reply("ok").with_suggested_actions(["Yes"]));
        let mut controller = controller_with(&mock);
        controller.send("hi").await.unwrap();

        assert!(controller.submit_suggestion(5).is_none());
        let _pending = controller.submit("typed").unwrap();
        assert!(controller.submit_suggestion(0).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_appends_failure_notice() {
        let mock = Arc::new(MockChatService::new());
        mock.queue_reply(ChatResponse::reply("Hi").with_conversation_id("abc123"));
        mock.queue_error(ServiceError::Unavailable("connection refused".into()));
        let mut controller = controller_with(&mock);

        controller.send("Hello").await.unwrap();
        let before_len = controller.session().messages().len();

        controller.send("Are you there?").await.unwrap();
        let session = controller.session();
        assert_eq!(session.messages().len(), before_len + 2);
        assert_eq!(
            session.last_message().unwrap().text(),
            Notices::default().failure
        );
        assert_eq!(session.conversation_id(), Some("abc123"));
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let mock = Arc::new(MockChatService::new().with_delay(Duration::from_millis(200)));
        mock.queue_reply(ChatResponse::reply("too late"));
        let mut controller =
            controller_with(&mock).with_timeout(Some(Duration::from_millis(20)));

        controller.send("Hello").await.unwrap();
        assert_eq!(
            controller.session().last_message().unwrap().text(),
            Notices::default().timeout
        );
        assert!(!controller.session().is_pending());
    }

    #[tokio::test]
    async fn test_user_details_attached_from_config() {
        let mock = Arc::new(MockChatService::new());
        mock.queue_reply(ChatResponse::reply("Hi Ada"));
        let config = Config {
            user_name: Some("Ada".into()),
            user_email: Some("ada@example.com".into()),
            ..Config::default()
        };
        let mut controller =
            ConversationController::from_config(Arc::clone(&mock) as Arc<dyn ChatService>, &config);

        controller.send("Hello").await.unwrap();
        let request = &mock.recorded_requests()[0];
        assert_eq!(request.user_name.as_deref(), Some("Ada"));
        assert_eq!(request.user_email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_reset_notifies_service() {
        let mock = Arc::new(MockChatService::new());
        mock.queue_reply(
            ChatResponse::reply("Hi")
                .with_conversation_id("abc123")
                .with_suggested_actions(["Talk to staff"]),
        );
        let mut controller = controller_with(&mock);
        controller.send("Hello").await.unwrap();

        controller.reset_and_clear().await.unwrap();

        assert_eq!(mock.cleared_conversations(), vec!["abc123"]);
        let session = controller.session();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text(), Notices::default().cleared);
        assert!(session.conversation_id().is_none());
        assert!(session.suggested_actions().is_empty());
    }

    #[tokio::test]
    async fn test_reset_succeeds_when_clear_fails() {
        let mock = Arc::new(MockChatService::new());
        mock.queue_reply(ChatResponse::reply("Hi").with_conversation_id("abc123"));
        mock.fail_clears();
        let mut controller = controller_with(&mock);
        controller.send("Hello").await.unwrap();

        controller.reset_and_clear().await.unwrap();

        assert_eq!(mock.cleared_conversations(), vec!["abc123"]);
        assert_eq!(controller.session().messages().len(), 1);
        assert!(controller.session().conversation_id().is_none());
    }

    #[tokio::test]
    async fn test_reset_without_conversation_skips_service() {
        let mock = Arc::new(MockChatService::new());
        let mut controller = controller_with(&mock);

        assert!(controller.reset().unwrap().is_none());
        assert!(mock.cleared_conversations().is_empty());
        assert_eq!(controller.session().messages().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_while_pending_is_rejected() {
        let mock = Arc::new(MockChatService::new());
        let mut controller = controller_with(&mock);
        let _pending = controller.submit("Hello").unwrap();

        assert!(matches!(controller.reset(), Err(TransitionError::Busy)));
        assert!(controller.session().is_pending());
        assert_eq!(controller.session().messages().len(), 2);
    }
}
