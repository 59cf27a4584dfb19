//! In-memory [`ChatService`] for tests and offline demos.
//!
//! Replies are queued up front and handed out in order; every request and
//! clear call is recorded for later assertions.

use crate::api::{ChatRequest, ChatResponse, ChatService, ServiceError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Mock chat service returning queued replies.
#[derive(Debug, Default)]
pub struct MockChatService {
    replies: Mutex<VecDeque<Result<ChatResponse, ServiceError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    cleared: Mutex<Vec<String>>,
    fail_clear: Mutex<bool>,
    delay: Option<Duration>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockChatService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply by `delay`, to exercise timeouts and pending state.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful reply.
    pub fn queue_reply(&self, response: ChatResponse) {
        lock(&self.replies).push_back(Ok(response));
    }

    /// Queue a failed send.
    pub fn queue_error(&self, error: ServiceError) {
        lock(&self.replies).push_back(Err(error));
    }

    /// Make every subsequent `clear_conversation` call fail.
    pub fn fail_clears(&self) {
        *lock(&self.fail_clear) = true;
    }

    /// Requests received so far, in order.
    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        lock(&self.requests).clone()
    }

    /// Conversation ids passed to `clear_conversation`, in order.
    pub fn cleared_conversations(&self) -> Vec<String> {
        lock(&self.cleared).clone()
    }
}

#[async_trait]
impl ChatService for MockChatService {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError> {
        lock(&self.requests).push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Unavailable("no reply queued".into())))
    }

    async fn clear_conversation(&self, conversation_id: &str) -> Result<(), ServiceError> {
        lock(&self.cleared).push(conversation_id.to_string());
        if *lock(&self.fail_clear) {
            return Err(ServiceError::Unavailable("clear rejected".into()));
        }
        Ok(())
    }
}
