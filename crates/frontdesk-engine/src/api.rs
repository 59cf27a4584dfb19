//! Remote chat service boundary.
//!
//! The service is an opaque collaborator: it takes a message plus an optional
//! conversation id and returns a reply, optionally with a (new) conversation
//! id and suggested follow-up actions. It also accepts a best-effort request
//! to discard a conversation.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Outbound chat request.
///
/// Serialized as `{"message": "...", "conversation_id": "..." | null}`.
/// `user_name` and `user_email` are only sent when configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            conversation_id,
            user_name: None,
            user_email: None,
        }
    }
}

/// Inbound chat response. Missing optional fields decode as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(rename = "response")]
    pub reply: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub suggested_actions: Option<Vec<String>>,
    #[serde(default)]
    pub requires_followup: bool,
}

impl ChatResponse {
    /// A bare reply with no optional fields.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            conversation_id: None,
            suggested_actions: None,
            requires_followup: false,
        }
    }

    #[must_use]
    pub fn with_conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_suggested_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggested_actions = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_followup(mut self, requires_followup: bool) -> Self {
        self.requires_followup = requires_followup;
        self
    }
}

/// The remote chat service.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send one message and wait for the reply.
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError>;

    /// Ask the service to discard a conversation.
    async fn clear_conversation(&self, conversation_id: &str) -> Result<(), ServiceError>;
}

/// HTTP implementation of [`ChatService`].
///
/// `POST {base}/chat` sends a message, `DELETE {base}/chat/{id}` clears a
/// conversation.
#[derive(Debug, Clone)]
pub struct HttpChatService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpChatService {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ServiceError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("frontdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The parsed base URL requests are built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn a non-2xx response into [`ServiceError::Status`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl ChatService for HttpChatService {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError> {
        let url = self.endpoint(&["chat"])?;
        tracing::debug!(
            %url,
            has_conversation = request.conversation_id.is_some(),
            "sending chat message"
        );

        let response = self.client.post(url).json(request).send().await?;
        let response = check_status(response).await?;

        // Decode from bytes so a malformed body is reported as Decode, not Transport.
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ServiceError::Decode)
    }

    async fn clear_conversation(&self, conversation_id: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["chat", conversation_id])?;
        tracing::debug!(%url, "clearing conversation");

        let response = self.client.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Errors talking to the remote chat service.
///
/// Every variant is handled the same way by the controller: a failed send
/// becomes the fixed failure notice, a failed clear is only logged.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Connection, TLS or protocol error.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a valid chat response.
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The configured base URL cannot be used.
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),

    /// The service is unreachable for some other reason.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}
