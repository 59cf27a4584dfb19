//! frontdesk-engine: Headless conversation engine for the frontdesk chat client
//!
//! This crate provides everything except the terminal UI:
//! - Message and session types
//! - The pure session state machine
//! - The conversation controller and its remote chat service boundary
//! - Configuration

pub mod api;
pub mod config;
pub mod controller;
pub mod message;
pub mod mock;
pub mod session;

// Re-export commonly used types
pub use api::{ChatRequest, ChatResponse, ChatService, HttpChatService, ServiceError};
pub use config::{Config, ConfigError, Notices};
pub use controller::{ConversationController, PendingClear, PendingReply, ReplyOutcome};
pub use message::{Message, MessageId, Role};
pub use mock::MockChatService;
pub use session::{transition, Effect, Event, Session, SessionState, Transition, TransitionError};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
