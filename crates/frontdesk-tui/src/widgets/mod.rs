//! Chat widgets for the TUI.
//!
//! This module provides:
//! - [`Header`] - Title, subtitle and the clear control
//! - [`MessageLog`] - The conversation transcript
//! - [`SuggestionBar`] - Suggested action chips
//! - [`InputBar`] - The draft editor

pub mod header;
pub mod input_bar;
pub mod message_log;
pub mod suggestion_bar;

pub use header::Header;
pub use input_bar::InputBar;
pub use message_log::MessageLog;
pub use suggestion_bar::SuggestionBar;
