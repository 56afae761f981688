//! Symbolic message codes and the lookup collaborator that turns them into
//! user-visible text.
//!
//! The core stores only [`MessageKey`] values in state; the render layer is
//! the single place a code becomes a string, through [`MessageLookup`].

use serde::{Deserialize, Serialize};

/// Symbolic outcome codes surfaced through `form.error`, `loading.error`
/// and the success feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
    Success,
    RepeatUrl,
    InvalidUrl,
    ParserError,
    NetworkError,
    TimeoutError,
    UnknownError,
}

/// External message catalog. Injected so the core never embeds literal
/// user-facing strings.
pub trait MessageLookup {
    fn message(&self, key: MessageKey) -> &str;
}

/// Built-in English catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl MessageLookup for EnglishMessages {
    fn message(&self, key: MessageKey) -> &str {
        match key {
            MessageKey::Success => "RSS loaded successfully",
            MessageKey::RepeatUrl => "RSS already exists",
            MessageKey::InvalidUrl => "Link must be a valid URL",
            MessageKey::ParserError => "Resource does not contain valid RSS",
            MessageKey::NetworkError => "Network error",
            MessageKey::TimeoutError => "Request timed out",
            MessageKey::UnknownError => "Something went wrong",
        }
    }
}
