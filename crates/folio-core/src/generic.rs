//! Generic message, role and delta types used by the *folio-core* crate.
//!
//! They mirror the concepts exposed by OpenAI-compatible chat APIs
//! (“system”, “user”, “assistant”, “tool”) without tying the chat widget to
//! one provider.  Provider crates convert them into their own wire structs via
//! `From`/`Into`.
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lightweight container representing a single chat message that is
/// independent of any specific LLM provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub content: Option<String>,
    pub role: GenericRole,
    pub name: Option<String>,
}

impl GenericMessage {
    /// Convenience constructor mirroring the field order used by common HTTP
    /// APIs (`role`, then `content`).
    ///
    /// ```rust
    /// use folio_core::generic::{GenericMessage, GenericRole};
    ///
    /// let sys = GenericMessage::new("You answer questions about my projects.".into(),
    ///                               GenericRole::System);
    /// ```
    pub fn new(message: String, role: GenericRole) -> Self {
        Self {
            content: Some(message),
            role,
            name: None,
        }
    }
}

/// High-level chat roles recognised by most LLM providers.
///
/// The `Display` implementation renders the canonical lowercase name so you
/// can feed it directly into JSON without extra mapping logic.
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenericRole {
    /// “System” messages define global behaviour and style guidelines.
    System,
    /// Messages produced by the assistant / model.
    Assistant,
    /// Messages originating from the site visitor.
    User,
    /// Structured tool results injected into the conversation.
    Tool,
}

impl Display for GenericRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericRole::System => write!(f, "system"),
            GenericRole::Assistant => write!(f, "assistant"),
            GenericRole::User => write!(f, "user"),
            GenericRole::Tool => write!(f, "tool"),
        }
    }
}

/// One incremental fragment of an in-progress assistant response.
///
/// A record produced by the streaming pipeline carries exactly one of the two
/// fields; both are optional so the UI side can treat the record as a patch.
/// Serialises as `{"content": "..."}` or `{"reasoningDetails": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Raw provider payload: a string for some providers, an array of detail
    /// objects for others.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_details: Option<Value>,
}

impl Delta {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            reasoning_details: None,
        }
    }

    pub fn reasoning_details(details: impl Into<Value>) -> Self {
        Self {
            content: None,
            reasoning_details: Some(details.into()),
        }
    }
}

/// Accumulates [`Delta`] records into the message shown to the visitor.
///
/// Content fragments are appended in arrival order; reasoning details are
/// collected as-is since their shape differs between providers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantReply {
    pub content: String,
    pub reasoning_details: Vec<Value>,
}

impl AssistantReply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, delta: Delta) {
        if let Some(text) = delta.content {
            self.content.push_str(&text);
        }
        if let Some(details) = delta.reasoning_details {
            self.reasoning_details.push(details);
        }
    }

    /// Turn the accumulated text into an assistant message that can be
    /// appended to the conversation for the next round trip.
    pub fn into_message(self) -> GenericMessage {
        GenericMessage::new(self.content, GenericRole::Assistant)
    }
}

impl Extend<Delta> for AssistantReply {
    fn extend<I: IntoIterator<Item = Delta>>(&mut self, iter: I) {
        for delta in iter {
            self.apply(delta);
        }
    }
}

#[derive(Debug)]
pub struct GenericChatCompletionResponse {
    pub message: GenericMessage,
    pub usage: Option<GenericUsageReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericUsageReport {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delta_serialises_only_present_field() {
        let content = serde_json::to_value(Delta::content("Hi")).unwrap();
        assert_eq!(content, json!({ "content": "Hi" }));

        let reasoning = serde_json::to_value(Delta::reasoning_details("Y")).unwrap();
        assert_eq!(reasoning, json!({ "reasoningDetails": "Y" }));
    }

    #[test]
    fn reply_appends_content_in_order() {
        let mut reply = AssistantReply::new();
        reply.extend([
            Delta::content("Hel"),
            Delta::reasoning_details(json!([{ "type": "reasoning.text", "text": "think" }])),
            Delta::content("lo"),
        ]);

        assert_eq!(reply.content, "Hello");
        assert_eq!(reply.reasoning_details.len(), 1);

        let message = reply.into_message();
        assert_eq!(message.role, GenericRole::Assistant);
        assert_eq!(message.content.as_deref(), Some("Hello"));
    }

    #[test]
    fn role_displays_lowercase() {
        assert_eq!(GenericRole::Assistant.to_string(), "assistant");
        assert_eq!(GenericRole::System.to_string(), "system");
    }
}
