use std::{future::Future, pin::Pin};

use crate::{
    error::Result,
    generic::{Delta, GenericChatCompletionResponse},
};
use futures_core::stream::Stream;

/// A **backend** turns a conversation into a network call to a concrete
/// provider (OpenAI, OpenRouter, …) and parses the reply.
///
/// The trait is intentionally minimal:
///
/// * **One associated type** – the in-memory `Message` representation this
///   provider accepts.
/// * **One async-ish method** – `chat_complete`, which performs a *single*
///   non-streaming round-trip.
pub trait ChatCompletionProvider: Send + Sync {
    /// Chat message type consumed by this backend.
    type Message: Send + Sync + 'static;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p;
}

/// A provider that can deliver the model’s answer **incrementally**.
///
/// The stream yields [`Delta`] records in arrival order.  It is lazy and
/// single-pass: dropping it closes the underlying connection.
pub trait StreamingChatProvider: ChatCompletionProvider {
    type DeltaStream<'s>: Stream<Item = Result<Delta>> + Send + 's
    where
        Self: 's;

    /// Start a streaming chat completion.
    fn chat_complete_stream<'s, M>(
        &'s self,
        params: ChatCompleteParameters<M>,
    ) -> Self::DeltaStream<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's;
}

#[derive(Debug, Clone)]
pub struct ChatCompleteParameters<M: Clone> {
    pub messages: Vec<M>,
    pub model: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl<M: Clone> ChatCompleteParameters<M> {
    pub fn new(messages: Vec<M>, model: impl Into<String>) -> Self {
        Self {
            messages,
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
