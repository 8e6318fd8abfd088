//! Generic, lightweight client bound to a single concrete backend.
//!
//! The client is **generic over the backend type `B`**, so the compiler
//! guarantees that the messages handed in match what the backend expects,
//! with no dynamic dispatch in user code.
//!
//! Any backend crate (e.g. `folio-openai`) just implements the provider
//! traits and the same client works out of the box.
use std::sync::Arc;

use futures_util::StreamExt;

use crate::{
    error::Result,
    generic::AssistantReply,
    provider::{ChatCompleteParameters, ChatCompletionProvider, StreamingChatProvider},
};

/// A client bound to a single provider.
///
/// Cloning is cheap: the backend sits behind an `Arc`, so concurrent chat
/// requests share the HTTP connection pool but never a decoder.
#[derive(Debug)]
pub struct FolioClient<B> {
    backend: Arc<B>,
}

impl<B> Clone for FolioClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> FolioClient<B>
where
    B: ChatCompletionProvider,
{
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Access the underlying backend (e.g. to tweak provider-specific settings).
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B> FolioClient<B>
where
    B: StreamingChatProvider,
{
    /// Stream a completion and fold every delta into one [`AssistantReply`].
    ///
    /// The first error aborts the collection; deltas received before it are
    /// discarded with the partial reply.
    pub async fn collect_reply<M>(&self, params: ChatCompleteParameters<M>) -> Result<AssistantReply>
    where
        M: Into<B::Message> + Clone + Send + Sync,
    {
        let stream = self.backend.chat_complete_stream(params);
        futures_util::pin_mut!(stream);

        let mut reply = AssistantReply::new();
        while let Some(delta) = stream.next().await {
            reply.apply(delta?);
        }
        Ok(reply)
    }
}

impl<B: ChatCompletionProvider> ChatCompletionProvider for FolioClient<B> {
    type Message = B::Message;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> std::pin::Pin<
        Box<
            dyn std::future::Future<Output = Result<crate::generic::GenericChatCompletionResponse>>
                + Send
                + 'p,
        >,
    >
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        self.backend.chat_complete(params)
    }
}

impl<B: StreamingChatProvider> StreamingChatProvider for FolioClient<B> {
    type DeltaStream<'s>
        = B::DeltaStream<'s>
    where
        Self: 's;

    fn chat_complete_stream<'s, M>(
        &'s self,
        params: ChatCompleteParameters<M>,
    ) -> Self::DeltaStream<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's,
    {
        self.backend.chat_complete_stream(params)
    }
}

#[cfg(test)]
mod tests {
    use std::{future::Future, pin::Pin};

    use futures_core::Stream;
    use serde_json::json;

    use super::*;
    use crate::{
        error::FolioError,
        generic::{Delta, GenericChatCompletionResponse, GenericMessage, GenericRole},
    };

    struct ScriptedBackend {
        deltas: Vec<Delta>,
        fail_after: Option<usize>,
    }

    impl ChatCompletionProvider for ScriptedBackend {
        type Message = GenericMessage;

        fn chat_complete<'p, M>(
            &self,
            _params: ChatCompleteParameters<M>,
        ) -> Pin<Box<dyn Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>>
        where
            M: Into<Self::Message> + Clone + Send + Sync + 'p,
        {
            let text: String = self.deltas.iter().filter_map(|d| d.content.clone()).collect();
            Box::pin(async move {
                Ok(GenericChatCompletionResponse {
                    message: GenericMessage::new(text, GenericRole::Assistant),
                    usage: None,
                })
            })
        }
    }

    impl StreamingChatProvider for ScriptedBackend {
        type DeltaStream<'s>
            = Pin<Box<dyn Stream<Item = Result<Delta>> + Send + 's>>
        where
            Self: 's;

        fn chat_complete_stream<'s, M>(
            &'s self,
            _params: ChatCompleteParameters<M>,
        ) -> Self::DeltaStream<'s>
        where
            M: Into<Self::Message> + Clone + Send + Sync + 's,
        {
            let fail_after = self.fail_after;
            let items = self.deltas.iter().cloned().enumerate().map(move |(i, delta)| {
                match fail_after {
                    Some(n) if i >= n => Err(FolioError::Invalid("connection reset".into())),
                    _ => Ok(delta),
                }
            });
            Box::pin(futures_util::stream::iter(items))
        }
    }

    fn params() -> ChatCompleteParameters<GenericMessage> {
        ChatCompleteParameters::new(
            vec![GenericMessage::new("Hi".into(), GenericRole::User)],
            "test-model",
        )
    }

    #[tokio::test]
    async fn collect_reply_folds_deltas() {
        let client = FolioClient::new(ScriptedBackend {
            deltas: vec![
                Delta::content("Hel"),
                Delta::reasoning_details(json!("greeting")),
                Delta::content("lo"),
            ],
            fail_after: None,
        });

        let reply = client.collect_reply(params()).await.unwrap();
        assert_eq!(reply.content, "Hello");
        assert_eq!(reply.reasoning_details, vec![json!("greeting")]);
    }

    #[tokio::test]
    async fn collect_reply_surfaces_stream_error() {
        let client = FolioClient::new(ScriptedBackend {
            deltas: vec![Delta::content("a"), Delta::content("b")],
            fail_after: Some(1),
        });

        let err = client.collect_reply(params()).await.unwrap_err();
        assert!(matches!(err, FolioError::Invalid(_)));
    }

    #[tokio::test]
    async fn chat_complete_delegates_to_backend() {
        let client = FolioClient::new(ScriptedBackend {
            deltas: vec![Delta::content("Hi "), Delta::content("there")],
            fail_after: None,
        });

        let response = client.clone().chat_complete(params()).await.unwrap();
        assert_eq!(response.message.content.as_deref(), Some("Hi there"));
    }
}
