use std::{future::Future, pin::Pin, sync::Arc};

use folio_core::{
    error::Result,
    generic::GenericChatCompletionResponse,
    provider::{ChatCompleteParameters, ChatCompletionProvider},
};

use crate::{
    OpenAiAdapter,
    api_v1::{ChatCompletionMessage, ChatCompletionRequest, FinishReason},
    error::OpenAiError,
};

impl ChatCompletionProvider for OpenAiAdapter {
    type Message = ChatCompletionMessage;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<GenericChatCompletionResponse>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            let request = ChatCompletionRequest::from(params);
            let response = client.chat_completion(request).await?;

            let Some(first_choice) = response.choices.into_iter().next() else {
                return Err(OpenAiError::Format("response has no choices".into()).into());
            };

            if first_choice.finish_reason == Some(FinishReason::ContentFilter) {
                return Err(OpenAiError::Format("reply withheld by content filter".into()).into());
            }

            Ok(GenericChatCompletionResponse {
                message: first_choice.message.into(),
                usage: response.usage.map(Into::into),
            })
        })
    }
}
