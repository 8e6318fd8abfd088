use std::pin::Pin;

use folio_core::{
    error::{FolioError, Result},
    generic::Delta,
    provider::{ChatCompleteParameters, StreamingChatProvider},
};
use futures_core::stream::Stream;

use crate::{OpenAiAdapter, api_v1::ChatCompletionRequest};

impl StreamingChatProvider for OpenAiAdapter {
    type DeltaStream<'s>
        = Pin<Box<dyn Stream<Item = Result<Delta>> + Send + 's>>
    where
        Self: 's;

    fn chat_complete_stream<'s, M>(
        &'s self,
        params: ChatCompleteParameters<M>,
    ) -> Self::DeltaStream<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's,
    {
        let client = self.client.clone();

        Box::pin(async_stream::try_stream! {
            use futures_util::StreamExt;

            let request = ChatCompletionRequest::from(params);
            let mut stream = client
                .chat_completion_stream(request)
                .await
                .map_err(FolioError::from)?;

            while let Some(delta) = stream.next().await {
                let delta = delta.map_err(FolioError::from)?;
                yield delta;
            }
        })
    }
}
