use std::{pin::Pin, time::Duration};

use folio_core::generic::Delta;
use futures_core::Stream;
use futures_util::TryStreamExt;
use reqwest::{
    Client as HttpClient, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};

use crate::{
    api_v1::{ChatCompletionRequest, ChatCompletionResponse},
    error::OpenAiError,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Lazy stream of deltas for one streamed completion.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<Delta, OpenAiError>> + Send>>;

/// Minimal HTTP client for an OpenAI-compatible *chat/completions* endpoint.
///
/// * Works against OpenAI itself or any compatible gateway (OpenRouter, a
///   local proxy, …) by swapping the base URL.
/// * Shares a single `reqwest::Client`, so cloning `OpenAiClient` is cheap.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: HttpClient,
    base: String,
}

impl OpenAiClient {
    /// Convenience constructor building a default `reqwest` client.
    ///
    /// Only the connect phase is bounded: a streamed answer may legitimately
    /// stay open for minutes.
    pub fn new(api_key: impl Into<String>) -> Result<Self, OpenAiError> {
        Self::with_base_url(api_key, None)
    }

    /// Same as [`Self::new`] but targeting another compatible endpoint.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: Option<String>,
    ) -> Result<Self, OpenAiError> {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self::with_http(api_key, http, base_url))
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, etc.
    pub fn with_http(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            api_key: api_key.into(),
            http,
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn headers(&self) -> Result<HeaderMap, OpenAiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        Ok(headers)
    }

    async fn post(
        &self,
        headers: HeaderMap,
        request: &ChatCompletionRequest,
    ) -> Result<Response, OpenAiError> {
        let url = format!("{}/chat/completions", self.base);
        tracing::debug!(
            %url,
            model = %request.model,
            stream = request.stream.unwrap_or(false),
            "sending chat completion"
        );

        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, "chat completion rejected");
            return Err(OpenAiError::Api { status, body });
        }

        Ok(resp)
    }

    /// Perform a **non-streaming** chat completion.
    pub async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let resp = self.post(self.headers()?, &request).await?;
        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }

    /// Perform a **streaming** chat completion.
    ///
    /// Status and body presence are checked before the returned stream
    /// exists, so a rejected request or an empty `2xx` never reaches the
    /// pipeline.  Dropping the stream closes the connection.
    pub async fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> Result<DeltaStream, OpenAiError> {
        request.stream = Some(true);

        let mut headers = self.headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        let resp = self.post(headers, &request).await?;

        let status = resp.status();
        if status == StatusCode::NO_CONTENT || resp.content_length() == Some(0) {
            return Err(OpenAiError::MissingBody { status });
        }

        let body = resp.bytes_stream().map_err(OpenAiError::from);
        Ok(Box::pin(folio_stream::delta_stream(body)))
    }
}
