use std::{env, sync::Arc};

use folio_core::error::{FolioError, Result};

use crate::client::OpenAiClient;

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Optional environment variable overriding the endpoint base URL.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Thin wrapper that wires the HTTP client [`OpenAiClient`] into a value that
/// implements the `folio-core` provider traits.
///
/// Think of it as the **service locator** for the OpenAI-compatible back-end:
///
/// * stores the API key and base URL,
/// * owns a shareable, connection-pooled `reqwest::Client`,
/// * provides a fluent [`OpenAiAdapterBuilder`] so callers don’t have to juggle
///   `Option<String>` manually.
pub struct OpenAiAdapter {
    pub(crate) client: Arc<OpenAiClient>,
}

impl OpenAiAdapter {
    /// Build an adapter from the environment, or `None` when no API key is
    /// configured.
    ///
    /// The chat widget is optional: a site deployed without a key keeps
    /// working and simply has no backend to talk to.
    pub fn from_env() -> Option<Self> {
        match OpenAiAdapterBuilder::new_from_env().build() {
            Ok(adapter) => Some(adapter),
            Err(err) => {
                tracing::info!(error = %err, "chat backend disabled");
                None
            }
        }
    }

    pub fn client(&self) -> &OpenAiClient {
        &self.client
    }
}

/// Builder for [`OpenAiAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use folio_openai::OpenAiAdapterBuilder;
///
/// let backend = OpenAiAdapterBuilder::new_from_env()
///     .build()
///     .expect("OPENAI_API_KEY must be set");
/// ```
#[derive(Default)]
pub struct OpenAiAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
}

impl OpenAiAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that reads `OPENAI_API_KEY` and
    /// `OPENAI_BASE_URL`.
    ///
    /// # Panics
    ///
    /// Never panics. Missing keys only surface during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()),
            base_url: env::var(BASE_URL_ENV).ok().filter(|url| !url.is_empty()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the adapter at another compatible endpoint, e.g.
    /// `https://openrouter.ai/api/v1`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`FolioError::Invalid`] – if the API key is missing.
    /// * [`FolioError::Backend`] – if the HTTP client cannot be built.
    pub fn build(self) -> Result<OpenAiAdapter> {
        let api_key = self.api_key.ok_or(FolioError::Invalid(format!(
            "missing env variable: `{API_KEY_ENV}`"
        )))?;

        let client = OpenAiClient::with_base_url(api_key, self.base_url)?;

        Ok(OpenAiAdapter {
            client: Arc::new(client),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_key_fails() {
        let err = OpenAiAdapterBuilder::new().build().err().unwrap();
        assert!(matches!(err, FolioError::Invalid(msg) if msg.contains(API_KEY_ENV)));
    }

    #[test]
    fn base_url_override_is_normalised() {
        let adapter = OpenAiAdapterBuilder::new()
            .with_api_key("sk-test")
            .with_base_url("https://openrouter.ai/api/v1/")
            .build()
            .unwrap();
        assert_eq!(adapter.client().base_url(), "https://openrouter.ai/api/v1");
    }

    #[test]
    fn default_base_url() {
        let adapter = OpenAiAdapterBuilder::new()
            .with_api_key("sk-test")
            .build()
            .unwrap();
        assert_eq!(adapter.client().base_url(), crate::client::DEFAULT_BASE_URL);
    }
}
