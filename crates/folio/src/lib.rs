//! # `folio` – The umbrella crate
//!
//! One import for the chat widget backend of the portfolio site:
//!
//! | Crate              | What it provides                                                        |
//! |--------------------|-------------------------------------------------------------------------|
//! | **`folio-core`**   | `Delta`, chat messages, provider traits, `FolioClient`, errors          |
//! | **`folio-stream`** | byte → line → event → delta pipeline for streamed completions           |
//! | **`folio-openai`** | `reqwest` backend for OpenAI-compatible endpoints *(optional)*          |
//!
//! The `openai` feature is on by default.  Turn it off to use only the
//! pipeline with a transport of your own:
//!
//! ```toml
//! [dependencies]
//! folio = { version = "0.1", default-features = false }
//! ```
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use folio::{
//!     FolioClient,
//!     generic::{GenericMessage, GenericRole},
//!     provider::ChatCompleteParameters,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = folio::openai::OpenAiAdapterBuilder::new_from_env().build()?;
//!     let client  = FolioClient::new(backend);
//!
//!     let params = ChatCompleteParameters::new(
//!         vec![GenericMessage::new("Who are you?".into(), GenericRole::User)],
//!         "gpt-4o-mini",
//!     );
//!     let reply = client.collect_reply(params).await?;
//!     println!("{}", reply.content);
//!     Ok(())
//! }
//! ```
#![doc(html_root_url = "https://docs.rs/folio/latest")]

pub use folio_core::*;
pub use folio_stream as stream;

#[cfg(feature = "openai")]
pub use folio_openai as openai;
