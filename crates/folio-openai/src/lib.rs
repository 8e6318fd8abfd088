//! OpenAI-compatible backend for the chat widget.
//!
//! [`OpenAiAdapter`] implements the `folio-core` provider traits on top of a
//! small `reqwest` client.  Streamed answers go through the `folio-stream`
//! pipeline, so the same code serves OpenAI and gateways such as OpenRouter
//! that add `reasoning_details` to their deltas.
mod adapter;
mod client;
mod provider_impl_chat;
mod provider_impl_chat_stream;

pub mod api_v1;
pub mod error;

pub use adapter::{API_KEY_ENV, BASE_URL_ENV, OpenAiAdapter, OpenAiAdapterBuilder};
pub use client::{DeltaStream, OpenAiClient};
