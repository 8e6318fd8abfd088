//! Provider-agnostic building blocks for the portfolio site's chat widget.
//!
//! * [`generic`] – chat messages, the [`Delta`](generic::Delta) record streamed
//!   to the UI and the [`AssistantReply`](generic::AssistantReply) accumulator.
//! * [`provider`] – traits a backend implements to answer a conversation,
//!   either in one round trip or as a delta stream.
//! * [`error`] – the workspace-wide [`FolioError`](error::FolioError).
pub mod client;
pub mod error;
pub mod generic;
pub mod provider;

pub use client::FolioClient;
