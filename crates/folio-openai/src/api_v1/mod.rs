//! Wire types for the `/chat/completions` endpoint.
//!
//! The streamed chunk types live in `folio-stream`, next to the projector
//! that reads them; this module only covers what the client sends and the
//! non-streaming reply.
mod chat_completion;

pub use chat_completion::*;
pub use folio_stream::{ChatCompletionChunk, ChunkChoice, ChunkDelta};
