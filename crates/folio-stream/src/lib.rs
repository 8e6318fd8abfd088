//! Consumption pipeline for streamed chat completions.
//!
//! A streamed completion arrives as `data: <json>` lines over an HTTP body.
//! Three lazy stages turn that body into [`Delta`] records:
//!
//! | Stage               | Input                 | Output                        |
//! |---------------------|-----------------------|-------------------------------|
//! | [`decoder::lines`]  | byte chunks           | `\n`-delimited text lines     |
//! | [`events::events`]  | lines                 | JSON events, until `[DONE]`   |
//! | [`deltas::deltas`]  | parsed chunks         | content / reasoning deltas    |
//!
//! Every stage pulls from its upstream only when its consumer asks for the
//! next item, keeps its state private to one response, and passes transport
//! errors through untouched.  [`delta_stream`] wires all three together.
//!
//! ```rust
//! use futures_util::{StreamExt, stream};
//!
//! #[tokio::main]
//! async fn main() {
//!     let body = stream::iter([
//!         Ok::<_, std::convert::Infallible>(&b"data: {\"choices\":[{\"delta\":{\"content\":\"Hel"[..]),
//!         Ok(&b"lo\"}}]}\ndata: [DONE]\n"[..]),
//!     ]);
//!
//!     let deltas: Vec<_> = folio_stream::delta_stream(body).collect().await;
//!     assert_eq!(deltas.len(), 1);
//!     assert_eq!(deltas[0].as_ref().unwrap().content.as_deref(), Some("Hello"));
//! }
//! ```
pub mod decoder;
pub mod deltas;
pub mod events;

pub use decoder::{LineDecoder, lines};
pub use deltas::{ChatCompletionChunk, ChunkChoice, ChunkDelta, deltas, project};
pub use events::{DATA_PREFIX, DONE_SENTINEL, ParsedLine, events, parse_line};
pub use folio_core::generic::Delta;

use futures_core::Stream;

/// Run a raw response body through all three stages.
pub fn delta_stream<S, B, E>(body: S) -> impl Stream<Item = Result<Delta, E>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    deltas(events::<ChatCompletionChunk, _, _>(lines(body)))
}
