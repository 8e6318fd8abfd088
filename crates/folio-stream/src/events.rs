//! Line-to-event stage.
//!
//! Only `data: <payload>` lines carry events.  Everything else (blank
//! keep-alives, `:` comments, `event:`/`id:` fields) is dropped without a
//! diagnostic.

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;

/// Prefix marking a line that carries a payload.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that ends the response ahead of the connection closing.
pub const DONE_SENTINEL: &str = "[DONE]";

/// What a single decoded line amounts to.
#[derive(Debug)]
pub enum ParsedLine<T> {
    Event(T),
    Done,
    Ignored,
    Malformed(serde_json::Error),
}

/// Classify one line without touching any stream state.
pub fn parse_line<T: DeserializeOwned>(line: &str) -> ParsedLine<T> {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return ParsedLine::Ignored;
    };

    if payload.trim() == DONE_SENTINEL {
        return ParsedLine::Done;
    }

    match serde_json::from_str(payload) {
        Ok(event) => ParsedLine::Event(event),
        Err(err) => ParsedLine::Malformed(err),
    }
}

/// Parse a stream of lines into JSON events of type `T`.
///
/// Ends when the lines run out or on the `[DONE]` sentinel.  On the sentinel
/// the upstream is dropped right away so the connection behind it closes
/// instead of being drained.  Malformed payloads are logged and skipped.
pub fn events<T, S, E>(lines: S) -> impl Stream<Item = Result<T, E>>
where
    T: DeserializeOwned,
    S: Stream<Item = Result<String, E>>,
{
    stream! {
        let mut lines = Box::pin(lines);

        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            };

            match parse_line::<T>(&line) {
                ParsedLine::Event(event) => {
                    yield Ok(event);
                }
                ParsedLine::Done => {
                    tracing::debug!("received [DONE], closing upstream");
                    drop(lines);
                    return;
                }
                ParsedLine::Malformed(err) => {
                    tracing::warn!(%line, error = %err, "skipping malformed event payload");
                }
                ParsedLine::Ignored => {}
            }
        }
    }
}
