//! Byte-to-line stage.
//!
//! Network chunks can end anywhere: in the middle of a line, or in the middle
//! of a multi-byte UTF-8 character.  [`LineDecoder`] keeps both kinds of
//! leftovers between pushes so that the lines coming out are independent of
//! how the transport sliced the body.

use std::borrow::Cow;

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;

/// Incremental UTF-8 decoder that re-chunks text into `\n`-delimited lines.
///
/// One decoder per response body; it is never shared between streams.
#[derive(Debug, Default)]
pub struct LineDecoder {
    /// Leading bytes of a character whose remaining bytes have not arrived yet.
    pending: Vec<u8>,
    /// Decoded text not yet terminated by a newline.
    buffer: String,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every line it completed, delimiter stripped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode(chunk);
        self.drain_lines()
    }

    /// Signal end of input and return the unterminated tail, if any.
    ///
    /// A truncated character at the very end decodes to U+FFFD.
    pub fn finish(&mut self) -> Option<String> {
        if !self.pending.is_empty() {
            self.pending.clear();
            self.buffer.push(char::REPLACEMENT_CHARACTER);
        }

        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }

    fn decode(&mut self, chunk: &[u8]) {
        let bytes: Cow<'_, [u8]> = if self.pending.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            Cow::Owned(joined)
        };

        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, invalid) = rest.split_at(err.valid_up_to());
                    self.buffer.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            rest = &invalid[len..];
                        }
                        // Incomplete sequence at the end: wait for the next chunk.
                        None => {
                            self.pending.extend_from_slice(invalid);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn drain_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);

        complete[..last_newline]
            .split('\n')
            .map(str::to_owned)
            .collect()
    }
}

/// Turn a body of byte chunks into a lazy stream of lines.
///
/// A transport error is forwarded once and ends the stream; the partial line
/// buffered at that point is dropped.
pub fn lines<S, B, E>(body: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    stream! {
        let mut decoder = LineDecoder::new();
        futures_util::pin_mut!(body);

        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(chunk) => {
                    let completed = decoder.push(chunk.as_ref());
                    tracing::trace!(lines = completed.len(), "decoded chunk");
                    for line in completed {
                        yield Ok(line);
                    }
                }
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }

        if let Some(line) = decoder.finish() {
            yield Ok(line);
        }
    }
}
