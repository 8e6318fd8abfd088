//! Event-to-delta stage plus the chunk wire types it reads.

use async_stream::stream;
use folio_core::generic::Delta;
use futures_core::Stream;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::Value;

/// The object sent by OpenAI-compatible providers for each streamed event.
///
/// Every field is optional: providers disagree on which ones they send, and
/// a missing field must never turn a usable chunk into a malformed one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<ChunkChoice>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub delta: Option<ChunkDelta>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_details: Option<Value>,
}

/// Extract the delta records carried by one chunk.
///
/// Only the first choice is looked at.  Content comes before reasoning
/// details; empty strings count as absent.
pub fn project(chunk: ChatCompletionChunk) -> impl Iterator<Item = Delta> {
    let delta = chunk
        .choices
        .and_then(|choices| choices.into_iter().next())
        .and_then(|choice| choice.delta)
        .unwrap_or_default();

    let content = delta
        .content
        .filter(|text| !text.is_empty())
        .map(Delta::content);

    let reasoning = delta
        .reasoning_details
        .filter(|details| !(details.is_null() || details.as_str() == Some("")))
        .map(Delta::reasoning_details);

    [content, reasoning].into_iter().flatten()
}

/// Map a stream of parsed chunks into delta records.
pub fn deltas<S, E>(events: S) -> impl Stream<Item = Result<Delta, E>>
where
    S: Stream<Item = Result<ChatCompletionChunk, E>>,
{
    stream! {
        futures_util::pin_mut!(events);

        while let Some(event) = events.next().await {
            match event {
                Ok(chunk) => {
                    for delta in project(chunk) {
                        yield Ok(delta);
                    }
                }
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn project_json(value: Value) -> Vec<Delta> {
        let chunk: ChatCompletionChunk = serde_json::from_value(value).unwrap();
        project(chunk).collect()
    }

    #[test]
    fn content_only() {
        let out = project_json(json!({ "choices": [{ "delta": { "content": "X" } }] }));
        assert_eq!(out, vec![Delta::content("X")]);
    }

    #[test]
    fn content_then_reasoning() {
        let out = project_json(json!({
            "choices": [{ "delta": { "content": "X", "reasoning_details": "Y" } }]
        }));
        assert_eq!(
            out,
            vec![Delta::content("X"), Delta::reasoning_details("Y")]
        );
    }

    #[test]
    fn reasoning_array_is_kept_verbatim() {
        let details = json!([{ "type": "reasoning.text", "text": "hmm" }]);
        let out = project_json(json!({
            "choices": [{ "delta": { "content": null, "reasoning_details": details } }]
        }));
        assert_eq!(out, vec![Delta::reasoning_details(details)]);
    }

    #[test]
    fn empty_or_absent_choices_yield_nothing() {
        assert!(project_json(json!({ "choices": [] })).is_empty());
        assert!(project_json(json!({ "choices": null })).is_empty());
        assert!(project_json(json!({ "id": "gen-1", "usage": { "total_tokens": 3 } })).is_empty());
    }

    #[test]
    fn role_only_and_empty_content_yield_nothing() {
        assert!(
            project_json(json!({ "choices": [{ "delta": { "role": "assistant", "content": "" } }] }))
                .is_empty()
        );
        assert!(project_json(json!({ "choices": [{ "finish_reason": "stop" }] })).is_empty());
    }

    #[test]
    fn null_fields_do_not_reject_the_chunk() {
        let out = project_json(json!({
            "id": null,
            "choices": [{
                "index": null,
                "delta": { "role": null, "content": "X", "reasoning_details": null },
                "finish_reason": null
            }]
        }));
        assert_eq!(out, vec![Delta::content("X")]);

        let parsed = crate::events::parse_line::<ChatCompletionChunk>(
            r#"data: {"choices":[{"index":null,"delta":{"content":"X"}}]}"#,
        );
        assert!(matches!(parsed, crate::events::ParsedLine::Event(_)));
    }

    #[test]
    fn only_first_choice_counts() {
        let out = project_json(json!({
            "choices": [
                { "index": 0, "delta": { "content": "first" } },
                { "index": 1, "delta": { "content": "second" } }
            ]
        }));
        assert_eq!(out, vec![Delta::content("first")]);
    }
}
