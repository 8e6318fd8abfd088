//! # Streaming chat – forwarding deltas to the widget
//!
//! Opens a streamed completion and prints every delta the way the site's
//! route handler forwards it to the browser: one `data: <json>` frame per
//! record, followed by a final `[DONE]`.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-…                              # mandatory
//! export OPENAI_BASE_URL=https://openrouter.ai/api/v1     # optional
//! export FOLIO_MODEL=openai/gpt-4o-mini                   # optional
//! RUST_LOG=folio_stream=debug cargo run -p folio --example openai_chat_stream
//! ```

use folio::openai::OpenAiAdapter;
use folio::{
    generic::{AssistantReply, GenericMessage, GenericRole},
    provider::{ChatCompleteParameters, StreamingChatProvider as _},
};
use futures_util::StreamExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // The widget is optional: without a key there is nothing to talk to.
    let Some(backend) = OpenAiAdapter::from_env() else {
        eprintln!("OPENAI_API_KEY is not set, chat is disabled");
        return Ok(());
    };
    let model = std::env::var("FOLIO_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());

    let messages = vec![
        GenericMessage::new(
            "You are the assistant on a developer's portfolio site. Keep answers short.".into(),
            GenericRole::System,
        ),
        GenericMessage::new(
            "What kind of projects are on this site?".into(),
            GenericRole::User,
        ),
    ];
    let params = ChatCompleteParameters::new(messages, model).with_temperature(0.3);

    let mut stream = backend.chat_complete_stream(params);
    let mut reply = AssistantReply::new();

    while let Some(delta) = stream.next().await {
        match delta {
            Ok(delta) => {
                println!("data: {}\n", serde_json::to_string(&delta)?);
                reply.apply(delta);
            }
            Err(e) => {
                // The widget renders this inline instead of the answer.
                println!("data: {}\n", serde_json::json!({ "error": e.to_string() }));
                break;
            }
        }
    }
    println!("data: [DONE]\n");

    tracing::info!(chars = reply.content.len(), "reply complete");
    Ok(())
}
