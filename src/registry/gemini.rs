//! Google Gemini model table.
//!
//! Gemini is a prompt-driven generalist: every text capability is a prompt
//! template over `generateContent`, so the builders here differ in the
//! instruction they compose while sharing one response parser. Embeddings go
//! through `embedContent` on the dedicated embedding model.
//!
//! `similarity` and `fill-mask` are intentionally unregistered: the
//! orchestrator sees an empty spec list and falls through, which is the
//! contract for a capability a provider cannot serve.

use serde_json::{json, Value};

use super::{ModelSpec, RequestInput};
use crate::types::{Capability, ChatTurn, NormalizedResult, Sender};
use crate::{HuginnError, Result};

pub(crate) const PROVIDER: &str = "gemini";

const FLASH_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";
const FLASH_8B_PATH: &str = "/v1beta/models/gemini-1.5-flash-8b:generateContent";

/// The built-in Gemini table, in fallback-priority order.
pub(crate) fn specs() -> Vec<ModelSpec> {
    let mut rows = Vec::new();
    for (id, path) in [
        ("gemini-1.5-flash", FLASH_PATH),
        ("gemini-1.5-flash-8b", FLASH_8B_PATH),
    ] {
        rows.extend([
            ModelSpec {
                provider: PROVIDER,
                capability: Capability::Answer,
                id,
                path,
                build_request: build_answer,
                parse_response: parse_text,
            },
            ModelSpec {
                provider: PROVIDER,
                capability: Capability::Classify,
                id,
                path,
                build_request: build_classify,
                parse_response: parse_text,
            },
            ModelSpec {
                provider: PROVIDER,
                capability: Capability::Summarize,
                id,
                path,
                build_request: build_summarize,
                parse_response: parse_text,
            },
            ModelSpec {
                provider: PROVIDER,
                capability: Capability::Sentiment,
                id,
                path,
                build_request: build_sentiment,
                parse_response: parse_sentiment_word,
            },
            ModelSpec {
                provider: PROVIDER,
                capability: Capability::Translate,
                id,
                path,
                build_request: build_translate,
                parse_response: parse_text,
            },
            ModelSpec {
                provider: PROVIDER,
                capability: Capability::NamedEntities,
                id,
                path,
                build_request: build_entities,
                parse_response: parse_text,
            },
        ]);
    }
    rows.push(ModelSpec {
        provider: PROVIDER,
        capability: Capability::Embedding,
        id: "text-embedding-004",
        path: "/v1beta/models/text-embedding-004:embedContent",
        build_request: build_embed,
        parse_response: parse_embedding,
    });
    rows
}

// ============================================================================
// Request builders
// ============================================================================

/// Compose a `generateContent` body: prior turns plus the final user text.
fn generate_body(history: &[ChatTurn], user_text: String) -> Value {
    let mut contents: Vec<Value> = history
        .iter()
        .map(|turn| {
            let role = match turn.sender {
                Sender::User => "user",
                Sender::Assistant => "model",
            };
            json!({ "role": role, "parts": [{ "text": turn.message }] })
        })
        .collect();
    contents.push(json!({ "role": "user", "parts": [{ "text": user_text }] }));
    json!({
        "contents": contents,
        "generationConfig": { "temperature": 0.2, "maxOutputTokens": 256 },
    })
}

fn build_answer(input: &RequestInput<'_>) -> Value {
    let text = match input.context {
        Some(context) => format!(
            "Answer the question using the context.\n\nContext: {context}\n\nQuestion: {}",
            input.prompt
        ),
        None => input.prompt.to_string(),
    };
    generate_body(input.history, text)
}

fn build_classify(input: &RequestInput<'_>) -> Value {
    let text = format!(
        "Classify the following text into exactly one of these categories: {}. \
         Reply with only the category name.\n\nText: {}",
        input.labels.join(", "),
        input.prompt
    );
    generate_body(&[], text)
}

fn build_summarize(input: &RequestInput<'_>) -> Value {
    let text = format!(
        "Summarize the following text in at most two sentences.\n\n{}",
        input.prompt
    );
    generate_body(&[], text)
}

fn build_sentiment(input: &RequestInput<'_>) -> Value {
    let text = format!(
        "Classify the sentiment of the following text. \
         Reply with only one word: positive, negative, or neutral.\n\nText: {}",
        input.prompt
    );
    generate_body(&[], text)
}

fn build_translate(input: &RequestInput<'_>) -> Value {
    let text = format!(
        "Translate the following text to Spanish. Reply with only the translation.\n\n{}",
        input.prompt
    );
    generate_body(&[], text)
}

fn build_entities(input: &RequestInput<'_>) -> Value {
    let text = format!(
        "List the named entities in the following text as a comma-separated list \
         of \"entity (type)\" pairs. Reply with only the list, or \"none\".\n\n{}",
        input.prompt
    );
    generate_body(&[], text)
}

fn build_embed(input: &RequestInput<'_>) -> Value {
    json!({
        "model": "models/text-embedding-004",
        "content": { "parts": [{ "text": input.prompt }] },
    })
}

// ============================================================================
// Response parsers
// ============================================================================

/// Concatenate `candidates[0].content.parts[].text`.
///
/// A response without candidates (safety block, truncation) is a
/// `BadResponse` so the chain advances; Gemini exposes no confidence score.
fn parse_text(raw: Value) -> Result<NormalizedResult> {
    let parts = raw["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| HuginnError::BadResponse("no candidates in response".into()))?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(HuginnError::EmptyResponse);
    }
    Ok(NormalizedResult::new(text, None, raw))
}

/// Sentiment replies must normalize to one of the three polarity words.
fn parse_sentiment_word(raw: Value) -> Result<NormalizedResult> {
    let result = parse_text(raw)?;
    let word = result
        .text
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();
    match word.as_str() {
        "positive" | "negative" | "neutral" => {
            Ok(NormalizedResult::new(word, None, result.raw))
        }
        other => Err(HuginnError::BadResponse(format!(
            "unexpected sentiment reply: {other:?}"
        ))),
    }
}

/// `{ "embedding": { "values": [...] } }`
fn parse_embedding(raw: Value) -> Result<NormalizedResult> {
    let dimensions = raw["embedding"]["values"]
        .as_array()
        .map(Vec::len)
        .ok_or_else(|| HuginnError::BadResponse("embedding response missing values".into()))?;
    Ok(NormalizedResult::new(
        format!("{dimensions}-dimensional embedding"),
        None,
        raw,
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatTurn;

    #[test]
    fn answer_builder_threads_history_and_context() {
        let history = vec![
            ChatTurn::user("hi"),
            ChatTurn::assistant("hello, how can I help?"),
        ];
        let body = build_answer(&RequestInput {
            prompt: "What did we buy yesterday?",
            context: Some("Yesterday's shopping: milk, eggs."),
            history: &history,
            labels: &[],
        });
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        let last = contents[2]["parts"][0]["text"].as_str().unwrap();
        assert!(last.contains("Yesterday's shopping"));
        assert!(last.contains("What did we buy yesterday?"));
    }

    #[test]
    fn classify_builder_lists_categories() {
        let labels = vec!["spending".to_string(), "shopping".to_string()];
        let body = build_classify(&RequestInput {
            prompt: "add bread to the list",
            context: None,
            history: &[],
            labels: &labels,
        });
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("spending, shopping"));
    }

    #[test]
    fn text_parser_concatenates_parts() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "El pan " }, { "text": "está aquí." }] },
                "finishReason": "STOP",
            }],
        });
        let result = parse_text(raw).unwrap();
        assert_eq!(result.text, "El pan está aquí.");
        assert!(result.confidence.is_none());
    }

    #[test]
    fn text_parser_rejects_missing_candidates() {
        let raw = serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" },
        });
        assert!(matches!(
            parse_text(raw).unwrap_err(),
            HuginnError::BadResponse(_)
        ));
    }

    #[test]
    fn sentiment_parser_normalizes_reply() {
        let raw = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Positive." }] } }],
        });
        assert_eq!(parse_sentiment_word(raw).unwrap().text, "positive");

        let raw = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "I think it is great" }] } }],
        });
        assert!(matches!(
            parse_sentiment_word(raw).unwrap_err(),
            HuginnError::BadResponse(_)
        ));
    }

    #[test]
    fn embedding_parser_counts_dimensions() {
        let raw = serde_json::json!({ "embedding": { "values": [0.1, 0.2, 0.3] } });
        assert_eq!(
            parse_embedding(raw).unwrap().text,
            "3-dimensional embedding"
        );
    }
}
