//! HuggingFace Inference API model table.
//!
//! Task-specific hosted models, one row per (capability, model). Request and
//! response shapes follow the serverless inference endpoints; see
//! <https://huggingface.co/docs/api-inference/index>.
//!
//! The inference API is not consistent about nesting: classification
//! pipelines sometimes wrap the label array in an extra list. Parsers here
//! accept both forms rather than pinning one.

use serde_json::{json, Value};

use super::{ModelSpec, RequestInput};
use crate::types::{Capability, NormalizedResult};
use crate::{HuginnError, Result};

pub(crate) const PROVIDER: &str = "huggingface";

/// The built-in HuggingFace table, in fallback-priority order.
pub(crate) fn specs() -> Vec<ModelSpec> {
    vec![
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Classify,
            id: "facebook/bart-large-mnli",
            path: "/models/facebook/bart-large-mnli",
            build_request: build_zero_shot,
            parse_response: parse_zero_shot,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Classify,
            id: "valhalla/distilbart-mnli-12-1",
            path: "/models/valhalla/distilbart-mnli-12-1",
            build_request: build_zero_shot,
            parse_response: parse_zero_shot,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Summarize,
            id: "facebook/bart-large-cnn",
            path: "/models/facebook/bart-large-cnn",
            build_request: build_summary,
            parse_response: parse_summary,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Summarize,
            id: "sshleifer/distilbart-cnn-12-6",
            path: "/models/sshleifer/distilbart-cnn-12-6",
            build_request: build_summary,
            parse_response: parse_summary,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Answer,
            id: "deepset/roberta-base-squad2",
            path: "/models/deepset/roberta-base-squad2",
            build_request: build_question,
            parse_response: parse_answer,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Answer,
            id: "distilbert-base-cased-distilled-squad",
            path: "/models/distilbert-base-cased-distilled-squad",
            build_request: build_question,
            parse_response: parse_answer,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Sentiment,
            id: "distilbert-base-uncased-finetuned-sst-2-english",
            path: "/models/distilbert-base-uncased-finetuned-sst-2-english",
            build_request: build_inputs,
            parse_response: parse_sentiment_labels,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Sentiment,
            id: "nlptown/bert-base-multilingual-uncased-sentiment",
            path: "/models/nlptown/bert-base-multilingual-uncased-sentiment",
            build_request: build_inputs,
            parse_response: parse_sentiment_stars,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Translate,
            id: "Helsinki-NLP/opus-mt-en-es",
            path: "/models/Helsinki-NLP/opus-mt-en-es",
            build_request: build_inputs,
            parse_response: parse_translation,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::NamedEntities,
            id: "dslim/bert-base-NER",
            path: "/models/dslim/bert-base-NER",
            build_request: build_inputs,
            parse_response: parse_entities,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::NamedEntities,
            id: "Davlan/bert-base-multilingual-cased-ner-hrl",
            path: "/models/Davlan/bert-base-multilingual-cased-ner-hrl",
            build_request: build_inputs,
            parse_response: parse_entities,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Similarity,
            id: "sentence-transformers/all-MiniLM-L6-v2",
            path: "/models/sentence-transformers/all-MiniLM-L6-v2",
            build_request: build_similarity,
            parse_response: parse_similarity,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Similarity,
            id: "sentence-transformers/all-mpnet-base-v2",
            path: "/models/sentence-transformers/all-mpnet-base-v2",
            build_request: build_similarity,
            parse_response: parse_similarity,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Embedding,
            id: "sentence-transformers/all-MiniLM-L6-v2",
            path: "/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2",
            build_request: build_inputs,
            parse_response: parse_embedding,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::Embedding,
            id: "BAAI/bge-small-en-v1.5",
            path: "/pipeline/feature-extraction/BAAI/bge-small-en-v1.5",
            build_request: build_inputs,
            parse_response: parse_embedding,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::FillMask,
            id: "bert-base-uncased",
            path: "/models/bert-base-uncased",
            build_request: build_inputs,
            parse_response: parse_fill_mask,
        },
        ModelSpec {
            provider: PROVIDER,
            capability: Capability::FillMask,
            id: "distilroberta-base",
            path: "/models/distilroberta-base",
            build_request: build_fill_mask_roberta,
            parse_response: parse_fill_mask,
        },
    ]
}

// ============================================================================
// Request builders
// ============================================================================

fn build_inputs(input: &RequestInput<'_>) -> Value {
    json!({ "inputs": input.prompt })
}

fn build_zero_shot(input: &RequestInput<'_>) -> Value {
    json!({
        "inputs": input.prompt,
        "parameters": { "candidate_labels": input.labels },
    })
}

fn build_summary(input: &RequestInput<'_>) -> Value {
    json!({
        "inputs": input.prompt,
        "parameters": { "max_length": 120, "min_length": 20, "do_sample": false },
    })
}

fn build_question(input: &RequestInput<'_>) -> Value {
    json!({
        "inputs": {
            "question": input.prompt,
            "context": input.context.unwrap_or_default(),
        },
    })
}

fn build_similarity(input: &RequestInput<'_>) -> Value {
    json!({
        "inputs": {
            "source_sentence": input.prompt,
            "sentences": [input.context.unwrap_or_default()],
        },
    })
}

/// RoBERTa-family fill-mask models use `<mask>` where BERT uses `[MASK]`.
fn build_fill_mask_roberta(input: &RequestInput<'_>) -> Value {
    json!({ "inputs": input.prompt.replace("[MASK]", "<mask>") })
}

// ============================================================================
// Response parsers
// ============================================================================

fn bad(message: impl Into<String>) -> HuginnError {
    HuginnError::BadResponse(message.into())
}

/// `{ "labels": [...], "scores": [...] }`, sorted by descending score.
fn parse_zero_shot(raw: Value) -> Result<NormalizedResult> {
    let label = raw["labels"][0]
        .as_str()
        .ok_or_else(|| bad("zero-shot response missing labels"))?
        .to_string();
    let score = raw["scores"][0]
        .as_f64()
        .ok_or_else(|| bad("zero-shot response missing scores"))?;
    Ok(NormalizedResult::new(label, Some(score), raw))
}

/// `[ { "summary_text": ... } ]`
fn parse_summary(raw: Value) -> Result<NormalizedResult> {
    let text = raw[0]["summary_text"]
        .as_str()
        .ok_or_else(|| bad("summarization response missing summary_text"))?
        .to_string();
    Ok(NormalizedResult::new(text, None, raw))
}

/// `{ "answer": ..., "score": ... }`
fn parse_answer(raw: Value) -> Result<NormalizedResult> {
    let answer = raw["answer"]
        .as_str()
        .ok_or_else(|| bad("QA response missing answer"))?
        .to_string();
    let score = raw["score"].as_f64();
    Ok(NormalizedResult::new(answer, score, raw))
}

/// Classification pipelines answer `[[{label, score}, ...]]` for a single
/// input, but some deployments drop the outer list.
fn label_scores(raw: &Value) -> Result<Vec<(String, f64)>> {
    let outer = raw.as_array().ok_or_else(|| bad("expected an array"))?;
    let entries = match outer.first() {
        Some(Value::Array(inner)) => inner.as_slice(),
        _ => outer.as_slice(),
    };
    let mut pairs = Vec::with_capacity(entries.len());
    for entry in entries {
        let label = entry["label"]
            .as_str()
            .ok_or_else(|| bad("classification entry missing label"))?;
        let score = entry["score"]
            .as_f64()
            .ok_or_else(|| bad("classification entry missing score"))?;
        pairs.push((label.to_string(), score));
    }
    Ok(pairs)
}

/// SST-2-style labels: `POSITIVE` / `NEGATIVE` (some checkpoints add `NEUTRAL`).
fn parse_sentiment_labels(raw: Value) -> Result<NormalizedResult> {
    let (label, score) = label_scores(&raw)?
        .into_iter()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or(HuginnError::EmptyResponse)?;
    Ok(NormalizedResult::new(label.to_lowercase(), Some(score), raw))
}

/// Star-rating labels (`"1 star"` .. `"5 stars"`) mapped onto polarity.
fn parse_sentiment_stars(raw: Value) -> Result<NormalizedResult> {
    let (label, score) = label_scores(&raw)?
        .into_iter()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or(HuginnError::EmptyResponse)?;
    let stars: u32 = label
        .split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| bad(format!("unexpected star label: {label}")))?;
    let polarity = match stars {
        1 | 2 => "negative",
        3 => "neutral",
        _ => "positive",
    };
    Ok(NormalizedResult::new(polarity, Some(score), raw))
}

/// `[ { "translation_text": ... } ]`
fn parse_translation(raw: Value) -> Result<NormalizedResult> {
    let text = raw[0]["translation_text"]
        .as_str()
        .ok_or_else(|| bad("translation response missing translation_text"))?
        .to_string();
    Ok(NormalizedResult::new(text, None, raw))
}

/// Token-classification spans: `[ { "entity_group", "word", "score", ... } ]`.
///
/// Collapsed into a readable `"word (GROUP)"` list; the spans survive in `raw`.
fn parse_entities(raw: Value) -> Result<NormalizedResult> {
    let spans = raw.as_array().ok_or_else(|| bad("expected NER span array"))?;
    let mut parts = Vec::with_capacity(spans.len());
    let mut score_sum = 0.0;
    for span in spans {
        let word = span["word"]
            .as_str()
            .ok_or_else(|| bad("NER span missing word"))?;
        // older checkpoints report per-token "entity" instead of "entity_group"
        let group = span["entity_group"]
            .as_str()
            .or_else(|| span["entity"].as_str())
            .ok_or_else(|| bad("NER span missing entity group"))?;
        score_sum += span["score"].as_f64().unwrap_or(0.0);
        parts.push(format!("{word} ({group})"));
    }
    if parts.is_empty() {
        return Ok(NormalizedResult::new("no entities found", None, raw));
    }
    let confidence = score_sum / parts.len() as f64;
    Ok(NormalizedResult::new(parts.join(", "), Some(confidence), raw))
}

/// Sentence-similarity answers one score per comparison sentence.
fn parse_similarity(raw: Value) -> Result<NormalizedResult> {
    let score = raw[0]
        .as_f64()
        .ok_or_else(|| bad("similarity response missing score"))?;
    Ok(NormalizedResult::new(format!("{score:.4}"), Some(score), raw))
}

/// Feature extraction answers `[[f32; dim]]` for a single input; some
/// models answer the flat `[f32; dim]`.
fn parse_embedding(raw: Value) -> Result<NormalizedResult> {
    let dimensions = match raw.as_array() {
        Some(outer) if matches!(outer.first(), Some(Value::Array(_))) => {
            outer[0].as_array().map(Vec::len)
        }
        Some(outer) if !outer.is_empty() => Some(outer.len()),
        _ => None,
    }
    .ok_or_else(|| bad("embedding response is not a vector"))?;
    Ok(NormalizedResult::new(
        format!("{dimensions}-dimensional embedding"),
        None,
        raw,
    ))
}

/// `[ { "sequence", "score", "token_str" }, ... ]`, best candidate first.
fn parse_fill_mask(raw: Value) -> Result<NormalizedResult> {
    let sequence = raw[0]["sequence"]
        .as_str()
        .ok_or_else(|| bad("fill-mask response missing sequence"))?
        .to_string();
    let score = raw[0]["score"].as_f64();
    Ok(NormalizedResult::new(sequence, score, raw))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(prompt: &'a str, labels: &'a [String]) -> RequestInput<'a> {
        RequestInput {
            prompt,
            context: None,
            history: &[],
            labels,
        }
    }

    #[test]
    fn zero_shot_builder_includes_candidate_labels() {
        let labels = vec!["spending".to_string(), "inventory".to_string()];
        let body = build_zero_shot(&input("new blender, $40", &labels));
        assert_eq!(body["inputs"], "new blender, $40");
        assert_eq!(body["parameters"]["candidate_labels"][1], "inventory");
    }

    #[test]
    fn question_builder_nests_question_and_context() {
        let body = build_question(&RequestInput {
            prompt: "Where is the olive oil?",
            context: Some("The olive oil is in the pantry."),
            history: &[],
            labels: &[],
        });
        assert_eq!(body["inputs"]["question"], "Where is the olive oil?");
        assert_eq!(body["inputs"]["context"], "The olive oil is in the pantry.");
    }

    #[test]
    fn roberta_fill_mask_builder_swaps_mask_token() {
        let body = build_fill_mask_roberta(&input("The milk goes in the [MASK].", &[]));
        assert_eq!(body["inputs"], "The milk goes in the <mask>.");
    }

    #[test]
    fn zero_shot_parser_takes_top_label() {
        let raw = serde_json::json!({
            "sequence": "new blender, $40",
            "labels": ["spending", "inventory", "general"],
            "scores": [0.81, 0.12, 0.07],
        });
        let result = parse_zero_shot(raw).unwrap();
        assert_eq!(result.text, "spending");
        assert!((result.confidence.unwrap() - 0.81).abs() < 1e-9);
    }

    #[test]
    fn sentiment_parser_handles_both_nestings() {
        let nested = serde_json::json!([[
            { "label": "POSITIVE", "score": 0.98 },
            { "label": "NEGATIVE", "score": 0.02 },
        ]]);
        let flat = serde_json::json!([
            { "label": "NEGATIVE", "score": 0.91 },
            { "label": "POSITIVE", "score": 0.09 },
        ]);
        assert_eq!(parse_sentiment_labels(nested).unwrap().text, "positive");
        assert_eq!(parse_sentiment_labels(flat).unwrap().text, "negative");
    }

    #[test]
    fn star_sentiment_maps_onto_polarity() {
        let raw = serde_json::json!([[
            { "label": "4 stars", "score": 0.55 },
            { "label": "5 stars", "score": 0.25 },
            { "label": "1 star", "score": 0.05 },
        ]]);
        let result = parse_sentiment_stars(raw).unwrap();
        assert_eq!(result.text, "positive");

        let raw = serde_json::json!([[{ "label": "2 stars", "score": 0.7 }]]);
        assert_eq!(parse_sentiment_stars(raw).unwrap().text, "negative");
    }

    #[test]
    fn answer_parser_keeps_span_score() {
        let raw = serde_json::json!({
            "answer": "in the pantry",
            "score": 0.93,
            "start": 17,
            "end": 30,
        });
        let result = parse_answer(raw).unwrap();
        assert_eq!(result.text, "in the pantry");
        assert!((result.confidence.unwrap() - 0.93).abs() < 1e-9);
    }

    #[test]
    fn entity_parser_joins_spans() {
        let raw = serde_json::json!([
            { "entity_group": "PER", "word": "Alice", "score": 0.99 },
            { "entity_group": "LOC", "word": "Lisbon", "score": 0.97 },
        ]);
        let result = parse_entities(raw).unwrap();
        assert_eq!(result.text, "Alice (PER), Lisbon (LOC)");
        assert!((result.confidence.unwrap() - 0.98).abs() < 1e-6);
    }

    #[test]
    fn entity_parser_tolerates_empty_span_list() {
        let result = parse_entities(serde_json::json!([])).unwrap();
        assert_eq!(result.text, "no entities found");
        assert!(result.confidence.is_none());
    }

    #[test]
    fn embedding_parser_accepts_both_nestings() {
        let nested = serde_json::json!([[0.1, 0.2, 0.3]]);
        let flat = serde_json::json!([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(
            parse_embedding(nested).unwrap().text,
            "3-dimensional embedding"
        );
        assert_eq!(
            parse_embedding(flat).unwrap().text,
            "4-dimensional embedding"
        );
    }

    #[test]
    fn parsers_report_shape_mismatch_as_bad_response() {
        let err = parse_zero_shot(serde_json::json!({ "error": "oom" })).unwrap_err();
        assert!(matches!(err, HuginnError::BadResponse(_)));

        let err = parse_translation(serde_json::json!({})).unwrap_err();
        assert!(matches!(err, HuginnError::BadResponse(_)));
    }

    #[test]
    fn fill_mask_parser_takes_best_candidate() {
        let raw = serde_json::json!([
            { "sequence": "the milk goes in the fridge.", "score": 0.62, "token_str": "fridge" },
            { "sequence": "the milk goes in the pantry.", "score": 0.11, "token_str": "pantry" },
        ]);
        let result = parse_fill_mask(raw).unwrap();
        assert_eq!(result.text, "the milk goes in the fridge.");
    }
}
