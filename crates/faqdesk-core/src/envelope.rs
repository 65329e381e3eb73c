use serde::{Deserialize, Serialize};

use crate::types::{Citation, ResolvedEntry, Suggestion};

/// Attached to every response without exception.
pub const DISCLAIMER: &str = "Educational information only — not financial advice.";

/// Provenance of an answer.
///
/// `Corpus` is reserved for text that came out of a resolved content
/// document. Everything else, including successful free-text generation,
/// is `Fallback`. Deserialization maps any unrecognized label to
/// `Fallback` as well, so the label can only over-claim in one direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Corpus,
    #[serde(other)]
    Fallback,
}

/// The single response shape, used on every path regardless of outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub source: AnswerSource,
    pub answer: String,
    pub citations: Vec<Citation>,
    pub suggestions: Vec<Suggestion>,
    pub disclaimer: String,
}

impl Envelope {
    /// Builds an envelope with the fixed disclaimer attached.
    pub fn new(
        source: AnswerSource,
        answer: impl Into<String>,
        citations: Vec<Citation>,
        suggestions: Vec<Suggestion>,
    ) -> Self {
        Self {
            source,
            answer: answer.into(),
            citations,
            suggestions,
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Corpus-sourced envelope from a resolved entry: one citation, the
    /// entry's deduplicated suggestions.
    pub fn corpus(resolved: ResolvedEntry) -> Self {
        Self::new(
            AnswerSource::Corpus,
            resolved.answer,
            vec![resolved.citation],
            resolved.suggestions,
        )
    }

    /// Fallback envelope with empty citations and suggestions. Used for
    /// generated answers, misses, and every failure path.
    pub fn fallback(answer: impl Into<String>) -> Self {
        Self::new(AnswerSource::Fallback, answer, Vec::new(), Vec::new())
    }
}
