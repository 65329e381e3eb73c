use serde::Serialize;
use serde_json::{Map, Value};

use crate::generate::{GenerationParams, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// One inbound ask request, after lenient body parsing.
///
/// Construction never fails: see [`AskRequest::parse`]. The same struct
/// serializes as a request body for client use; absent fields are omitted.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Which path a request routes to. Identifier lookup takes strict
/// precedence: when both fields are present the prompt is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind<'a> {
    Lookup(&'a str),
    Prompt(&'a str),
    Empty,
}

impl AskRequest {
    /// Parses a raw request body, leniently.
    ///
    /// A JSON object yields its recognized fields (wrong-typed values are
    /// treated as absent). Valid JSON of any other shape yields an empty
    /// request. A body that is not JSON at all is taken whole as the
    /// free-text prompt.
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Self::from_fields(&fields),
            Ok(_) => Self::default(),
            Err(_) => {
                let raw = String::from_utf8_lossy(body);
                let text = raw.trim();
                if text.is_empty() {
                    Self::default()
                } else {
                    Self {
                        prompt: Some(text.to_string()),
                        ..Self::default()
                    }
                }
            }
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            faq_id: string_field(fields, "faq_id"),
            prompt: string_field(fields, "prompt"),
            temperature: fields
                .get("temperature")
                .and_then(Value::as_f64)
                .map(|t| t as f32),
            max_tokens: fields
                .get("max_tokens")
                .and_then(Value::as_u64)
                .and_then(|m| u32::try_from(m).ok()),
        }
    }

    /// Routes the request: a non-blank `faq_id` wins, then a non-blank
    /// `prompt`, else `Empty`.
    pub fn kind(&self) -> RequestKind<'_> {
        if let Some(id) = nonblank(&self.faq_id) {
            return RequestKind::Lookup(id);
        }
        if let Some(text) = nonblank(&self.prompt) {
            return RequestKind::Prompt(text);
        }
        RequestKind::Empty
    }

    /// Sampling parameters with defaults applied for absent fields.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn nonblank(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
