use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{FaqdeskError, Result};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Sampling temperature applied when the request does not supply one.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Output token cap applied when the request does not supply one.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Returned to the caller when the generative collaborator fails outright.
pub const MODEL_UNAVAILABLE: &str =
    "General educational overview unavailable right now. Please try again later.";

/// Returned when generation succeeds but produces only whitespace.
pub const EMPTY_COMPLETION: &str = "No content returned by the model.";

/// Instruction preamble sent as the system message with every prompt.
const SYSTEM_PROMPT: &str = "You are an educational assistant for SMSF (Self-Managed Super Funds) topics in Australia.\n\
Answer concisely in plain English. Use bullet points where it helps. Do NOT provide financial advice.";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Nucleus sampling cap. Fixed; only temperature and length are
/// caller-controlled.
const TOP_P: f32 = 0.9;

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Opaque text-generation capability.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String>;
}

/// Calls the generator and absorbs every failure mode, so the returned
/// answer is always non-empty: failures become [`MODEL_UNAVAILABLE`],
/// blank completions become [`EMPTY_COMPLETION`], and anything else comes
/// back trimmed. Callers label this path `fallback` regardless of outcome.
pub async fn answer_prompt<G>(generator: &G, prompt: &str, params: GenerationParams) -> String
where
    G: Generator + ?Sized,
{
    match generator.generate(prompt, params).await {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                EMPTY_COMPLETION.to_string()
            } else {
                text.to_string()
            }
        }
        Err(err) => {
            warn!("generation failed: {err}");
            MODEL_UNAVAILABLE.to_string()
        }
    }
}

// ── Ollama implementation ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Text generation over the Ollama HTTP API (`/api/generate`,
/// non-streaming).
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, model, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FaqdeskError::Config(format!("generator client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        })
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            system: Some(SYSTEM_PROMPT),
            stream: false,
            options: Some(GenerateOptions {
                temperature: Some(params.temperature),
                num_predict: Some(params.max_tokens as i32),
                top_p: Some(TOP_P),
            }),
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(FaqdeskError::Generate(format!(
                "status {status}: {}",
                detail.trim()
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| FaqdeskError::Generate(format!("invalid response: {e}")))?;
        Ok(payload.response)
    }
}

fn map_transport_error(err: reqwest::Error) -> FaqdeskError {
    if err.is_timeout() {
        FaqdeskError::Generate("request timed out".to_string())
    } else if err.is_connect() {
        FaqdeskError::Generate("server not reachable".to_string())
    } else {
        FaqdeskError::Generate(err.to_string())
    }
}
