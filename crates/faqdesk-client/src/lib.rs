//! Rust client for the faqdesk FAQ answer service.
//!
//! Thin wrapper over `reqwest` with convenience methods for the two ask
//! paths and the health endpoint.
//!
//! # Example
//! ```rust,no_run
//! use faqdesk_client::FaqClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = FaqClient::new("http://localhost:8080");
//!
//!     let answer = client.ask_id("faq.what.is.smsf").await?;
//!     println!("{}", answer.answer);
//!     for suggestion in &answer.suggestions {
//!         println!("see also: {}", suggestion.title);
//!     }
//!
//!     let generated = client.ask("How do contribution caps work?").await?;
//!     println!("{}", generated.answer);
//!     Ok(())
//! }
//! ```
use serde::Deserialize;

/// Re-export the request and envelope types callers work with.
pub use faqdesk_core::{AnswerSource, AskRequest, Citation, Envelope, Suggestion};

/// `GET /health` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub healthy: bool,
    pub version: String,
    pub uptime_seconds: u64,
    pub entries: usize,
}

/// A client bound to one faqdesk server.
pub struct FaqClient {
    base_url: String,
    client: reqwest::Client,
}

impl FaqClient {
    /// `base_url` is the server root, e.g. `"http://localhost:8080"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Exact lookup by FAQ identifier.
    pub async fn ask_id(&self, faq_id: &str) -> anyhow::Result<Envelope> {
        self.ask_with(&AskRequest {
            faq_id: Some(faq_id.to_string()),
            ..AskRequest::default()
        })
        .await
    }

    /// Free-text prompt with default sampling parameters.
    pub async fn ask(&self, prompt: &str) -> anyhow::Result<Envelope> {
        self.ask_with(&AskRequest {
            prompt: Some(prompt.to_string()),
            ..AskRequest::default()
        })
        .await
    }

    /// Full request form, for callers that set sampling parameters.
    ///
    /// The service returns the envelope shape on every status, including
    /// 400 and 500, so the body is parsed without checking the status
    /// first.
    pub async fn ask_with(&self, request: &AskRequest) -> anyhow::Result<Envelope> {
        let response = self
            .client
            .post(format!("{}/ask", self.base_url))
            .json(request)
            .send()
            .await?;
        Ok(response.json().await?)
    }

    pub async fn health(&self) -> anyhow::Result<Health> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
