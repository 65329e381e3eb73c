use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use faqdesk_core::DEFAULT_OLLAMA_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "faqdesk")]
#[command(about = "Index-backed FAQ answer service with a generative fallback")]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "FAQDESK_HTTP_ADDR", default_value = "0.0.0.0:8080")]
    pub http_addr: SocketAddr,

    /// Content store address: a directory path or an http(s) base URL
    #[arg(long, env = "FAQDESK_STORE")]
    pub store: String,

    /// Key prefix for document keys derived from entry ids
    #[arg(long, env = "FAQDESK_FAQ_PREFIX", default_value = "faq/")]
    pub faq_prefix: String,

    /// Index document key. Defaults to "{faq_prefix}index.json"
    #[arg(long, env = "FAQDESK_INDEX_KEY")]
    pub index_key: Option<String>,

    /// Base URL of the Ollama endpoint used for free-text prompts
    #[arg(long, env = "FAQDESK_OLLAMA_URL", default_value = DEFAULT_OLLAMA_URL)]
    pub ollama_url: String,

    /// Model identifier for the generative fallback
    #[arg(long, env = "FAQDESK_MODEL", default_value = "llama3.2:3b")]
    pub model: String,

    /// Generation timeout in seconds
    #[arg(long, env = "FAQDESK_GENERATE_TIMEOUT_SECS", default_value = "60")]
    pub generate_timeout_secs: u64,

    /// CORS allowed origin
    #[arg(long, env = "FAQDESK_ALLOWED_ORIGIN", default_value = "*")]
    pub allowed_origin: String,
}

impl Config {
    /// The index document key, derived from the prefix unless overridden.
    pub fn effective_index_key(&self) -> String {
        self.index_key
            .clone()
            .unwrap_or_else(|| format!("{}index.json", self.faq_prefix))
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.store.trim().is_empty() {
            anyhow::bail!("store address must not be empty");
        }
        if self.generate_timeout_secs == 0 {
            anyhow::bail!("generation timeout must be at least 1 second");
        }
        if self.allowed_origin != "*"
            && self
                .allowed_origin
                .parse::<axum::http::HeaderValue>()
                .is_err()
        {
            anyhow::bail!(
                "allowed origin is not a valid header value: {}",
                self.allowed_origin
            );
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".parse().unwrap(),
            store: String::new(),
            faq_prefix: "faq/".to_string(),
            index_key: None,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: "llama3.2:3b".to_string(),
            generate_timeout_secs: 60,
            allowed_origin: "*".to_string(),
        }
    }
}
