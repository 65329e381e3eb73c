use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use faqdesk_core::{from_address, EntryResolver, FaqIndex, OllamaGenerator};
use tracing::{error, info};

use crate::config::Config;
use crate::http::{create_router, AppState};

/// Builds the store, loads the index once, and serves requests until
/// ctrl-c. The index is never touched again after this function hands it
/// to the router state.
pub async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting faqdesk v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP: {}", config.http_addr);
    info!("Store: {}", config.store);
    info!("Model: {} at {}", config.model, config.ollama_url);

    let store = from_address(&config.store).context("opening content store")?;

    let index_key = config.effective_index_key();
    let index = Arc::new(
        FaqIndex::load(store.as_ref(), &index_key, &config.faq_prefix)
            .await
            .with_context(|| format!("loading index from {index_key}"))?,
    );

    let resolver = Arc::new(EntryResolver::new(index.clone(), store));
    let generator = Arc::new(
        OllamaGenerator::with_timeout(
            &config.ollama_url,
            &config.model,
            config.generate_timeout(),
        )
        .context("building generator client")?,
    );

    let state = AppState {
        index,
        resolver,
        generator,
        start_time: Instant::now(),
    };
    let app = create_router(state, &config.allowed_origin);

    let listener = tokio::net::TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("binding {}", config.http_addr))?;
    info!("Listening on {}", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        error!("failed to install ctrl-c handler");
    }
}
