mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::Analyzer;
use crate::config::Config;
use crate::llm_client::{CompletionClient, LlmClient, LlmConfig};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Critic API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; without a key the service runs but refuses analyses
    let completion: Option<Arc<dyn CompletionClient>> = match LlmConfig::from_app_config(&config) {
        Some(llm_config) => {
            info!(
                "LLM client initialized (model: {}, base_url: {}, max_retries: {})",
                llm_client::MODEL,
                llm_config.base_url,
                llm_config.max_retries
            );
            Some(Arc::new(LlmClient::new(llm_config)?) as Arc<dyn CompletionClient>)
        }
        None => {
            warn!("GROQ_API_KEY is not set; analysis requests will be rejected");
            None
        }
    };

    let state = AppState {
        analyzer: Analyzer::new(completion),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
