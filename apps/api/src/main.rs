mod config;
mod drafting;
mod errors;
mod llm_client;
mod page;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionBackend, LlmClient};
use crate::routes::build_app;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (a missing API key only locks the page)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Formulierer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client, if a credential is available
    let backend = match &config.openai_api_key {
        Some(api_key) => {
            let llm = LlmClient::new(api_key.clone(), &config.openai_base_url)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(llm) as Arc<dyn CompletionBackend>)
        }
        None => {
            warn!(
                "No OPENAI_API_KEY in environment or {}; serving locked page",
                config.secrets_path.display()
            );
            None
        }
    };

    // Build app state
    let state = AppState {
        backend,
        config: config.clone(),
    };

    // Build router
    let app = build_app(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
