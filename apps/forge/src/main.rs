mod config;
mod errors;
mod forge;
mod llm_client;
mod routes;
mod session;
mod state;
mod ui;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiCapability;
use crate::routes::build_router;
use crate::session::{spawn_sweeper, SessionStore};
use crate::state::AppState;

/// How often idle sessions are swept out of memory.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bullet Forge v{}", env!("CARGO_PKG_VERSION"));

    // Keys arrive per session through the form; only the endpoint is configured here.
    let capability = Arc::new(OpenAiCapability::new(
        config.openai_base_url.clone(),
        config.llm_timeout(),
    ));
    info!("LLM capability configured (endpoint: {})", config.openai_base_url);

    let sessions = SessionStore::new(config.session_idle_ttl());
    spawn_sweeper(sessions.clone(), SESSION_SWEEP_INTERVAL);
    info!(
        "Session store ready (idle TTL: {}s)",
        config.session_idle_ttl_secs
    );

    if !config.logo_path.is_file() {
        info!(
            "Logo {} not found; footer will show a caption instead",
            config.logo_path.display()
        );
    }

    let state = AppState {
        capability,
        sessions,
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
