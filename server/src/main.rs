mod config;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use llm::LlmChat;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server config");

    // Initialize LLM client (non-fatal: proxy answers 500 until configured).
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; proxy requests will fail");
            None
        }
    };

    let state = state::AppState::new(llm);
    let app = match &config.static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "serving static front-end");
            routes::app_with_static(state, dir)
        }
        None => routes::app(state),
    };

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "teaicher proxy listening");
    axum::serve(listener, app).await.expect("server failed");
}
