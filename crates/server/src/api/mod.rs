use crate::config::ServerConfig;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use mascarin_mcp::McpServer;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

mod mcp;

/// Start the MCP HTTP server
pub async fn serve(config: ServerConfig) -> Result<()> {
    let client = config.build_client()?;
    let server = Arc::new(McpServer::mascarin(config.server_name.as_str(), &client)?);
    tracing::info!(
        "Registered {} tools and {} resource templates",
        server.tools().len(),
        server.resources().len()
    );

    let app = create_router(server);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Mascarin MCP Server running on http://localhost:{}/", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Create the HTTP router
pub fn create_router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/", post(mcp::handle_mcp))
        .route("/health", get(health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
        .with_state(server)
}

/// Health check endpoint
async fn health_check(State(server): State<Arc<McpServer>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": server.info().name,
        "version": server.info().version,
    }))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
