use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mascarin_mcp::protocol::{JsonRpcError, JsonRpcResponse};
use mascarin_mcp::McpServer;
use serde_json::Value;
use std::sync::Arc;

/// MCP Streamable HTTP endpoint, stateless with JSON responses.
///
/// Every request gets its own session. Dispatch runs in a spawned task, so a
/// client hanging up does not cancel an upstream call already in flight; the
/// session is dropped when that task finishes.
pub async fn handle_mcp(State(server): State<Arc<McpServer>>, body: Bytes) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(error = %e, "Unparsable request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error())),
            )
                .into_response();
        }
    };

    let session = server.open_session();
    let dispatch = tokio::spawn(async move { session.handle_message(message).await });

    match dispatch.await {
        Ok(Some(reply)) => (StatusCode::OK, Json(reply)).into_response(),
        Ok(None) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Session task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::internal_error("Internal server error"),
                )),
            )
                .into_response()
        }
    }
}
