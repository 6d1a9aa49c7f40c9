//! Per-request protocol sessions.
//!
//! A session owns its own id and JSON-RPC id space. It lives for exactly one
//! inbound HTTP request and logs its closure when dropped, whichever way the
//! request ended.

use crate::protocol::{
    methods, negotiate_protocol_version, CallToolParams, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListResourceTemplatesResult, ListToolsResult,
    ReadResourceParams, ResourcesCapability, ServerCapabilities, ToolsCapability, JSONRPC_VERSION,
};
use crate::server::McpServer;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument, Span};
use uuid::Uuid;

/// What a session sends back for one inbound message.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Single(JsonRpcResponse),
    Batch(Vec<JsonRpcResponse>),
}

pub struct Session {
    id: Uuid,
    server: Arc<McpServer>,
    span: Span,
}

impl Session {
    pub(crate) fn new(server: Arc<McpServer>) -> Self {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("session", id = %id);
        debug!(parent: &span, "Session opened");
        Self { id, server, span }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Handle a decoded request body: a single message or a batch.
    ///
    /// Returns `None` when nothing needs answering (notifications only).
    pub async fn handle_message(&self, message: Value) -> Option<Reply> {
        async move {
            match message {
                Value::Array(items) if items.is_empty() => Some(Reply::Single(
                    JsonRpcResponse::error(Value::Null, JsonRpcError::invalid_request()),
                )),
                Value::Array(items) => {
                    let mut responses = Vec::with_capacity(items.len());
                    for item in items {
                        if let Some(response) = self.handle_value(item).await {
                            responses.push(response);
                        }
                    }
                    (!responses.is_empty()).then_some(Reply::Batch(responses))
                }
                single => self.handle_value(single).await.map(Reply::Single),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    async fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                debug!(error = %e, "Malformed JSON-RPC message");
                Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::invalid_request(),
                ))
            }
        }
    }

    /// Handle one JSON-RPC request. Notifications get no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(Value::Null),
                JsonRpcError::invalid_request(),
            ));
        }

        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification received");
            return None;
        };

        match self.dispatch(&request.method, request.params).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(error) => {
                debug!(method = %request.method, code = error.code, "Request failed");
                Some(JsonRpcResponse::error(id, error))
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        match method {
            methods::INITIALIZE => self.initialize(params),
            methods::PING => Ok(serde_json::json!({})),
            methods::TOOLS_LIST => to_result(&ListToolsResult {
                tools: self.server.tools().list_schemas(),
            }),
            methods::TOOLS_CALL => self.call_tool(params).await,
            // Templates are not enumerable, so there are no concrete resources to list.
            methods::RESOURCES_LIST => Ok(serde_json::json!({ "resources": [] })),
            methods::RESOURCES_TEMPLATES_LIST => to_result(&ListResourceTemplatesResult {
                resource_templates: self.server.resources().list_templates(),
            }),
            methods::RESOURCES_READ => self.read_resource(params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: InitializeParams = parse_params(params)?;
        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "Client initializing");
        }

        to_result(&InitializeResult {
            protocol_version: negotiate_protocol_version(&params.protocol_version).to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: true }),
                resources: Some(ResourcesCapability { list_changed: true }),
            },
            server_info: self.server.info().clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = parse_params(params)?;
        let tool = self
            .server
            .tools()
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Tool {} not found", params.name)))?;

        info!(tool = %params.name, "Calling tool");
        let result = tool
            .execute(params.arguments.unwrap_or(Value::Null))
            .await
            .map_err(|e| JsonRpcError::invalid_params(format!("{:#}", e)))?;

        if result.is_error() {
            warn!(tool = %params.name, "Tool returned an error result");
        }
        to_result(&result)
    }

    async fn read_resource(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ReadResourceParams = parse_params(params)?;
        let (resource, variables) = self
            .server
            .resources()
            .resolve(&params.uri)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Resource {} not found", params.uri)))?;

        info!(uri = %params.uri, "Reading resource");
        let result = resource.read(&params.uri, &variables).await.map_err(|e| {
            let message = format!("{:#}", e);
            warn!(uri = %params.uri, error = %message, "Resource read failed");
            JsonRpcError::internal_error(message)
        })?;

        to_result(&result)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(parent: &self.span, "Session closed");
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.unwrap_or_else(|| serde_json::json!({})))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
