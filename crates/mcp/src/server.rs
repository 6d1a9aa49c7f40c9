// MCP server: the assembled set of tools and resources shared by all sessions

use crate::protocol::ServerInfo;
use crate::resources::{self, ResourceRegistry};
use crate::session::Session;
use crate::tools::{self, ToolRegistry};
use anyhow::Result;
use mascarin_client::MascarinClient;
use std::sync::Arc;

/// Version advertised in `serverInfo`.
pub const SERVER_VERSION: &str = "1.0.0";

/// Immutable after construction. Each inbound request opens its own
/// [`Session`] against it.
pub struct McpServer {
    info: ServerInfo,
    tools: ToolRegistry,
    resources: ResourceRegistry,
}

impl McpServer {
    pub fn new(info: ServerInfo, tools: ToolRegistry, resources: ResourceRegistry) -> Self {
        Self {
            info,
            tools,
            resources,
        }
    }

    /// Server exposing the Mascarin tools and resources.
    pub fn mascarin(name: impl Into<String>, client: &MascarinClient) -> Result<Self> {
        let mut tool_registry = ToolRegistry::new();
        tools::register_all(&mut tool_registry, client);

        let mut resource_registry = ResourceRegistry::new();
        resources::register_all(&mut resource_registry, client)?;

        let info = ServerInfo {
            name: name.into(),
            version: SERVER_VERSION.to_string(),
        };

        Ok(Self::new(info, tool_registry, resource_registry))
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Open a fresh session bound to this server.
    pub fn open_session(self: &Arc<Self>) -> Session {
        Session::new(self.clone())
    }
}
