// MCP (Model Context Protocol) server for the Mascarin API.
// Exposes the event agenda and listing exploration as tools, and single
// events as `event://{id}` resources, to agent clients.

pub mod protocol;
pub mod resources;
pub mod server;
pub mod session;
pub mod tools;

pub use server::McpServer;
pub use session::{Reply, Session};
