pub mod events;
mod registry;
mod template;

pub use events::EventDetailResource;
pub use registry::{Resource, ResourceRegistry};
pub use template::{UriTemplate, UriTemplateError};

use anyhow::Result;
use mascarin_client::MascarinClient;
use std::sync::Arc;

/// Register every Mascarin resource template against the given upstream client.
pub fn register_all(registry: &mut ResourceRegistry, client: &MascarinClient) -> Result<()> {
    registry.register(Arc::new(EventDetailResource::new(client.clone())?));
    Ok(())
}
