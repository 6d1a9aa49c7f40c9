// MCP resource template definitions and registry

use crate::protocol::{ReadResourceResult, ResourceTemplateSchema};
use crate::resources::UriTemplate;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// A family of resources addressed through one URI template
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Get the template metadata for MCP
    fn schema(&self) -> ResourceTemplateSchema;

    fn template(&self) -> &UriTemplate;

    /// Read the resource at `uri`, whose template variables are `variables`
    async fn read(&self, uri: &str, variables: &HashMap<String, String>) -> Result<ReadResourceResult>;
}

/// Registry of resource templates, matched in registration order
#[derive(Default)]
pub struct ResourceRegistry {
    resources: Vec<Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resource: Arc<dyn Resource>) {
        self.resources.push(resource);
    }

    /// Find the first template matching `uri`
    pub fn resolve(&self, uri: &str) -> Option<(Arc<dyn Resource>, HashMap<String, String>)> {
        self.resources.iter().find_map(|resource| {
            resource
                .template()
                .match_uri(uri)
                .map(|vars| (resource.clone(), vars))
        })
    }

    pub fn list_templates(&self) -> Vec<ResourceTemplateSchema> {
        self.resources.iter().map(|r| r.schema()).collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
