// Event detail resource (`event://{id}`)

use crate::protocol::{ReadResourceResult, ResourceContents, ResourceTemplateSchema};
use crate::resources::{Resource, UriTemplate};
use anyhow::{Context, Result};
use mascarin_client::MascarinClient;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

pub const EVENT_URI_TEMPLATE: &str = "event://{id}";

/// Resolves `event://{id}` to the upstream event document
pub struct EventDetailResource {
    client: MascarinClient,
    template: UriTemplate,
}

impl EventDetailResource {
    pub fn new(client: MascarinClient) -> Result<Self> {
        let template = UriTemplate::parse(EVENT_URI_TEMPLATE)?;
        Ok(Self { client, template })
    }
}

#[async_trait::async_trait]
impl Resource for EventDetailResource {
    fn schema(&self) -> ResourceTemplateSchema {
        ResourceTemplateSchema {
            uri_template: self.template.to_string(),
            name: "event_detail".to_string(),
            title: Some("Event Detail".to_string()),
            description: Some("Detailed information about a specific Mascarin event".to_string()),
            mime_type: None,
        }
    }

    fn template(&self) -> &UriTemplate {
        &self.template
    }

    async fn read(&self, uri: &str, variables: &HashMap<String, String>) -> Result<ReadResourceResult> {
        let raw_id = variables
            .get("id")
            .with_context(|| format!("No event id in {}", uri))?;
        // Ids arrive percent-encoded inside the URI.
        let id = percent_decode_str(raw_id).decode_utf8_lossy();

        let response = self
            .client
            .events()
            .get(&id)
            .await
            .with_context(|| format!("Failed to fetch event {}", id))?;

        let payload = response.payload;
        let text = format!(
            "Event: {}\nLocation: {}\n\n{}",
            payload.title().as_deref().unwrap_or("unknown"),
            payload.location_city().as_deref().unwrap_or("unknown"),
            payload.to_pretty_json()
        );

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: None,
                text,
            }],
            structured_content: Some(payload.into_value()),
        })
    }
}
