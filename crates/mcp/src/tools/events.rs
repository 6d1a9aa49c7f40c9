// Agenda tool backed by the Mascarin events API

use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{
    arguments_or_empty, fetched_summary, json_schema_any, json_schema_number_with_default,
    json_schema_object, json_schema_string, Tool,
};
use anyhow::{Context, Result};
use mascarin_client::{AgendaQuery, MascarinClient, DEFAULT_LIMIT};
use tracing::warn;

/// Tool to fetch upcoming events
pub struct EventsAgendaTool {
    client: MascarinClient,
}

impl EventsAgendaTool {
    pub fn new(client: MascarinClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for EventsAgendaTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_events_agenda".to_string(),
            title: Some("Get events for the agenda".to_string()),
            description: "Fetch upcoming events from the Mascarin API".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "limit": json_schema_number_with_default("Maximum number of events to fetch", DEFAULT_LIMIT),
                    "startDate": json_schema_string("Start date filter in ISO 8601 format (YYYY-MM-DD)"),
                    "endDate": json_schema_string("End date filter in ISO 8601 format (YYYY-MM-DD)")
                }),
                vec![],
            ),
            output_schema: Some(json_schema_object(
                serde_json::json!({ "events": json_schema_any() }),
                vec![],
            )),
            annotations: Some(ToolAnnotations::read_only()),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let query: AgendaQuery = serde_json::from_value(arguments_or_empty(arguments))
            .context("Invalid arguments for get_events_agenda")?;

        match self.client.events().agenda(&query).await {
            Ok(response) => {
                let text = fetched_summary("events", &response);
                Ok(CallToolResult::structured(
                    text,
                    serde_json::json!({ "events": response.payload }),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Agenda request failed");
                Ok(CallToolResult::error(format!("Failed to fetch events: {}", e)))
            }
        }
    }
}
