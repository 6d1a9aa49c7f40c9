pub mod events;
pub mod explore;
mod registry;

pub use events::EventsAgendaTool;
pub use explore::ExploreListingsTool;
pub use registry::{
    json_schema_any, json_schema_number, json_schema_number_with_default, json_schema_object,
    json_schema_string, Tool, ToolRegistry,
};

use mascarin_client::{MascarinClient, UpstreamResponse};
use std::sync::Arc;

/// Register every Mascarin tool against the given upstream client.
pub fn register_all(registry: &mut ToolRegistry, client: &MascarinClient) {
    registry.register(Arc::new(EventsAgendaTool::new(client.clone())));
    registry.register(Arc::new(ExploreListingsTool::new(client.clone())));
}

/// Arguments may be omitted entirely; treat that as an empty object.
pub(crate) fn arguments_or_empty(arguments: serde_json::Value) -> serde_json::Value {
    if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    }
}

/// `Fetched <total> <noun> from <url>` followed by the pretty-printed payload.
pub(crate) fn fetched_summary(noun: &str, response: &UpstreamResponse) -> String {
    format!(
        "Fetched {} {} from {}\n\n{}",
        response.payload.meta_total().as_deref().unwrap_or("?"),
        noun,
        response.url,
        response.payload.to_pretty_json()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mascarin_client::Payload;

    fn response(body: serde_json::Value) -> UpstreamResponse {
        UpstreamResponse {
            url: "http://localhost:3333/api/explore?limit=10".parse().unwrap(),
            status: 200,
            payload: Payload::new(body),
        }
    }

    #[test]
    fn test_summary_with_total() {
        let summary = fetched_summary("listings", &response(serde_json::json!({"meta": {"total": 7}})));
        assert!(summary.starts_with(
            "Fetched 7 listings from http://localhost:3333/api/explore?limit=10\n\n{"
        ));
    }

    #[test]
    fn test_summary_without_total_uses_placeholder() {
        let summary = fetched_summary("events", &response(serde_json::json!([])));
        assert_eq!(
            summary,
            "Fetched ? events from http://localhost:3333/api/explore?limit=10\n\n[]"
        );
    }

    #[test]
    fn test_register_all() {
        let client = MascarinClient::builder().build().unwrap();
        let mut registry = ToolRegistry::new();
        register_all(&mut registry, &client);

        let names: Vec<_> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["get_events_agenda", "explore_listings"]);
    }
}
