// Listing exploration tool backed by the Mascarin explore API

use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use crate::tools::{
    arguments_or_empty, fetched_summary, json_schema_any, json_schema_number,
    json_schema_number_with_default, json_schema_object, json_schema_string, Tool,
};
use anyhow::{Context, Result};
use mascarin_client::api::{LISTING_TYPES, PRICE_RANGES};
use mascarin_client::{ExploreQuery, MascarinClient, DEFAULT_LIMIT};
use tracing::warn;

/// Tool to explore activities, events, accommodation and food listings
pub struct ExploreListingsTool {
    client: MascarinClient,
}

impl ExploreListingsTool {
    pub fn new(client: MascarinClient) -> Self {
        Self { client }
    }
}

fn quoted(values: &[&str]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
        _ => quoted.join(""),
    }
}

#[async_trait::async_trait]
impl Tool for ExploreListingsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "explore_listings".to_string(),
            title: Some("Explore Listings".to_string()),
            description: "Explore listings from the Mascarin API".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "limit": json_schema_number_with_default("Maximum number of listings to fetch", DEFAULT_LIMIT),
                    "type": json_schema_string(&format!("Filter by listing type: {}", quoted(LISTING_TYPES))),
                    "priceRange": json_schema_string(&format!("Filter by price range: {}", quoted(PRICE_RANGES))),
                    "page": json_schema_number("Page number for pagination (starts at 1)")
                }),
                vec![],
            ),
            output_schema: Some(json_schema_object(
                serde_json::json!({ "listings": json_schema_any() }),
                vec![],
            )),
            annotations: Some(ToolAnnotations::read_only()),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let query: ExploreQuery = serde_json::from_value(arguments_or_empty(arguments))
            .context("Invalid arguments for explore_listings")?;

        match self.client.explore().listings(&query).await {
            Ok(response) => {
                let text = fetched_summary("listings", &response);
                Ok(CallToolResult::structured(
                    text,
                    serde_json::json!({ "listings": response.payload }),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Explore request failed");
                Ok(CallToolResult::error(format!("Failed to fetch listings: {}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(base_url: &str) -> ExploreListingsTool {
        ExploreListingsTool::new(MascarinClient::builder().base_url(base_url).build().unwrap())
    }

    #[test]
    fn test_quoted_domain() {
        assert_eq!(quoted(&["a", "b", "c"]), "'a', 'b', or 'c'");
        assert_eq!(quoted(&["a"]), "'a'");
    }

    #[test]
    fn test_schema_documents_domains() {
        let schema = tool("http://localhost:3333").schema();
        assert_eq!(schema.name, "explore_listings");
        assert_eq!(
            schema.input_schema["properties"]["priceRange"]["description"],
            "Filter by price range: 'free', 'budget', 'moderate', 'upscale', or 'luxury'"
        );
        assert!(schema.input_schema["properties"]["type"]["description"]
            .as_str()
            .unwrap()
            .contains("'foodestablishment'"));
    }

    #[tokio::test]
    async fn test_explore_type_and_price() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/explore"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"total": 2},
                "data": [{"name": "Piton des Neiges"}, {"name": "Cirque de Mafate"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server.uri())
            .execute(json!({"type": "activity", "priceRange": "budget"}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].url.query(),
            Some("type=activity&priceRange=budget&limit=10")
        );

        let text = result.content[0].as_text();
        assert!(text.contains("Fetched 2 listings"));
        assert!(text.contains("Piton des Neiges"));
        assert_eq!(
            result.structured_content.unwrap()["listings"]["data"][1]["name"],
            "Cirque de Mafate"
        );
    }

    #[tokio::test]
    async fn test_explore_forwards_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/explore"))
            .and(query_param("page", "3"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server.uri())
            .execute(json!({"page": 3, "limit": 25}))
            .await
            .unwrap();
        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn test_explore_forwards_non_integer_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/explore"))
            .and(query_param("page", "1.5"))
            .and(query_param("limit", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server.uri())
            .execute(json!({"page": 1.5, "limit": 4.0}))
            .await
            .unwrap();
        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn test_explore_unreachable_upstream() {
        let result = tool("http://127.0.0.1:9").execute(json!({})).await.unwrap();
        assert!(result.is_error());
        assert!(result.content[0].as_text().contains("Failed to fetch listings"));
    }
}
