//! Events API endpoints.

use super::{default_limit, non_empty, query_number};
use crate::client::MascarinClient;
use crate::error::MascarinResult;
use crate::payload::UpstreamResponse;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Filters for the event agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaQuery {
    /// Forwarded as given; the upstream API judges the value.
    #[serde(default = "default_limit")]
    pub limit: Number,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Default for AgendaQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            start_date: None,
            end_date: None,
        }
    }
}

impl AgendaQuery {
    /// Query pairs in upstream order. Dates are forwarded verbatim.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(start) = non_empty(&self.start_date) {
            pairs.push(("startDate", start.to_string()));
        }
        if let Some(end) = non_empty(&self.end_date) {
            pairs.push(("endDate", end.to_string()));
        }
        pairs.push(("limit", query_number(&self.limit)));
        pairs
    }
}

/// Events API.
pub struct EventsApi<'a> {
    client: &'a MascarinClient,
}

impl<'a> EventsApi<'a> {
    pub(crate) fn new(client: &'a MascarinClient) -> Self {
        Self { client }
    }

    /// Fetch the event agenda.
    pub async fn agenda(&self, query: &AgendaQuery) -> MascarinResult<UpstreamResponse> {
        self.client
            .http
            .get_json(&["api", "events", "agenda"], &query.query_pairs())
            .await
    }

    /// Fetch a single event by id.
    pub async fn get(&self, id: &str) -> MascarinResult<UpstreamResponse> {
        self.client.http.get_json(&["api", "events", id], &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> MascarinClient {
        MascarinClient::builder().base_url(base_url).build().unwrap()
    }

    #[test]
    fn test_agenda_query_defaults() {
        let query: AgendaQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query, AgendaQuery::default());
        assert_eq!(query.query_pairs(), vec![("limit", "10".to_string())]);
    }

    #[test]
    fn test_agenda_query_only_supplied_dates() {
        let query: AgendaQuery =
            serde_json::from_value(json!({"limit": 5, "startDate": "2025-01-01"})).unwrap();
        assert_eq!(
            query.query_pairs(),
            vec![
                ("startDate", "2025-01-01".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_agenda_query_empty_dates_are_absent() {
        let query = AgendaQuery {
            start_date: Some(String::new()),
            end_date: Some("2025-02-01".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("endDate", "2025-02-01".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_agenda_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events/agenda"))
            .and(query_param("startDate", "2025-01-01"))
            .and(query_param("endDate", "not-a-date"))
            .and(query_param("limit", "3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"meta": {"total": 3}, "data": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let query = AgendaQuery {
            limit: Number::from(3),
            start_date: Some("2025-01-01".to_string()),
            end_date: Some("not-a-date".to_string()),
        };
        let response = client(&server.uri()).events().agenda(&query).await.unwrap();

        assert_eq!(response.payload.meta_total().as_deref(), Some("3"));
        assert_eq!(
            response.url.query(),
            Some("startDate=2025-01-01&endDate=not-a-date&limit=3")
        );
    }

    #[tokio::test]
    async fn test_agenda_without_dates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events/agenda"))
            .and(query_param("limit", "10"))
            .and(query_param_is_missing("startDate"))
            .and(query_param_is_missing("endDate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server.uri())
            .events()
            .agenda(&AgendaQuery::default())
            .await
            .unwrap();
        assert!(response.payload.meta_total().is_none());
    }

    #[tokio::test]
    async fn test_get_event() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Sunset Hike",
                "location": {"city": "Saint-Denis"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server.uri()).events().get("42").await.unwrap();
        assert_eq!(response.payload.title().as_deref(), Some("Sunset Hike"));
        assert_eq!(response.payload.location_city().as_deref(), Some("Saint-Denis"));
    }
}
