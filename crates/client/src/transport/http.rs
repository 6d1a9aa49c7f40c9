//! HTTP transport layer for the Mascarin client.

use crate::config::{ClientConfig, StatusPolicy};
use crate::error::{MascarinError, MascarinResult};
use crate::payload::{Payload, UpstreamResponse};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> MascarinResult<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(MascarinError::Config(format!(
                "base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, config })
    }

    /// Build a URL from path segments and ordered query pairs.
    ///
    /// Segments are appended to the base URL's own path and percent-encoded
    /// individually. Query pairs keep their insertion order.
    pub(crate) fn build_url(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> MascarinResult<Url> {
        let mut url = self.config.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| MascarinError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Execute a GET request and parse the body as JSON.
    ///
    /// Under [`StatusPolicy::Lenient`] the body is parsed whatever the status.
    pub async fn get_json(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> MascarinResult<UpstreamResponse> {
        let url = self.build_url(segments, query)?;
        debug!(url = %url, "GET request");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned non-success status");
            if self.config.status_policy == StatusPolicy::Strict {
                let body = response.text().await?;
                return Err(MascarinError::from_response(status.as_u16(), &body));
            }
        }

        let body = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;

        Ok(UpstreamResponse {
            url,
            status: status.as_u16(),
            payload: Payload::new(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(base_url: &str, status_policy: StatusPolicy) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            base_url: Url::parse(base_url).unwrap(),
            timeout: Duration::from_secs(5),
            status_policy,
            user_agent: "mascarin-test".to_string(),
        })
    }

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(create_config(base_url, StatusPolicy::Lenient)).unwrap()
    }

    #[tokio::test]
    async fn test_get_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/test"))
            .and(header("user-agent", "mascarin-test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 42})),
            )
            .mount(&server)
            .await;

        let result = transport(&server.uri())
            .get_json(&["api", "test"], &[])
            .await
            .unwrap();

        assert_eq!(result.status, 200);
        assert_eq!(result.payload.as_value()["value"], 42);
        assert_eq!(result.url.path(), "/api/test");
        assert!(result.url.query().is_none());
    }

    #[tokio::test]
    async fn test_lenient_forwards_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "Not found"})),
            )
            .mount(&server)
            .await;

        let result = transport(&server.uri())
            .get_json(&["api", "missing"], &[])
            .await
            .unwrap();

        assert_eq!(result.status, 404);
        assert_eq!(result.payload.as_value()["error"], "Not found");
    }

    #[tokio::test]
    async fn test_strict_rejects_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "Not found"})),
            )
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(create_config(&server.uri(), StatusPolicy::Strict)).unwrap();
        let result = transport.get_json(&["api", "missing"], &[]).await;

        match result {
            Err(MascarinError::Api { status, message, .. }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_strict_keeps_plain_text_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/down"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(create_config(&server.uri(), StatusPolicy::Strict)).unwrap();
        let result = transport.get_json(&["api", "down"], &[]).await;

        match result {
            Err(MascarinError::Api { status, message, .. }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let result = transport(&server.uri()).get_json(&["api", "html"], &[]).await;
        assert!(matches!(result, Err(MascarinError::Json(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        // Nothing listens on port 9 of the loopback interface.
        let result = transport("http://127.0.0.1:9")
            .get_json(&["api", "test"], &[])
            .await;
        assert!(matches!(result, Err(MascarinError::Http(_))));
    }

    #[test]
    fn test_build_url() {
        let url = transport("http://localhost:3333")
            .build_url(&["api", "events", "agenda"], &[])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/events/agenda");
    }

    #[test]
    fn test_build_url_with_trailing_slash() {
        let url = transport("http://localhost:3333/")
            .build_url(&["api", "explore"], &[])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/explore");
    }

    #[test]
    fn test_build_url_keeps_path_prefix() {
        let url = transport("https://example.com/mascarin/")
            .build_url(&["api", "explore"], &[])
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/mascarin/api/explore");
    }

    #[test]
    fn test_build_url_query_in_insertion_order() {
        let url = transport("http://localhost:3333")
            .build_url(
                &["api", "explore"],
                &[("type", "activity".to_string()), ("limit", "10".to_string())],
            )
            .unwrap();
        assert_eq!(url.query(), Some("type=activity&limit=10"));
    }

    #[test]
    fn test_build_url_encodes_segments() {
        let url = transport("http://localhost:3333")
            .build_url(&["api", "events", "a/b c"], &[])
            .unwrap();
        assert_eq!(url.path(), "/api/events/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_non_base_url() {
        let config = create_config("mailto:someone@example.com", StatusPolicy::Lenient);
        assert!(matches!(
            HttpTransport::new(config),
            Err(MascarinError::Config(_))
        ));
    }
}
