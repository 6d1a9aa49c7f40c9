//! Main client for the Mascarin API.

use crate::api::{EventsApi, ExploreApi};
use crate::config::{default_user_agent, ClientConfig, StatusPolicy, DEFAULT_BASE_URL};
use crate::error::MascarinResult;
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for the Mascarin API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MascarinClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl MascarinClient {
    /// Create a new client builder.
    pub fn builder() -> MascarinClientBuilder {
        MascarinClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> MascarinResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the events API.
    pub fn events(&self) -> EventsApi<'_> {
        EventsApi::new(self)
    }

    /// Get the explore API.
    pub fn explore(&self) -> ExploreApi<'_> {
        ExploreApi::new(self)
    }
}

/// Builder for creating a MascarinClient.
pub struct MascarinClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    status_policy: StatusPolicy,
    user_agent: Option<String>,
}

impl MascarinClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            status_policy: StatusPolicy::default(),
            user_agent: None,
        }
    }

    /// Set the base URL of the Mascarin API. Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how non-success upstream statuses are treated.
    pub fn status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> MascarinResult<MascarinClient> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let config = ClientConfig {
            base_url,
            timeout: self.timeout,
            status_policy: self.status_policy,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        };

        MascarinClient::from_config(config)
    }
}

impl Default for MascarinClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
