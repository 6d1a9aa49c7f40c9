//! Configuration types for the Mascarin client.

use std::time::Duration;
use url::Url;

/// Default base URL of the Mascarin API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Configuration for the Mascarin client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Mascarin API. A path prefix is kept.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// How non-success upstream statuses are treated.
    pub status_policy: StatusPolicy,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            status_policy: StatusPolicy::default(),
            user_agent: default_user_agent(),
        }
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("mascarin-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Treatment of non-2xx upstream responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Parse and forward the body whatever the status.
    #[default]
    Lenient,
    /// Fail with [`crate::MascarinError::Api`] on any non-2xx status.
    Strict,
}

impl StatusPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}
