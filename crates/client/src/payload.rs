//! Untyped upstream payloads.
//!
//! The Mascarin API does not publish a schema for its responses, so bodies are
//! kept as raw JSON. Callers only ever read the few fields exposed here.

use serde::Serialize;
use serde_json::Value;
use url::Url;

/// A JSON document returned by the Mascarin API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `meta.total` of a collection response.
    pub fn meta_total(&self) -> Option<String> {
        self.0.pointer("/meta/total").and_then(render_scalar)
    }

    /// `title` of a single event.
    pub fn title(&self) -> Option<String> {
        self.0.get("title").and_then(render_scalar)
    }

    /// `location.city` of a single event.
    pub fn location_city(&self) -> Option<String> {
        self.0.pointer("/location/city").and_then(render_scalar)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A parsed upstream response together with the URL that produced it.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub url: Url,
    pub status: u16,
    pub payload: Payload,
}
