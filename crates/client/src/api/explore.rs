//! Explore API endpoints.

use super::{default_limit, non_empty, non_zero, query_number};
use crate::client::MascarinClient;
use crate::error::MascarinResult;
use crate::payload::UpstreamResponse;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Listing kinds accepted by the `type` filter.
pub const LISTING_TYPES: &[&str] = &[
    "activity",
    "event",
    "experience",
    "accommodation",
    "foodestablishment",
];

/// Values accepted by the `priceRange` filter.
pub const PRICE_RANGES: &[&str] = &["free", "budget", "moderate", "upscale", "luxury"];

/// Filters for listing exploration.
///
/// `type` and `priceRange` are free text: values outside [`LISTING_TYPES`] and
/// [`PRICE_RANGES`] are forwarded and left to the upstream API to judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreQuery {
    #[serde(default = "default_limit")]
    pub limit: Number,
    #[serde(default, rename = "type")]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub page: Option<Number>,
}

impl Default for ExploreQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            listing_type: None,
            price_range: None,
            page: None,
        }
    }
}

impl ExploreQuery {
    /// Query pairs in upstream order. Page 0 is treated as absent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(listing_type) = non_empty(&self.listing_type) {
            pairs.push(("type", listing_type.to_string()));
        }
        if let Some(price_range) = non_empty(&self.price_range) {
            pairs.push(("priceRange", price_range.to_string()));
        }
        if let Some(page) = non_zero(&self.page) {
            pairs.push(("page", query_number(page)));
        }
        pairs.push(("limit", query_number(&self.limit)));
        pairs
    }
}

/// Explore API.
pub struct ExploreApi<'a> {
    client: &'a MascarinClient,
}

impl<'a> ExploreApi<'a> {
    pub(crate) fn new(client: &'a MascarinClient) -> Self {
        Self { client }
    }

    /// Fetch listings matching the filters.
    pub async fn listings(&self, query: &ExploreQuery) -> MascarinResult<UpstreamResponse> {
        self.client
            .http
            .get_json(&["api", "explore"], &query.query_pairs())
            .await
    }
}
