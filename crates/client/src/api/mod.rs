//! API endpoint implementations.

mod events;
mod explore;

pub use events::{AgendaQuery, EventsApi};
pub use explore::{ExploreApi, ExploreQuery, LISTING_TYPES, PRICE_RANGES};

use serde_json::Number;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 10;

fn default_limit() -> Number {
    Number::from(DEFAULT_LIMIT)
}

/// Empty filters are treated as absent.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Render a number for a query string.
///
/// Integral floats drop their fraction (`5.0` is sent as `5`); anything else
/// is forwarded as given, including negatives and fractions.
fn query_number(number: &Number) -> String {
    if number.is_f64() {
        if let Some(value) = number.as_f64() {
            if value == 0.0 {
                return "0".to_string();
            }
            if value.fract() == 0.0 && value.abs() < 1e21 {
                return format!("{:.0}", value);
            }
        }
    }
    number.to_string()
}

/// Zero counts as "not supplied", like an empty filter.
fn non_zero(number: &Option<Number>) -> Option<&Number> {
    number
        .as_ref()
        .filter(|n| n.as_f64().map_or(true, |v| v != 0.0))
}
