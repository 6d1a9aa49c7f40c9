//! Transport layer for the Mascarin client.

pub mod http;

pub use http::HttpTransport;
