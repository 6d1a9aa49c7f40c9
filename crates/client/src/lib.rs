//! # Mascarin Client
//!
//! Async client for the Mascarin events and listings API.
//!
//! ```rust,no_run
//! use mascarin_client::{AgendaQuery, MascarinClient, MascarinResult};
//!
//! #[tokio::main]
//! async fn main() -> MascarinResult<()> {
//!     let client = MascarinClient::builder()
//!         .base_url("http://localhost:3333")
//!         .build()?;
//!
//!     let agenda = client.events().agenda(&AgendaQuery::default()).await?;
//!     println!("{} events", agenda.payload.meta_total().unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```
//!
//! Response bodies are returned as untyped [`Payload`]s; the API guarantees no
//! schema beyond the handful of fields [`Payload`] reads.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod transport;

pub use api::{AgendaQuery, ExploreQuery, DEFAULT_LIMIT};
pub use client::{MascarinClient, MascarinClientBuilder};
pub use config::{ClientConfig, StatusPolicy, DEFAULT_BASE_URL};
pub use error::{MascarinError, MascarinResult};
pub use payload::{Payload, UpstreamResponse};
