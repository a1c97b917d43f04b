//! # mnlove-provider
//!
//! Data access for the For the Love of Minnesota map client.
//!
//! The UI treats the hosted backend as an opaque JSON API. This crate
//! owns the "fetch JSON, handle ok/error" contract:
//!
//! - [`MapDataProvider`]: the collaborator trait the UI services depend on
//! - [`RestProvider`]: `reqwest` implementation against `{base_url}/api`
//! - [`ProviderError`]: structured, serializable failures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mnlove_provider::{MapDataProvider, NearbyQuery, RestProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = RestProvider::new("https://example.org", None)?;
//!     let pins = provider
//!         .nearby_pins(&NearbyQuery { lat: 44.97, lng: -93.26, radius_m: 500 })
//!         .await?;
//!     for pin in &pins {
//!         println!("{} {:?}", pin.id, pin.description);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) on idempotent
//! calls are retried with exponential backoff. Pin creation is never retried.

mod error;
mod http_client;
mod rest;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};
pub use http_client::HttpUtils;
pub use rest::RestProvider;
pub use traits::MapDataProvider;
pub use types::{
    AtlasEntity, AtlasEntityKind, AtlasEntityPatch, AtlasType, BoundingBox, CreatePinRequest,
    Group, NearbyQuery, Pin, PinQuery, StatsSummary,
};
