//! For the Love of Minnesota map client core
//!
//! Platform-independent UI orchestration for the map shells:
//! - Panel state manager and controller (`panel`)
//! - Drag/snap handling for the panel handle (`drag`)
//! - URL <-> map synchronization (`url_codec`, `services::UrlMapSync`)
//! - Feed and atlas data services over a [`MapDataProvider`](mnlove_provider::MapDataProvider)
//!
//! The map renderer and the browser history are reached through the traits
//! in [`traits`]; time is passed in explicitly so shells drive everything
//! from their own event loop.

pub mod cell;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod panel;
pub mod services;
pub mod timer;
pub mod traits;
pub mod types;
pub mod url_codec;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use cell::CurrentCell;
pub use config::{HeightFractions, HeightThresholds, MapUiConfig, TimingConfig};
pub use error::{CoreError, CoreResult};
pub use events::{AppEvent, EventBus, EventSubscriber, MapStyle};
pub use panel::{resolve, PanelController};
pub use services::{AtlasService, FeedService, ServiceContext, UrlMapSync};
pub use traits::{MapCamera, MemoryHistory, UrlHistory};
