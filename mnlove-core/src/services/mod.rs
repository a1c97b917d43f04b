//! Services: URL sync and data loading behind the UI

mod atlas_service;
mod feed_service;
mod url_sync;

pub use atlas_service::AtlasService;
pub use feed_service::{FeedService, MAX_DESCRIPTION_LEN};
pub use url_sync::UrlMapSync;

use std::sync::Arc;

use mnlove_provider::MapDataProvider;

use crate::error::CoreError;
use crate::events::EventBus;
use crate::types::LoadState;

/// Service context - holds the shared dependencies
///
/// The shell creates it once and injects the provider implementation.
pub struct ServiceContext {
    /// Backend collaborator
    pub provider: Arc<dyn MapDataProvider>,
    /// Cross-component signals
    pub bus: EventBus,
}

impl ServiceContext {
    #[must_use]
    pub fn new(provider: Arc<dyn MapDataProvider>, bus: EventBus) -> Self {
        Self { provider, bus }
    }
}

/// Turn a fetch result into UI state, logging the failure once here.
pub(crate) fn into_load_state<T>(result: Result<T, CoreError>, context: &str) -> LoadState<T> {
    match result {
        Ok(value) => LoadState::Loaded(value),
        Err(e) => {
            e.log(context);
            LoadState::Failed(e.to_string())
        }
    }
}
