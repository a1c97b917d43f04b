//! Loading/error UI states

use serde::{Deserialize, Serialize};

/// Result of a fetch, as the UI renders it.
///
/// Failures are kept as display strings; nothing propagates past the
/// component that issued the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T: Clone> LoadState<Vec<T>> {
    /// Loaded items, or an empty list for every other state.
    pub fn items_or_empty(&self) -> Vec<T> {
        self.data().cloned().unwrap_or_default()
    }
}

/// Map initialization status, rendered as an overlay when not `Ready`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum MapLoadState {
    #[default]
    Loading,
    Ready,
    /// No access token configured; blocks the map.
    MissingToken,
    /// Initialization failed; dismissible.
    Failed(String),
}

impl MapLoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, MapLoadState::Ready)
    }

    /// Whether the overlay prevents interacting with the map at all.
    pub fn is_blocking(&self) -> bool {
        matches!(self, MapLoadState::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_state_has_no_items() {
        let state: LoadState<Vec<u8>> = LoadState::Failed("offline".into());
        assert!(state.items_or_empty().is_empty());
        assert_eq!(state.error(), Some("offline"));
    }

    #[test]
    fn missing_token_blocks() {
        assert!(MapLoadState::MissingToken.is_blocking());
        assert!(!MapLoadState::Failed("tiles".into()).is_blocking());
        assert!(!MapLoadState::Loading.is_ready());
    }
}
