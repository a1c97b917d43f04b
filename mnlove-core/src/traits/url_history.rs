//! Browser-history abstract Trait

use std::sync::{PoisonError, RwLock};

/// Location bar of the host. Only history-replacing writes are used, so
/// map movement never grows the back stack.
pub trait UrlHistory: Send + Sync {
    fn current_url(&self) -> String;

    fn replace(&self, url: &str);
}

/// In-memory history
///
/// Used by the terminal shell and by tests. Keeps a count of writes.
#[derive(Debug)]
pub struct MemoryHistory {
    state: RwLock<(String, usize)>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            state: RwLock::new((initial_url.into(), 0)),
        }
    }

    /// Number of `replace` calls so far.
    pub fn write_count(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).1
    }
}

impl UrlHistory for MemoryHistory {
    fn current_url(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .0
            .clone()
    }

    fn replace(&self, url: &str) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.0 = url.to_string();
        state.1 += 1;
    }
}
