//! Shared "latest value" cells

use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle to a value that several components read while one
/// component owns updates (e.g. the currently selected pin).
///
/// A poisoned lock still yields its data; the value is plain state.
#[derive(Debug, Default)]
pub struct CurrentCell<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for CurrentCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> CurrentCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    pub fn set(&self, value: T) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    /// Store `value` and return the previous one.
    pub fn replace(&self, value: T) -> T {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, value)
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

impl<T: Clone> CurrentCell<T> {
    pub fn get(&self) -> T {
        self.with(Clone::clone)
    }
}
