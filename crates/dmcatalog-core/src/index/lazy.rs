//! Single-build, then frozen.
//!
//! The first callers of [`LazyIndex::get_or_build`] serialize on a build
//! lock; exactly one of them runs the build, the others wait and then read
//! the stored value. Once stored, reads go through the `OnceLock` without
//! locking. A failed build stores nothing, so a later call retries.

use crate::CatalogError;
use std::sync::{Mutex, OnceLock, PoisonError};

#[derive(Debug)]
pub struct LazyIndex<T> {
    value: OnceLock<T>,
    build_lock: Mutex<()>,
}

impl<T> LazyIndex<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    /// The built value, if any.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    #[must_use]
    pub fn is_built(&self) -> bool {
        self.value.get().is_some()
    }

    /// Return the value, running `build` if nobody has built it yet.
    pub fn get_or_build<F>(&self, build: F) -> Result<&T, CatalogError>
    where
        F: FnOnce() -> Result<T, CatalogError>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        // A panicking build leaves nothing stored; the lock is still usable.
        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        let built = build()?;
        Ok(self.value.get_or_init(|| built))
    }
}

impl<T> Default for LazyIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
