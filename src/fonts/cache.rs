//! Per-document font identity cache.
//!
//! Maps a font definition's reference to the one [`Font`] built for it, so
//! every lookup of the same reference returns the same `Arc`. Entries live
//! as long as the owning document and are never evicted.

use crate::error::Result;
use crate::fonts::Font;
use crate::object::ObjectRef;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Font cache guarded by a single mutex.
///
/// Construction runs outside the lock. When two callers race on the same
/// reference, the first insertion wins and the other construction is
/// dropped.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: Mutex<HashMap<ObjectRef, Arc<Font>>>,
}

impl FontCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ObjectRef, Arc<Font>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent
        self.fonts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached font for a reference.
    pub fn get(&self, reference: ObjectRef) -> Option<Arc<Font>> {
        self.lock().get(&reference).cloned()
    }

    /// Return the cached font for `reference`, building and caching it on a
    /// miss. Errors from `build` are returned and nothing is cached.
    pub fn get_or_try_insert_with<F>(&self, reference: ObjectRef, build: F) -> Result<Arc<Font>>
    where
        F: FnOnce() -> Result<Font>,
    {
        if let Some(font) = self.get(reference) {
            log::debug!("Font cache hit for {}", reference);
            return Ok(font);
        }

        log::debug!("Font cache miss for {}, loading", reference);
        let built = Arc::new(build()?);

        let mut fonts = self.lock();
        let cached = fonts.entry(reference).or_insert_with(|| Arc::clone(&built));
        if !Arc::ptr_eq(cached, &built) {
            log::debug!("Font {} was cached concurrently, discarding duplicate", reference);
        }
        Ok(Arc::clone(cached))
    }

    /// Number of cached fonts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no font has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
