//! Document context.
//!
//! A [`PdfDocument`] owns an in-memory object table and the font identity
//! cache. Font resolution only needs to look objects up, which is expressed
//! by the [`ObjectResolver`] trait so the font loaders can be exercised
//! against any object source.

use crate::config::FontOptions;
use crate::error::{Error, Result};
use crate::fonts::cache::FontCache;
use crate::fonts::resolver::resolve_font;
use crate::fonts::Font;
use crate::object::{Dictionary, Object, ObjectRef};
use std::collections::HashMap;
use std::sync::Arc;

/// Default maximum length of a reference chain.
pub const DEFAULT_MAX_RESOLVE_DEPTH: u32 = 32;

/// Source of indirect objects.
pub trait ObjectResolver {
    /// Load the object stored under a reference.
    fn load_object(&self, obj_ref: ObjectRef) -> Result<Object>;

    /// Maximum number of references followed by [`resolve`](Self::resolve).
    fn max_resolve_depth(&self) -> u32 {
        DEFAULT_MAX_RESOLVE_DEPTH
    }

    /// Follow a chain of references to a direct object.
    ///
    /// Direct objects are returned as-is. A chain revisiting one of its own
    /// references fails with [`Error::CircularReference`]; a chain longer than
    /// [`max_resolve_depth`](Self::max_resolve_depth) fails with
    /// [`Error::RecursionLimitExceeded`].
    fn resolve(&self, obj: &Object) -> Result<Object> {
        let Some(mut current_ref) = obj.as_reference() else {
            return Ok(obj.clone());
        };

        let max_depth = self.max_resolve_depth();
        let mut visited = Vec::new();
        loop {
            if visited.contains(&current_ref) {
                log::error!("Circular reference detected for object {}", current_ref);
                return Err(Error::CircularReference(current_ref));
            }
            if visited.len() as u32 >= max_depth {
                log::error!("Recursion depth limit exceeded ({}) at object {}", max_depth, current_ref);
                return Err(Error::RecursionLimitExceeded(max_depth));
            }
            visited.push(current_ref);

            match self.load_object(current_ref)? {
                Object::Reference(next) => current_ref = next,
                resolved => return Ok(resolved),
            }
        }
    }

    /// Resolve a dictionary entry; `None` when the key is absent or null.
    fn resolve_entry(&self, dict: &Dictionary, key: &str) -> Result<Option<Object>> {
        match dict.get(key) {
            Some(value) => match self.resolve(value)? {
                Object::Null => Ok(None),
                resolved => Ok(Some(resolved)),
            },
            None => Ok(None),
        }
    }
}

/// In-memory PDF document.
///
/// Holds the indirect objects and the per-document font cache. Font
/// resolution takes `&self`, so a document can be shared across threads
/// behind an `Arc`.
///
/// # Example
///
/// ```
/// use pdf_typeface::document::PdfDocument;
/// use pdf_typeface::object::Object;
/// use std::collections::HashMap;
///
/// let mut doc = PdfDocument::new();
/// let mut dict = HashMap::new();
/// dict.insert("Type".to_string(), Object::name("Font"));
/// dict.insert("Subtype".to_string(), Object::name("Type1"));
/// dict.insert("BaseFont".to_string(), Object::name("Helvetica"));
/// let font_ref = doc.add_object(Object::Dictionary(dict));
///
/// let font = doc.font(font_ref)?;
/// assert_eq!(font.name(), "Helvetica");
/// assert_eq!(font.char_width('A'), 667);
/// # Ok::<(), pdf_typeface::error::Error>(())
/// ```
#[derive(Default)]
pub struct PdfDocument {
    /// Indirect objects by reference
    objects: HashMap<ObjectRef, Object>,
    /// Next object number handed out by `add_object`
    next_id: u32,
    /// Options applied to every font load
    options: FontOptions,
    /// Font identity cache
    fonts: FontCache,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("objects", &self.objects.len())
            .field("options", &self.options)
            .field("loaded_fonts", &self.fonts.len())
            .finish_non_exhaustive()
    }
}

impl PdfDocument {
    /// Create an empty document with default (lenient) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given font options.
    pub fn with_options(options: FontOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Font options in effect for this document.
    pub fn options(&self) -> &FontOptions {
        &self.options
    }

    /// Store an object under the next free object number (generation 0).
    pub fn add_object(&mut self, obj: Object) -> ObjectRef {
        self.next_id = self.next_id.max(self.max_id()) + 1;
        let obj_ref = ObjectRef::new(self.next_id, 0);
        self.objects.insert(obj_ref, obj);
        obj_ref
    }

    /// Store or replace an object under an explicit reference.
    ///
    /// Replacing a font definition that was already resolved does not touch
    /// the cached font; replacing one whose resolution failed lets the next
    /// [`font`](Self::font) call retry.
    pub fn insert_object(&mut self, obj_ref: ObjectRef, obj: Object) -> Option<Object> {
        self.objects.insert(obj_ref, obj)
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn max_id(&self) -> u32 {
        self.objects.keys().map(|r| r.id).max().unwrap_or(0)
    }

    /// Resolve the font defined by a reference.
    ///
    /// The first call loads the font and caches it; later calls return the
    /// same instance. Failed resolutions are not cached.
    ///
    /// # Errors
    ///
    /// - [`Error::UndefinedFontType`] if the definition has no `/Subtype`
    /// - [`Error::UnsupportedFontType`] for unknown or unimplemented subtypes
    /// - object graph errors while reading the definition
    pub fn font(&self, reference: ObjectRef) -> Result<Arc<Font>> {
        self.fonts.get_or_try_insert_with(reference, || {
            resolve_font(reference, self, &self.options)
        })
    }

    /// Number of fonts in the identity cache.
    pub fn loaded_font_count(&self) -> usize {
        self.fonts.len()
    }
}

impl ObjectResolver for PdfDocument {
    fn load_object(&self, obj_ref: ObjectRef) -> Result<Object> {
        log::trace!("Loading object {}", obj_ref);
        self.objects
            .get(&obj_ref)
            .cloned()
            .ok_or(Error::ObjectNotFound(obj_ref.id, obj_ref.gen))
    }

    fn max_resolve_depth(&self) -> u32 {
        self.options.max_resolve_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_load_object() {
        let mut doc = PdfDocument::new();
        let first = doc.add_object(Object::Integer(1));
        let second = doc.add_object(Object::Integer(2));
        assert_eq!(first, ObjectRef::new(1, 0));
        assert_eq!(second, ObjectRef::new(2, 0));
        assert_eq!(doc.load_object(second).unwrap(), Object::Integer(2));
        assert_eq!(doc.object_count(), 2);
    }

    #[test]
    fn test_add_object_skips_explicit_ids() {
        let mut doc = PdfDocument::new();
        doc.insert_object(ObjectRef::new(10, 0), Object::Null);
        assert_eq!(doc.add_object(Object::Null), ObjectRef::new(11, 0));
    }

    #[test]
    fn test_load_missing_object() {
        let doc = PdfDocument::new();
        match doc.load_object(ObjectRef::new(7, 0)) {
            Err(Error::ObjectNotFound(7, 0)) => {},
            other => panic!("Expected ObjectNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_reference_chain() {
        let mut doc = PdfDocument::new();
        let target = doc.add_object(Object::Integer(42));
        let middle = doc.add_object(Object::Reference(target));
        let resolved = doc.resolve(&Object::Reference(middle)).unwrap();
        assert_eq!(resolved, Object::Integer(42));
        // Direct objects pass through
        assert_eq!(doc.resolve(&Object::Boolean(true)).unwrap(), Object::Boolean(true));
    }

    #[test]
    fn test_resolve_detects_cycle() {
        let mut doc = PdfDocument::new();
        let a = ObjectRef::new(1, 0);
        let b = ObjectRef::new(2, 0);
        doc.insert_object(a, Object::Reference(b));
        doc.insert_object(b, Object::Reference(a));
        assert!(matches!(
            doc.resolve(&Object::Reference(a)),
            Err(Error::CircularReference(_))
        ));
    }

    #[test]
    fn test_resolve_depth_limit() {
        let mut doc = PdfDocument::with_options(FontOptions::default().with_max_resolve_depth(2));
        let end = doc.add_object(Object::Integer(0));
        let r2 = doc.add_object(Object::Reference(end));
        let r3 = doc.add_object(Object::Reference(r2));
        assert!(matches!(
            doc.resolve(&Object::Reference(r3)),
            Err(Error::RecursionLimitExceeded(2))
        ));
        assert!(doc.resolve(&Object::Reference(r2)).is_ok());
    }

    #[test]
    fn test_resolve_entry_null_is_absent() {
        let doc = PdfDocument::new();
        let mut dict = HashMap::new();
        dict.insert("A".to_string(), Object::Null);
        dict.insert("B".to_string(), Object::Integer(5));
        assert!(doc.resolve_entry(&dict, "A").unwrap().is_none());
        assert!(doc.resolve_entry(&dict, "Missing").unwrap().is_none());
        assert_eq!(doc.resolve_entry(&dict, "B").unwrap(), Some(Object::Integer(5)));
    }

    #[test]
    fn test_document_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PdfDocument>();
    }
}
