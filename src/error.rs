//! Error types for the font model.
//!
//! This module defines all error types that can occur while resolving font
//! definitions, building code tables, and encoding text.

use crate::object::ObjectRef;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during font processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Font dictionary has no /Subtype entry
    #[error("Font type undefined (reference: {0})")]
    UndefinedFontType(ObjectRef),

    /// Font type is recognized but not implemented, or not recognized at all
    #[error("Unsupported font type: {font_type} (reference: {reference})")]
    UnsupportedFontType {
        /// Type tag (or tag path) that could not be handled
        font_type: String,
        /// Reference of the offending font definition
        reference: ObjectRef,
    },

    /// No character code exists for a Unicode scalar
    #[error("No character code for {0:?}")]
    UnmappableCharacter(char),

    /// A code table entry would break the one-to-one mapping
    #[error("Duplicate mapping entry: code <{code}> / {unicode:?}")]
    DuplicateMappingEntry {
        /// Character code in hex
        code: String,
        /// Unicode scalar
        unicode: char,
    },

    /// Referenced object not found in the object table
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Required dictionary entry is missing
    #[error("Missing required entry: /{0}")]
    MissingKey(String),

    /// Circular reference detected in object graph
    #[error("Circular reference detected: object {0}")]
    CircularReference(ObjectRef),

    /// Recursion depth limit exceeded
    #[error("Recursion depth limit exceeded (max: {0})")]
    RecursionLimitExceeded(u32),

    /// Stream decoding error
    #[error("Stream decoding error: {0}")]
    Decode(String),

    /// Unsupported stream filter
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Font program error
    #[error("Font error: {0}")]
    Font(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_font_type_error() {
        let err = Error::UndefinedFontType(ObjectRef::new(12, 0));
        let msg = format!("{}", err);
        assert!(msg.contains("undefined"));
        assert!(msg.contains("12 0 R"));
    }

    #[test]
    fn test_unsupported_font_type_error() {
        let err = Error::UnsupportedFontType {
            font_type: "Type0/CIDFontType3".to_string(),
            reference: ObjectRef::new(4, 0),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("CIDFontType3"));
        assert!(msg.contains("4 0 R"));
    }

    #[test]
    fn test_unmappable_character_error() {
        let err = Error::UnmappableCharacter('é');
        let msg = format!("{}", err);
        assert!(msg.contains("'é'"));
    }

    #[test]
    fn test_duplicate_mapping_entry_error() {
        let err = Error::DuplicateMappingEntry {
            code: "0041".to_string(),
            unicode: 'A',
        };
        let msg = format!("{}", err);
        assert!(msg.contains("<0041>"));
        assert!(msg.contains("'A'"));
    }

    #[test]
    fn test_object_not_found_error() {
        let err = Error::ObjectNotFound(10, 0);
        let msg = format!("{}", err);
        assert!(msg.contains("10 0 R"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
