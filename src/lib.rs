//! # pdf_typeface
//!
//! Font model for PDF documents: turns font definitions from a document's
//! object graph into immutable font facades that decode and encode text
//! strings and measure glyphs.
//!
//! ## Core Features
//!
//! - **Variant resolution**: standard 14, Type 1, multiple master, TrueType,
//!   Type 3 and composite (CIDFontType0/CIDFontType2) fonts
//! - **Code tables**: ToUnicode CMaps, base encodings and `/Differences`
//! - **Metrics**: `/Widths`, `/W`, standard font widths, embedded program
//!   advances and kerning pairs
//! - **Identity cache**: one facade per font definition per document, safe to
//!   share across threads
//!
//! ## Quick Start
//!
//! ```
//! use pdf_typeface::{Object, PdfDocument};
//! use std::collections::HashMap;
//!
//! let mut doc = PdfDocument::new();
//! let mut dict = HashMap::new();
//! dict.insert("Subtype".to_string(), Object::name("Type1"));
//! dict.insert("BaseFont".to_string(), Object::name("Courier"));
//! let font_ref = doc.add_object(Object::Dictionary(dict));
//!
//! let font = doc.font(font_ref)?;
//! assert_eq!(font.decode(b"Hi"), "Hi");
//! assert_eq!(font.text_width("Hi"), 1200);
//! assert!((font.kerned_width("Hi", 10.0) - 12.0).abs() < 1e-4);
//!
//! // Same definition, same facade
//! assert!(std::sync::Arc::ptr_eq(&font, &doc.font(font_ref)?));
//! # Ok::<(), pdf_typeface::Error>(())
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Object graph and document context
pub mod document;
pub mod object;

// Stream decoders
pub mod decoders;

// Font model
pub mod fonts;

pub use config::{DuplicatePolicy, FontOptions};
pub use document::{ObjectResolver, PdfDocument};
pub use error::{Error, Result};
pub use fonts::{ByteSequence, CodeMap, Font, FontKind, FontVariant, Metrics};
pub use object::{Dictionary, Object, ObjectRef};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
