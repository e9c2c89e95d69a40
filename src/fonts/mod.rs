//! Font model.
//!
//! Resolves font definitions into [`Font`] facades: code tables for
//! decoding and encoding text strings, glyph metrics, and the variant
//! dispatch that picks where each font's data comes from.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9 (Text), fonts in 9.5 - 9.10.

pub mod cache;
pub mod cmap;
pub mod code_map;
pub mod codec;
pub mod descriptor;
pub mod encoding;
pub mod font;
mod glyph_list;
mod loader;
pub mod metrics;
pub mod program;
pub mod resolver;
pub mod standard;

pub use cache::FontCache;
pub use cmap::{parse_tounicode_cmap, ToUnicodeCMap};
pub use code_map::{ByteSequence, CodeMap};
pub use codec::{DecodedText, FALLBACK_CHAR};
pub use descriptor::{FontDescriptor, FontFileKind, FontFlags};
pub use encoding::{build_encoding_table, glyph_name_to_unicode, BaseEncoding, EncodingTable};
pub use font::{CidToGidMap, Font, FontKind, FontVariant};
pub use metrics::{scaling_factor, GlyphIndex, Metrics};
pub use program::{detect_format, parse_program, ProgramFormat, ProgramTables};
pub use resolver::classify;
pub use standard::{StandardFamily, StandardFont};
