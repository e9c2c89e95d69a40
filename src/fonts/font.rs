//! Font facade.
//!
//! Every resolved font, whatever its variant, answers the same questions:
//! descriptor data, text decoding/encoding through its code table, and
//! glyph metrics. Variants differ only in where that data was sourced,
//! which is recorded in [`FontVariant`].

use crate::error::Result;
use crate::fonts::code_map::CodeMap;
use crate::fonts::codec::{self, DecodedText};
use crate::fonts::descriptor::{FontDescriptor, FontFlags};
use crate::fonts::metrics::{scaling_factor, GlyphIndex, Metrics};
use crate::fonts::program::ProgramFormat;
use crate::fonts::standard::StandardFont;
use crate::object::ObjectRef;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Concrete font type, without per-variant state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKind {
    /// Standard 14 Type 1 font, no descriptor
    Standard,
    /// Type 1 font with a descriptor
    Type1,
    /// Multiple master Type 1 font
    MultipleMaster,
    /// TrueType font
    TrueType,
    /// Type 3 font (glyphs defined by content streams)
    Type3,
    /// Type 0 font with a CIDFontType0 (CFF) descendant
    CompositeCff,
    /// Type 0 font with a CIDFontType2 (TrueType) descendant
    CompositeTrueType,
}

impl FontKind {
    /// Whether character codes go through a CIDFont descendant.
    pub fn is_composite(self) -> bool {
        matches!(self, FontKind::CompositeCff | FontKind::CompositeTrueType)
    }
}

impl fmt::Display for FontKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontKind::Standard => "Type1 (standard)",
            FontKind::Type1 => "Type1",
            FontKind::MultipleMaster => "MMType1",
            FontKind::TrueType => "TrueType",
            FontKind::Type3 => "Type3",
            FontKind::CompositeCff => "Type0/CIDFontType0",
            FontKind::CompositeTrueType => "Type0/CIDFontType2",
        };
        f.write_str(name)
    }
}

/// CID to glyph id mapping of a CIDFontType2 descendant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CidToGidMap {
    /// Glyph id equals CID
    Identity,
    /// Glyph id per CID (index), from the `/CIDToGIDMap` stream
    Table(Vec<u16>),
}

impl CidToGidMap {
    /// Glyph id of a CID.
    pub fn gid(&self, cid: GlyphIndex) -> Option<u16> {
        match self {
            CidToGidMap::Identity => u16::try_from(cid).ok(),
            CidToGidMap::Table(table) => table.get(cid as usize).copied(),
        }
    }

    /// Parse stream bytes: one big-endian `u16` per CID.
    pub fn from_stream_data(data: &[u8]) -> Self {
        CidToGidMap::Table(
            data.chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect(),
        )
    }
}

/// Per-variant state of a resolved font.
#[derive(Debug, Clone, PartialEq)]
pub enum FontVariant {
    /// Built-in standard font
    Standard(StandardFont),
    /// Custom Type 1 font
    Type1 {
        /// Format of the embedded program, if one was read
        program: Option<ProgramFormat>,
    },
    /// Multiple master font
    MultipleMaster {
        /// Format of the embedded program, if one was read
        program: Option<ProgramFormat>,
    },
    /// TrueType font
    TrueType {
        /// Format of the embedded program, if one was read
        program: Option<ProgramFormat>,
    },
    /// Type 3 font
    Type3 {
        /// Glyph space to text space matrix
        font_matrix: [f32; 6],
    },
    /// Composite font over a CFF CIDFont
    CompositeCff {
        /// Name of the `/Encoding` CMap
        encoding: String,
        /// Format of the embedded program, if one was read
        program: Option<ProgramFormat>,
    },
    /// Composite font over a TrueType CIDFont
    CompositeTrueType {
        /// Name of the `/Encoding` CMap
        encoding: String,
        /// CID to glyph id mapping
        cid_to_gid: CidToGidMap,
        /// Format of the embedded program, if one was read
        program: Option<ProgramFormat>,
    },
}

impl FontVariant {
    /// Concrete font type.
    pub fn kind(&self) -> FontKind {
        match self {
            FontVariant::Standard(_) => FontKind::Standard,
            FontVariant::Type1 { .. } => FontKind::Type1,
            FontVariant::MultipleMaster { .. } => FontKind::MultipleMaster,
            FontVariant::TrueType { .. } => FontKind::TrueType,
            FontVariant::Type3 { .. } => FontKind::Type3,
            FontVariant::CompositeCff { .. } => FontKind::CompositeCff,
            FontVariant::CompositeTrueType { .. } => FontKind::CompositeTrueType,
        }
    }
}

/// A resolved font.
///
/// Built once per definition by [`PdfDocument::font`](crate::document::PdfDocument::font)
/// and immutable afterwards. Unscaled metrics are in design units (1000 per
/// em); `scaled_*` methods multiply by `size * 0.001`.
///
/// Two fonts are equal iff they have the same [`FontKind`] and name.
#[derive(Debug, Clone)]
pub struct Font {
    pub(crate) reference: ObjectRef,
    pub(crate) name: String,
    pub(crate) variant: FontVariant,
    pub(crate) descriptor: FontDescriptor,
    pub(crate) codes: CodeMap,
    pub(crate) metrics: Metrics,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
    pub(crate) symbolic: bool,
}

impl Font {
    /// Reference of the font definition.
    pub fn reference(&self) -> ObjectRef {
        self.reference
    }

    /// PostScript name (`/BaseFont`; `/Name` or empty for Type 3).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concrete font type.
    pub fn kind(&self) -> FontKind {
        self.variant.kind()
    }

    /// Per-variant state.
    pub fn variant(&self) -> &FontVariant {
        &self.variant
    }

    /// Font descriptor (synthesized for standard fonts).
    pub fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }

    /// Descriptor flags.
    pub fn flags(&self) -> FontFlags {
        self.descriptor.flags
    }

    /// Whether the font's codes have no known Unicode meaning.
    ///
    /// `false` whenever an explicit ToUnicode table was loaded.
    pub fn is_symbolic(&self) -> bool {
        self.symbolic
    }

    /// Code table.
    pub fn code_map(&self) -> &CodeMap {
        &self.codes
    }

    /// Metrics tables.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Byte length of the longest character code (0 for an empty table).
    pub fn max_code_length(&self) -> usize {
        self.codes.max_code_length()
    }

    /// Decode a text string; unmatched bytes become spaces.
    pub fn decode(&self, bytes: &[u8]) -> String {
        codec::decode(&self.codes, self.max_code_length(), bytes)
    }

    /// Decode a text string, reporting where the space fallback was used.
    pub fn decode_detailed(&self, bytes: &[u8]) -> DecodedText {
        codec::decode_detailed(&self.codes, self.max_code_length(), bytes)
    }

    /// Encode text into character codes.
    ///
    /// # Errors
    ///
    /// [`Error::UnmappableCharacter`](crate::error::Error::UnmappableCharacter)
    /// for the first scalar with no code.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        codec::encode(&self.codes, text)
    }

    /// Unscaled width of a character.
    pub fn char_width(&self, ch: char) -> i32 {
        self.metrics.width(ch)
    }

    /// Unscaled width of a text, kerning exclusive.
    pub fn text_width(&self, text: &str) -> i32 {
        self.metrics.text_width(text)
    }

    /// Width of a character at a font size.
    pub fn scaled_char_width(&self, ch: char, size: f32) -> f32 {
        self.char_width(ch) as f32 * scaling_factor(size)
    }

    /// Width of a text at a font size, kerning exclusive.
    pub fn scaled_text_width(&self, text: &str, size: f32) -> f32 {
        self.text_width(text) as f32 * scaling_factor(size)
    }

    /// Width of a text at a font size, kerning inclusive.
    pub fn kerned_width(&self, text: &str, size: f32) -> f32 {
        (self.text_width(text) + self.text_kerning(text)) as f32 * scaling_factor(size)
    }

    /// Unscaled kerning between two characters (0 when unknown).
    pub fn kerning(&self, left: char, right: char) -> i32 {
        self.metrics.kerning(left, right)
    }

    /// Kerning between two characters at a font size.
    pub fn scaled_kerning(&self, left: char, right: char, size: f32) -> f32 {
        self.kerning(left, right) as f32 * scaling_factor(size)
    }

    /// Unscaled kerning summed over a text.
    pub fn text_kerning(&self, text: &str) -> i32 {
        self.metrics.text_kerning(text)
    }

    /// Kerning summed over a text at a font size.
    pub fn scaled_text_kerning(&self, text: &str, size: f32) -> f32 {
        self.text_kerning(text) as f32 * scaling_factor(size)
    }

    /// Unscaled ascent (positive).
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Unscaled descent (negative).
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Ascent at a font size.
    pub fn scaled_ascent(&self, size: f32) -> f32 {
        self.ascent * scaling_factor(size)
    }

    /// Descent at a font size.
    pub fn scaled_descent(&self, size: f32) -> f32 {
        self.descent * scaling_factor(size)
    }

    /// Unscaled line height: ascent minus descent.
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent
    }

    /// Line height at a font size.
    pub fn scaled_line_height(&self, size: f32) -> f32 {
        self.line_height() * scaling_factor(size)
    }

    /// Unscaled height of a character; every glyph spans the line height.
    pub fn char_height(&self, _ch: char) -> f32 {
        self.line_height()
    }

    /// Unscaled height of a text.
    pub fn text_height(&self, _text: &str) -> f32 {
        self.line_height()
    }

    /// Height of a character at a font size.
    pub fn scaled_char_height(&self, ch: char, size: f32) -> f32 {
        self.char_height(ch) * scaling_factor(size)
    }

    /// Height of a text at a font size.
    pub fn scaled_text_height(&self, text: &str, size: f32) -> f32 {
        self.text_height(text) * scaling_factor(size)
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.name == other.name
    }
}

impl Eq for Font {}

impl Hash for Font {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.name.hash(state);
    }
}
