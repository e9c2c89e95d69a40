//! Embedded font program adapter.
//!
//! Font programs are parsed with `ttf-parser`; this module only detects the
//! program's format family and surfaces the tables the metrics need: glyph
//! id per Unicode scalar, advance widths and format-0 kerning pairs, all
//! scaled to 1000 units per em.

use crate::error::{Error, Result};
use std::collections::HashMap;
use ttf_parser::{kern, Face, GlyphId};

/// Format family of a font program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramFormat {
    /// PostScript Type 1 (PFA `%!` or PFB segment header)
    Type1,
    /// TrueType (sfnt version 1.0, `true` or a `ttcf` collection)
    TrueType,
    /// OpenType with CFF outlines (`OTTO`)
    OpenTypeCff,
    /// Bare CFF (FontFile3 /Type1C or /CIDFontType0C)
    Cff,
    /// Unrecognized header
    Unknown,
}

impl ProgramFormat {
    /// Whether `ttf-parser` can read the program's sfnt tables.
    pub fn has_sfnt_tables(self) -> bool {
        matches!(self, ProgramFormat::TrueType | ProgramFormat::OpenTypeCff)
    }
}

/// Detect the format family from the program's first bytes.
///
/// # Examples
///
/// ```
/// use pdf_typeface::fonts::{detect_format, ProgramFormat};
///
/// assert_eq!(detect_format(b"OTTO\x00\x0A"), ProgramFormat::OpenTypeCff);
/// assert_eq!(detect_format(b"%!PS-AdobeFont-1.0"), ProgramFormat::Type1);
/// assert_eq!(detect_format(b""), ProgramFormat::Unknown);
/// ```
pub fn detect_format(data: &[u8]) -> ProgramFormat {
    match data {
        [0x00, 0x01, 0x00, 0x00, ..] | [b't', b'r', b'u', b'e', ..] | [b't', b't', b'c', b'f', ..] => {
            ProgramFormat::TrueType
        },
        [b'O', b'T', b'T', b'O', ..] => ProgramFormat::OpenTypeCff,
        [b'%', b'!', ..] | [0x80, 0x01, ..] => ProgramFormat::Type1,
        // CFF header: major 1, minor 0, header size >= 4, offset size 1..=4
        [0x01, 0x00, hdr_size, off_size, ..] if *hdr_size >= 4 && (1..=4).contains(off_size) => {
            ProgramFormat::Cff
        },
        _ => ProgramFormat::Unknown,
    }
}

/// Tables surfaced from a font program, in 1000 units per em.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramTables {
    /// Detected format
    pub format: ProgramFormat,
    /// Glyph id per Unicode scalar (from the program's cmap)
    pub glyph_by_unicode: HashMap<char, u16>,
    /// Advance width per glyph id
    pub advances: HashMap<u16, i32>,
    /// Kerning adjustments `(left gid, right gid, value)`
    pub kerning: Vec<(u16, u16, i32)>,
    /// Typographic ascender
    pub ascent: Option<f32>,
    /// Typographic descender (negative)
    pub descent: Option<f32>,
}

impl ProgramTables {
    fn empty(format: ProgramFormat) -> Self {
        Self {
            format,
            glyph_by_unicode: HashMap::new(),
            advances: HashMap::new(),
            kerning: Vec::new(),
            ascent: None,
            descent: None,
        }
    }
}

/// Parse a font program.
///
/// Type 1, bare CFF and unknown programs yield empty tables carrying only
/// the format. sfnt programs that fail to parse are reported as
/// [`Error::Font`].
pub fn parse_program(data: &[u8]) -> Result<ProgramTables> {
    let format = detect_format(data);
    if !format.has_sfnt_tables() {
        log::debug!("Font program format {:?}: no tables extracted", format);
        return Ok(ProgramTables::empty(format));
    }

    let face = Face::parse(data, 0)
        .map_err(|e| Error::Font(format!("Failed to parse font program: {}", e)))?;
    let units_per_em = face.units_per_em();
    let scale = |value: i32| to_design_units(value, units_per_em);

    let mut tables = ProgramTables::empty(format);
    tables.ascent = Some(scale(face.ascender() as i32) as f32);
    tables.descent = Some(scale(face.descender() as i32) as f32);

    // Basic Multilingual Plane only
    for codepoint in 0..=0xFFFF_u32 {
        if let Some(unicode) = char::from_u32(codepoint) {
            if let Some(gid) = face.glyph_index(unicode) {
                tables.glyph_by_unicode.insert(unicode, gid.0);
            }
        }
    }

    for gid in 0..face.number_of_glyphs() {
        if let Some(advance) = face.glyph_hor_advance(GlyphId(gid)) {
            tables.advances.insert(gid, scale(advance as i32));
        }
    }

    if let Some(kern_table) = face.tables().kern {
        for subtable in kern_table.subtables.into_iter() {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let kern::Format::Format0(pairs) = subtable.format {
                for pair in pairs.pairs {
                    tables
                        .kerning
                        .push((pair.left().0, pair.right().0, scale(pair.value as i32)));
                }
            }
        }
    }

    log::info!(
        "Parsed {:?} program: {} mapped scalars, {} advances, {} kerning pairs",
        format,
        tables.glyph_by_unicode.len(),
        tables.advances.len(),
        tables.kerning.len()
    );
    Ok(tables)
}

/// Convert font units to 1000-per-em design units.
pub(crate) fn to_design_units(value: i32, units_per_em: u16) -> i32 {
    if units_per_em == 0 || units_per_em == 1000 {
        return value;
    }
    ((value as f64) * 1000.0 / units_per_em as f64).round() as i32
}
