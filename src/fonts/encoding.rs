//! Implicit encodings of simple fonts.
//!
//! A simple font without a ToUnicode stream identifies its glyphs through
//! `/Encoding`: either a predefined encoding name or a dictionary with a
//! `/BaseEncoding` and a `/Differences` array of glyph names. This module
//! turns either form into a byte -> Unicode table.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.6.6 (Character Encoding) and
//! Annex D (Character Sets and Encodings).

use crate::document::ObjectResolver;
use crate::error::Result;
use crate::fonts::glyph_list::GLYPH_LIST;
use crate::object::Object;

/// Byte -> Unicode table of a simple font; `None` marks an unused code.
pub type EncodingTable = [Option<char>; 256];

/// Predefined simple-font encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseEncoding {
    /// Adobe StandardEncoding (Type 1 default)
    Standard,
    /// Windows code page 1252
    WinAnsi,
    /// Mac OS Roman
    MacRoman,
    /// Built-in encoding of the Symbol font (Greek letters and ASCII subset)
    Symbol,
}

impl BaseEncoding {
    /// Look up an encoding by its PDF name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "StandardEncoding" => Some(BaseEncoding::Standard),
            "WinAnsiEncoding" => Some(BaseEncoding::WinAnsi),
            "MacRomanEncoding" => Some(BaseEncoding::MacRoman),
            "SymbolEncoding" => Some(BaseEncoding::Symbol),
            _ => None,
        }
    }

    /// Unicode scalar for a byte under this encoding.
    pub fn lookup(self, code: u8) -> Option<char> {
        let unit = match self {
            BaseEncoding::Standard => match code {
                0x27 => 0x2019,
                0x60 => 0x2018,
                0x20..=0x7E => code as u16,
                0x80..=0xFF => STANDARD_HIGH[(code - 0x80) as usize],
                _ => 0,
            },
            BaseEncoding::WinAnsi => match code {
                0x20..=0x7E => code as u16,
                0x80..=0x9F => WIN_ANSI_C1[(code - 0x80) as usize],
                0xA0..=0xFF => code as u16,
                _ => 0,
            },
            BaseEncoding::MacRoman => match code {
                0x20..=0x7E => code as u16,
                0x80..=0xFF => MAC_ROMAN_HIGH[(code - 0x80) as usize],
                _ => 0,
            },
            BaseEncoding::Symbol => match code {
                0x20..=0x7E => SYMBOL_LOW[(code - 0x20) as usize],
                _ => 0,
            },
        };
        if unit == 0 {
            None
        } else {
            char::from_u32(unit as u32)
        }
    }

    /// Full 256-entry table of this encoding.
    pub fn table(self) -> EncodingTable {
        let mut table = [None; 256];
        for (code, slot) in table.iter_mut().enumerate() {
            *slot = self.lookup(code as u8);
        }
        table
    }
}

/// Map a glyph name to Unicode.
///
/// Tries the glyph list, then single-letter names, then the `uniXXXX` and
/// `uXXXX[XX]` conventions.
///
/// # Examples
///
/// ```
/// use pdf_typeface::fonts::glyph_name_to_unicode;
///
/// assert_eq!(glyph_name_to_unicode("bullet"), Some('•'));
/// assert_eq!(glyph_name_to_unicode("Q"), Some('Q'));
/// assert_eq!(glyph_name_to_unicode("uni00E9"), Some('é'));
/// assert_eq!(glyph_name_to_unicode("glyph1234"), None);
/// ```
pub fn glyph_name_to_unicode(name: &str) -> Option<char> {
    if let Some(&unicode) = GLYPH_LIST.get(name) {
        return Some(unicode);
    }

    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_alphabetic() {
            return Some(ch);
        }
    }

    let hex = if let Some(rest) = name.strip_prefix("uni") {
        (rest.len() == 4).then_some(rest)
    } else if let Some(rest) = name.strip_prefix('u') {
        (4..=6).contains(&rest.len()).then_some(rest)
    } else {
        None
    }?;

    let value = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(value)
}

/// Build the byte table of a simple font from its (resolved) `/Encoding`.
///
/// `encoding` is `None` when the entry is absent, in which case `default`
/// applies unchanged. An unknown encoding name also falls back to `default`.
pub fn build_encoding_table(
    encoding: Option<&Object>,
    default: BaseEncoding,
    resolver: &dyn ObjectResolver,
) -> Result<EncodingTable> {
    let Some(encoding) = encoding else {
        return Ok(default.table());
    };

    if let Some(name) = encoding.as_name() {
        let base = BaseEncoding::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown encoding /{}, using {:?}", name, default);
            default
        });
        return Ok(base.table());
    }

    let Some(dict) = encoding.as_dict() else {
        log::warn!("Unexpected /Encoding of type {}, using {:?}", encoding.type_name(), default);
        return Ok(default.table());
    };

    let base = match resolver.resolve_entry(dict, "BaseEncoding")? {
        Some(obj) => obj
            .as_name()
            .and_then(BaseEncoding::from_name)
            .unwrap_or(default),
        None => default,
    };
    let mut table = base.table();

    if let Some(differences) = resolver.resolve_entry(dict, "Differences")? {
        match differences.as_array() {
            Some(items) => apply_differences(&mut table, items),
            None => log::warn!("/Differences is not an array"),
        }
    }

    Ok(table)
}

/// Apply a `/Differences` array: integers set the next code, names assign
/// glyphs to consecutive codes.
fn apply_differences(table: &mut EncodingTable, items: &[Object]) {
    let mut code: i64 = 0;
    let mut applied = 0usize;

    for item in items {
        match item {
            Object::Integer(start) => code = *start,
            Object::Name(glyph_name) => {
                if (0..=255).contains(&code) {
                    let unicode = glyph_name_to_unicode(glyph_name);
                    if unicode.is_none() {
                        log::debug!("Unknown glyph name /{} at code {}", glyph_name, code);
                    }
                    table[code as usize] = unicode;
                    applied += 1;
                } else {
                    log::warn!("Character code {} in /Differences array exceeds u8 range", code);
                }
                code += 1;
            },
            other => log::warn!("Unexpected item in /Differences array: {:?}", other),
        }
    }

    log::debug!("Applied {} /Differences entries", applied);
}

/// StandardEncoding, codes 0x80..=0xFF.
const STANDARD_HIGH: [u16; 128] = [
    // 0x80
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 0x90
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 0xA0
    0, 0x00A1, 0x00A2, 0x00A3, 0x2044, 0x00A5, 0x0192, 0x00A7,
    0x00A4, 0x0027, 0x201C, 0x00AB, 0x2039, 0x203A, 0xFB01, 0xFB02,
    // 0xB0
    0, 0x2013, 0x2020, 0x2021, 0x00B7, 0, 0x00B6, 0x2022,
    0x201A, 0x201E, 0x201D, 0x00BB, 0x2026, 0x2030, 0, 0x00BF,
    // 0xC0
    0, 0x0060, 0x00B4, 0x02C6, 0x02DC, 0x00AF, 0x02D8, 0x02D9,
    0x00A8, 0, 0x02DA, 0x00B8, 0, 0x02DD, 0x02DB, 0x02C7,
    // 0xD0
    0x2014, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 0xE0
    0, 0x00C6, 0, 0x00AA, 0, 0, 0, 0,
    0x0141, 0x00D8, 0x0152, 0x00BA, 0, 0, 0, 0,
    // 0xF0
    0, 0x00E6, 0, 0, 0, 0x0131, 0, 0,
    0x0142, 0x00F8, 0x0153, 0x00DF, 0, 0, 0, 0,
];

/// WinAnsiEncoding, codes 0x80..=0x9F (the rest is Latin-1).
const WIN_ANSI_C1: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021,
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0,
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

/// MacRomanEncoding, codes 0x80..=0xFF.
const MAC_ROMAN_HIGH: [u16; 128] = [
    // 0x80
    0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1,
    0x00E0, 0x00E2, 0x00E4, 0x00E3, 0x00E5, 0x00E7, 0x00E9, 0x00E8,
    // 0x90
    0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3,
    0x00F2, 0x00F4, 0x00F6, 0x00F5, 0x00FA, 0x00F9, 0x00FB, 0x00FC,
    // 0xA0
    0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF,
    0x00AE, 0x00A9, 0x2122, 0x00B4, 0x00A8, 0x2260, 0x00C6, 0x00D8,
    // 0xB0
    0x221E, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x00B5, 0x2202, 0x2211,
    0x220F, 0x03C0, 0x222B, 0x00AA, 0x00BA, 0x2126, 0x00E6, 0x00F8,
    // 0xC0
    0x00BF, 0x00A1, 0x00AC, 0x221A, 0x0192, 0x2248, 0x2206, 0x00AB,
    0x00BB, 0x2026, 0x00A0, 0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153,
    // 0xD0
    0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x25CA,
    0x00FF, 0x0178, 0x2044, 0x00A4, 0x2039, 0x203A, 0xFB01, 0xFB02,
    // 0xE0
    0x2021, 0x00B7, 0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1,
    0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4,
    // 0xF0
    0, 0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC,
    0x00AF, 0x02D8, 0x02D9, 0x02DA, 0x00B8, 0x02DD, 0x02DB, 0x02C7,
];

/// Symbol font built-in encoding, codes 0x20..=0x7E.
const SYMBOL_LOW: [u16; 95] = [
    // 0x20
    0x0020, 0x0021, 0x2200, 0x0023, 0x2203, 0x0025, 0x0026, 0x220B,
    0x0028, 0x0029, 0x2217, 0x002B, 0x002C, 0x2212, 0x002E, 0x002F,
    // 0x30
    0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037,
    0x0038, 0x0039, 0x003A, 0x003B, 0x003C, 0x003D, 0x003E, 0x003F,
    // 0x40
    0x2245, 0x0391, 0x0392, 0x03A7, 0x0394, 0x0395, 0x03A6, 0x0393,
    0x0397, 0x0399, 0x03D1, 0x039A, 0x039B, 0x039C, 0x039D, 0x039F,
    // 0x50
    0x03A0, 0x0398, 0x03A1, 0x03A3, 0x03A4, 0x03A5, 0x03C2, 0x03A9,
    0x039E, 0x03A8, 0x0396, 0x005B, 0x2234, 0x005D, 0x22A5, 0x005F,
    // 0x60
    0, 0x03B1, 0x03B2, 0x03C7, 0x03B4, 0x03B5, 0x03C6, 0x03B3,
    0x03B7, 0x03B9, 0x03D5, 0x03BA, 0x03BB, 0x03BC, 0x03BD, 0x03BF,
    // 0x70
    0x03C0, 0x03B8, 0x03C1, 0x03C3, 0x03C4, 0x03C5, 0x03D6, 0x03C9,
    0x03BE, 0x03C8, 0x03B6, 0x007B, 0x007C, 0x007D, 0x223C,
];
