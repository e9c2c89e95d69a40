//! Built-in metrics of the standard 14 fonts.
//!
//! Simple fonts that carry no descriptor rely on the reader's own copy of
//! one of the standard fonts. Widths come from the Adobe Font Metrics files
//! for the printable ASCII glyphs of StandardEncoding; everything else uses
//! the family's default width.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.6.2.2 (Standard Type 1 Fonts).

use crate::fonts::descriptor::FontFlags;
use crate::fonts::encoding::BaseEncoding;

/// Family of a standard font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFamily {
    /// Helvetica (also substituted for Arial)
    Helvetica,
    /// Times (also substituted for Times New Roman)
    Times,
    /// Courier (also substituted for Courier New)
    Courier,
    /// Symbol
    Symbol,
    /// ZapfDingbats
    ZapfDingbats,
}

/// A standard font: family plus style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandardFont {
    /// Font family
    pub family: StandardFamily,
    /// Bold weight
    pub bold: bool,
    /// Italic or oblique style
    pub italic: bool,
}

impl StandardFont {
    /// Recognize a `/BaseFont` name, including subset prefixes
    /// (`ABCDEF+Helvetica`), comma styles (`Arial,Bold`) and the common
    /// TrueType aliases.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_typeface::fonts::{StandardFamily, StandardFont};
    ///
    /// let font = StandardFont::from_base_font("Arial,BoldItalic").unwrap();
    /// assert_eq!(font.family, StandardFamily::Helvetica);
    /// assert!(font.bold && font.italic);
    /// assert!(StandardFont::from_base_font("Garamond").is_none());
    /// ```
    pub fn from_base_font(base_font: &str) -> Option<Self> {
        let name = strip_subset_prefix(base_font);
        let compact: String = name.chars().filter(|c| !matches!(c, ' ' | '-' | ',')).collect();

        let family = if compact.starts_with("Helvetica") || compact.starts_with("Arial") {
            StandardFamily::Helvetica
        } else if compact.starts_with("Times") {
            StandardFamily::Times
        } else if compact.starts_with("Courier") {
            StandardFamily::Courier
        } else if compact.starts_with("Symbol") {
            StandardFamily::Symbol
        } else if compact.starts_with("ZapfDingbats") || compact.starts_with("Dingbats") {
            StandardFamily::ZapfDingbats
        } else {
            return None;
        };

        let symbolic = matches!(family, StandardFamily::Symbol | StandardFamily::ZapfDingbats);
        Some(Self {
            family,
            bold: !symbolic && compact.contains("Bold"),
            italic: !symbolic && (compact.contains("Italic") || compact.contains("Oblique")),
        })
    }

    /// Substitute used for base fonts that are not standard: Helvetica.
    pub fn fallback() -> Self {
        Self {
            family: StandardFamily::Helvetica,
            bold: false,
            italic: false,
        }
    }

    /// Ascender, in design units.
    pub fn ascent(&self) -> f32 {
        match self.family {
            StandardFamily::Helvetica => 718.0,
            StandardFamily::Times => 683.0,
            StandardFamily::Courier => 629.0,
            StandardFamily::Symbol => 1010.0,
            StandardFamily::ZapfDingbats => 820.0,
        }
    }

    /// Descender (negative), in design units.
    pub fn descent(&self) -> f32 {
        match self.family {
            StandardFamily::Helvetica => -207.0,
            StandardFamily::Times => -217.0,
            StandardFamily::Courier => -157.0,
            StandardFamily::Symbol => -293.0,
            StandardFamily::ZapfDingbats => -143.0,
        }
    }

    /// Descriptor flags implied by the family and style.
    pub fn flags(&self) -> FontFlags {
        let mut flags = match self.family {
            StandardFamily::Helvetica => FontFlags::NONSYMBOLIC,
            StandardFamily::Times => FontFlags::SERIF | FontFlags::NONSYMBOLIC,
            StandardFamily::Courier => {
                FontFlags::FIXED_PITCH | FontFlags::SERIF | FontFlags::NONSYMBOLIC
            },
            StandardFamily::Symbol | StandardFamily::ZapfDingbats => FontFlags::SYMBOLIC,
        };
        if self.italic {
            flags |= FontFlags::ITALIC;
        }
        if self.bold {
            flags |= FontFlags::FORCE_BOLD;
        }
        flags
    }

    /// Width used for glyphs outside the built-in table.
    pub fn default_width(&self) -> i32 {
        match self.family {
            StandardFamily::Courier => 600,
            StandardFamily::Symbol => 500,
            StandardFamily::ZapfDingbats => 788,
            StandardFamily::Helvetica | StandardFamily::Times => 500,
        }
    }

    /// Encoding used when the font dictionary has no `/Encoding`.
    pub fn builtin_encoding(&self) -> BaseEncoding {
        match self.family {
            StandardFamily::Symbol => BaseEncoding::Symbol,
            _ => BaseEncoding::Standard,
        }
    }

    /// Width of the glyph rendering `unicode`, if the family table has it.
    ///
    /// Italic Times shares the upright table.
    pub fn width(&self, unicode: char) -> Option<i32> {
        let table: &[u16; 95] = match (self.family, self.bold) {
            (StandardFamily::Helvetica, false) => &HELVETICA_WIDTHS,
            (StandardFamily::Helvetica, true) => &HELVETICA_BOLD_WIDTHS,
            (StandardFamily::Times, false) => &TIMES_WIDTHS,
            (StandardFamily::Times, true) => &TIMES_BOLD_WIDTHS,
            (StandardFamily::Courier, _) => return Some(600),
            _ => return None,
        };
        let code = standard_code(unicode)?;
        Some(table[(code - 0x20) as usize] as i32)
    }
}

/// Drop a six-letter subset tag (`ABCDEF+`).
pub(crate) fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => rest,
        _ => name,
    }
}

/// StandardEncoding code (0x20..=0x7E) of a scalar.
fn standard_code(unicode: char) -> Option<u8> {
    match unicode {
        '\u{2019}' => Some(0x27),
        '\u{2018}' => Some(0x60),
        '\'' | '`' => None,
        ' '..='~' => Some(unicode as u8),
        _ => None,
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    222, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 278, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    278, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 333, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 333, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_base_fonts() {
        let helv = StandardFont::from_base_font("Helvetica-BoldOblique").unwrap();
        assert_eq!(helv.family, StandardFamily::Helvetica);
        assert!(helv.bold);
        assert!(helv.italic);

        let times = StandardFont::from_base_font("ABCDEF+TimesNewRomanPS-ItalicMT").unwrap();
        assert_eq!(times.family, StandardFamily::Times);
        assert!(!times.bold);
        assert!(times.italic);

        let courier = StandardFont::from_base_font("Courier New").unwrap();
        assert_eq!(courier.family, StandardFamily::Courier);

        let symbol = StandardFont::from_base_font("Symbol").unwrap();
        assert_eq!(symbol.builtin_encoding(), BaseEncoding::Symbol);

        assert!(StandardFont::from_base_font("Frutiger").is_none());
    }

    #[test]
    fn test_helvetica_widths() {
        let helv = StandardFont::fallback();
        assert_eq!(helv.width(' '), Some(278));
        assert_eq!(helv.width('A'), Some(667));
        assert_eq!(helv.width('@'), Some(1015));
        assert_eq!(helv.width('~'), Some(584));
        assert_eq!(helv.width('\u{2019}'), Some(222));
        assert_eq!(helv.width('\''), None);
        assert_eq!(helv.width('é'), None);
    }

    #[test]
    fn test_bold_and_times_widths() {
        let bold = StandardFont::from_base_font("Helvetica-Bold").unwrap();
        assert_eq!(bold.width('b'), Some(611));
        let times = StandardFont::from_base_font("Times-Roman").unwrap();
        assert_eq!(times.width('W'), Some(944));
        assert_eq!(times.width('a'), Some(444));
        let times_bold = StandardFont::from_base_font("Times-Bold").unwrap();
        assert_eq!(times_bold.width('%'), Some(1000));
    }

    #[test]
    fn test_courier_is_fixed_pitch() {
        let courier = StandardFont::from_base_font("Courier-Oblique").unwrap();
        assert_eq!(courier.width('i'), Some(600));
        assert_eq!(courier.width('é'), Some(600));
        assert!(courier.flags().contains(FontFlags::FIXED_PITCH | FontFlags::ITALIC));
    }

    #[test]
    fn test_symbolic_families() {
        let dingbats = StandardFont::from_base_font("ZapfDingbats").unwrap();
        assert!(dingbats.flags().contains(FontFlags::SYMBOLIC));
        assert!(!dingbats.flags().contains(FontFlags::NONSYMBOLIC));
        assert_eq!(dingbats.width('a'), None);
        assert_eq!(dingbats.default_width(), 788);
    }

    #[test]
    fn test_ascent_descent() {
        let times = StandardFont::from_base_font("Times-Roman").unwrap();
        assert_eq!(times.ascent(), 683.0);
        assert_eq!(times.descent(), -217.0);
    }

    #[test]
    fn test_strip_subset_prefix() {
        assert_eq!(strip_subset_prefix("ABCDEF+Helvetica"), "Helvetica");
        assert_eq!(strip_subset_prefix("Helvetica"), "Helvetica");
        assert_eq!(strip_subset_prefix("abc+X"), "abc+X");
    }
}
