//! Glyph metrics tables.
//!
//! Widths and kerning are stored in unscaled design units (1000 per em).
//! Scaling to a font size is a multiplication by `size * 0.001` and never
//! touches the stored tables.

use std::collections::HashMap;

/// Identifier of a glyph: the byte value for simple fonts, the CID for
/// composite fonts.
pub type GlyphIndex = u32;

/// Factor converting unscaled design units to the given font size.
///
/// # Examples
///
/// ```
/// use pdf_typeface::fonts::scaling_factor;
///
/// assert!((scaling_factor(12.0) - 0.012).abs() < 1e-6);
/// assert_eq!(500.0 * scaling_factor(0.0), 0.0);
/// ```
#[inline]
pub fn scaling_factor(size: f32) -> f32 {
    0.001 * size
}

/// Per-font metrics: glyph lookup, widths, kerning pairs and a default width.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    glyph_indexes: HashMap<char, GlyphIndex>,
    widths: HashMap<GlyphIndex, i32>,
    kernings: HashMap<(GlyphIndex, GlyphIndex), i32>,
    default_width: i32,
}

impl Metrics {
    /// Create empty tables with the given default width.
    pub fn new(default_width: i32) -> Self {
        Self {
            default_width,
            ..Self::default()
        }
    }

    /// Register the glyph used to render a Unicode scalar.
    pub fn set_glyph_index(&mut self, unicode: char, glyph: GlyphIndex) {
        self.glyph_indexes.insert(unicode, glyph);
    }

    /// Set the width of a glyph.
    pub fn set_width(&mut self, glyph: GlyphIndex, width: i32) {
        self.widths.insert(glyph, width);
    }

    /// Set the width of a glyph unless one is already recorded.
    pub fn set_width_if_absent(&mut self, glyph: GlyphIndex, width: i32) {
        self.widths.entry(glyph).or_insert(width);
    }

    /// Set the kerning adjustment between a left and right glyph.
    pub fn set_kerning(&mut self, left: GlyphIndex, right: GlyphIndex, adjustment: i32) {
        self.kernings.insert((left, right), adjustment);
    }

    /// Set the width used when a glyph has no explicit entry.
    pub fn set_default_width(&mut self, width: i32) {
        self.default_width = width;
    }

    /// Width used when a glyph has no explicit entry.
    pub fn default_width(&self) -> i32 {
        self.default_width
    }

    /// Glyph rendering a Unicode scalar.
    pub fn glyph_index(&self, unicode: char) -> Option<GlyphIndex> {
        self.glyph_indexes.get(&unicode).copied()
    }

    /// Explicit width of a glyph, if recorded.
    pub fn glyph_width(&self, glyph: GlyphIndex) -> Option<i32> {
        self.widths.get(&glyph).copied()
    }

    /// Number of kerning pairs.
    pub fn kerning_pair_count(&self) -> usize {
        self.kernings.len()
    }

    /// Unscaled width of a character, falling back to the default width.
    pub fn width(&self, unicode: char) -> i32 {
        self.glyph_index(unicode)
            .and_then(|glyph| self.glyph_width(glyph))
            .unwrap_or(self.default_width)
    }

    /// Unscaled width of a text (kerning exclusive).
    pub fn text_width(&self, text: &str) -> i32 {
        text.chars().map(|ch| self.width(ch)).sum()
    }

    /// Unscaled kerning between two characters; 0 when either glyph or the
    /// pair is unknown.
    pub fn kerning(&self, left: char, right: char) -> i32 {
        match (self.glyph_index(left), self.glyph_index(right)) {
            (Some(l), Some(r)) => self.kernings.get(&(l, r)).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// Unscaled kerning summed over every adjacent pair in a text.
    pub fn text_kerning(&self, text: &str) -> i32 {
        if self.kernings.is_empty() {
            return 0;
        }
        let chars: Vec<char> = text.chars().collect();
        chars.windows(2).map(|pair| self.kerning(pair[0], pair[1])).sum()
    }
}
