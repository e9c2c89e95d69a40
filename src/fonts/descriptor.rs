//! Font descriptors and descriptor flags.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.8 (Font Descriptors).

use crate::document::ObjectResolver;
use crate::error::Result;
use crate::object::{Dictionary, Object};
use bitflags::bitflags;

bitflags! {
    /// Font descriptor flags.
    ///
    /// Per PDF spec Table 123 (Font flags). Undefined bits are dropped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontFlags: u32 {
        /// Bit 1: All glyphs have the same width
        const FIXED_PITCH = 1 << 0;
        /// Bit 2: Glyphs have serifs
        const SERIF = 1 << 1;
        /// Bit 3: Font contains glyphs outside the Adobe standard Latin set
        const SYMBOLIC = 1 << 2;
        /// Bit 4: Glyphs resemble cursive handwriting
        const SCRIPT = 1 << 3;
        /// Bit 6: Font uses the Adobe standard Latin character set
        const NONSYMBOLIC = 1 << 5;
        /// Bit 7: Glyphs have dominant slanted vertical strokes
        const ITALIC = 1 << 6;
        /// Bit 17: No lowercase letters
        const ALL_CAP = 1 << 16;
        /// Bit 18: Lowercase letters are small capitals
        const SMALL_CAP = 1 << 17;
        /// Bit 19: Bold glyphs are emboldened at small sizes
        const FORCE_BOLD = 1 << 18;
    }
}

impl FontFlags {
    /// Mark the font symbolic or non-symbolic; the two bits stay exclusive.
    pub fn set_symbolic(&mut self, symbolic: bool) {
        self.set(FontFlags::SYMBOLIC, symbolic);
        self.set(FontFlags::NONSYMBOLIC, !symbolic);
    }
}

/// Which embedded program stream a descriptor carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontFileKind {
    /// `/FontFile`: Type 1 program
    Type1,
    /// `/FontFile2`: TrueType program
    TrueType,
    /// `/FontFile3`: compact program, with the stream's `/Subtype`
    /// (`Type1C`, `CIDFontType0C` or `OpenType`)
    Compact(Option<String>),
}

impl FontFileKind {
    /// Descriptor key holding the stream.
    pub fn key(&self) -> &'static str {
        match self {
            FontFileKind::Type1 => "FontFile",
            FontFileKind::TrueType => "FontFile2",
            FontFileKind::Compact(_) => "FontFile3",
        }
    }

    /// Whether the program is wrapped in an OpenType container.
    pub fn is_open_type(&self) -> bool {
        matches!(self, FontFileKind::Compact(Some(subtype)) if subtype == "OpenType")
    }
}

/// Typed view over a `/FontDescriptor` dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontDescriptor {
    /// PostScript name (`/FontName`)
    pub font_name: Option<String>,
    /// Descriptor flags
    pub flags: FontFlags,
    /// Maximum height above the baseline, in glyph space
    pub ascent: Option<f32>,
    /// Maximum depth below the baseline (negative), in glyph space
    pub descent: Option<f32>,
    /// Height of flat capital letters
    pub cap_height: Option<f32>,
    /// Angle of dominant vertical strokes, counter-clockwise from vertical
    pub italic_angle: f32,
    /// Thickness of dominant vertical stems
    pub stem_v: Option<f32>,
    /// Width used for codes missing from `/Widths`
    pub missing_width: Option<i32>,
    /// Weight class (100..900)
    pub font_weight: Option<i32>,
    /// Font bounding box `[llx lly urx ury]`
    pub font_bbox: Option<[f32; 4]>,
    /// Embedded program stream, if any
    pub font_file: Option<FontFileKind>,
}

impl FontDescriptor {
    /// Read a descriptor dictionary.
    ///
    /// Entries are resolved through `resolver`; malformed numeric entries
    /// are ignored rather than failing the whole descriptor.
    pub fn from_dict(dict: &Dictionary, resolver: &dyn ObjectResolver) -> Result<Self> {
        let number = |key: &str| -> Result<Option<f32>> {
            Ok(resolver
                .resolve_entry(dict, key)?
                .and_then(|obj| obj.as_number())
                .map(|n| n as f32))
        };

        let flags = resolver
            .resolve_entry(dict, "Flags")?
            .and_then(|obj| obj.as_integer())
            .map(|bits| FontFlags::from_bits_truncate(bits as u32))
            .unwrap_or_default();

        let font_bbox = resolver
            .resolve_entry(dict, "FontBBox")?
            .and_then(|obj| number_array::<4>(&obj));

        let descriptor = Self {
            font_name: resolver
                .resolve_entry(dict, "FontName")?
                .and_then(|obj| obj.as_name().map(str::to_string)),
            flags,
            ascent: number("Ascent")?,
            descent: number("Descent")?,
            cap_height: number("CapHeight")?,
            italic_angle: number("ItalicAngle")?.unwrap_or(0.0),
            stem_v: number("StemV")?,
            missing_width: number("MissingWidth")?.map(|w| w.round() as i32),
            font_weight: number("FontWeight")?.map(|w| w as i32),
            font_bbox,
            font_file: font_file_kind(dict, resolver)?,
        };

        log::debug!(
            "FontDescriptor {:?}: flags={:?}, program={:?}",
            descriptor.font_name,
            descriptor.flags,
            descriptor.font_file
        );
        Ok(descriptor)
    }

    /// Whether all glyphs share one width.
    pub fn is_fixed_pitch(&self) -> bool {
        self.flags.contains(FontFlags::FIXED_PITCH)
    }
}

/// Detect the embedded program stream, preferring FontFile, FontFile2,
/// FontFile3 in that order.
fn font_file_kind(dict: &Dictionary, resolver: &dyn ObjectResolver) -> Result<Option<FontFileKind>> {
    if dict.contains_key("FontFile") {
        return Ok(Some(FontFileKind::Type1));
    }
    if dict.contains_key("FontFile2") {
        return Ok(Some(FontFileKind::TrueType));
    }
    match resolver.resolve_entry(dict, "FontFile3")? {
        Some(stream) => {
            let subtype = stream
                .as_dict()
                .and_then(|header| header.get("Subtype"))
                .and_then(|obj| obj.as_name())
                .map(str::to_string);
            Ok(Some(FontFileKind::Compact(subtype)))
        },
        None => Ok(None),
    }
}

/// Read a fixed-size array of numbers.
pub(crate) fn number_array<const N: usize>(obj: &Object) -> Option<[f32; N]> {
    let items = obj.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut values = [0.0f32; N];
    for (slot, item) in values.iter_mut().zip(items) {
        *slot = item.as_number()? as f32;
    }
    Some(values)
}
