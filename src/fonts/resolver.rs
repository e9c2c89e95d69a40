//! Font variant resolution.
//!
//! Reads a font definition's type tags once and decides which concrete
//! variant it describes. Dispatch happens in one place, [`classify`]; the
//! variant's data is then read by the loader.
//!
//! | `/Subtype` | condition | variant |
//! |---|---|---|
//! | `Type1` | no `/FontDescriptor` | standard |
//! | `Type1` | `/FontFile3` with `/Subtype /OpenType` | unsupported |
//! | `Type1` | otherwise | Type 1 |
//! | `TrueType` | | TrueType |
//! | `Type0` | descendant `CIDFontType0` | composite CFF |
//! | `Type0` | descendant `CIDFontType2` | composite TrueType |
//! | `Type3` | | Type 3 |
//! | `MMType1` | | multiple master |

use crate::config::FontOptions;
use crate::document::ObjectResolver;
use crate::error::{Error, Result};
use crate::fonts::descriptor::FontDescriptor;
use crate::fonts::font::{Font, FontKind};
use crate::fonts::loader::load_font;
use crate::object::{Dictionary, Object, ObjectRef};

/// Resolve and load the font defined under `reference`.
pub(crate) fn resolve_font(
    reference: ObjectRef,
    resolver: &dyn ObjectResolver,
    options: &FontOptions,
) -> Result<Font> {
    let dict = resolver.resolve(&Object::Reference(reference))?.into_dict()?;
    let kind = classify(reference, &dict, resolver)?;
    log::debug!("Font {} resolved as {}", reference, kind);
    load_font(reference, &dict, kind, resolver, options)
}

/// Determine the concrete variant of a font dictionary.
///
/// # Errors
///
/// - [`Error::UndefinedFontType`] when `/Subtype` (or the descendant's
///   `/Subtype`) is missing
/// - [`Error::UnsupportedFontType`] for OpenType-wrapped Type 1 programs,
///   unknown CIDFont subtypes and unknown font subtypes
pub fn classify(
    reference: ObjectRef,
    dict: &Dictionary,
    resolver: &dyn ObjectResolver,
) -> Result<FontKind> {
    let subtype = subtype_name(dict, resolver)?.ok_or(Error::UndefinedFontType(reference))?;

    match subtype.as_str() {
        "Type1" => match resolver.resolve_entry(dict, "FontDescriptor")? {
            None => Ok(FontKind::Standard),
            Some(descriptor) => {
                let descriptor = FontDescriptor::from_dict(&descriptor.into_dict()?, resolver)?;
                match descriptor.font_file {
                    Some(kind) if kind.is_open_type() => Err(Error::UnsupportedFontType {
                        font_type: "Type1/OpenType".to_string(),
                        reference,
                    }),
                    _ => Ok(FontKind::Type1),
                }
            },
        },
        "TrueType" => Ok(FontKind::TrueType),
        "Type0" => {
            let descendant = descendant_font(dict, resolver)?;
            let cid_subtype =
                subtype_name(&descendant, resolver)?.ok_or(Error::UndefinedFontType(reference))?;
            match cid_subtype.as_str() {
                "CIDFontType0" => Ok(FontKind::CompositeCff),
                "CIDFontType2" => Ok(FontKind::CompositeTrueType),
                other => Err(Error::UnsupportedFontType {
                    font_type: format!("Type0/{}", other),
                    reference,
                }),
            }
        },
        "Type3" => Ok(FontKind::Type3),
        "MMType1" => Ok(FontKind::MultipleMaster),
        other => Err(Error::UnsupportedFontType {
            font_type: other.to_string(),
            reference,
        }),
    }
}

/// `/Subtype` name of a dictionary, if present.
fn subtype_name(dict: &Dictionary, resolver: &dyn ObjectResolver) -> Result<Option<String>> {
    match resolver.resolve_entry(dict, "Subtype")? {
        Some(Object::Name(name)) => Ok(Some(name)),
        Some(other) => Err(Error::InvalidObjectType {
            expected: "Name".to_string(),
            found: other.type_name().to_string(),
        }),
        None => Ok(None),
    }
}

/// First entry of a Type 0 font's `/DescendantFonts`.
pub(crate) fn descendant_font(dict: &Dictionary, resolver: &dyn ObjectResolver) -> Result<Dictionary> {
    let descendants = resolver
        .resolve_entry(dict, "DescendantFonts")?
        .ok_or_else(|| Error::MissingKey("DescendantFonts".to_string()))?;
    let first = match &descendants {
        Object::Array(items) => items
            .first()
            .ok_or_else(|| Error::MissingKey("DescendantFonts[0]".to_string()))?,
        other => {
            return Err(Error::InvalidObjectType {
                expected: "Array".to_string(),
                found: other.type_name().to_string(),
            })
        },
    };
    resolver.resolve(first)?.into_dict()
}
