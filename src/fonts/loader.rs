//! Font loading.
//!
//! Builds a [`Font`] from a classified font dictionary: name, code table,
//! descriptor, embedded program tables and metrics. Every variant goes
//! through the same steps; only the sources differ.
//!
//! PDF Spec: ISO 32000-1:2008, Sections 9.6 (Simple Fonts) and 9.7
//! (Composite Fonts).

use crate::config::FontOptions;
use crate::document::ObjectResolver;
use crate::error::{Error, Result};
use crate::fonts::cmap::parse_tounicode_cmap;
use crate::fonts::code_map::{ByteSequence, CodeMap};
use crate::fonts::descriptor::{number_array, FontDescriptor};
use crate::fonts::encoding::{build_encoding_table, BaseEncoding};
use crate::fonts::font::{CidToGidMap, Font, FontKind, FontVariant};
use crate::fonts::metrics::{GlyphIndex, Metrics};
use crate::fonts::program::{parse_program, ProgramTables};
use crate::fonts::resolver::descendant_font;
use crate::fonts::standard::{StandardFamily, StandardFont};
use crate::object::{Dictionary, Object, ObjectRef};
use std::collections::HashMap;

/// Glyph space to text space matrix used when a Type 3 font omits one.
const DEFAULT_FONT_MATRIX: [f32; 6] = [0.001, 0.0, 0.0, 0.001, 0.0, 0.0];

/// Default CIDFont width (`/DW`).
const DEFAULT_CID_WIDTH: i32 = 1000;

/// Largest number of CIDs expanded from a single `/W` range.
const MAX_WIDTH_RANGE: u32 = 0x1_0000;

/// Load a font whose variant has already been determined.
pub(crate) fn load_font(
    reference: ObjectRef,
    dict: &Dictionary,
    kind: FontKind,
    resolver: &dyn ObjectResolver,
    options: &FontOptions,
) -> Result<Font> {
    let name = font_name(dict, resolver)?;
    let to_unicode = load_to_unicode(dict, resolver, options)?;

    let font = if kind.is_composite() {
        load_composite(reference, dict, kind, name, to_unicode, resolver, options)?
    } else {
        load_simple(reference, dict, kind, name, to_unicode, resolver, options)?
    };

    log::debug!(
        "Loaded {} font '{}' ({}): {} codes, default width {}, symbolic={}",
        kind,
        font.name,
        reference,
        font.codes.len(),
        font.metrics.default_width(),
        font.symbolic
    );
    Ok(font)
}

/// `/BaseFont`, or `/Name` for Type 3 fonts that carry no base font.
fn font_name(dict: &Dictionary, resolver: &dyn ObjectResolver) -> Result<String> {
    for key in ["BaseFont", "Name"] {
        if let Some(Object::Name(name)) = resolver.resolve_entry(dict, key)? {
            return Ok(name);
        }
    }
    Ok(String::new())
}

/// Explicit code table from the `/ToUnicode` stream, if present.
fn load_to_unicode(
    dict: &Dictionary,
    resolver: &dyn ObjectResolver,
    options: &FontOptions,
) -> Result<Option<CodeMap>> {
    match resolver.resolve_entry(dict, "ToUnicode")? {
        Some(stream @ Object::Stream { .. }) => {
            let data = stream.decode_stream_data()?;
            let cmap = parse_tounicode_cmap(&data);
            let undeclared = cmap.undeclared_lengths();
            if !undeclared.is_empty() {
                log::warn!(
                    "ToUnicode maps {:?}-byte codes outside its codespace {:?}",
                    undeclared,
                    cmap.code_lengths
                );
            }
            let codes = cmap.to_code_map(options.duplicate_policy)?;
            log::info!(
                "Loaded ToUnicode CMap: {} mappings, {} entries skipped",
                codes.len(),
                cmap.skipped
            );
            Ok(Some(codes))
        },
        Some(Object::Name(name)) => {
            log::warn!("Ignoring predefined /ToUnicode /{}", name);
            Ok(None)
        },
        Some(other) => {
            log::warn!("Ignoring /ToUnicode of type {}", other.type_name());
            Ok(None)
        },
        None => Ok(None),
    }
}

/// Resolve a `/FontDescriptor` entry to its dictionary.
fn descriptor_dict(dict: &Dictionary, resolver: &dyn ObjectResolver) -> Result<Option<Dictionary>> {
    resolver
        .resolve_entry(dict, "FontDescriptor")?
        .map(Object::into_dict)
        .transpose()
}

/// Read the embedded program named by the descriptor.
///
/// Any failure is logged and the font is built without the program.
fn load_program(
    descriptor_dict: &Dictionary,
    descriptor: &FontDescriptor,
    resolver: &dyn ObjectResolver,
    options: &FontOptions,
) -> Option<ProgramTables> {
    if !options.load_embedded_programs {
        return None;
    }
    let key = descriptor.font_file.as_ref()?.key();

    let result = resolver
        .resolve_entry(descriptor_dict, key)
        .and_then(|stream| stream.ok_or_else(|| Error::MissingKey(key.to_string())))
        .and_then(|stream| stream.decode_stream_data())
        .and_then(|data| parse_program(&data));

    match result {
        Ok(tables) => {
            log::info!("Loaded embedded /{} program ({:?})", key, tables.format);
            Some(tables)
        },
        Err(e) => {
            log::warn!("Ignoring unreadable /{} program: {}", key, e);
            None
        },
    }
}

/// Descriptor stand-in for fonts that have none.
fn synthesized_descriptor(name: &str, standard: Option<&StandardFont>, symbolic: bool) -> FontDescriptor {
    let mut descriptor = FontDescriptor {
        font_name: (!name.is_empty()).then(|| name.to_string()),
        ..FontDescriptor::default()
    };
    match standard {
        Some(font) => {
            descriptor.flags = font.flags();
            descriptor.ascent = Some(font.ascent());
            descriptor.descent = Some(font.descent());
        },
        None => descriptor.flags.set_symbolic(symbolic),
    }
    descriptor
}

fn is_latin(standard: Option<&StandardFont>) -> bool {
    matches!(
        standard.map(|font| font.family),
        Some(StandardFamily::Helvetica | StandardFamily::Times | StandardFamily::Courier)
    )
}

/// Register every code of the table as the glyph of its scalar.
fn index_glyphs(codes: &CodeMap, metrics: &mut Metrics) {
    for (code, unicode) in codes.iter() {
        metrics.set_glyph_index(unicode, code.value());
    }
}

/// Fill widths the document left out from the program's advances, and
/// translate the program's kerning pairs into glyph selectors.
///
/// `selector_by_gid` maps program glyph ids to the font's glyph selectors.
fn apply_program_metrics(
    tables: &ProgramTables,
    selector_by_gid: &HashMap<u16, GlyphIndex>,
    metrics: &mut Metrics,
) {
    for (&gid, &selector) in selector_by_gid {
        if let Some(&advance) = tables.advances.get(&gid) {
            metrics.set_width_if_absent(selector, advance);
        }
    }

    for &(left, right, value) in &tables.kerning {
        if let (Some(&left), Some(&right)) = (selector_by_gid.get(&left), selector_by_gid.get(&right)) {
            metrics.set_kerning(left, right, value);
        }
    }
}

/// Program glyph id per selector, looked up through the program's cmap.
fn selectors_by_unicode(codes: &CodeMap, tables: &ProgramTables) -> HashMap<u16, GlyphIndex> {
    codes
        .iter()
        .filter_map(|(code, unicode)| {
            tables
                .glyph_by_unicode
                .get(&unicode)
                .map(|&gid| (gid, code.value()))
        })
        .collect()
}

fn vertical_metrics(
    descriptor: &FontDescriptor,
    program: Option<&ProgramTables>,
    type3_bbox: Option<(f32, f32)>,
    standard: Option<&StandardFont>,
) -> (f32, f32) {
    let ascent = descriptor
        .ascent
        .or_else(|| program.and_then(|tables| tables.ascent))
        .or_else(|| type3_bbox.map(|(ascent, _)| ascent))
        .or_else(|| standard.map(StandardFont::ascent))
        .unwrap_or(0.0);
    let descent = descriptor
        .descent
        .or_else(|| program.and_then(|tables| tables.descent))
        .or_else(|| type3_bbox.map(|(_, descent)| descent))
        .or_else(|| standard.map(StandardFont::descent))
        .unwrap_or(0.0);
    (ascent, descent)
}

fn fallback_default_width(descriptor: &FontDescriptor) -> i32 {
    if descriptor.is_fixed_pitch() {
        600
    } else {
        500
    }
}

/// Code table implied by a simple font's byte encoding.
///
/// Codes are taken in ascending order; a scalar reachable from several
/// codes keeps the lowest one.
fn encoding_code_map(
    dict: &Dictionary,
    default: BaseEncoding,
    resolver: &dyn ObjectResolver,
) -> Result<CodeMap> {
    let encoding = resolver.resolve_entry(dict, "Encoding")?;
    let table = build_encoding_table(encoding.as_ref(), default, resolver)?;

    let mut codes = CodeMap::new();
    for (code, unicode) in table.iter().enumerate() {
        let Some(unicode) = *unicode else { continue };
        if codes.code_for(unicode).is_none() {
            codes.insert(ByteSequence::from(code as u8), unicode)?;
        }
    }
    Ok(codes)
}

fn load_simple(
    reference: ObjectRef,
    dict: &Dictionary,
    kind: FontKind,
    name: String,
    to_unicode: Option<CodeMap>,
    resolver: &dyn ObjectResolver,
    options: &FontOptions,
) -> Result<Font> {
    let standard = match (kind, StandardFont::from_base_font(&name)) {
        (FontKind::Standard, None) => {
            log::warn!("'{}' is not a standard font name, using Helvetica metrics", name);
            Some(StandardFont::fallback())
        },
        (_, standard) => standard,
    };
    let symbolic = to_unicode.is_none() && !is_latin(standard.as_ref());

    let font_matrix = if kind == FontKind::Type3 {
        resolver
            .resolve_entry(dict, "FontMatrix")?
            .and_then(|obj| number_array::<6>(&obj))
            .unwrap_or(DEFAULT_FONT_MATRIX)
    } else {
        DEFAULT_FONT_MATRIX
    };

    let descriptor_dict = descriptor_dict(dict, resolver)?;
    let (descriptor, program) = match &descriptor_dict {
        Some(raw) => {
            let descriptor = FontDescriptor::from_dict(raw, resolver)?;
            let program = load_program(raw, &descriptor, resolver, options);
            (descriptor, program)
        },
        None => (synthesized_descriptor(&name, standard.as_ref(), symbolic), None),
    };

    let codes = match to_unicode {
        Some(codes) => codes,
        None => {
            let default = match (kind, standard) {
                (FontKind::TrueType, _) => BaseEncoding::WinAnsi,
                (_, Some(font)) => font.builtin_encoding(),
                (_, None) => BaseEncoding::Standard,
            };
            encoding_code_map(dict, default, resolver)?
        },
    };

    let default_width = descriptor
        .missing_width
        .or_else(|| standard.map(|font| font.default_width()))
        .unwrap_or_else(|| fallback_default_width(&descriptor));
    let mut metrics = Metrics::new(default_width);
    index_glyphs(&codes, &mut metrics);

    // /Widths is indexed from /FirstChar; Type 3 widths are in glyph space
    let width_scale = font_matrix[0] * 1000.0;
    if let Some(widths) = resolver.resolve_entry(dict, "Widths")? {
        let first_char = resolver
            .resolve_entry(dict, "FirstChar")?
            .and_then(|obj| obj.as_integer())
            .unwrap_or(0);
        match (u32::try_from(first_char), widths.as_array()) {
            (Ok(first_char), Some(items)) => {
                for (offset, item) in items.iter().enumerate() {
                    let Some(glyph) = u32::try_from(offset)
                        .ok()
                        .and_then(|offset| first_char.checked_add(offset))
                    else {
                        log::warn!("Font '{}': /Widths runs past the last code, ignoring the rest", name);
                        break;
                    };
                    if let Some(width) = resolver.resolve(item)?.as_number() {
                        metrics.set_width(glyph, (width as f32 * width_scale).round() as i32);
                    }
                }
                log::debug!("Font '{}': {} widths from FirstChar {}", name, items.len(), first_char);
            },
            (Err(_), _) => log::warn!("Font '{}': ignoring /Widths with /FirstChar {}", name, first_char),
            (_, None) => log::warn!("Font '{}': /Widths is not an array", name),
        }
    }

    if let Some(font) = &standard {
        for (code, unicode) in codes.iter() {
            if let Some(width) = font.width(unicode) {
                metrics.set_width_if_absent(code.value(), width);
            }
        }
    }

    if let Some(tables) = &program {
        apply_program_metrics(tables, &selectors_by_unicode(&codes, tables), &mut metrics);
    }

    let type3_bbox = if kind == FontKind::Type3 {
        resolver
            .resolve_entry(dict, "FontBBox")?
            .and_then(|obj| number_array::<4>(&obj))
            .map(|bbox| {
                let scale = font_matrix[3] * 1000.0;
                (bbox[3] * scale, bbox[1] * scale)
            })
    } else {
        None
    };
    let (ascent, descent) = vertical_metrics(&descriptor, program.as_ref(), type3_bbox, standard.as_ref());

    let program_format = program.as_ref().map(|tables| tables.format);
    let variant = match kind {
        FontKind::Standard => FontVariant::Standard(standard.unwrap_or_else(StandardFont::fallback)),
        FontKind::Type1 => FontVariant::Type1 {
            program: program_format,
        },
        FontKind::MultipleMaster => FontVariant::MultipleMaster {
            program: program_format,
        },
        FontKind::TrueType => FontVariant::TrueType {
            program: program_format,
        },
        FontKind::Type3 => FontVariant::Type3 { font_matrix },
        FontKind::CompositeCff | FontKind::CompositeTrueType => {
            return Err(Error::Font(format!("{} is not a simple font", kind)));
        },
    };

    Ok(Font {
        reference,
        name,
        variant,
        descriptor,
        codes,
        metrics,
        ascent,
        descent,
        symbolic,
    })
}

/// Name of a Type 0 font's `/Encoding` CMap.
fn cmap_name(dict: &Dictionary, resolver: &dyn ObjectResolver) -> Result<String> {
    let name = match resolver.resolve_entry(dict, "Encoding")? {
        Some(Object::Name(name)) => name,
        Some(stream @ Object::Stream { .. }) => stream
            .as_dict()
            .and_then(|header| header.get("CMapName"))
            .and_then(|obj| obj.as_name())
            .unwrap_or("(embedded)")
            .to_string(),
        Some(other) => {
            log::warn!("Unexpected Type0 /Encoding of type {}", other.type_name());
            "Identity-H".to_string()
        },
        None => "Identity-H".to_string(),
    };
    if name != "Identity-H" && name != "Identity-V" {
        log::warn!("CMap /{} is not an identity CMap, treating codes as CIDs", name);
    }
    Ok(name)
}

fn cid_to_gid_map(descendant: &Dictionary, resolver: &dyn ObjectResolver) -> Result<CidToGidMap> {
    match resolver.resolve_entry(descendant, "CIDToGIDMap")? {
        Some(stream @ Object::Stream { .. }) => {
            let map = CidToGidMap::from_stream_data(&stream.decode_stream_data()?);
            if let CidToGidMap::Table(table) = &map {
                log::debug!("CIDToGIDMap stream with {} entries", table.len());
            }
            Ok(map)
        },
        Some(Object::Name(name)) if name == "Identity" => Ok(CidToGidMap::Identity),
        Some(other) => {
            log::warn!("Unexpected /CIDToGIDMap {:?}, using Identity", other);
            Ok(CidToGidMap::Identity)
        },
        None => Ok(CidToGidMap::Identity),
    }
}

/// Apply a CIDFont `/W` array.
///
/// Two forms are mixed freely: `c [w1 w2 ...]` gives consecutive CIDs from
/// `c`, and `c_first c_last w` gives one width to a whole range.
fn apply_cid_widths(items: &[Object], resolver: &dyn ObjectResolver, metrics: &mut Metrics) -> Result<()> {
    let items = items
        .iter()
        .map(|item| resolver.resolve(item))
        .collect::<Result<Vec<_>>>()?;

    let cid = |obj: &Object| obj.as_integer().and_then(|value| u32::try_from(value).ok());
    let mut i = 0;
    let mut count = 0usize;
    while i < items.len() {
        let Some(first) = cid(&items[i]) else {
            log::warn!("Malformed /W array at index {}: expected a CID", i);
            break;
        };
        match items.get(i + 1) {
            Some(Object::Array(widths)) => {
                for (offset, width) in widths.iter().enumerate() {
                    let Some(glyph) = u32::try_from(offset)
                        .ok()
                        .and_then(|offset| first.checked_add(offset))
                    else {
                        log::warn!("/W widths from CID {} run past the last CID", first);
                        break;
                    };
                    if let Some(width) = resolver.resolve(width)?.as_number() {
                        metrics.set_width(glyph, width.round() as i32);
                        count += 1;
                    }
                }
                i += 2;
            },
            Some(last) => {
                let (Some(last), Some(width)) =
                    (cid(last), items.get(i + 2).and_then(|obj| obj.as_number()))
                else {
                    log::warn!("Malformed /W range at index {}", i);
                    break;
                };
                let last = last.min(first.saturating_add(MAX_WIDTH_RANGE - 1));
                for glyph in first..=last {
                    metrics.set_width(glyph, width.round() as i32);
                    count += 1;
                }
                i += 3;
            },
            None => {
                log::warn!("Truncated /W array at index {}", i);
                break;
            },
        }
    }

    log::debug!("Applied {} CID widths", count);
    Ok(())
}

fn load_composite(
    reference: ObjectRef,
    dict: &Dictionary,
    kind: FontKind,
    name: String,
    to_unicode: Option<CodeMap>,
    resolver: &dyn ObjectResolver,
    options: &FontOptions,
) -> Result<Font> {
    let descendant = descendant_font(dict, resolver)?;
    let encoding = cmap_name(dict, resolver)?;
    let symbolic = to_unicode.is_none();

    let descriptor_dict = descriptor_dict(&descendant, resolver)?;
    let (descriptor, program) = match &descriptor_dict {
        Some(raw) => {
            let descriptor = FontDescriptor::from_dict(raw, resolver)?;
            let program = load_program(raw, &descriptor, resolver, options);
            (descriptor, program)
        },
        None => {
            log::warn!("CIDFont of '{}' has no /FontDescriptor", name);
            (synthesized_descriptor(&name, None, symbolic), None)
        },
    };

    // Without an explicit table there is no way to tell what a CID means
    let codes = to_unicode.unwrap_or_default();

    let cid_default_width = resolver
        .resolve_entry(&descendant, "DW")?
        .and_then(|obj| obj.as_number())
        .map(|width| width.round() as i32)
        .unwrap_or(DEFAULT_CID_WIDTH);
    let default_width = descriptor.missing_width.unwrap_or(cid_default_width);

    let mut metrics = Metrics::new(default_width);
    index_glyphs(&codes, &mut metrics);
    match resolver.resolve_entry(&descendant, "W")? {
        Some(Object::Array(items)) => apply_cid_widths(&items, resolver, &mut metrics)?,
        Some(other) => log::warn!("Ignoring /W of type {}", other.type_name()),
        None => {},
    }

    let cid_to_gid = if kind == FontKind::CompositeTrueType {
        Some(cid_to_gid_map(&descendant, resolver)?)
    } else {
        None
    };

    if let Some(tables) = &program {
        let selector_by_gid: HashMap<u16, GlyphIndex> = match &cid_to_gid {
            Some(map) => codes
                .codes()
                .filter_map(|code| map.gid(code.value()).map(|gid| (gid, code.value())))
                .collect(),
            None => selectors_by_unicode(&codes, tables),
        };
        apply_program_metrics(tables, &selector_by_gid, &mut metrics);
    }

    let (ascent, descent) = vertical_metrics(&descriptor, program.as_ref(), None, None);

    let program_format = program.as_ref().map(|tables| tables.format);
    let variant = match cid_to_gid {
        Some(cid_to_gid) => FontVariant::CompositeTrueType {
            encoding,
            cid_to_gid,
            program: program_format,
        },
        None => FontVariant::CompositeCff {
            encoding,
            program: program_format,
        },
    };

    Ok(Font {
        reference,
        name,
        variant,
        descriptor,
        codes,
        metrics,
        ascent,
        descent,
        symbolic,
    })
}
