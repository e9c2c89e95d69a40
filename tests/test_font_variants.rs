//! Font variant resolution tests.
//!
//! Builds font definitions in an in-memory document and checks which
//! variant each one resolves to, per ISO 32000-1:2008 Sections 9.6 and 9.7:
//! - Type1 without a descriptor is a standard 14 font
//! - Type1 with an OpenType-wrapped program is not supported
//! - Type0 dispatches on the descendant CIDFont subtype
//! - a missing /Subtype is an undefined font type

use pdf_typeface::fonts::{CidToGidMap, FontKind, FontVariant, StandardFamily};
use pdf_typeface::{Dictionary, Error, Object, ObjectRef, PdfDocument};

fn dict(entries: &[(&str, Object)]) -> Dictionary {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn font_dict(subtype: &str, base_font: &str) -> Dictionary {
    dict(&[
        ("Type", Object::name("Font")),
        ("Subtype", Object::name(subtype)),
        ("BaseFont", Object::name(base_font)),
    ])
}

fn add_descriptor(doc: &mut PdfDocument, entries: &[(&str, Object)]) -> ObjectRef {
    let mut descriptor = dict(&[("Type", Object::name("FontDescriptor"))]);
    descriptor.extend(dict(entries));
    doc.add_object(Object::Dictionary(descriptor))
}

fn add_type0(doc: &mut PdfDocument, cid_subtype: &str, extra: &[(&str, Object)]) -> ObjectRef {
    let mut descendant = dict(&[
        ("Type", Object::name("Font")),
        ("Subtype", Object::name(cid_subtype)),
        ("BaseFont", Object::name("KozMinPr6N-Regular")),
    ]);
    descendant.extend(dict(extra));
    let descendant = doc.add_object(Object::Dictionary(descendant));

    let mut font = font_dict("Type0", "KozMinPr6N-Regular");
    font.insert(
        "DescendantFonts".to_string(),
        Object::Array(vec![Object::Reference(descendant)]),
    );
    doc.add_object(Object::Dictionary(font))
}

#[test]
fn test_type1_without_descriptor_is_standard() {
    let mut doc = PdfDocument::new();
    let font_ref = doc.add_object(Object::Dictionary(font_dict("Type1", "Times-BoldItalic")));

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.kind(), FontKind::Standard);
    assert_eq!(font.name(), "Times-BoldItalic");
    match font.variant() {
        FontVariant::Standard(standard) => {
            assert_eq!(standard.family, StandardFamily::Times);
            assert!(standard.bold);
            assert!(standard.italic);
        },
        other => panic!("Expected a standard font, got {:?}", other),
    }
    assert_eq!(font.reference(), font_ref);
}

#[test]
fn test_unknown_standard_name_uses_fallback_metrics() {
    let mut doc = PdfDocument::new();
    let font_ref = doc.add_object(Object::Dictionary(font_dict("Type1", "Garamond")));

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.kind(), FontKind::Standard);
    assert_eq!(font.name(), "Garamond");
    assert!(font.ascent() > 0.0);
    assert!(font.descent() < 0.0);
}

#[test]
fn test_type1_with_descriptor() {
    let mut doc = PdfDocument::new();
    let descriptor = add_descriptor(
        &mut doc,
        &[
            ("FontName", Object::name("Minion-Regular")),
            ("Flags", Object::Integer(34)),
            ("Ascent", Object::Integer(727)),
            ("Descent", Object::Integer(-273)),
        ],
    );
    let mut font = font_dict("Type1", "Minion-Regular");
    font.insert("FontDescriptor".to_string(), Object::Reference(descriptor));
    let font_ref = doc.add_object(Object::Dictionary(font));

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.kind(), FontKind::Type1);
    assert_eq!(font.variant(), &FontVariant::Type1 { program: None });
    assert_eq!(font.descriptor().font_name.as_deref(), Some("Minion-Regular"));
    assert_eq!(font.ascent(), 727.0);
    assert_eq!(font.descent(), -273.0);
    assert_eq!(font.line_height(), 1000.0);
}

#[test]
fn test_type1_open_type_program_is_unsupported() {
    let mut doc = PdfDocument::new();
    let program = doc.add_object(Object::stream(
        dict(&[("Subtype", Object::name("OpenType"))]),
        &b"OTTO\x00\x00"[..],
    ));
    let descriptor = add_descriptor(&mut doc, &[("FontFile3", Object::Reference(program))]);
    let mut font = font_dict("Type1", "SourceSans");
    font.insert("FontDescriptor".to_string(), Object::Reference(descriptor));
    let font_ref = doc.add_object(Object::Dictionary(font));

    match doc.font(font_ref) {
        Err(Error::UnsupportedFontType { font_type, reference }) => {
            assert_eq!(font_type, "Type1/OpenType");
            assert_eq!(reference, font_ref);
        },
        other => panic!("Expected UnsupportedFontType, got {:?}", other),
    }
    assert_eq!(doc.loaded_font_count(), 0);
}

#[test]
fn test_simple_subtypes() {
    let mut doc = PdfDocument::new();
    let true_type = doc.add_object(Object::Dictionary(font_dict("TrueType", "Arial,Bold")));
    let multiple_master =
        doc.add_object(Object::Dictionary(font_dict("MMType1", "MyriadMM_400_600_")));

    assert_eq!(doc.font(true_type).unwrap().kind(), FontKind::TrueType);
    assert_eq!(doc.font(multiple_master).unwrap().kind(), FontKind::MultipleMaster);
}

#[test]
fn test_type3_font() {
    let mut doc = PdfDocument::new();
    let font_ref = doc.add_object(Object::Dictionary(dict(&[
        ("Type", Object::name("Font")),
        ("Subtype", Object::name("Type3")),
        ("Name", Object::name("T3")),
        (
            "FontMatrix",
            Object::Array(vec![
                Object::Real(0.01),
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(0.01),
                Object::Integer(0),
                Object::Integer(0),
            ]),
        ),
    ])));

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.kind(), FontKind::Type3);
    assert_eq!(font.name(), "T3");
    match font.variant() {
        FontVariant::Type3 { font_matrix } => assert_eq!(font_matrix[0], 0.01),
        other => panic!("Expected a Type 3 font, got {:?}", other),
    }
}

#[test]
fn test_type0_cff_descendant() {
    let mut doc = PdfDocument::new();
    let font_ref = add_type0(&mut doc, "CIDFontType0", &[]);

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.kind(), FontKind::CompositeCff);
    assert_eq!(
        font.variant(),
        &FontVariant::CompositeCff {
            encoding: "Identity-H".to_string(),
            program: None,
        }
    );
    // Composite fonts have no Unicode meaning without an explicit table
    assert!(font.code_map().is_empty());
    assert!(font.is_symbolic());
}

#[test]
fn test_type0_true_type_descendant_with_cid_to_gid_stream() {
    let mut doc = PdfDocument::new();
    let map = doc.add_object(Object::stream(Dictionary::new(), vec![0x00, 0x00, 0x00, 0x05, 0x00, 0x09]));
    let font_ref = add_type0(&mut doc, "CIDFontType2", &[("CIDToGIDMap", Object::Reference(map))]);

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.kind(), FontKind::CompositeTrueType);
    match font.variant() {
        FontVariant::CompositeTrueType {
            encoding,
            cid_to_gid,
            program,
        } => {
            assert_eq!(encoding, "Identity-H");
            assert_eq!(cid_to_gid, &CidToGidMap::Table(vec![0, 5, 9]));
            assert!(program.is_none());
        },
        other => panic!("Expected a composite TrueType font, got {:?}", other),
    }
}

#[test]
fn test_type0_identity_cid_to_gid_by_default() {
    let mut doc = PdfDocument::new();
    let font_ref = add_type0(&mut doc, "CIDFontType2", &[]);

    match doc.font(font_ref).unwrap().variant() {
        FontVariant::CompositeTrueType { cid_to_gid, .. } => {
            assert_eq!(cid_to_gid, &CidToGidMap::Identity)
        },
        other => panic!("Expected a composite TrueType font, got {:?}", other),
    }
}

#[test]
fn test_type0_unknown_descendant_is_unsupported() {
    let mut doc = PdfDocument::new();
    let font_ref = add_type0(&mut doc, "CIDFontType1", &[]);

    match doc.font(font_ref) {
        Err(Error::UnsupportedFontType { font_type, .. }) => {
            assert_eq!(font_type, "Type0/CIDFontType1")
        },
        other => panic!("Expected UnsupportedFontType, got {:?}", other),
    }
}

#[test]
fn test_missing_subtype_is_undefined() {
    let mut doc = PdfDocument::new();
    let font_ref = doc.add_object(Object::Dictionary(dict(&[
        ("Type", Object::name("Font")),
        ("BaseFont", Object::name("Helvetica")),
    ])));

    match doc.font(font_ref) {
        Err(Error::UndefinedFontType(reference)) => assert_eq!(reference, font_ref),
        other => panic!("Expected UndefinedFontType, got {:?}", other),
    }
}

#[test]
fn test_unknown_subtype_is_unsupported() {
    let mut doc = PdfDocument::new();
    let font_ref = doc.add_object(Object::Dictionary(font_dict("OpenType", "Inter")));

    let err = doc.font(font_ref).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFontType { ref font_type, .. } if font_type == "OpenType"));
    assert!(err.to_string().contains("OpenType"));
}

#[test]
fn test_missing_definition() {
    let doc = PdfDocument::new();
    assert!(matches!(doc.font(ObjectRef::new(42, 0)), Err(Error::ObjectNotFound(42, 0))));
}

#[test]
fn test_definition_must_be_dictionary() {
    let mut doc = PdfDocument::new();
    let font_ref = doc.add_object(Object::Integer(3));
    assert!(matches!(doc.font(font_ref), Err(Error::InvalidObjectType { .. })));
}

#[test]
fn test_equality_by_kind_and_name() {
    let mut doc = PdfDocument::new();
    let first = doc.add_object(Object::Dictionary(font_dict("Type1", "Helvetica")));
    let second = doc.add_object(Object::Dictionary(font_dict("Type1", "Helvetica")));
    let other = doc.add_object(Object::Dictionary(font_dict("TrueType", "Helvetica")));

    let first = doc.font(first).unwrap();
    let second = doc.font(second).unwrap();
    assert!(!std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_ne!(*first, *doc.font(other).unwrap());
}
