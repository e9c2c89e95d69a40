//! Code table tests: ToUnicode CMaps, implicit encodings, text decoding and
//! encoding through resolved fonts.
//!
//! Per PDF Spec ISO 32000-1:2008:
//! - Section 9.10.3: ToUnicode CMaps map character codes to Unicode
//! - Section 9.6.6: simple fonts map bytes through /Encoding and /Differences
//! - codes of a composite font may be several bytes long

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_typeface::config::{DuplicatePolicy, FontOptions};
use pdf_typeface::fonts::FALLBACK_CHAR;
use pdf_typeface::{Dictionary, Error, Object, ObjectRef, PdfDocument};
use proptest::prelude::*;
use std::io::Write;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dict(entries: &[(&str, Object)]) -> Dictionary {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

const TWO_BYTE_CMAP: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
3 beginbfchar
<0003> <0020>
<0024> <0041>
<0025> <0042>
endbfchar
1 beginbfrange
<0044> <0046> <0061>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

fn add_to_unicode(doc: &mut PdfDocument, cmap: &str) -> ObjectRef {
    doc.add_object(Object::stream(Dictionary::new(), cmap.as_bytes().to_vec()))
}

fn add_composite(doc: &mut PdfDocument, cmap: &str) -> ObjectRef {
    let to_unicode = add_to_unicode(doc, cmap);
    let descendant = doc.add_object(Object::Dictionary(dict(&[
        ("Type", Object::name("Font")),
        ("Subtype", Object::name("CIDFontType2")),
        ("BaseFont", Object::name("NotoSans")),
    ])));
    doc.add_object(Object::Dictionary(dict(&[
        ("Type", Object::name("Font")),
        ("Subtype", Object::name("Type0")),
        ("BaseFont", Object::name("NotoSans")),
        ("Encoding", Object::name("Identity-H")),
        ("DescendantFonts", Object::Array(vec![Object::Reference(descendant)])),
        ("ToUnicode", Object::Reference(to_unicode)),
    ])))
}

fn add_simple(doc: &mut PdfDocument, subtype: &str, base_font: &str, extra: &[(&str, Object)]) -> ObjectRef {
    let mut font = dict(&[
        ("Type", Object::name("Font")),
        ("Subtype", Object::name(subtype)),
        ("BaseFont", Object::name(base_font)),
    ]);
    font.extend(dict(extra));
    doc.add_object(Object::Dictionary(font))
}

#[test]
fn test_two_byte_to_unicode() {
    init_logging();
    let mut doc = PdfDocument::new();
    let font_ref = add_composite(&mut doc, TWO_BYTE_CMAP);

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.max_code_length(), 2);
    assert_eq!(font.code_map().len(), 6);
    assert_eq!(font.decode(&[0x00, 0x24, 0x00, 0x03, 0x00, 0x45]), "A b");
    assert_eq!(font.encode("Bac").unwrap(), vec![0x00, 0x25, 0x00, 0x44, 0x00, 0x46]);
    assert!(!font.is_symbolic());
}

#[test]
fn test_decode_fallback_positions() {
    let mut doc = PdfDocument::new();
    let font_ref = add_composite(&mut doc, TWO_BYTE_CMAP);
    let font = doc.font(font_ref).unwrap();

    let decoded = font.decode_detailed(&[0x00, 0x24, 0xFF, 0xFF, 0x00, 0x25]);
    assert_eq!(decoded.text, format!("A{}B", FALLBACK_CHAR));
    assert_eq!(decoded.fallbacks, vec![2]);
    assert!(!decoded.is_exact());

    // A trailing odd byte cannot widen past the end of the buffer
    let decoded = font.decode_detailed(&[0x00, 0x24, 0x00]);
    assert_eq!(decoded.text, "A ");
    assert_eq!(decoded.fallbacks, vec![2]);

    assert_eq!(font.decode(&[]), "");
}

#[test]
fn test_encode_unmappable_character() {
    let mut doc = PdfDocument::new();
    let font_ref = add_composite(&mut doc, TWO_BYTE_CMAP);
    let font = doc.font(font_ref).unwrap();

    match font.encode("AZ") {
        Err(Error::UnmappableCharacter(ch)) => assert_eq!(ch, 'Z'),
        other => panic!("Expected UnmappableCharacter, got {:?}", other),
    }
    assert_eq!(font.encode("").unwrap(), Vec::<u8>::new());
}

#[test]
fn test_flate_compressed_to_unicode() {
    init_logging();
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(b"1 beginbfchar\n<01> <263A>\nendbfchar\n1 beginbfrange\n<02> <03> <0041>\nendbfrange")
        .unwrap();
    let compressed = encoder.finish().unwrap();

    let mut doc = PdfDocument::new();
    let to_unicode = doc.add_object(Object::stream(
        dict(&[("Filter", Object::name("FlateDecode"))]),
        compressed,
    ));
    let font_ref = add_simple(
        &mut doc,
        "TrueType",
        "ABCDEF+Smiley",
        &[("ToUnicode", Object::Reference(to_unicode))],
    );

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.decode(&[0x01, 0x02, 0x03]), "\u{263A}AB");
    assert_eq!(font.encode("BA\u{263A}").unwrap(), vec![0x03, 0x02, 0x01]);
    assert!(!font.is_symbolic());
}

#[test]
fn test_surrogate_pair_destination() {
    let mut doc = PdfDocument::new();
    let to_unicode = add_to_unicode(&mut doc, "1 beginbfchar\n<0041> <D835DC9C>\nendbfchar");
    let font_ref = add_simple(&mut doc, "Type3", "", &[("ToUnicode", Object::Reference(to_unicode))]);

    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.decode(&[0x00, 0x41]), "\u{1D49C}");
}

#[test]
fn test_duplicate_mapping_policies() {
    let cmap = "2 beginbfchar\n<01> <0041>\n<02> <0041>\nendbfchar";

    let mut strict = PdfDocument::with_options(FontOptions::strict());
    let to_unicode = add_to_unicode(&mut strict, cmap);
    let font_ref = add_simple(&mut strict, "TrueType", "Dup", &[("ToUnicode", Object::Reference(to_unicode))]);
    match strict.font(font_ref) {
        Err(Error::DuplicateMappingEntry { unicode, .. }) => assert_eq!(unicode, 'A'),
        other => panic!("Expected DuplicateMappingEntry, got {:?}", other),
    }
    assert_eq!(strict.loaded_font_count(), 0);

    let mut lenient = PdfDocument::new();
    let to_unicode = add_to_unicode(&mut lenient, cmap);
    let font_ref = add_simple(&mut lenient, "TrueType", "Dup", &[("ToUnicode", Object::Reference(to_unicode))]);
    let font = lenient.font(font_ref).unwrap();
    assert_eq!(font.encode("A").unwrap(), vec![0x01]);
    assert_eq!(font.decode(&[0x02]), " ");

    let mut keep_last =
        PdfDocument::with_options(FontOptions::default().with_duplicate_policy(DuplicatePolicy::KeepLast));
    let to_unicode = add_to_unicode(&mut keep_last, cmap);
    let font_ref = add_simple(&mut keep_last, "TrueType", "Dup", &[("ToUnicode", Object::Reference(to_unicode))]);
    let font = keep_last.font(font_ref).unwrap();
    assert_eq!(font.encode("A").unwrap(), vec![0x02]);
    assert_eq!(font.decode(&[0x01]), " ");
}

#[test]
fn test_bfrange_with_mismatched_code_lengths_is_skipped() {
    let cmap = "1 beginbfrange\n<00> <0101> <0041>\nendbfrange\n1 beginbfchar\n<05> <0058>\nendbfchar";

    let mut strict = PdfDocument::with_options(FontOptions::strict());
    let to_unicode = add_to_unicode(&mut strict, cmap);
    let font_ref = add_simple(&mut strict, "TrueType", "Wide", &[("ToUnicode", Object::Reference(to_unicode))]);
    let font = strict.font(font_ref).unwrap();
    assert_eq!(font.code_map().len(), 1);
    assert_eq!(font.decode(&[0x05]), "X");
    assert_eq!(font.decode(&[0x00]), " ");
}

#[test]
fn test_standard_encoding_for_type1() {
    let mut doc = PdfDocument::new();
    let font_ref = add_simple(&mut doc, "Type1", "Helvetica", &[]);
    let font = doc.font(font_ref).unwrap();

    assert_eq!(font.decode(b"Hello"), "Hello");
    // StandardEncoding puts a right single quote at 0x27
    assert_eq!(font.decode(b"'"), "\u{2019}");
    assert!(matches!(font.encode("'"), Err(Error::UnmappableCharacter('\''))));
    assert!(!font.is_symbolic());
}

#[test]
fn test_win_ansi_default_for_true_type() {
    let mut doc = PdfDocument::new();
    let font_ref = add_simple(&mut doc, "TrueType", "Verdana", &[]);
    let font = doc.font(font_ref).unwrap();

    assert_eq!(font.decode(&[0x80, 0xE9]), "€é");
    assert_eq!(font.encode("é").unwrap(), vec![0xE9]);
    // No ToUnicode and not a Latin standard font
    assert!(font.is_symbolic());
}

#[test]
fn test_encoding_differences() {
    let mut doc = PdfDocument::new();
    let encoding = doc.add_object(Object::Dictionary(dict(&[
        ("Type", Object::name("Encoding")),
        ("BaseEncoding", Object::name("WinAnsiEncoding")),
        (
            "Differences",
            Object::Array(vec![
                Object::Integer(0x80),
                Object::name("alpha"),
                Object::name("beta"),
                Object::Integer(0xC0),
                Object::name("uni2126"),
            ]),
        ),
    ])));
    let font_ref = add_simple(&mut doc, "Type1", "Times-Roman", &[("Encoding", Object::Reference(encoding))]);
    let font = doc.font(font_ref).unwrap();

    assert_eq!(font.decode(&[0x80, 0x81, 0xC0, 0x41]), "αβ\u{2126}A");
    assert_eq!(font.encode("β\u{2126}").unwrap(), vec![0x81, 0xC0]);
}

#[test]
fn test_symbol_font_encoding() {
    let mut doc = PdfDocument::new();
    let font_ref = add_simple(&mut doc, "Type1", "Symbol", &[]);
    let font = doc.font(font_ref).unwrap();

    assert_eq!(font.decode(b"a"), "α");
    assert!(font.is_symbolic());
}

#[test]
fn test_predefined_to_unicode_name_is_ignored() {
    let mut doc = PdfDocument::new();
    let font_ref = add_simple(&mut doc, "Type1", "Courier", &[("ToUnicode", Object::name("Identity-H"))]);
    let font = doc.font(font_ref).unwrap();
    assert_eq!(font.decode(b"ok"), "ok");
}

fn proptest_font() -> std::sync::Arc<pdf_typeface::Font> {
    let mut doc = PdfDocument::new();
    let font_ref = add_composite(&mut doc, TWO_BYTE_CMAP);
    doc.font(font_ref).unwrap()
}

proptest! {
    #[test]
    fn prop_encode_then_decode_is_identity(indexes in prop::collection::vec(0usize..6, 0..32)) {
        let font = proptest_font();
        let alphabet = [' ', 'A', 'B', 'a', 'b', 'c'];
        let text: String = indexes.iter().map(|&i| alphabet[i]).collect();

        let bytes = font.encode(&text).unwrap();
        prop_assert_eq!(bytes.len(), text.chars().count() * 2);
        prop_assert_eq!(font.decode(&bytes), text);
    }

    #[test]
    fn prop_decode_then_encode_is_identity(codes in prop::collection::vec(prop::sample::select(vec![0x03u8, 0x24, 0x25, 0x44, 0x45, 0x46]), 0..32)) {
        let font = proptest_font();
        let bytes: Vec<u8> = codes.iter().flat_map(|&low| [0x00, low]).collect();

        let decoded = font.decode_detailed(&bytes);
        prop_assert!(decoded.is_exact());
        prop_assert_eq!(font.encode(&decoded.text).unwrap(), bytes);
    }

    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let font = proptest_font();
        let decoded = font.decode_detailed(&bytes);
        prop_assert!(decoded.text.chars().count() <= bytes.len());
        prop_assert!(decoded.fallbacks.windows(2).all(|w| w[0] < w[1]));
    }
}
