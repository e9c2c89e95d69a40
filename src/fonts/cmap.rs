//! ToUnicode CMap parser.
//!
//! ToUnicode streams map a font's character codes to Unicode. The parser
//! keeps the byte length implied by each source code's hex digit count, so
//! `<41>` and `<0041>` produce distinct one- and two-byte codes.
//!
//! PDF Spec: ISO 32000-1:2008, Section 9.10.3 - ToUnicode CMaps

use crate::config::DuplicatePolicy;
use crate::decoders::ascii_hex::hex_value;
use crate::error::Result;
use crate::fonts::code_map::{ByteSequence, CodeMap};
use regex::Regex;

/// Largest number of codes expanded from a single bfrange entry.
const MAX_RANGE_SIZE: u32 = 0x1_0000;

/// Longest character code, in bytes.
const MAX_CODE_BYTES: usize = 4;

/// Parsed content of a ToUnicode CMap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToUnicodeCMap {
    /// Code to scalar pairs in stream order
    pub mappings: Vec<(ByteSequence, char)>,
    /// Code lengths declared by `codespacerange` sections, ascending
    pub code_lengths: Vec<usize>,
    /// Entries dropped because they map to several scalars or are malformed
    pub skipped: usize,
}

impl ToUnicodeCMap {
    /// Build a code table from the parsed pairs.
    pub fn to_code_map(&self, policy: DuplicatePolicy) -> Result<CodeMap> {
        CodeMap::from_pairs(self.mappings.iter().cloned(), policy)
    }

    /// Lengths of mapped codes that no `codespacerange` declares.
    ///
    /// Empty when the CMap declares no codespace.
    pub fn undeclared_lengths(&self) -> Vec<usize> {
        if self.code_lengths.is_empty() {
            return Vec::new();
        }
        let mut lengths: Vec<usize> = self
            .mappings
            .iter()
            .map(|(code, _)| code.len())
            .filter(|len| !self.code_lengths.contains(len))
            .collect();
        lengths.sort_unstable();
        lengths.dedup();
        lengths
    }
}

/// Parse a ToUnicode CMap stream (already decompressed).
///
/// Sections are handled in stream order:
///
/// ```text
/// 1 begincodespacerange
/// <00> <FF>
/// endcodespacerange
/// 2 beginbfchar
/// <41> <0041>
/// <42> <D835DF0C>
/// endbfchar
/// 1 beginbfrange
/// <61> <63> <0061>
/// endbfrange
/// ```
///
/// # Examples
///
/// ```
/// use pdf_typeface::fonts::parse_tounicode_cmap;
///
/// let cmap = parse_tounicode_cmap(b"beginbfchar\n<0041> <0042>\nendbfchar");
/// let (code, unicode) = &cmap.mappings[0];
/// assert_eq!(code.as_bytes(), &[0x00, 0x41]);
/// assert_eq!(*unicode, 'B');
/// ```
pub fn parse_tounicode_cmap(data: &[u8]) -> ToUnicodeCMap {
    lazy_static::lazy_static! {
        static ref SECTION_RE: Regex = Regex::new(
            r"(?s)begin(bfchar|bfrange|codespacerange)(.*?)end(?:bfchar|bfrange|codespacerange)"
        ).unwrap();
    }

    let content = String::from_utf8_lossy(data);
    let mut cmap = ToUnicodeCMap::default();

    for caps in SECTION_RE.captures_iter(&content) {
        let body = &caps[2];
        match &caps[1] {
            "bfchar" => parse_bfchar_section(body, &mut cmap),
            "bfrange" => parse_bfrange_section(body, &mut cmap),
            _ => parse_codespace_section(body, &mut cmap),
        }
    }

    cmap.code_lengths.sort_unstable();
    cmap.code_lengths.dedup();

    if cmap.skipped > 0 {
        log::debug!("ToUnicode CMap: {} entries skipped", cmap.skipped);
    }
    cmap
}

/// `<src> <dst>` entries.
fn parse_bfchar_section(body: &str, cmap: &mut ToUnicodeCMap) {
    lazy_static::lazy_static! {
        static ref RE: Regex = Regex::new(r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>").unwrap();
    }

    for caps in RE.captures_iter(body) {
        match (parse_code(&caps[1]), parse_destination(&caps[2])) {
            (Some(code), Some(unicode)) => {
                log::trace!("ToUnicode bfchar: {:?} -> {:?}", code, unicode);
                cmap.mappings.push((code, unicode));
            },
            _ => {
                log::trace!("ToUnicode bfchar: skipping <{}> <{}>", &caps[1], &caps[2]);
                cmap.skipped += 1;
            },
        }
    }
}

/// `<lo> <hi> <dst>` and `<lo> <hi> [<dst0> <dst1> ...]` entries.
fn parse_bfrange_section(body: &str, cmap: &mut ToUnicodeCMap) {
    lazy_static::lazy_static! {
        static ref RE: Regex = Regex::new(
            r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>\s*(?:<([0-9A-Fa-f]+)>|\[([^\]]*)\])"
        ).unwrap();
        static ref RE_HEX: Regex = Regex::new(r"<([0-9A-Fa-f]+)>").unwrap();
    }

    for caps in RE.captures_iter(body) {
        let (low, high) = match (parse_code(&caps[1]), parse_code(&caps[2])) {
            (Some(low), Some(high)) if low.len() == high.len() && high.value() >= low.value() => {
                (low, high)
            },
            _ => {
                cmap.skipped += 1;
                continue;
            },
        };
        let count = (high.value() - low.value()).saturating_add(1).min(MAX_RANGE_SIZE);
        let code_at = |offset: u32| ByteSequence::from_value(low.value() + offset, low.len());

        if let Some(dst) = caps.get(3) {
            // Sequential form: destinations increment from the first scalar
            let Some(first) = parse_destination(dst.as_str()) else {
                log::trace!("ToUnicode bfrange: unusable destination <{}>", dst.as_str());
                cmap.skipped += count as usize;
                continue;
            };
            for offset in 0..count {
                match char::from_u32(first as u32 + offset) {
                    Some(unicode) => cmap.mappings.push((code_at(offset), unicode)),
                    None => cmap.skipped += 1,
                }
            }
            log::trace!("ToUnicode bfrange: {:?}..{:?} from {:?}", low, high, first);
        } else if let Some(array) = caps.get(4) {
            let destinations: Vec<&str> = RE_HEX
                .captures_iter(array.as_str())
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();
            if destinations.len() != count as usize {
                log::warn!(
                    "ToUnicode bfrange array size mismatch: expected {} entries for {:?}..{:?}, got {}",
                    count,
                    low,
                    high,
                    destinations.len()
                );
            }
            for (offset, dst) in destinations.iter().take(count as usize).enumerate() {
                match parse_destination(dst) {
                    Some(unicode) => cmap.mappings.push((code_at(offset as u32), unicode)),
                    None => cmap.skipped += 1,
                }
            }
        }
    }
}

/// `<lo> <hi>` entries; only the declared code length is kept.
fn parse_codespace_section(body: &str, cmap: &mut ToUnicodeCMap) {
    lazy_static::lazy_static! {
        static ref RE: Regex = Regex::new(r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>").unwrap();
    }

    for caps in RE.captures_iter(body) {
        if let Some(low) = parse_code(&caps[1]) {
            cmap.code_lengths.push(low.len());
        }
    }
}

/// Source code: big-endian bytes, one byte per two hex digits.
///
/// An odd digit count is left-padded (`<041>` is `<0041>`).
fn parse_code(hex: &str) -> Option<ByteSequence> {
    let digits = hex.as_bytes();
    let len = (digits.len() + 1) / 2;
    if len == 0 || len > MAX_CODE_BYTES {
        return None;
    }

    let mut bytes = vec![0u8; len];
    // Walk from the least significant digit so odd counts pad on the left
    for (i, &digit) in digits.iter().rev().enumerate() {
        let nibble = hex_value(digit)?;
        let byte = &mut bytes[len - 1 - i / 2];
        *byte |= if i % 2 == 0 { nibble } else { nibble << 4 };
    }
    Some(ByteSequence::from(bytes))
}

/// Destination string: UTF-16BE, which must decode to exactly one scalar.
///
/// Digit counts that are not a multiple of four are read as a plain code
/// point (`<20C49>`). Multi-scalar destinations (ligature expansions such as
/// `<00660069>`) yield `None`.
fn parse_destination(hex: &str) -> Option<char> {
    if hex.len() % 4 != 0 {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }

    let units = hex
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).ok().and_then(|s| u16::from_str_radix(s, 16).ok()))
        .collect::<Option<Vec<u16>>>()?;

    let mut scalars = char::decode_utf16(units);
    match (scalars.next(), scalars.next()) {
        (Some(Ok(unicode)), None) => Some(unicode),
        _ => None,
    }
}
