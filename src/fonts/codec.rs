//! Text decoding and encoding through a font's code table.
//!
//! Decoding scans the byte string with a growing window: starting at one
//! byte, the window widens until it matches a code or reaches the font's
//! longest code length. The first match wins, so a valid short code shadows
//! any longer code sharing its prefix.

use crate::error::{Error, Result};
use crate::fonts::code_map::{ByteSequence, CodeMap};

/// Character emitted for byte runs that match no code.
pub const FALLBACK_CHAR: char = ' ';

/// Result of decoding with fallback tracking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedText {
    /// Decoded text (fallback positions hold [`FALLBACK_CHAR`])
    pub text: String,
    /// Byte offsets where no code matched and the fallback was emitted
    pub fallbacks: Vec<usize>,
}

impl DecodedText {
    /// Whether every byte run matched a code.
    pub fn is_exact(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

/// Decode a byte string, recording where the fallback was used.
///
/// `max_code_length` below 1 is treated as 1, so decoding always makes
/// progress and an empty table yields one fallback per byte.
///
/// An unmatched run consumes the whole window it was tried with. When the
/// true code length differs, the following characters shift; callers that
/// need exact text should check [`DecodedText::fallbacks`].
pub fn decode_detailed(codes: &CodeMap, max_code_length: usize, bytes: &[u8]) -> DecodedText {
    let max_len = max_code_length.max(1);
    let mut decoded = DecodedText {
        text: String::with_capacity(bytes.len()),
        fallbacks: Vec::new(),
    };

    let mut position = 0;
    let mut window = 1;
    while position < bytes.len() {
        let end = position + window;
        if let Some(unicode) = codes.get(&bytes[position..end]) {
            decoded.text.push(unicode);
            position = end;
            window = 1;
            continue;
        }

        // Widen the window while the font has longer codes and bytes remain
        if window < max_len && end < bytes.len() {
            window += 1;
            continue;
        }

        log::trace!(
            "No code for <{}> at offset {}, substituting space",
            ByteSequence::from(&bytes[position..end]).to_hex(),
            position
        );
        decoded.text.push(FALLBACK_CHAR);
        decoded.fallbacks.push(position);
        position = end;
        window = 1;
    }

    decoded
}

/// Decode a byte string into text.
pub fn decode(codes: &CodeMap, max_code_length: usize, bytes: &[u8]) -> String {
    decode_detailed(codes, max_code_length, bytes).text
}

/// Encode text into the font's byte representation.
///
/// Fails on the first scalar that has no code.
pub fn encode(codes: &CodeMap, text: &str) -> Result<Vec<u8>> {
    let mut encoded = Vec::with_capacity(text.len() * codes.max_code_length().max(1));
    for ch in text.chars() {
        let code = codes.code_for(ch).ok_or(Error::UnmappableCharacter(ch))?;
        encoded.extend_from_slice(code.as_bytes());
    }
    Ok(encoded)
}
