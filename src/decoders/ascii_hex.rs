//! ASCIIHexDecode implementation.
//!
//! Pairs of hex digits become bytes; whitespace is skipped, `>` ends the
//! data, and a trailing lone digit is padded with an implicit `0`.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// ASCIIHexDecode filter implementation.
pub struct AsciiHexDecoder;

impl StreamDecoder for AsciiHexDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2);
        let mut pending: Option<u8> = None;

        for &byte in input {
            if byte == b'>' {
                break;
            }
            if byte.is_ascii_whitespace() {
                continue;
            }
            let nibble = hex_value(byte).ok_or_else(|| {
                Error::Decode(format!("ASCIIHexDecode: invalid hex digit '{}'", byte as char))
            })?;
            match pending.take() {
                Some(high) => output.push((high << 4) | nibble),
                None => pending = Some(nibble),
            }
        }

        if let Some(high) = pending {
            output.push(high << 4);
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        "ASCIIHexDecode"
    }
}

/// Numeric value of one ASCII hex digit.
pub(crate) fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}
