//! FlateDecode (zlib/deflate) implementation.
//!
//! Uses the flate2 crate for zlib decompression.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};
use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::io::Read;

/// FlateDecode filter implementation.
///
/// Decompresses data using the zlib/deflate algorithm.
pub struct FlateDecoder;

impl StreamDecoder for FlateDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(input);
        let mut output = Vec::new();

        match decoder.read_to_end(&mut output) {
            Ok(_) => Ok(output),
            Err(e) => {
                // Partial recovery: if we got ANY data before the error, use it
                if !output.is_empty() {
                    log::warn!(
                        "FlateDecode partial recovery: extracted {} bytes before corruption: {}",
                        output.len(),
                        e
                    );
                    return Ok(output);
                }

                // Some producers write raw deflate data without the zlib wrapper
                log::info!("Zlib decode failed, trying raw deflate");
                output.clear();
                let mut deflate_decoder = DeflateDecoder::new(input);

                match deflate_decoder.read_to_end(&mut output) {
                    Ok(_) if !output.is_empty() => {
                        log::info!("Raw deflate recovery succeeded: {} bytes", output.len());
                        Ok(output)
                    },
                    Err(_) if !output.is_empty() => {
                        log::warn!(
                            "Raw deflate partial recovery: extracted {} bytes before error",
                            output.len()
                        );
                        Ok(output)
                    },
                    _ => Err(Error::Decode(format!("FlateDecode failed: {}", e))),
                }
            },
        }
    }

    fn name(&self) -> &str {
        "FlateDecode"
    }
}
