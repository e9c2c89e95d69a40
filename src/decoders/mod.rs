//! Stream decoder implementations for PDF filters.
//!
//! Font programs and ToUnicode streams are almost always compressed. This
//! module provides the filters needed to read them:
//! - FlateDecode (zlib/deflate)
//! - ASCIIHexDecode (hexadecimal encoding)
//!
//! Decoders can be chained together in a filter pipeline.

use crate::error::{Error, Result};

pub(crate) mod ascii_hex;
mod flate;

pub use ascii_hex::AsciiHexDecoder;
pub use flate::FlateDecoder;

/// Trait for PDF stream decoders.
///
/// Each decoder implements a specific PDF filter algorithm.
pub trait StreamDecoder {
    /// Decode the input data.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Get the name of this decoder (e.g., "FlateDecode").
    fn name(&self) -> &str;
}

/// Decode stream data using a filter pipeline.
///
/// Filters are applied in the order they are listed in the stream's
/// /Filter entry.
///
/// # Examples
///
/// ```
/// use pdf_typeface::decoders::decode_stream;
///
/// let decoded = decode_stream(b"414243>", &["ASCIIHexDecode".to_string()]).unwrap();
/// assert_eq!(decoded, b"ABC");
/// ```
pub fn decode_stream(data: &[u8], filters: &[String]) -> Result<Vec<u8>> {
    let mut current = data.to_vec();

    for filter_name in filters {
        let decoder: Box<dyn StreamDecoder> = match filter_name.as_str() {
            "FlateDecode" | "Fl" => Box::new(FlateDecoder),
            "ASCIIHexDecode" | "AHx" => Box::new(AsciiHexDecoder),
            _ => return Err(Error::UnsupportedFilter(filter_name.clone())),
        };

        current = decoder.decode(&current)?;
        log::trace!("{} produced {} bytes", decoder.name(), current.len());
    }

    Ok(current)
}
