//! Decoding of embedded source blobs.
//!
//! An embedded source blob starts with a little-endian `i32` giving the uncompressed size
//! of the document text:
//!
//! ```text
//! EmbeddedSourceBlob ::= size:i32 payload
//! ```
//!
//! A size of 0 means the payload is the text itself. A positive size means the payload
//! is a raw DEFLATE stream that inflates to exactly that many bytes. Negative sizes are
//! invalid.
//!
//! The text follows the byte order mark convention: a UTF-8 BOM is dropped, UTF-16 BOMs
//! switch to UTF-16 decoding, anything else is UTF-8. Undecodable sequences become
//! U+FFFD.
//!
//! # Examples
//!
//! ```rust
//! use pdbscope::metadata::customdebuginformation::decode_embedded_source;
//!
//! let mut blob = 0_i32.to_le_bytes().to_vec();
//! blob.extend_from_slice(b"class C {}");
//!
//! let source = decode_embedded_source(&blob)?;
//! assert_eq!(source.content, "class C {}");
//! assert!(!source.was_compressed);
//! # Ok::<(), pdbscope::Error>(())
//! ```

use std::io::Read;

use flate2::read::DeflateDecoder;

use crate::{
    file::parser::Parser, metadata::customdebuginformation::types::EmbeddedSource, Result,
};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Decodes an embedded source blob into text.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the blob is shorter than its size prefix, the
/// size is negative, or the DEFLATE stream is corrupt or does not inflate to exactly the
/// announced size.
pub fn decode_embedded_source(blob: &[u8]) -> Result<EmbeddedSource> {
    let mut parser = Parser::new(blob);
    let Ok(size) = parser.read_le::<i32>() else {
        return Err(malformed_error!(
            "Embedded source blob too short - {} bytes",
            blob.len()
        ));
    };

    let payload = parser.rest();
    match size {
        0 => Ok(EmbeddedSource {
            content: decode_text(payload),
            was_compressed: false,
        }),
        size if size > 0 => {
            let expected = size as usize;
            let inflated = inflate(payload, expected)?;

            Ok(EmbeddedSource {
                content: decode_text(&inflated),
                was_compressed: true,
            })
        }
        negative => Err(malformed_error!(
            "Invalid embedded source size - {}",
            negative
        )),
    }
}

fn inflate(payload: &[u8], expected: usize) -> Result<Vec<u8>> {
    // One byte more than announced is enough to detect an oversized stream.
    let limit = expected as u64 + 1;
    let mut decoder = DeflateDecoder::new(payload).take(limit);

    // The size prefix is untrusted, so it only bounds the capacity hint.
    let mut inflated = Vec::with_capacity(expected.min(payload.len().saturating_mul(4)));
    decoder
        .read_to_end(&mut inflated)
        .map_err(|error| malformed_error!("Corrupt embedded source stream - {}", error))?;

    if inflated.len() != expected {
        return Err(malformed_error!(
            "Embedded source inflated to {} bytes, expected {}",
            inflated.len(),
            expected
        ));
    }

    Ok(inflated)
}

/// Decodes document text following the byte order mark convention.
///
/// Never fails; invalid sequences are replaced with U+FFFD.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(text) = bytes.strip_prefix(&UTF8_BOM) {
        return String::from_utf8_lossy(text).into_owned();
    }

    if let Some(text) = bytes.strip_prefix(&UTF16_LE_BOM) {
        return decode_utf16(text, u16::from_le_bytes);
    }

    if let Some(text) = bytes.strip_prefix(&UTF16_BE_BOM) {
        return decode_utf16(text, u16::from_be_bytes);
    }

    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();

    let mut text = widestring::U16Str::from_slice(&units).to_string_lossy();
    if bytes.len() % 2 != 0 {
        text.push(char::REPLACEMENT_CHARACTER);
    }

    text
}
