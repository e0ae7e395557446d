use crate::{file::parser::Parser, metadata::streams::Blob, Result};

/// Assembles a document name from its `DocumentName` blob.
///
/// The blob is `separator:u8 part+` where every part is a compressed `#Blob` index of a
/// UTF-8 fragment. The fragments are joined with the separator character; a separator
/// of 0 joins them without anything in between. Invalid UTF-8 in a fragment is replaced
/// with U+FFFD.
///
/// # Arguments
/// * `data` - The `DocumentName` blob
/// * `blobs` - The `#Blob` heap the parts point into
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for an empty blob and propagates heap lookup
/// failures for the parts.
pub fn parse_document_name(data: &[u8], blobs: &Blob) -> Result<String> {
    let mut parser = Parser::new(data);
    if parser.is_empty() {
        return Err(malformed_error!("Empty document name blob"));
    }

    let separator = parser.read_le::<u8>()?;
    let mut name = String::new();
    let mut first = true;

    while parser.has_more_data() {
        let part_index = parser.read_compressed_uint()?;
        let part = blobs.get(part_index as usize)?;

        if !first && separator != 0 {
            name.push(char::from(separator));
        }
        first = false;

        name.push_str(&String::from_utf8_lossy(part));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const HEAP: [u8; 14] = [
        0x00,
        0x01, b'C',                    // 1
        0x03, b's', b'r', b'c',        // 3
        0x04, b'a', b'.', b'c', b's',  // 7
        0x01, 0xFF,                    // 12: invalid UTF-8
    ];

    #[test]
    fn joins_with_separator() {
        let blobs = Blob::from(&HEAP).unwrap();
        let name = parse_document_name(&[b'\\', 0x01, 0x03, 0x07], &blobs).unwrap();

        assert_eq!(name, "C\\src\\a.cs");
    }

    #[test]
    fn leading_empty_part() {
        let blobs = Blob::from(&HEAP).unwrap();
        let name = parse_document_name(&[b'/', 0x00, 0x07], &blobs).unwrap();

        assert_eq!(name, "/a.cs");
    }

    #[test]
    fn zero_separator_concatenates() {
        let blobs = Blob::from(&HEAP).unwrap();
        let name = parse_document_name(&[0x00, 0x01, 0x07, 0x07], &blobs).unwrap();

        assert_eq!(name, "Ca.csa.cs");
    }

    #[test]
    fn separator_only() {
        let blobs = Blob::from(&HEAP).unwrap();
        assert_eq!(parse_document_name(&[b'/'], &blobs).unwrap(), "");
    }

    #[test]
    fn lossy_parts() {
        let blobs = Blob::from(&HEAP).unwrap();
        let name = parse_document_name(&[b'/', 0x01, 0x0C], &blobs).unwrap();

        assert_eq!(name, "C/\u{FFFD}");
    }

    #[test]
    fn invalid() {
        let blobs = Blob::from(&HEAP).unwrap();

        assert!(parse_document_name(&[], &blobs).is_err());
        assert!(parse_document_name(&[b'/', 0x40], &blobs).is_err());
    }
}
