//! Stream header entries of the metadata root.
//!
//! Each header names one stream and locates it relative to the start of the metadata
//! root. The name is a null-terminated ASCII string of at most 32 bytes, padded so the
//! next header starts on a 4 byte boundary.

use crate::{file::io::read_le, Error::OutOfBounds, Result};

/// Stream names that may appear in a Portable PDB.
pub const STREAM_NAMES: [&str; 8] = [
    "#Pdb", "#~", "#-", "#Strings", "#US", "#Blob", "#GUID", "#JTD",
];

/// One entry of the stream directory.
pub struct StreamHeader {
    /// Offset of the stream, relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Name of the stream, e.g. `#Blob`
    pub name: String,
}

impl StreamHeader {
    /// Parses a stream header from the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and
    /// [`crate::Error::Malformed`] for an unterminated or unknown name.
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        if data.len() < 9 {
            return Err(OutOfBounds);
        }

        let name_area = &data[8..data.len().min(8 + 32)];
        let Some(terminator) = name_area.iter().position(|byte| *byte == 0) else {
            return Err(malformed_error!("Unterminated stream header name"));
        };

        let name = String::from_utf8_lossy(&name_area[..terminator]).into_owned();
        if !STREAM_NAMES.iter().any(|valid_name| name == *valid_name) {
            return Err(malformed_error!("Invalid stream header name - {}", name));
        }

        Ok(StreamHeader {
            offset: read_le::<u32>(data)?,
            size: read_le::<u32>(&data[4..])?,
            name,
        })
    }

    /// Number of bytes this header occupies, including name padding.
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        8 + ((self.name.len() + 1 + 3) & !3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            b'#', b'P', b'd', b'b', 0x00, 0x00, 0x00, 0x00,
        ];

        let parsed_header = StreamHeader::from(&header_bytes).unwrap();

        assert_eq!(parsed_header.offset, 0x6C);
        assert_eq!(parsed_header.size, 0x45A4);
        assert_eq!(parsed_header.name, "#Pdb");
        assert_eq!(parsed_header.encoded_size(), 16);
    }

    #[test]
    fn uncompressed_tables_name() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x23, 0x2D, 0x00, 0x00,
        ];

        let parsed_header = StreamHeader::from(&header_bytes).unwrap();
        assert_eq!(parsed_header.name, "#-");
        assert_eq!(parsed_header.encoded_size(), 12);
    }

    #[test]
    fn crafted_invalid() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            0x24, 0x7E, 0x00,
        ];

        assert!(StreamHeader::from(&header_bytes).is_err());
        assert!(StreamHeader::from(&header_bytes[..8]).is_err());
    }

    #[test]
    fn unterminated_name() {
        let mut header_bytes = vec![0x00; 8];
        header_bytes.extend_from_slice(b"#Strings#Strings#Strings#Strings#");

        assert!(matches!(
            StreamHeader::from(&header_bytes),
            Err(crate::Error::Malformed { .. })
        ));
    }
}
