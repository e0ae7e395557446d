//! Metadata root of a Portable PDB.
//!
//! A Portable PDB is a bare ECMA-335 metadata block: it starts directly with the `BSJB`
//! metadata root, followed by a version string and the stream directory. The root is
//! also where the format is detected; any input that does not start with the signature
//! is reported as [`crate::Error::NotPortablePdb`] so the caller can try the Windows PDB
//! reader instead.
//!
//! # Layout
//!
//! | Offset | Size | Field            |
//! |--------|------|------------------|
//! | 0      | 4    | Signature `BSJB` |
//! | 4      | 2    | Major version    |
//! | 6      | 2    | Minor version    |
//! | 8      | 4    | Reserved         |
//! | 12     | 4    | Version length   |
//! | 16     | n    | Version string   |
//! | 16+n   | 2    | Flags            |
//! | 18+n   | 2    | Stream count     |
//! | 20+n   | ...  | Stream headers   |
//!
//! # Reference
//! - [ECMA-335 II.24.2.1](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use crate::{
    file::io::{read_le, read_le_at},
    metadata::streams::StreamHeader,
    Error::{NotPortablePdb, OutOfBounds},
    Result,
};

/// The magic signature of a metadata root, `BSJB` read as a little-endian `u32`
pub const METADATA_ROOT_MAGIC: u32 = 0x424A_5342;

/// Upper bound on the number of streams in a well-formed Portable PDB
pub const MAX_STREAMS: u16 = 8;

/// The parsed metadata root and its stream directory.
pub struct Root {
    /// Magic signature, always [`METADATA_ROOT_MAGIC`]
    pub signature: u32,
    /// Major metadata version
    pub major_version: u16,
    /// Minor metadata version
    pub minor_version: u16,
    /// Reserved, always 0
    pub reserved: u32,
    /// Length of the padded version string
    pub length: u32,
    /// Version string, e.g. `PDB v1.0`, with padding removed
    pub version: String,
    /// Reserved flags
    pub flags: u16,
    /// Number of streams
    pub stream_number: u16,
    /// The stream directory
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Parses the metadata root at the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotPortablePdb`] if `data` is shorter than the signature or
    /// does not start with it. Any inconsistency after the signature has been recognized
    /// is reported as [`crate::Error::Malformed`] or [`crate::Error::OutOfBounds`].
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 4 {
            return Err(NotPortablePdb);
        }

        let signature = read_le::<u32>(data)?;
        if signature != METADATA_ROOT_MAGIC {
            return Err(NotPortablePdb);
        }

        if data.len() < 20 {
            return Err(OutOfBounds);
        }

        let version_string_length = read_le_at::<u32>(data, &mut 12)? as usize;
        let Some(version_end) = version_string_length.checked_add(16) else {
            return Err(malformed_error!(
                "Version string length causing integer overflow - {}",
                version_string_length
            ));
        };

        if version_end + 4 > data.len() {
            return Err(OutOfBounds);
        }

        let version_bytes = &data[16..version_end];
        let version_len = version_bytes
            .iter()
            .position(|byte| *byte == 0)
            .unwrap_or(version_bytes.len());
        let version = String::from_utf8_lossy(&version_bytes[..version_len]).into_owned();

        let mut offset = version_end;
        let flags = read_le_at::<u16>(data, &mut offset)?;
        let stream_count = read_le_at::<u16>(data, &mut offset)?;
        if stream_count == 0 || stream_count > MAX_STREAMS {
            return Err(malformed_error!("Invalid stream count - {}", stream_count));
        }

        let mut streams = Vec::with_capacity(stream_count as usize);
        let mut stream_offset = offset;
        for _ in 0..stream_count {
            if stream_offset > data.len() {
                return Err(OutOfBounds);
            }

            let new_stream = StreamHeader::from(&data[stream_offset..])?;
            match new_stream.offset.checked_add(new_stream.size) {
                Some(range) => {
                    if range as usize > data.len() {
                        return Err(OutOfBounds);
                    }
                }
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        new_stream.offset,
                        new_stream.size
                    ))
                }
            }

            if streams
                .iter()
                .any(|existing: &StreamHeader| existing.name == new_stream.name)
            {
                return Err(malformed_error!("Duplicate stream - {}", new_stream.name));
            }

            stream_offset += new_stream.encoded_size();
            streams.push(new_stream);
        }

        Ok(Root {
            signature,
            major_version: read_le::<u16>(&data[4..])?,
            minor_version: read_le::<u16>(&data[6..])?,
            reserved: read_le::<u32>(&data[8..])?,
            length: u32::try_from(version_string_length)
                .map_err(|_| malformed_error!("Version string length too large"))?,
            version,
            flags,
            stream_number: stream_count,
            stream_headers: streams,
        })
    }

    /// Returns the header of the stream called `name`, if present.
    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&StreamHeader> {
        self.stream_headers.iter().find(|header| header.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x42, 0x53, 0x4A, 0x42,
            0x01, 0x00,
            0x01, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
            b'P', b'D', b'B', b' ', b'v', b'1', b'.', b'0', 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
            0x02, 0x00,

            0x3C, 0x00, 0x00, 0x00, // StreamHeader
            0x04, 0x00, 0x00, 0x00,
            b'#', b'P', b'd', b'b', 0x00, 0x00, 0x00, 0x00,

            0x40, 0x00, 0x00, 0x00, // StreamHeader
            0x00, 0x00, 0x00, 0x00,
            0x23, 0x7E, 0x00, 0x00,

            0xAA, 0xBB, 0xCC, 0xDD,
        ];

        let parsed_header = Root::read(&header_bytes).unwrap();

        assert_eq!(parsed_header.signature, METADATA_ROOT_MAGIC);
        assert_eq!(parsed_header.major_version, 1);
        assert_eq!(parsed_header.minor_version, 1);
        assert_eq!(parsed_header.length, 12);
        assert_eq!(parsed_header.version, "PDB v1.0");
        assert_eq!(parsed_header.stream_number, 2);
        assert_eq!(parsed_header.stream_headers[0].name, "#Pdb");
        assert_eq!(parsed_header.stream_headers[0].offset, 0x3C);
        assert_eq!(parsed_header.stream_headers[1].name, "#~");
        assert_eq!(parsed_header.stream("#~").unwrap().offset, 0x40);
        assert!(parsed_header.stream("#Blob").is_none());
    }

    #[test]
    fn not_portable_pdb() {
        assert!(matches!(Root::read(b"BSJ"), Err(NotPortablePdb)));
        assert!(matches!(Root::read(&[]), Err(NotPortablePdb)));
        assert!(matches!(
            Root::read(b"Microsoft C/C++ MSF 7.00\r\n\x1aDS\0\0\0"),
            Err(NotPortablePdb)
        ));
    }

    #[test]
    fn truncated_after_signature() {
        assert!(matches!(Root::read(b"BSJB\x01\x00"), Err(OutOfBounds)));
    }

    #[test]
    fn stream_out_of_range() {
        #[rustfmt::skip]
        let header_bytes = [
            0x42, 0x53, 0x4A, 0x42,
            0x01, 0x00, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
            0x01, 0x00,
            0x20, 0x00, 0x00, 0x00,
            0xFF, 0x00, 0x00, 0x00,
            0x23, 0x7E, 0x00, 0x00,
        ];

        assert!(matches!(Root::read(&header_bytes), Err(OutOfBounds)));
    }

    #[test]
    fn invalid_stream_count() {
        #[rustfmt::skip]
        let header_bytes = [
            0x42, 0x53, 0x4A, 0x42,
            0x01, 0x00, 0x01, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
            0x00, 0x00,
        ];

        assert!(matches!(
            Root::read(&header_bytes),
            Err(crate::Error::Malformed { .. })
        ));
    }
}
