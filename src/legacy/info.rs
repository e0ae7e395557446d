//! PDB info stream (stream 1).
//!
//! # Layout
//!
//! | Size  | Field                                        |
//! |-------|----------------------------------------------|
//! | 4     | Version                                      |
//! | 4     | Signature, a timestamp                       |
//! | 4     | Age                                          |
//! | 16    | GUID, only for [`PdbInfoVersion::Vc70`] on   |
//! | ...   | Named stream map                             |
//!
//! The named stream map is a serialized hash table: a buffer of null-terminated names,
//! then `size`, `capacity`, the present and deleted bit vectors and one
//! `(name offset, stream index)` pair per present bucket.

use std::collections::HashMap;

use strum::{Display, FromRepr};

use crate::{file::parser::Parser, Result};

/// Known versions of the PDB info stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[repr(u32)]
pub enum PdbInfoVersion {
    /// Visual C++ 2.0
    Vc2 = 19_941_610,
    /// Visual C++ 4.0
    Vc4 = 19_950_623,
    /// Visual C++ 4.1
    Vc41 = 19_950_814,
    /// Visual C++ 5.0
    Vc50 = 19_960_307,
    /// Visual C++ 6.0
    Vc98 = 19_970_604,
    /// Visual C++ 7.0 prerelease
    Vc70Dep = 19_990_604,
    /// Visual C++ 7.0, first version carrying a GUID
    Vc70 = 20_000_404,
    /// Visual C++ 8.0
    Vc80 = 20_030_901,
    /// Visual C++ 11.0
    Vc110 = 20_091_201,
    /// Visual C++ 14.0
    Vc140 = 20_140_508,
}

/// The parsed PDB info stream.
#[derive(Debug, Clone, Default)]
pub struct PdbInfo {
    /// Raw version number
    pub version: u32,
    /// Timestamp written by the linker
    pub signature: u32,
    /// Number of times the PDB was written
    pub age: u32,
    /// GUID matching the debug directory entry of the image, absent before VC 7.0
    pub guid: Option<uguid::Guid>,
    /// Named streams, name to stream index
    pub named_streams: HashMap<String, u32>,
}

impl PdbInfo {
    /// Parses the PDB info stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for a truncated stream and
    /// [`crate::Error::Malformed`] for an inconsistent named stream map.
    pub fn parse(data: &[u8]) -> Result<PdbInfo> {
        let mut parser = Parser::new(data);

        let version = parser.read_le::<u32>()?;
        let signature = parser.read_le::<u32>()?;
        let age = parser.read_le::<u32>()?;
        let guid = if version >= PdbInfoVersion::Vc70 as u32 {
            let mut bytes = [0_u8; 16];
            bytes.copy_from_slice(parser.read_bytes(16)?);
            Some(uguid::Guid::from_bytes(bytes))
        } else {
            None
        };

        let named_streams = read_named_stream_map(&mut parser)?;

        Ok(PdbInfo {
            version,
            signature,
            age,
            guid,
            named_streams,
        })
    }

    /// The version, if it is one of the known ones.
    #[must_use]
    pub fn known_version(&self) -> Option<PdbInfoVersion> {
        PdbInfoVersion::from_repr(self.version)
    }

    /// Stream index of the named stream `name`.
    #[must_use]
    pub fn named_stream(&self, name: &str) -> Option<u32> {
        self.named_streams.get(name).copied()
    }
}

fn read_named_stream_map(parser: &mut Parser) -> Result<HashMap<String, u32>> {
    let names_len = parser.read_le::<u32>()? as usize;
    let names = parser.read_bytes(names_len)?;

    let size = parser.read_le::<u32>()?;
    let capacity = parser.read_le::<u32>()?;
    if size > capacity {
        return Err(malformed_error!(
            "Named stream map holds more entries than buckets - {} > {}",
            size,
            capacity
        ));
    }

    let present = read_bit_vector(parser)?;
    // Deleted buckets carry no entries
    read_bit_vector(parser)?;

    let present_buckets: Vec<u32> = (0..capacity)
        .filter(|bucket| {
            present
                .get((bucket / 32) as usize)
                .is_some_and(|word| word & (1_u32 << (bucket % 32)) != 0)
        })
        .collect();

    if present_buckets.len() != size as usize {
        return Err(malformed_error!(
            "Named stream map size does not match present buckets - {} != {}",
            size,
            present_buckets.len()
        ));
    }

    let mut streams = HashMap::with_capacity(present_buckets.len());
    for _ in present_buckets {
        let key = parser.read_le::<u32>()? as usize;
        let stream = parser.read_le::<u32>()?;

        let Some(tail) = names.get(key..) else {
            return Err(malformed_error!("Stream name offset outside name buffer - {}", key));
        };
        let end = tail.iter().position(|byte| *byte == 0).unwrap_or(tail.len());
        let name = String::from_utf8_lossy(&tail[..end]).into_owned();

        log::trace!("named stream '{}' -> {}", name, stream);
        streams.entry(name).or_insert(stream);
    }

    Ok(streams)
}

fn read_bit_vector(parser: &mut Parser) -> Result<Vec<u32>> {
    let words = parser.read_le::<u32>()? as usize;
    if words > parser.remaining() / 4 {
        return Err(malformed_error!("Bit vector larger than stream - {} words", words));
    }

    (0..words).map(|_| parser.read_le::<u32>()).collect()
}
