//! MSF 7.00 container reader.
//!
//! # Layout
//!
//! The file is an array of fixed-size blocks. Block 0 holds the superblock:
//!
//! | Offset | Size | Field                                          |
//! |--------|------|------------------------------------------------|
//! | 0      | 32   | Magic `Microsoft C/C++ MSF 7.00\r\n\x1ADS\0\0\0` |
//! | 32     | 4    | Block size, 512, 1024, 2048 or 4096            |
//! | 36     | 4    | Block of the active free block map             |
//! | 40     | 4    | Number of blocks                               |
//! | 44     | 4    | Size of the stream directory in bytes          |
//! | 48     | 4    | Reserved                                       |
//! | 52     | 4    | Block holding the directory block list         |
//!
//! The stream directory lists the stream count, the size of every stream
//! (`0xFFFFFFFF` for a nil stream) and then the block list of every stream.

use crate::{
    file::io::{read_le, read_le_at},
    legacy::{info::PdbInfo, LegacySymReader},
    Error::{NotSupported, OutOfBounds},
    Result,
};

/// Magic at the start of an MSF 7.00 file
pub const MSF_MAGIC: &[u8; 32] = b"Microsoft C/C++ MSF 7.00\r\n\x1aDS\0\0\0";

/// Stream size marking a nil stream
const NIL_STREAM_SIZE: u32 = 0xFFFF_FFFF;

/// Index of the PDB info stream
const PDB_INFO_STREAM: usize = 1;

/// Named streams carrying provenance data, in lookup order
const SOURCE_SERVER_STREAMS: [&str; 2] = ["srcsrv", "sourcelink"];

/// Block list of one stream.
struct MsfStream {
    size: u32,
    blocks: Vec<u32>,
}

/// A Windows PDB read through its MSF 7.00 container.
pub struct MsfSymReader<'a> {
    data: &'a [u8],
    block_size: u32,
    block_count: u32,
    streams: Vec<MsfStream>,
    info: PdbInfo,
}

impl<'a> MsfSymReader<'a> {
    /// Reads the superblock, stream directory and PDB info stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] if `data` is not an MSF 7.00 file, and
    /// [`crate::Error::Malformed`] or [`crate::Error::OutOfBounds`] if its directory is
    /// inconsistent.
    pub fn read(data: &'a [u8]) -> Result<MsfSymReader<'a>> {
        if data.len() < 56 || !data.starts_with(MSF_MAGIC) {
            return Err(NotSupported);
        }

        let mut offset = MSF_MAGIC.len();
        let block_size = read_le_at::<u32>(data, &mut offset)?;
        let _free_block_map = read_le_at::<u32>(data, &mut offset)?;
        let block_count = read_le_at::<u32>(data, &mut offset)?;
        let directory_size = read_le_at::<u32>(data, &mut offset)?;
        let _reserved = read_le_at::<u32>(data, &mut offset)?;
        let block_map_addr = read_le_at::<u32>(data, &mut offset)?;

        if !matches!(block_size, 512 | 1024 | 2048 | 4096) {
            return Err(malformed_error!("Invalid MSF block size - {}", block_size));
        }

        let mut reader = MsfSymReader {
            data,
            block_size,
            block_count,
            streams: Vec::new(),
            info: PdbInfo::default(),
        };

        let directory_blocks = directory_size.div_ceil(block_size);
        if directory_blocks > block_size / 4 {
            return Err(malformed_error!(
                "MSF stream directory too large - {} bytes",
                directory_size
            ));
        }

        let block_map = reader.block(block_map_addr)?;
        let mut directory_block_list = Vec::with_capacity(directory_blocks as usize);
        for index in 0..directory_blocks as usize {
            directory_block_list.push(read_le::<u32>(&block_map[index * 4..])?);
        }

        let directory = reader.assemble(&directory_block_list, directory_size)?;
        reader.streams = reader.parse_directory(&directory)?;

        let info_data = reader.stream(PDB_INFO_STREAM)?;
        if info_data.is_empty() {
            return Err(malformed_error!("MSF file without PDB info stream"));
        }
        reader.info = PdbInfo::parse(&info_data)?;

        log::debug!(
            "MSF 7.00 file, block size {}, {} streams, PDB info version {}",
            block_size,
            reader.streams.len(),
            reader.info.version
        );

        Ok(reader)
    }

    /// The parsed PDB info stream.
    #[must_use]
    pub fn info(&self) -> &PdbInfo {
        &self.info
    }

    /// Block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Number of streams in the directory, nil streams included.
    #[must_use]
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Reads the contents of stream `index`. Nil streams are empty.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `index` is not in the directory, and
    /// propagates block lookup failures.
    pub fn stream(&self, index: usize) -> Result<Vec<u8>> {
        let Some(stream) = self.streams.get(index) else {
            return Err(malformed_error!("MSF stream index out of range - {}", index));
        };

        self.assemble(&stream.blocks, stream.size)
    }

    /// Reads the named stream `name`, `None` if the PDB has no such stream.
    ///
    /// # Errors
    /// Propagates failures of [`MsfSymReader::stream`].
    pub fn named_stream(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match self.info.named_stream(name) {
            Some(index) => Ok(Some(self.stream(index as usize)?)),
            None => Ok(None),
        }
    }

    fn block(&self, index: u32) -> Result<&'a [u8]> {
        if index >= self.block_count {
            return Err(malformed_error!(
                "MSF block index out of range - {} >= {}",
                index,
                self.block_count
            ));
        }

        let start = index as usize * self.block_size as usize;
        let end = start + self.block_size as usize;
        self.data.get(start..end).ok_or(OutOfBounds)
    }

    fn assemble(&self, blocks: &[u32], size: u32) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(size as usize);
        for index in blocks {
            data.extend_from_slice(self.block(*index)?);
        }

        if data.len() < size as usize {
            return Err(OutOfBounds);
        }
        data.truncate(size as usize);
        Ok(data)
    }

    fn parse_directory(&self, directory: &[u8]) -> Result<Vec<MsfStream>> {
        let mut offset = 0;
        let stream_count = read_le_at::<u32>(directory, &mut offset)? as usize;
        if stream_count > (directory.len() - offset) / 4 {
            return Err(malformed_error!(
                "MSF stream count exceeds directory - {}",
                stream_count
            ));
        }

        let mut sizes = Vec::with_capacity(stream_count);
        for _ in 0..stream_count {
            sizes.push(read_le_at::<u32>(directory, &mut offset)?);
        }

        let mut streams = Vec::with_capacity(stream_count);
        for size in sizes {
            if size == NIL_STREAM_SIZE {
                streams.push(MsfStream {
                    size: 0,
                    blocks: Vec::new(),
                });
                continue;
            }

            let block_count = size.div_ceil(self.block_size);
            if block_count as usize > (directory.len() - offset) / 4 {
                return Err(malformed_error!(
                    "MSF stream block list exceeds directory - {} blocks",
                    block_count
                ));
            }

            let mut blocks = Vec::with_capacity(block_count as usize);
            for _ in 0..block_count {
                blocks.push(read_le_at::<u32>(directory, &mut offset)?);
            }

            streams.push(MsfStream { size, blocks });
        }

        Ok(streams)
    }
}

impl LegacySymReader for MsfSymReader<'_> {
    fn source_server_data(&self) -> Result<Option<Vec<u8>>> {
        for name in SOURCE_SERVER_STREAMS {
            if let Some(data) = self.named_stream(name)? {
                if !data.is_empty() {
                    log::debug!("source server data in named stream '{}'", name);
                    return Ok(Some(data));
                }
            }
        }

        Ok(None)
    }
}
