//! Low-level byte stream parser for metadata blob decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based binary data parser
//! used wherever a structure is decoded sequentially: blob heap entries with their
//! compressed length prefix, `DocumentName` blobs made of compressed heap indices, and
//! the length-prefixed embedded source payloads.
//!
//! # Key Components
//!
//! - [`crate::file::parser::Parser::read_le`] - Read a little-endian primitive and advance
//! - [`crate::file::parser::Parser::read_compressed_uint`] - ECMA-335 II.23.2 compressed integer
//! - [`crate::file::parser::Parser::read_bytes`] - Borrow a run of raw bytes and advance
//!
//! # Examples
//!
//! ```rust
//! use pdbscope::file::parser::Parser;
//!
//! let data = [0x81, 0x02, 0x2F];
//! let mut parser = Parser::new(&data);
//! assert_eq!(parser.read_compressed_uint()?, 0x102);
//! assert_eq!(parser.read_le::<u8>()?, b'/');
//! assert!(!parser.has_more_data());
//! # Ok::<(), pdbscope::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, LittleEndian},
    Error::OutOfBounds,
    Result,
};

/// Cursor over a borrowed byte slice.
///
/// Every read is bounds-checked and advances the position only on success.
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Starts reading `data` at offset 0.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns `true` if the underlying slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` while unread bytes remain.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Returns the unread tail of the buffer without advancing.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Reads a little-endian `T`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain.
    pub fn read_le<T: LittleEndian>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Reads an ECMA-335 II.23.2 compressed unsigned integer.
    ///
    /// | First byte | Length | Range               |
    /// |------------|--------|---------------------|
    /// | `0xxxxxxx` | 1      | `0` - `0x7F`        |
    /// | `10xxxxxx` | 2      | up to `0x3FFF`      |
    /// | `110xxxxx` | 4      | up to `0x1FFF_FFFF` |
    ///
    /// Blob lengths and the parts of a `DocumentName` blob are stored this way.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for a truncated value and
    /// [`crate::Error::Malformed`] for a first byte starting with `111`.
    pub fn read_compressed_uint(&mut self) -> Result<u32> {
        let lead = self.read_le::<u8>()?;
        match lead >> 5 {
            0b000..=0b011 => Ok(u32::from(lead)),
            0b100 | 0b101 => {
                let low = self.read_le::<u8>()?;
                Ok((u32::from(lead & 0x3F) << 8) | u32::from(low))
            }
            0b110 => {
                let tail = self.read_bytes(3)?;
                Ok(u32::from_be_bytes([lead & 0x1F, tail[0], tail[1], tail[2]]))
            }
            _ => Err(malformed_error!(
                "Compressed integer cannot start with 0x{:02X}",
                lead
            )),
        }
    }

    fn end_of(&self, length: usize) -> Result<usize> {
        let end = self.position.checked_add(length).ok_or(OutOfBounds)?;

        if end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(end)
    }

    /// Borrows the next `length` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end = self.end_of(length)?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }
}
