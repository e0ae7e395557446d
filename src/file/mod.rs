//! Read-only access to PDB input bytes.
//!
//! This module abstracts over where the bytes of a PDB come from. Both container formats
//! are parsed directly out of one contiguous byte slice, so all a caller needs is a
//! [`crate::file::File`] that hands that slice out for as long as it is alive.
//!
//! # Key Components
//!
//! - [`crate::file::File`] - The input handle, owning one backend
//! - [`crate::file::Backend`] - Trait for data sources
//! - [`crate::file::parser::Parser`] - Cursor over a byte slice
//! - [`crate::file::io`] - Bounds-checked little-endian reads
//!
//! # Data Sources
//!
//! - **Physical files** - memory mapped through `memmap2`, see [`File::from_file`]
//! - **Memory buffers** - an owned `Vec<u8>`, see [`File::from_mem`]
//!
//! Either way, the resource is released when the [`crate::file::File`] is dropped.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pdbscope::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("tests/samples/app.pdb"))?;
//! println!("Loaded {} bytes", file.len());
//!
//! let mut out = Vec::new();
//! let found = pdbscope::process(file.data(), &mut out)?;
//! # let _ = found;
//! # Ok::<(), pdbscope::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{Error::Empty, Result};
use memory::Memory;
use physical::Physical;

/// Backend trait for file data sources.
///
/// Implementors provide the raw bytes of an input, whether mapped from disk or held in
/// memory. The trait requires `Send + Sync` so an opened [`crate::file::File`] can be
/// handed to another thread.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns all of the data.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data.
    fn len(&self) -> usize;
}

/// An opened PDB input.
///
/// Holds the backend for as long as the parsed containers borrow from it.
pub struct File {
    data: Box<dyn Backend>,
}

impl File {
    /// Opens the file at `path` and memory-maps it read-only.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped, and
    /// [`crate::Error::Empty`] if it has no content.
    pub fn from_file(path: &Path) -> Result<File> {
        let input = Physical::new(path)?;
        Self::load(input)
    }

    /// Wraps an in-memory buffer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if `data` is empty.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);
        Self::load(input)
    }

    fn load<T: Backend + 'static>(input: T) -> Result<File> {
        if input.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(input),
        })
    }

    /// Returns the total size of the input in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the input holds no bytes. Never the case for a loaded file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Returns the complete input.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the input.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.data.data_slice(offset, len)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn from_mem() {
        let file = File::from_mem(b"BSJB\x01\x00\x01\x00".to_vec()).unwrap();

        assert_eq!(file.len(), 8);
        assert!(!file.is_empty());
        assert_eq!(&file.data()[..4], b"BSJB");
        assert_eq!(file.data_slice(4, 2).unwrap(), &[0x01, 0x00]);
        assert!(file.data_slice(6, 4).is_err());
    }

    #[test]
    fn from_mem_empty() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Empty)));
    }

    #[test]
    fn from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[0xAB; 100]).unwrap();
        tmp.flush().unwrap();

        let file = File::from_file(tmp.path()).unwrap();
        assert_eq!(file.len(), 100);
        assert_eq!(file.data()[99], 0xAB);
    }

    #[test]
    fn from_file_empty() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(File::from_file(tmp.path()), Err(Empty)));
    }
}
