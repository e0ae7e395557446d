//! Memory-mapped file backend.
//!
//! [`crate::file::physical::Physical`] maps a PDB read-only into the address space with
//! `memmap2`. The mapping lives exactly as long as the backend and is released when it is
//! dropped, on every exit path of the caller.

use super::Backend;
use crate::{Error::OutOfBounds, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// Input backed by a read-only memory map of a file on disk.
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Opens and maps the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path)?;

        // SAFETY: read-only map; the file must not be truncated while it is mapped.
        let mmap = unsafe { Mmap::map(&file) }?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn physical() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"Microsoft C/C++ MSF 7.00\r\n\x1aDS\0\0\0").unwrap();
        tmp.flush().unwrap();

        let physical = Physical::new(tmp.path()).unwrap();

        assert_eq!(physical.len(), 32);
        assert_eq!(physical.data()[0], b'M');
        assert_eq!(physical.data_slice(26, 3).unwrap(), b"\x1aDS");
        assert!(physical.data_slice(30, 3).is_err());
        assert!(physical.data_slice(usize::MAX, 1).is_err());
    }

    #[test]
    fn physical_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Physical::new(dir.path().join("missing.pdb"));

        assert!(matches!(result, Err(crate::Error::FileError(_))));
    }
}
