//! `#Blob` heap.
//!
//! Each entry is a compressed length (ECMA-335 II.23.2) followed by that many bytes. In a
//! Portable PDB the heap holds document names, document hashes, sequence points, import
//! scopes and the values of custom debug information rows.

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// View over the `#Blob` heap.
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Wraps the heap bytes. An absent heap is represented by an empty slice.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a non-empty heap does not start with the
    /// mandatory empty blob.
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if !data.is_empty() && data[0] != 0 {
            return Err(malformed_error!("Invalid memory for #Blob heap"));
        }

        Ok(Blob { data })
    }

    /// Returns the blob at byte offset `index`. Index 0 is the empty blob.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the index or the encoded length point past
    /// the end of the heap.
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        if index == 0 {
            return Ok(&[]);
        }

        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(&self.data[index..]);
        let len = parser.read_compressed_uint()? as usize;
        parser.read_bytes(len)
    }
}
