//! `#Strings` heap.
//!
//! Holds null-terminated UTF-8 identifiers. In a Portable PDB these are mostly local
//! variable and constant names; the core only needs the heap to be addressable.

use std::ffi::CStr;

use crate::{Error::OutOfBounds, Result};

/// View over the `#Strings` heap.
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Wraps the heap bytes. An absent heap is represented by an empty slice.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a non-empty heap does not start with the
    /// mandatory empty string.
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if !data.is_empty() && data[0] != 0 {
            return Err(malformed_error!("Provided #Strings heap does not start with 0"));
        }

        Ok(Strings { data })
    }

    /// Returns the string starting at byte offset `index`. Index 0 is the empty string.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for an index past the heap, and
    /// [`crate::Error::Malformed`] for unterminated or non UTF-8 entries.
    pub fn get(&self, index: usize) -> Result<&'a str> {
        if index == 0 {
            return Ok("");
        }

        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        match CStr::from_bytes_until_nul(&self.data[index..]) {
            Ok(result) => result
                .to_str()
                .map_err(|_| malformed_error!("Invalid string at index - {}", index)),
            Err(_) => Err(malformed_error!("Invalid string at index - {}", index)),
        }
    }
}
