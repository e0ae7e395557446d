//! In-memory buffer backend.
//!
//! [`crate::file::memory::Memory`] owns a `Vec<u8>` and serves it through the
//! [`crate::file::Backend`] trait. It is used for inputs that already live in memory,
//! such as fuzzer corpora or bytes produced by the test builders.

use super::Backend;
use crate::{Error::OutOfBounds, Result};

/// Input backed by an owned byte buffer.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Wraps `data` without copying it.
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
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
        self.data.as_slice()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
