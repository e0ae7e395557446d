//! `#GUID` heap.
//!
//! A flat array of 16 byte GUIDs addressed by a 1-based index: index `n` refers to bytes
//! `16 * (n - 1) .. 16 * n`. Index 0 is the nil reference and never names an entry.

use crate::{Error::OutOfBounds, Result};

/// View over the `#GUID` heap.
pub struct Guid<'a> {
    data: &'a [u8],
}

impl<'a> Guid<'a> {
    /// Wraps the heap bytes. An absent heap is represented by an empty slice.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is not a whole number of GUIDs.
    pub fn from(data: &'a [u8]) -> Result<Guid<'a>> {
        if data.len() % 16 != 0 {
            return Err(malformed_error!(
                "Size of #GUID heap is not a multiple of 16 - {}",
                data.len()
            ));
        }

        Ok(Guid { data })
    }

    /// Number of GUIDs in the heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / 16
    }

    /// Returns `true` if the heap holds no GUIDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the GUID at the 1-based `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for index 0 or an index past the heap.
    pub fn get(&self, index: usize) -> Result<uguid::Guid> {
        if index < 1 || index > self.len() {
            return Err(OutOfBounds);
        }

        let offset_start = (index - 1) * 16;
        let mut buffer = [0u8; 16];
        buffer.copy_from_slice(&self.data[offset_start..offset_start + 16]);

        Ok(uguid::Guid::from_bytes(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data : [u8; 48] = [
            /* 1 - 0..16  */  0x8e, 0x90, 0x37, 0xd4, 0xe6, 0x65, 0x7c, 0x48, 0x97, 0x35, 0x7b, 0xdf, 0xf6, 0x99, 0xbe, 0xa5,
            /* 2 - 16..32 */  0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA,
            /* 3 - 32..48 */  0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let guids = Guid::from(&data).unwrap();

        assert_eq!(guids.len(), 3);
        assert_eq!(
            guids.get(1).unwrap(),
            uguid::guid!("d437908e-65e6-487c-9735-7bdff699bea5")
        );
        assert_eq!(
            guids.get(2).unwrap(),
            uguid::guid!("AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA")
        );
        assert_eq!(guids.get(3).unwrap(), uguid::Guid::ZERO);
    }

    #[test]
    fn index_bounds() {
        let data = [0x11_u8; 32];
        let guids = Guid::from(&data).unwrap();

        assert!(matches!(guids.get(0), Err(OutOfBounds)));
        assert!(guids.get(2).is_ok());
        assert!(matches!(guids.get(3), Err(OutOfBounds)));
    }

    #[test]
    fn invalid_size() {
        assert!(Guid::from(&[0x00; 15]).is_err());
        assert!(Guid::from(&[]).unwrap().is_empty());
    }
}
