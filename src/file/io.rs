//! Low-level byte order and safe reading utilities for PDB parsing.
//!
//! Every binary structure this crate touches (the metadata root, the `#Pdb` and `#~`
//! streams, table rows, the MSF superblock and stream directory) is little-endian. This
//! module provides the bounds-checked primitives used to read them.
//!
//! # Key Components
//!
//! - [`crate::file::io::LittleEndian`] - Integer types the readers accept
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at an offset and advance the offset
//! - [`crate::file::io::read_le_at_dyn`] - Read a 2 or 4 byte heap/table index
//!
//! # Error Handling
//!
//! All reading functions return [`crate::Error::OutOfBounds`] if the buffer holds fewer
//! bytes than the requested type.
//!
//! # Examples
//!
//! ```rust
//! use pdbscope::file::io::{read_le, read_le_at};
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00];
//! let first: u16 = read_le(&data)?;
//!
//! let mut offset = 2;
//! let second: u32 = read_le_at(&data, &mut offset)?;
//! assert_eq!((first, second, offset), (1, 2, 6));
//! # Ok::<(), pdbscope::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Fixed-width integers that can be decoded from little-endian bytes.
pub trait LittleEndian: Sized {
    /// `[u8; N]` with `N` the width of the type
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Decodes the value.
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! little_endian {
    ($($ty:ty),*) => {$(
        impl LittleEndian for $ty {
            type Bytes = [u8; std::mem::size_of::<$ty>()];

            fn from_le_bytes(bytes: Self::Bytes) -> Self {
                <$ty>::from_le_bytes(bytes)
            }
        }
    )*};
}

little_endian!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Reads a little-endian `T` from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too short.
pub fn read_le<T: LittleEndian>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Reads a little-endian `T` at `offset` and moves `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too short. `offset` is
/// unchanged on error.
pub fn read_le_at<T: LittleEndian>(data: &[u8], offset: &mut usize) -> Result<T> {
    let end = offset
        .checked_add(std::mem::size_of::<T>())
        .ok_or(OutOfBounds)?;
    let bytes = data
        .get(*offset..end)
        .and_then(|slice| <T::Bytes as TryFrom<&[u8]>>::try_from(slice).ok())
        .ok_or(OutOfBounds)?;

    *offset = end;
    Ok(T::from_le_bytes(bytes))
}

/// Reads a heap or table index that is either 2 or 4 bytes wide, widening it to `u32`.
///
/// # Arguments
/// * `data` - The buffer to read from
/// * `offset` - Position to read at, advanced by 2 or 4
/// * `is_large` - `true` for a 4 byte index
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too short.
pub fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    if is_large {
        read_le_at::<u32>(data, offset)
    } else {
        read_le_at::<u16>(data, offset).map(u32::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn read_le_u8() {
        let result = read_le::<u8>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x01);
    }

    #[test]
    fn read_le_u16() {
        let result = read_le::<u16>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0201);
    }

    #[test]
    fn read_le_u32() {
        let result = read_le::<u32>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0403_0201);
    }

    #[test]
    fn read_le_u64() {
        let result = read_le::<u64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0807_0605_0403_0201);
    }

    #[test]
    fn read_le_i32_negative() {
        let result = read_le::<i32>(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
        assert_eq!(result, -1);
    }

    #[test]
    fn read_le_at_advances() {
        let mut offset = 2;
        let result = read_le_at::<u16>(&TEST_BUFFER, &mut offset).unwrap();
        assert_eq!(result, 0x0403);
        assert_eq!(offset, 4);
    }

    #[test]
    fn read_le_at_dyn_sizes() {
        let mut offset = 0;
        assert_eq!(read_le_at_dyn(&TEST_BUFFER, &mut offset, false).unwrap(), 0x0201);
        assert_eq!(offset, 2);
        assert_eq!(
            read_le_at_dyn(&TEST_BUFFER, &mut offset, true).unwrap(),
            0x0605_0403
        );
        assert_eq!(offset, 6);
    }

    #[test]
    fn errors() {
        let buffer = [0xFF, 0xFF, 0xFF];
        assert!(matches!(read_le::<u32>(&buffer), Err(OutOfBounds)));

        let mut offset = 2;
        assert!(matches!(
            read_le_at::<u16>(&buffer, &mut offset),
            Err(OutOfBounds)
        ));
        assert_eq!(offset, 2);

        let mut offset = usize::MAX;
        assert!(matches!(
            read_le_at::<u8>(&buffer, &mut offset),
            Err(OutOfBounds)
        ));
    }
}
