//! Shared machinery for reading Portable PDB metadata tables.
//!
//! Every table is stored as a dense array of fixed-size rows. The width of each column
//! depends on the heap size flags and on the row counts of the referenced tables, which
//! [`TableInfo`] precomputes once per file. [`MetadataTable`] then gives random and
//! sequential access to the rows of one table, decoding each with its [`RowReadable`]
//! implementation on demand.

mod codedindex;
mod tableid;
mod tableinfo;

use crate::{Error::OutOfBounds, Result};
use std::marker::PhantomData;

pub use codedindex::{CodedIndex, CodedIndexType, CodedIndexTypeIter};
pub use tableid::{TableId, TableIdIter};
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};

/// Decoding of one table row from its binary representation.
pub trait RowReadable: Sized {
    /// Size of one row in bytes for the given index widths.
    fn row_size(sizes: &TableInfoRef) -> u32;

    /// Reads the row at `offset`, advancing it past the row.
    ///
    /// # Arguments
    /// * `data` - The table data
    /// * `offset` - Position of the row, advanced by [`RowReadable::row_size`]
    /// * `rid` - The 1-based row id
    /// * `sizes` - Index widths
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row exceeds `data`.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// Typed view over the rows of one metadata table.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Creates a view over `row_count` rows at the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than the table.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = T::row_size(&sizes);
        let size = u64::from(row_count) * u64::from(row_size);
        if size > data.len() as u64 {
            return Err(OutOfBounds);
        }

        Ok(MetadataTable {
            data: &data[..size as usize],
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Total size of the table in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Size of one row in bytes.
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Reads the row with the 1-based id `rid`.
    #[must_use]
    pub fn get(&self, rid: u32) -> Option<T> {
        if !(1..=self.row_count).contains(&rid) {
            return None;
        }

        let mut offset = (rid as usize - 1) * self.row_size as usize;
        T::row_read(self.data, &mut offset, rid, &self.sizes).ok()
    }

    /// Iterates over all rows in table order.
    #[must_use]
    pub fn iter(&self) -> TableIterator<'_, 'a, T> {
        TableIterator {
            table: self,
            next_rid: 1,
        }
    }
}

impl<'t, 'a, T: RowReadable> IntoIterator for &'t MetadataTable<'a, T> {
    type Item = T;
    type IntoIter = TableIterator<'t, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over the rows of a [`MetadataTable`].
///
/// Stops at the first row that fails to decode.
pub struct TableIterator<'t, 'a, T> {
    table: &'t MetadataTable<'a, T>,
    next_rid: u32,
}

impl<T: RowReadable> Iterator for TableIterator<'_, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.table.get(self.next_rid)?;
        self.next_rid += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (u64::from(self.table.row_count) + 1).saturating_sub(u64::from(self.next_rid));
        let left = usize::try_from(left).unwrap_or(usize::MAX);
        (0, Some(left))
    }
}
