use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::metadata::tables::types::{CodedIndexType, TableId};

/// Row count of one table and the width of indexes into it.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Number of bits needed to store the largest row id
    pub bits: u8,
    /// `true` if a simple index into this table is 4 bytes wide
    pub is_large: bool,
}

impl TableRowInfo {
    /// Computes the index width for a table of `rows` rows.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Index sizing information shared by every table of a Portable PDB.
///
/// Combines the row counts of the debug tables (from the `#~` stream) with the row
/// counts of the type-system tables they reference (from the `#Pdb` stream), and the
/// heap index widths. Row readers consult it to know whether a given column is 2 or 4
/// bytes wide.
#[derive(Clone, Default)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared handle to a [`TableInfo`]
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Heap size flag: `#Strings` indexes are 4 bytes
    pub const HEAP_LARGE_STRINGS: u8 = 0x01;
    /// Heap size flag: `#GUID` indexes are 4 bytes
    pub const HEAP_LARGE_GUID: u8 = 0x02;
    /// Heap size flag: `#Blob` indexes are 4 bytes
    pub const HEAP_LARGE_BLOB: u8 = 0x04;

    /// Builds the sizing information from per-table row counts, indexed by table id.
    ///
    /// # Arguments
    /// * `row_counts` - Row count per table id; ids beyond the slice count as empty
    /// * `heap_size_flags` - The `HeapSizes` byte of the table stream header
    #[must_use]
    pub fn new(row_counts: &[u32], heap_size_flags: u8) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::SLOTS],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: heap_size_flags & Self::HEAP_LARGE_STRINGS != 0,
            is_large_index_guid: heap_size_flags & Self::HEAP_LARGE_GUID != 0,
            is_large_index_blob: heap_size_flags & Self::HEAP_LARGE_BLOB != 0,
        };

        for (slot, rows) in table_info.rows.iter_mut().zip(row_counts) {
            *slot = TableRowInfo::new(*rows);
        }
        for kind in CodedIndexType::iter() {
            table_info.coded_indexes[kind as usize] = table_info.coded_index_bits(kind);
        }

        table_info
    }

    /// Sizing for the listed row counts and heap width flags.
    #[cfg(test)]
    pub fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut row_counts = vec![0_u32; TableId::SLOTS];
        for (table_id, rows) in valid_tables {
            row_counts[*table_id as usize] = *rows;
        }

        let flags = [
            (large_str, Self::HEAP_LARGE_STRINGS),
            (large_guid, Self::HEAP_LARGE_GUID),
            (large_blob, Self::HEAP_LARGE_BLOB),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .fold(0_u8, |acc, (_, flag)| acc | *flag);

        Self::new(&row_counts, flags)
    }

    /// `true` if simple indexes into `id` are 4 bytes wide.
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// `true` if `#Strings` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// `true` if `#GUID` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// `true` if `#Blob` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index in bytes.
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        index_width(self.is_large_index_str)
    }

    /// Width of a `#GUID` index in bytes.
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        index_width(self.is_large_index_guid)
    }

    /// Width of a `#Blob` index in bytes.
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        index_width(self.is_large_index_blob)
    }

    /// Row information of `table`.
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// Width of a simple index into `table_id` in bytes.
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        index_width(self.rows[table_id as usize].bits > 16)
    }

    /// Width of a coded index of kind `coded_index_type` in bytes.
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        index_width(self.coded_indexes[coded_index_type as usize] > 16)
    }

    /// Bits needed by the widest target table plus the tag.
    fn coded_index_bits(&self, kind: CodedIndexType) -> u8 {
        let widest = kind
            .tables()
            .iter()
            .map(|table| self.rows[*table as usize].bits)
            .max()
            .unwrap_or(1);

        widest + kind.tag_bits()
    }
}

fn index_width(large: bool) -> u8 {
    if large {
        4
    } else {
        2
    }
}
