//! `#~` table stream of a Portable PDB.
//!
//! The stream starts with a header describing which tables are present, how wide heap
//! indexes are and how many rows each table has. The rows of all present tables follow
//! back to back in table id order.
//!
//! # Layout
//!
//! | Offset | Size  | Field                                   |
//! |--------|-------|-----------------------------------------|
//! | 0      | 4     | Reserved                                |
//! | 4      | 1     | Major version                           |
//! | 5      | 1     | Minor version                           |
//! | 6      | 1     | Heap size flags                         |
//! | 7      | 1     | Reserved                                |
//! | 8      | 8     | Valid tables bit vector                 |
//! | 16     | 8     | Sorted tables bit vector                |
//! | 24     | 4 * n | Row count per valid table               |
//! | ...    | 4     | Extra data, only with heap flag `0x20`  |
//! | ...    | ...   | Table rows                              |
//!
//! The uncompressed `#-` variant shares this header.

use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::{
    file::io::read_le_at,
    metadata::{
        streams::PdbStream,
        tables::{
            CustomDebugInformationRaw, DocumentRaw, ImportScopeRaw, LocalConstantRaw,
            LocalScopeRaw, LocalVariableRaw, MetadataTable, MethodDebugInformationRaw,
            RowReadable, StateMachineMethodRaw, TableId, TableInfo, TableInfoRef,
        },
    },
    Error::OutOfBounds,
    Result,
};

/// Heap size flag announcing four bytes of extra data after the row counts
const HEAP_EXTRA_DATA: u8 = 0x20;

/// The table data of one present debug table.
pub enum TableData<'a> {
    /// `0x30`
    Document(MetadataTable<'a, DocumentRaw>),
    /// `0x31`
    MethodDebugInformation(MetadataTable<'a, MethodDebugInformationRaw>),
    /// `0x32`
    LocalScope(MetadataTable<'a, LocalScopeRaw>),
    /// `0x33`
    LocalVariable(MetadataTable<'a, LocalVariableRaw>),
    /// `0x34`
    LocalConstant(MetadataTable<'a, LocalConstantRaw>),
    /// `0x35`
    ImportScope(MetadataTable<'a, ImportScopeRaw>),
    /// `0x36`
    StateMachineMethod(MetadataTable<'a, StateMachineMethodRaw>),
    /// `0x37`
    CustomDebugInformation(MetadataTable<'a, CustomDebugInformationRaw>),
}

/// Typed access to one table of a [`TablesHeader`].
pub trait TableAccess<'a, T: RowReadable> {
    /// Returns the table, or `None` if it has no rows.
    fn table(&self) -> Option<&MetadataTable<'a, T>>;
}

macro_rules! impl_table_access {
    ($raw:ty, $id:expr, $variant:ident) => {
        impl<'a> TableAccess<'a, $raw> for TablesHeader<'a> {
            fn table(&self) -> Option<&MetadataTable<'a, $raw>> {
                match self.tables.get($id as usize - TableId::FIRST_DEBUG_TABLE as usize)? {
                    Some(TableData::$variant(table)) => Some(table),
                    _ => None,
                }
            }
        }
    };
}

/// The parsed table stream header with views over every present table.
pub struct TablesHeader<'a> {
    /// Major version of the table schema, 2 for Portable PDBs
    pub major_version: u8,
    /// Minor version of the table schema
    pub minor_version: u8,
    /// Heap size flags
    pub heap_sizes: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Index widths for all tables
    pub info: TableInfoRef,
    tables: Vec<Option<TableData<'a>>>,
}

impl<'a> TablesHeader<'a> {
    /// Parses the table stream.
    ///
    /// # Arguments
    /// * `data` - The `#~` or `#-` stream
    /// * `pdb` - The `#Pdb` stream carrying the type-system row counts
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the stream is shorter than its header
    /// or tables claim, and [`crate::Error::Malformed`] if it holds tables other than
    /// the Portable PDB debug tables.
    pub fn from(data: &'a [u8], pdb: &PdbStream) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let mut offset = 4;
        let major_version = read_le_at::<u8>(data, &mut offset)?;
        let minor_version = read_le_at::<u8>(data, &mut offset)?;
        let heap_sizes = read_le_at::<u8>(data, &mut offset)?;
        offset += 1;
        let valid = read_le_at::<u64>(data, &mut offset)?;
        let sorted = read_le_at::<u64>(data, &mut offset)?;

        let debug_tables = TableId::iter()
            .filter(|id| id.is_debug_table())
            .fold(0_u64, |mask, id| mask | (1_u64 << id as u8));
        if valid & !debug_tables != 0 {
            return Err(malformed_error!(
                "Table stream holds non-debug tables - 0x{:016x}",
                valid & !debug_tables
            ));
        }

        let mut row_counts = pdb.type_system_table_rows.clone();
        row_counts.resize(TableId::SLOTS, 0);
        for table_id in TableId::iter().filter(|id| id.is_debug_table()) {
            if valid & (1_u64 << table_id as u8) != 0 {
                row_counts[table_id as usize] = read_le_at::<u32>(data, &mut offset)?;
            }
        }

        if heap_sizes & HEAP_EXTRA_DATA != 0 {
            offset = offset.checked_add(4).ok_or(OutOfBounds)?;
        }

        let info = Arc::new(TableInfo::new(&row_counts, heap_sizes));

        let mut header = TablesHeader {
            major_version,
            minor_version,
            heap_sizes,
            valid,
            sorted,
            info,
            tables: Vec::with_capacity(8),
        };

        for table_id in TableId::iter().filter(|id| id.is_debug_table()) {
            let rows = row_counts[table_id as usize];
            if offset > data.len() {
                return Err(OutOfBounds);
            }

            let table = if rows == 0 {
                None
            } else {
                Some(header.load_table(table_id, &data[offset..], rows, &mut offset)?)
            };

            header.tables.push(table);
        }

        Ok(header)
    }

    fn load_table(
        &self,
        table_id: TableId,
        data: &'a [u8],
        rows: u32,
        offset: &mut usize,
    ) -> Result<TableData<'a>> {
        macro_rules! load {
            ($raw:ty, $variant:ident) => {{
                let table = MetadataTable::<$raw>::new(data, rows, self.info.clone())?;
                *offset += table.size() as usize;
                TableData::$variant(table)
            }};
        }

        let table = match table_id {
            TableId::Document => load!(DocumentRaw, Document),
            TableId::MethodDebugInformation => {
                load!(MethodDebugInformationRaw, MethodDebugInformation)
            }
            TableId::LocalScope => load!(LocalScopeRaw, LocalScope),
            TableId::LocalVariable => load!(LocalVariableRaw, LocalVariable),
            TableId::LocalConstant => load!(LocalConstantRaw, LocalConstant),
            TableId::ImportScope => load!(ImportScopeRaw, ImportScope),
            TableId::StateMachineMethod => load!(StateMachineMethodRaw, StateMachineMethod),
            TableId::CustomDebugInformation => {
                load!(CustomDebugInformationRaw, CustomDebugInformation)
            }
            other => {
                return Err(malformed_error!("Not a debug table - {:?}", other));
            }
        };

        Ok(table)
    }

    /// Number of present tables.
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Row count of `table_id`, including type-system tables known from `#Pdb`.
    #[must_use]
    pub fn rows(&self, table_id: TableId) -> u32 {
        self.info.get(table_id).rows
    }

    /// Returns the table holding rows of type `T`, or `None` if it is empty.
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> Option<&MetadataTable<'a, T>>
    where
        Self: TableAccess<'a, T>,
    {
        <Self as TableAccess<'a, T>>::table(self)
    }
}

impl_table_access!(DocumentRaw, TableId::Document, Document);
impl_table_access!(
    MethodDebugInformationRaw,
    TableId::MethodDebugInformation,
    MethodDebugInformation
);
impl_table_access!(LocalScopeRaw, TableId::LocalScope, LocalScope);
impl_table_access!(LocalVariableRaw, TableId::LocalVariable, LocalVariable);
impl_table_access!(LocalConstantRaw, TableId::LocalConstant, LocalConstant);
impl_table_access!(ImportScopeRaw, TableId::ImportScope, ImportScope);
impl_table_access!(
    StateMachineMethodRaw,
    TableId::StateMachineMethod,
    StateMachineMethod
);
impl_table_access!(
    CustomDebugInformationRaw,
    TableId::CustomDebugInformation,
    CustomDebugInformation
);

#[cfg(test)]
mod tests {
    use super::*;

    fn pdb_stream(type_system: &[(TableId, u32)]) -> PdbStream {
        let mut rows = vec![0_u32; TableId::SLOTS];
        let mut referenced = 0_u64;
        for (table_id, count) in type_system {
            rows[*table_id as usize] = *count;
            referenced |= 1 << *table_id as u8;
        }

        PdbStream {
            id: [0; 20],
            entry_point: crate::metadata::token::Token(0),
            referenced_type_system_tables: referenced,
            type_system_table_rows: rows,
        }
    }

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x00, 0x00, 0x00,
            0x02, 0x00,
            0x00,
            0x01,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x81, 0x00, // Document, CustomDebugInformation
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,                         // Document rows
            0x02, 0x00, 0x00, 0x00,                         // CustomDebugInformation rows
            // Document
            0x01, 0x00, 0x01, 0x00, 0x05, 0x00, 0x02, 0x00,
            // CustomDebugInformation
            0x27, 0x00, 0x03, 0x00, 0x08, 0x00,
            0x36, 0x00, 0x04, 0x00, 0x0C, 0x00,
        ];

        let pdb = pdb_stream(&[(TableId::Module, 1), (TableId::MethodDef, 3)]);
        let header = TablesHeader::from(&data, &pdb).unwrap();

        assert_eq!(header.major_version, 2);
        assert_eq!(header.table_count(), 2);
        assert_eq!(header.rows(TableId::Document), 1);
        assert_eq!(header.rows(TableId::MethodDef), 3);

        let documents = header.table::<DocumentRaw>().unwrap();
        assert_eq!(documents.row_count(), 1);
        assert_eq!(documents.get(1).unwrap().hash, 5);

        let cdi = header.table::<CustomDebugInformationRaw>().unwrap();
        let rows: Vec<_> = cdi.iter().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, 3);
        assert_eq!(rows[1].parent.tag, TableId::Document);
        assert_eq!(rows[1].value, 0x0C);

        assert!(header.table::<LocalScopeRaw>().is_none());
    }

    #[test]
    fn extra_data_and_wide_heaps() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x00, 0x00, 0x00,
            0x02, 0x00,
            0x24,                                           // large blob + extra data
            0x01,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, // Document
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0xEE, 0xEE, 0xEE, 0xEE,                         // extra data
            0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x09, 0x00, 0x00, 0x00, 0x02, 0x00,
        ];

        let header = TablesHeader::from(&data, &pdb_stream(&[])).unwrap();
        let document = header.table::<DocumentRaw>().unwrap().get(1).unwrap();

        assert_eq!(document.name, 1);
        assert_eq!(document.hash_algorithm, 1);
        assert_eq!(document.hash, 9);
        assert_eq!(document.language, 2);
    }

    #[test]
    fn rejects_type_system_tables() {
        let mut data = vec![0_u8; 24];
        data[4] = 2;
        data[8] = 0x01; // Module
        data.extend_from_slice(&1_u32.to_le_bytes());
        data.extend_from_slice(&[0; 10]);

        assert!(matches!(
            TablesHeader::from(&data, &pdb_stream(&[])),
            Err(crate::Error::Malformed { .. })
        ));
    }

    #[test]
    fn truncated_table() {
        let mut data = vec![0_u8; 24];
        data[14] = 0x01; // Document
        data.extend_from_slice(&2_u32.to_le_bytes());
        data.extend_from_slice(&[0; 8]);

        assert!(matches!(
            TablesHeader::from(&data, &pdb_stream(&[])),
            Err(OutOfBounds)
        ));
        assert!(matches!(
            TablesHeader::from(&data[..20], &pdb_stream(&[])),
            Err(OutOfBounds)
        ));
    }
}
