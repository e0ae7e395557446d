//! `#Pdb` stream.
//!
//! The stream that turns a bare metadata block into a Portable PDB. It identifies the
//! PDB, names the entry point of the described assembly and carries the row counts of
//! the type-system tables of that assembly, which the debug tables index into but which
//! are not stored in the PDB itself.
//!
//! # Layout
//!
//! | Offset | Size  | Field                                 |
//! |--------|-------|---------------------------------------|
//! | 0      | 20    | PDB id (GUID + stamp)                 |
//! | 20     | 4     | Entry point `MethodDef` token or 0    |
//! | 24     | 8     | Bit vector of referenced tables       |
//! | 32     | 4 * n | Row count per set bit, ascending      |

use crate::{
    file::io::read_le_at,
    metadata::{tables::TableId, token::Token},
    Error::OutOfBounds,
    Result,
};

/// The parsed `#Pdb` stream.
pub struct PdbStream {
    /// 20 byte PDB id; the first 16 bytes are a GUID, the last 4 a timestamp
    pub id: [u8; 20],
    /// Entry point of the described assembly, nil for libraries
    pub entry_point: Token,
    /// Bit vector of the type-system tables with row counts below
    pub referenced_type_system_tables: u64,
    /// Row counts indexed by table id, zero for tables not referenced
    pub type_system_table_rows: Vec<u32>,
}

impl PdbStream {
    /// Parses the `#Pdb` stream.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the stream is truncated, and
    /// [`crate::Error::Malformed`] if it references tables that are not type-system
    /// tables.
    pub fn from(data: &[u8]) -> Result<PdbStream> {
        if data.len() < 32 {
            return Err(OutOfBounds);
        }

        let mut id = [0_u8; 20];
        id.copy_from_slice(&data[..20]);

        let mut offset = 20;
        let entry_point = Token::new(read_le_at::<u32>(data, &mut offset)?);
        let referenced = read_le_at::<u64>(data, &mut offset)?;

        let invalid = referenced & !((1_u64 << (TableId::GenericParamConstraint as u8 + 1)) - 1);
        if invalid != 0 {
            return Err(malformed_error!(
                "#Pdb references non type-system tables - 0x{:016x}",
                invalid
            ));
        }

        let mut type_system_table_rows = vec![0_u32; TableId::SLOTS];
        for (table_id, rows) in type_system_table_rows.iter_mut().enumerate() {
            if referenced & (1_u64 << table_id) != 0 {
                *rows = read_le_at::<u32>(data, &mut offset)?;
            }
        }

        Ok(PdbStream {
            id,
            entry_point,
            referenced_type_system_tables: referenced,
            type_system_table_rows,
        })
    }

    /// The GUID part of the PDB id.
    #[must_use]
    pub fn guid(&self) -> uguid::Guid {
        let mut bytes = [0_u8; 16];
        bytes.copy_from_slice(&self.id[..16]);
        uguid::Guid::from_bytes(bytes)
    }

    /// The timestamp part of the PDB id.
    #[must_use]
    pub fn stamp(&self) -> u32 {
        u32::from_le_bytes([self.id[16], self.id[17], self.id[18], self.id[19]])
    }

    /// Row count of the type-system table `table`.
    #[must_use]
    pub fn rows(&self, table: TableId) -> u32 {
        self.type_system_table_rows
            .get(table as usize)
            .copied()
            .unwrap_or(0)
    }
}
