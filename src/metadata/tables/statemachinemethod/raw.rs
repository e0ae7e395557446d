use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A `StateMachineMethod` row.
#[derive(Debug, Clone)]
pub struct StateMachineMethodRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, `0x36000000 | rid`
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `MethodDef` row of the `MoveNext` method
    pub move_next_method: u32,
    /// `MethodDef` row of the kickoff method
    pub kickoff_method: u32,
}

impl RowReadable for StateMachineMethodRaw {
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(StateMachineMethodRaw {
            rid,
            token: Token::from_parts(TableId::StateMachineMethod as u8, rid),
            offset: *offset,
            move_next_method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
            kickoff_method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
        })
    }

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            sizes.table_index_bytes(TableId::MethodDef) +  // move_next_method
            sizes.table_index_bytes(TableId::MethodDef)    // kickoff_method
        )
    }
}
