use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A `LocalVariable` row.
#[derive(Debug, Clone)]
pub struct LocalVariableRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, `0x33000000 | rid`
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `LocalVariableAttributes`, bit 0 marks compiler generated locals
    pub attributes: u16,
    /// Slot index in the method's local signature
    pub index: u16,
    /// `#Strings` index of the variable name
    pub name: u32,
}

impl RowReadable for LocalVariableRaw {
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(LocalVariableRaw {
            rid,
            token: Token::from_parts(TableId::LocalVariable as u8, rid),
            offset: *offset,
            attributes: read_le_at::<u16>(data, offset)?,
            index: read_le_at::<u16>(data, offset)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            2 +                 // attributes
            2 +                 // index
            sizes.str_bytes()   // name
        )
    }
}
