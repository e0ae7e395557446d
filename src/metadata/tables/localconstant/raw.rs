use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A `LocalConstant` row.
#[derive(Debug, Clone)]
pub struct LocalConstantRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, `0x34000000 | rid`
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `#Strings` index of the constant name
    pub name: u32,
    /// `#Blob` index of the type and value signature
    pub signature: u32,
}

impl RowReadable for LocalConstantRaw {
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(LocalConstantRaw {
            rid,
            token: Token::from_parts(TableId::LocalConstant as u8, rid),
            offset: *offset,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            sizes.str_bytes() +  // name
            sizes.blob_bytes()   // signature
        )
    }
}
