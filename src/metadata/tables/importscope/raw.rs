use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// An `ImportScope` row.
#[derive(Debug, Clone)]
pub struct ImportScopeRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, `0x35000000 | rid`
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Parent `ImportScope` row, 0 for the root scope
    pub parent: u32,
    /// `#Blob` index of the imports
    pub imports: u32,
}

impl RowReadable for ImportScopeRaw {
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ImportScopeRaw {
            rid,
            token: Token::from_parts(TableId::ImportScope as u8, rid),
            offset: *offset,
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::ImportScope))?,
            imports: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            sizes.table_index_bytes(TableId::ImportScope) +  // parent
            sizes.blob_bytes()                               // imports
        )
    }
}
