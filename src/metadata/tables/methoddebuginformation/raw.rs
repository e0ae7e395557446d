use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A `MethodDebugInformation` row.
#[derive(Debug, Clone)]
pub struct MethodDebugInformationRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, `0x31000000 | rid`
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `Document` row of the method's single document, 0 if it spans several
    pub document: u32,
    /// `#Blob` index of the sequence points
    pub sequence_points: u32,
}

impl RowReadable for MethodDebugInformationRaw {
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDebugInformationRaw {
            rid,
            token: Token::from_parts(TableId::MethodDebugInformation as u8, rid),
            offset: *offset,
            document: read_le_at_dyn(data, offset, sizes.is_large(TableId::Document))?,
            sequence_points: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            sizes.table_index_bytes(TableId::Document) +  // document
            sizes.blob_bytes()                            // sequence_points
        )
    }
}
