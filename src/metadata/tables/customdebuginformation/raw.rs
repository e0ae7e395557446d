use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A `CustomDebugInformation` row.
#[derive(Debug, Clone)]
pub struct CustomDebugInformationRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, `0x37000000 | rid`
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// The entity this information is attached to
    pub parent: CodedIndex,
    /// `#GUID` index of the kind
    pub kind: u32,
    /// `#Blob` index of the value
    pub value: u32,
}

impl RowReadable for CustomDebugInformationRaw {
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(CustomDebugInformationRaw {
            rid,
            token: Token::from_parts(TableId::CustomDebugInformation as u8, rid),
            offset: *offset,
            parent: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::HasCustomDebugInformation,
            )?,
            kind: read_le_at_dyn(data, offset, sizes.is_large_guid())?,
            value: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            sizes.coded_index_bytes(CodedIndexType::HasCustomDebugInformation) +  // parent
            sizes.guid_bytes() +                                                 // kind
            sizes.blob_bytes()                                                   // value
        )
    }
}
