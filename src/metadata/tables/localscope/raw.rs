use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A `LocalScope` row.
#[derive(Debug, Clone)]
pub struct LocalScopeRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, `0x32000000 | rid`
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `MethodDef` row of the owning method
    pub method: u32,
    /// `ImportScope` row, 0 if none
    pub import_scope: u32,
    /// First `LocalVariable` row of the scope
    pub variable_list: u32,
    /// First `LocalConstant` row of the scope
    pub constant_list: u32,
    /// IL offset where the scope starts
    pub start_offset: u32,
    /// Length of the scope in IL bytes
    pub length: u32,
}

impl RowReadable for LocalScopeRaw {
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(LocalScopeRaw {
            rid,
            token: Token::from_parts(TableId::LocalScope as u8, rid),
            offset: *offset,
            method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
            import_scope: read_le_at_dyn(data, offset, sizes.is_large(TableId::ImportScope))?,
            variable_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::LocalVariable))?,
            constant_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::LocalConstant))?,
            start_offset: read_le_at::<u32>(data, offset)?,
            length: read_le_at::<u32>(data, offset)?,
        })
    }

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            sizes.table_index_bytes(TableId::MethodDef) +      // method
            sizes.table_index_bytes(TableId::ImportScope) +    // import_scope
            sizes.table_index_bytes(TableId::LocalVariable) +  // variable_list
            sizes.table_index_bytes(TableId::LocalConstant) +  // constant_list
            4 +                                                // start_offset
            4                                                  // length
        )
    }
}
