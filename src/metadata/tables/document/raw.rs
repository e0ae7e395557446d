use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        streams::{Blob, Guid},
        tables::{parse_document_name, Document, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A `Document` row with unresolved heap indices.
#[derive(Debug, Clone)]
pub struct DocumentRaw {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, `0x30000000 | rid`
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `#Blob` index of the `DocumentName` blob
    pub name: u32,
    /// `#GUID` index of the hash algorithm
    pub hash_algorithm: u32,
    /// `#Blob` index of the hash value
    pub hash: u32,
    /// `#GUID` index of the source language
    pub language: u32,
}

impl DocumentRaw {
    /// Resolves the heap references of this row.
    ///
    /// A nil GUID index resolves to the all-zero GUID.
    ///
    /// # Errors
    /// Returns an error if a heap index is out of range or the name blob is malformed.
    pub fn to_owned<'a>(&self, blobs: &Blob<'a>, guids: &Guid) -> Result<Document<'a>> {
        let name = parse_document_name(blobs.get(self.name as usize)?, blobs)?;
        let hash_algorithm = lookup_guid(guids, self.hash_algorithm)?;
        let language = lookup_guid(guids, self.language)?;

        Ok(Document {
            rid: self.rid,
            token: self.token,
            name,
            hash_algorithm_index: self.hash_algorithm,
            hash_algorithm,
            hash: blobs.get(self.hash as usize)?,
            language,
        })
    }
}

fn lookup_guid(guids: &Guid, index: u32) -> Result<uguid::Guid> {
    if index == 0 {
        Ok(uguid::Guid::ZERO)
    } else {
        guids.get(index as usize)
    }
}

impl RowReadable for DocumentRaw {
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(DocumentRaw {
            rid,
            token: Token::from_parts(TableId::Document as u8, rid),
            offset: *offset,
            name: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            hash_algorithm: read_le_at_dyn(data, offset, sizes.is_large_guid())?,
            hash: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            language: read_le_at_dyn(data, offset, sizes.is_large_guid())?,
        })
    }

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            sizes.blob_bytes() +  // name
            sizes.guid_bytes() +  // hash_algorithm
            sizes.blob_bytes() +  // hash
            sizes.guid_bytes()    // language
        )
    }
}
