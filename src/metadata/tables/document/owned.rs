use crate::metadata::token::Token;

/// A `Document` row with its heap references resolved.
///
/// Borrows the hash bytes from the `#Blob` heap of the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    /// 1-based row id
    pub rid: u32,
    /// Metadata token, the owner of this document's custom debug information
    pub token: Token,
    /// The full document name, usually an absolute path at build time
    pub name: String,
    /// `#GUID` index of the hash algorithm, 0 if nil
    pub hash_algorithm_index: u32,
    /// Hash algorithm GUID, all zero if nil
    pub hash_algorithm: uguid::Guid,
    /// Hash of the document content
    pub hash: &'a [u8],
    /// Source language GUID, all zero if nil
    pub language: uguid::Guid,
}
