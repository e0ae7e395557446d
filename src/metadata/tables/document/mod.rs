//! Document table (`0x30`).
//!
//! One row per source document the compiler saw. A row names the document through a
//! `DocumentName` blob, identifies the algorithm and value of the content hash, and the
//! source language.
//!
//! - [`DocumentRaw`] - the row as stored, with unresolved heap indices
//! - [`Document`] - the row with its name assembled and GUIDs looked up
//!
//! # References
//!
//! - [Portable PDB Format - Document Table](https://github.com/dotnet/runtime/blob/main/docs/design/specs/PortablePdb-Metadata.md#document-table-0x30)

mod name;
mod owned;
mod raw;

pub use name::parse_document_name;
pub use owned::Document;
pub use raw::DocumentRaw;
