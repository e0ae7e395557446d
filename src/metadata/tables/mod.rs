//! Portable PDB debug tables.
//!
//! A Portable PDB stores eight tables (`0x30` - `0x37`) in its `#~` stream. Each module
//! below holds the row type of one table and its [`RowReadable`] implementation; the
//! [`types`] module holds the shared sizing and iteration machinery.
//!
//! # Table Overview
//!
//! | Id     | Table                      | Used for                                  |
//! |--------|----------------------------|-------------------------------------------|
//! | `0x30` | [`DocumentRaw`]            | Source documents, hashes and languages    |
//! | `0x31` | [`MethodDebugInformationRaw`] | Sequence points per method             |
//! | `0x32` | [`LocalScopeRaw`]          | Lexical scopes                            |
//! | `0x33` | [`LocalVariableRaw`]       | Local variable names                      |
//! | `0x34` | [`LocalConstantRaw`]       | Local constant names                      |
//! | `0x35` | [`ImportScopeRaw`]         | Namespace imports                         |
//! | `0x36` | [`StateMachineMethodRaw`]  | Async and iterator kickoff methods        |
//! | `0x37` | [`CustomDebugInformationRaw`] | Source Link, embedded source, ...      |
//!
//! Only documents and custom debug information feed the provenance report, but every
//! table present has to be sized correctly because they are stored back to back.

mod customdebuginformation;
mod document;
mod importscope;
mod localconstant;
mod localscope;
mod localvariable;
mod methoddebuginformation;
mod statemachinemethod;
pub mod types;

pub use customdebuginformation::CustomDebugInformationRaw;
pub use document::{parse_document_name, Document, DocumentRaw};
pub use importscope::ImportScopeRaw;
pub use localconstant::LocalConstantRaw;
pub use localscope::LocalScopeRaw;
pub use localvariable::LocalVariableRaw;
pub use methoddebuginformation::MethodDebugInformationRaw;
pub use statemachinemethod::StateMachineMethodRaw;
pub use types::{
    CodedIndex, CodedIndexType, MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef,
    TableIterator, TableRowInfo,
};
