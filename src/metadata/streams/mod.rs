//! Metadata streams of a Portable PDB.
//!
//! The metadata root lists up to eight named streams. This module provides a reader for
//! each kind the provenance engine touches:
//!
//! - [`StreamHeader`] - one entry of the stream directory
//! - [`PdbStream`] - `#Pdb`, PDB id and type-system row counts
//! - [`TablesHeader`] - `#~` or `#-`, the debug tables
//! - [`Strings`] - `#Strings`, identifier heap
//! - [`Blob`] - `#Blob`, length-prefixed binary heap
//! - [`Guid`] - `#GUID`, 1-based GUID array
//!
//! `#US` may be present but is never read.

mod blob;
mod guid;
mod pdb;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use guid::Guid;
pub use pdb::PdbStream;
pub use streamheader::{StreamHeader, STREAM_NAMES};
pub use strings::Strings;
pub use tablesheader::{TableAccess, TableData, TablesHeader};
