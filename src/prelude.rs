//! # pdbscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the pdbscope library. Import this module to get quick access to the essential
//! types for reading debug symbol files.
//!
//! ```rust,no_run
//! use pdbscope::prelude::*;
//!
//! let file = File::from_file(std::path::Path::new("app.pdb"))?;
//! match Container::open(file.data())? {
//!     Container::Portable(pdb) => println!("{} documents", pdb.document_count()),
//!     Container::Windows(_) => println!("Windows PDB"),
//! }
//! # Ok::<(), pdbscope::Error>(())
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all pdbscope operations
pub use crate::Error;

/// The result type used throughout pdbscope
pub use crate::Result;

/// Input access
pub use crate::{File, Parser};

// ================================================================================================
// Entry Points
// ================================================================================================

/// Format detection and reporting
pub use crate::provenance::{process, process_file, Container};

/// Per-document resolution
pub use crate::provenance::{DocumentReport, DocumentResolver, Provenance};

// ================================================================================================
// Portable PDB
// ================================================================================================

/// The parsed Portable PDB and its parts
pub use crate::metadata::{
    customdebuginformation::{CustomDebugKind, EmbeddedSource},
    hashalgorithm::HashAlgorithm,
    portablepdb::PortablePdb,
    tables::Document,
    token::Token,
};

/// Metadata heaps and streams
pub use crate::metadata::streams::{Blob, Guid, PdbStream, StreamHeader, Strings, TablesHeader};

// ================================================================================================
// Windows PDB and Source Link
// ================================================================================================

/// Windows PDB access
pub use crate::legacy::{LegacySymReader, MsfSymReader, PdbInfo};

/// Source Link mapping
pub use crate::sourcelink::{PatternMap, SourceLinkMap};
