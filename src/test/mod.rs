//! Shared fixtures for unit tests.
//!
//! Real PDBs are large and tied to a specific compiler version, so tests build the
//! images they need byte by byte with the builders in [`builders`].


pub use builders::*;

use crate::metadata::portablepdb::PortablePdb;

/// Parses `image` as a Portable PDB, panicking on failure.
pub fn portable_pdb(image: &[u8]) -> PortablePdb<'_> {
    PortablePdb::read(image).expect("builder produced an invalid Portable PDB")
}
