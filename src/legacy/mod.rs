//! Windows PDB support.
//!
//! Windows PDBs are MSF 7.00 containers: a block-based file system holding numbered
//! streams. Unlike a Portable PDB they are not walked table by table. The provenance
//! report only needs one pre-assembled payload per file, the source server or Source
//! Link stream, which [`LegacySymReader::source_server_data`] returns.
//!
//! # Key Components
//!
//! - [`LegacySymReader`] - the narrow interface the format dispatcher talks to
//! - [`MsfSymReader`] - reader over an MSF 7.00 file
//! - [`PdbInfo`] - the PDB info stream and its named stream map

mod info;
mod msf;

pub use info::{PdbInfo, PdbInfoVersion};
pub use msf::{MsfSymReader, MSF_MAGIC};

use crate::Result;

/// Access to the provenance payload of a Windows PDB.
pub trait LegacySymReader {
    /// Returns the source server data of the whole file.
    ///
    /// `Ok(None)` if the file carries none; the payload is never empty.
    ///
    /// # Errors
    /// Returns an error if the container is inconsistent.
    fn source_server_data(&self) -> Result<Option<Vec<u8>>>;
}
