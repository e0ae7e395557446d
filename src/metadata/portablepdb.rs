//! Portable PDB container.
//!
//! [`PortablePdb`] ties the metadata root, the `#Pdb` stream, the heaps and the debug
//! tables of one Portable PDB together. Everything borrows the input buffer; nothing is
//! copied except the per-document names, which are assembled from several blob parts.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pdbscope::metadata::portablepdb::PortablePdb;
//!
//! let data = std::fs::read("app.pdb")?;
//! let pdb = PortablePdb::read(&data)?;
//!
//! for document in pdb.documents() {
//!     let document = document?;
//!     println!("{} ({} hash bytes)", document.name, document.hash.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{
    metadata::{
        customdebuginformation::{CustomDebugIndex, CustomDebugKind},
        root::Root,
        streams::{Blob, Guid, PdbStream, Strings, TablesHeader},
        tables::{Document, DocumentRaw},
        token::Token,
    },
    Result,
};

/// A parsed Portable PDB borrowing its input.
pub struct PortablePdb<'a> {
    root: Root,
    pdb: PdbStream,
    tables: Option<TablesHeader<'a>>,
    strings: Strings<'a>,
    blobs: Blob<'a>,
    guids: Guid<'a>,
    custom_debug: CustomDebugIndex<'a>,
}

impl<'a> PortablePdb<'a> {
    /// Parses a Portable PDB.
    ///
    /// Absent heaps are treated as empty and an absent table stream as a PDB without rows.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotPortablePdb`] if `data` does not start with a metadata
    /// root, [`crate::Error::Malformed`] if the root lacks the `#Pdb` stream or any stream
    /// is inconsistent, and [`crate::Error::OutOfBounds`] for truncated data.
    pub fn read(data: &'a [u8]) -> Result<PortablePdb<'a>> {
        let root = Root::read(data)?;

        let stream_data = |name: &str| -> Option<&'a [u8]> {
            root.stream(name).map(|header| {
                let start = header.offset as usize;
                &data[start..start + header.size as usize]
            })
        };

        let Some(pdb_data) = stream_data("#Pdb") else {
            return Err(malformed_error!("Metadata without #Pdb stream is not a Portable PDB"));
        };
        let pdb = PdbStream::from(pdb_data)?;

        let strings = Strings::from(stream_data("#Strings").unwrap_or_default())?;
        let blobs = Blob::from(stream_data("#Blob").unwrap_or_default())?;
        let guids = Guid::from(stream_data("#GUID").unwrap_or_default())?;

        let tables = match stream_data("#~").or_else(|| stream_data("#-")) {
            Some(table_data) => Some(TablesHeader::from(table_data, &pdb)?),
            None => None,
        };

        let custom_debug = match &tables {
            Some(tables) => CustomDebugIndex::new(tables, &guids, &blobs)?,
            None => CustomDebugIndex::default(),
        };

        log::debug!(
            "Portable PDB '{}', {} tables, {} custom debug entries",
            root.version,
            tables.as_ref().map_or(0, TablesHeader::table_count),
            custom_debug.len()
        );

        Ok(PortablePdb {
            root,
            pdb,
            tables,
            strings,
            blobs,
            guids,
            custom_debug,
        })
    }

    /// The metadata root and stream directory.
    #[must_use]
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// The metadata version string, `PDB v1.0` for current compilers.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.root.version
    }

    /// The parsed `#Pdb` stream.
    #[must_use]
    pub fn pdb_stream(&self) -> &PdbStream {
        &self.pdb
    }

    /// The 20 byte PDB id matching the debug directory entry of the described assembly.
    #[must_use]
    pub fn pdb_id(&self) -> &[u8; 20] {
        &self.pdb.id
    }

    /// Entry point of the described assembly, nil for libraries.
    #[must_use]
    pub fn entry_point(&self) -> Token {
        self.pdb.entry_point
    }

    /// The debug tables, `None` if the PDB has no table stream.
    #[must_use]
    pub fn tables(&self) -> Option<&TablesHeader<'a>> {
        self.tables.as_ref()
    }

    /// The `#Strings` heap.
    #[must_use]
    pub fn strings(&self) -> &Strings<'a> {
        &self.strings
    }

    /// The `#Blob` heap.
    #[must_use]
    pub fn blobs(&self) -> &Blob<'a> {
        &self.blobs
    }

    /// The `#GUID` heap.
    #[must_use]
    pub fn guids(&self) -> &Guid<'a> {
        &self.guids
    }

    /// Number of rows in the `Document` table.
    #[must_use]
    pub fn document_count(&self) -> u32 {
        self.tables
            .as_ref()
            .and_then(|tables| tables.table::<DocumentRaw>())
            .map_or(0, |table| table.row_count())
    }

    /// Iterates the documents in row order, resolving their heap references.
    pub fn documents(&self) -> impl Iterator<Item = Result<Document<'a>>> + '_ {
        self.tables
            .as_ref()
            .and_then(|tables| tables.table::<DocumentRaw>())
            .into_iter()
            .flat_map(|table| table.iter())
            .map(|raw| raw.to_owned(&self.blobs, &self.guids))
    }

    /// The custom debug information index.
    #[must_use]
    pub fn custom_debug(&self) -> &CustomDebugIndex<'a> {
        &self.custom_debug
    }

    /// Value of the first custom debug information of `kind` attached to `owner`.
    ///
    /// `None` if there is none or its value is empty.
    #[must_use]
    pub fn custom_debug_information(&self, owner: Token, kind: &uguid::Guid) -> Option<&'a [u8]> {
        self.custom_debug.find(owner, kind)
    }

    /// The Source Link JSON attached to the module, if any.
    #[must_use]
    pub fn source_link(&self) -> Option<&'a [u8]> {
        self.custom_debug.find_kind(Token::MODULE, CustomDebugKind::SourceLink)
    }
}
