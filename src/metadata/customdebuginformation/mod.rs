//! Custom debug information lookup and decoding.
//!
//! Rows of the `CustomDebugInformation` table attach GUID-keyed blobs to metadata
//! entities. The provenance report needs two of them: the Source Link JSON attached to
//! the module, and the embedded source attached to each document.
//!
//! # Key Components
//!
//! - [`CustomDebugIndex`] - `(owner, kind)` lookup built once per PDB
//! - [`CustomDebugKind`] - well-known kind GUIDs
//! - [`decode_embedded_source`] - length-prefixed, optionally deflated document text
//!
//! # Lookup Semantics
//!
//! When several rows share an owner and kind, the first one in table order wins and the
//! rest are ignored. A winning row with an empty value blob counts as absent. Rows with a
//! nil kind never match.

mod parser;
mod types;

use std::collections::{hash_map::Entry, HashMap};

use crate::{
    metadata::{
        streams::{Blob, Guid, TablesHeader},
        tables::CustomDebugInformationRaw,
        token::Token,
    },
    Result,
};

pub use parser::{decode_embedded_source, decode_text};
pub use types::{CustomDebugKind, EmbeddedSource};

/// Index of custom debug information values by owner token and kind GUID.
#[derive(Default)]
pub struct CustomDebugIndex<'a> {
    entries: HashMap<(Token, uguid::Guid), &'a [u8]>,
}

impl<'a> CustomDebugIndex<'a> {
    /// Indexes every row of the `CustomDebugInformation` table.
    ///
    /// # Errors
    /// Returns an error if a row references a GUID or blob outside its heap.
    pub fn new(tables: &TablesHeader<'a>, guids: &Guid, blobs: &Blob<'a>) -> Result<Self> {
        let mut entries = HashMap::new();

        if let Some(table) = tables.table::<CustomDebugInformationRaw>() {
            for row in table {
                if row.kind == 0 {
                    continue;
                }

                let kind = guids.get(row.kind as usize)?;
                if let Entry::Vacant(slot) = entries.entry((row.parent.token, kind)) {
                    let value = blobs.get(row.value as usize)?;
                    log::trace!(
                        "custom debug information {} on {} ({} bytes)",
                        CustomDebugKind::from_guid(&kind),
                        row.parent.token,
                        value.len()
                    );
                    slot.insert(value);
                }
            }
        }

        Ok(CustomDebugIndex { entries })
    }

    /// Returns the value of the first row attached to `owner` with kind `kind`.
    ///
    /// `None` if there is no such row or its value is empty.
    #[must_use]
    pub fn find(&self, owner: Token, kind: &uguid::Guid) -> Option<&'a [u8]> {
        self.entries
            .get(&(owner, *kind))
            .copied()
            .filter(|value| !value.is_empty())
    }

    /// Like [`CustomDebugIndex::find`], keyed by a well-known kind.
    #[must_use]
    pub fn find_kind(&self, owner: Token, kind: CustomDebugKind) -> Option<&'a [u8]> {
        self.find(owner, &kind.guid())
    }

    /// Number of distinct `(owner, kind)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table is empty or absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
