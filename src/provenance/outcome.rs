//! Per-document provenance reports.

use std::fmt::{self, Write};

use crate::metadata::hashalgorithm::HashAlgorithm;

/// Where the content of a document can be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// The text is embedded in the PDB
    Embedded(String),
    /// The text can be downloaded from this URI
    LinkedUri(String),
    /// Only the build-time path is known
    LocalOnly(String),
}

/// The provenance of one document together with its content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Document name as stored in the PDB
    pub name: String,
    /// Where the content comes from
    pub provenance: Provenance,
    /// Algorithm of `hash`
    pub algorithm: HashAlgorithm,
    /// Lowercase hex digest without separators
    pub hash: String,
}

impl DocumentReport {
    /// Creates a report, formatting `hash` as lowercase hex.
    #[must_use]
    pub fn new(name: String, provenance: Provenance, algorithm: HashAlgorithm, hash: &[u8]) -> Self {
        DocumentReport {
            name,
            provenance,
            algorithm,
            hash: to_hex(hash),
        }
    }
}

impl fmt::Display for DocumentReport {
    /// Formats the report as printed by the command line: one header line, followed by
    /// the document text for embedded documents.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.provenance {
            Provenance::Embedded(text) => write!(
                f,
                "Embedded {} {} {}\n{}",
                self.name, self.algorithm, self.hash, text
            ),
            Provenance::LinkedUri(uri) => write!(f, "{} {} {}", uri, self.algorithm, self.hash),
            Provenance::LocalOnly(name) => write!(f, "{} {} {}", name, self.algorithm, self.hash),
        }
    }
}

/// Lowercase hex encoding without separators.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut hex, byte| {
            let _ = write!(hex, "{byte:02x}");
            hex
        })
}
