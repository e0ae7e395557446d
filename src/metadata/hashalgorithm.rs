//! Document hash algorithm identification.
//!
//! The `Document` table names the algorithm of each document hash by GUID. Three
//! algorithms are in use by .NET compilers; anything else is reported as unknown rather
//! than rejected.
//!
//! # Examples
//!
//! ```rust
//! use pdbscope::metadata::hashalgorithm::HashAlgorithm;
//!
//! let sha256 = uguid::guid!("8829d00f-11b8-4213-878b-770e8597ac16");
//! assert_eq!(HashAlgorithm::from_guid(&sha256), HashAlgorithm::Sha256);
//! assert_eq!(HashAlgorithm::Sha256.to_string(), "SHA256");
//! ```

use std::collections::HashMap;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::metadata::streams::Guid;

/// The hash algorithm of a document hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum HashAlgorithm {
    /// `406EA660-64CF-4C82-B6F0-42D48172A799`
    #[strum(serialize = "MD5")]
    Md5,
    /// `FF1816EC-AA5E-4D10-87F7-6F4963833460`
    #[strum(serialize = "SHA1")]
    Sha1,
    /// `8829D00F-11B8-4213-878B-770E8597AC16`
    #[strum(serialize = "SHA256")]
    Sha256,
    /// Any other GUID, including the nil GUID
    #[strum(serialize = "Unknown")]
    Unknown,
}

impl HashAlgorithm {
    /// GUID of MD5
    pub const MD5_GUID: uguid::Guid = uguid::guid!("406ea660-64cf-4c82-b6f0-42d48172a799");
    /// GUID of SHA-1
    pub const SHA1_GUID: uguid::Guid = uguid::guid!("ff1816ec-aa5e-4d10-87f7-6f4963833460");
    /// GUID of SHA-256
    pub const SHA256_GUID: uguid::Guid = uguid::guid!("8829d00f-11b8-4213-878b-770e8597ac16");

    /// Identifies the algorithm named by `guid`.
    #[must_use]
    pub fn from_guid(guid: &uguid::Guid) -> HashAlgorithm {
        match *guid {
            g if g == Self::MD5_GUID => HashAlgorithm::Md5,
            g if g == Self::SHA1_GUID => HashAlgorithm::Sha1,
            g if g == Self::SHA256_GUID => HashAlgorithm::Sha256,
            _ => HashAlgorithm::Unknown,
        }
    }

    /// The GUID of this algorithm, `None` for [`HashAlgorithm::Unknown`].
    #[must_use]
    pub fn guid(&self) -> Option<uguid::Guid> {
        match self {
            HashAlgorithm::Md5 => Some(Self::MD5_GUID),
            HashAlgorithm::Sha1 => Some(Self::SHA1_GUID),
            HashAlgorithm::Sha256 => Some(Self::SHA256_GUID),
            HashAlgorithm::Unknown => None,
        }
    }

    /// Size of a digest in bytes, `None` for [`HashAlgorithm::Unknown`].
    #[must_use]
    pub fn digest_len(&self) -> Option<usize> {
        match self {
            HashAlgorithm::Md5 => Some(16),
            HashAlgorithm::Sha1 => Some(20),
            HashAlgorithm::Sha256 => Some(32),
            HashAlgorithm::Unknown => None,
        }
    }
}

/// Memoizes hash algorithm resolution by `#GUID` heap index.
///
/// Every document of a PDB usually shares one algorithm, so resolving the same heap
/// index again is answered from the cache. The cache belongs to one PDB; indices of
/// different files are unrelated.
#[derive(Debug, Default)]
pub struct HashAlgorithmCache {
    resolved: HashMap<u32, HashAlgorithm>,
}

impl HashAlgorithmCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the algorithm whose GUID is stored at `index` in `guids`.
    ///
    /// Index 0 and indices past the heap resolve to [`HashAlgorithm::Unknown`].
    pub fn resolve(&mut self, index: u32, guids: &Guid) -> HashAlgorithm {
        *self.resolved.entry(index).or_insert_with(|| {
            match guids.get(index as usize) {
                Ok(guid) => HashAlgorithm::from_guid(&guid),
                Err(_) => HashAlgorithm::Unknown,
            }
        })
    }

    /// Number of distinct indices resolved so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Returns `true` if nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
