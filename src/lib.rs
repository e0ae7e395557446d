// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # pdbscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/pdbscope.svg)](https://crates.io/crates/pdbscope)
//! [![Documentation](https://docs.rs/pdbscope/badge.svg)](https://docs.rs/pdbscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/pdbscope/blob/main/LICENSE-APACHE)
//!
//! Extracts source provenance from .NET debug symbol files: the Source Link mapping,
//! embedded source text and the content hash of every document. Both the Portable PDB
//! format and classic Windows (MSF 7.00) PDBs are read, without the .NET runtime and on
//! every platform Rust supports.
//!
//! ## Features
//!
//! - **Zero-copy parsing** - Portable PDB metadata is read in place from a memory map
//! - **Format detection** - Portable PDBs first, Windows PDBs as fallback
//! - **Source Link** - Parsing of the JSON map and URI derivation for every document
//! - **Embedded source** - Raw and DEFLATE compressed blobs, UTF-8 and UTF-16 text
//! - **Strict bounds checking** - Corrupt input is reported, never trusted
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let mut stdout = std::io::stdout();
//! let found = pdbscope::process_file(Path::new("bin/Debug/net8.0/app.pdb"), &mut stdout)?;
//! if !found {
//!     println!("No source link information found.");
//! }
//! # Ok::<(), pdbscope::Error>(())
//! ```
//!
//! ### Walking the documents yourself
//!
//! ```rust,no_run
//! use pdbscope::prelude::*;
//!
//! let data = std::fs::read("app.pdb")?;
//! let pdb = PortablePdb::read(&data)?;
//!
//! let map = match pdb.source_link() {
//!     Some(json) => SourceLinkMap::parse(&String::from_utf8_lossy(json))?,
//!     None => SourceLinkMap::default(),
//! };
//!
//! for report in DocumentResolver::new().outcomes(&pdb, &map) {
//!     match report?.provenance {
//!         Provenance::Embedded(text) => println!("{} chars embedded", text.len()),
//!         Provenance::LinkedUri(uri) => println!("download from {uri}"),
//!         Provenance::LocalOnly(name) => println!("only known as {name}"),
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`file`] - Input access through memory maps or buffers
//! - [`metadata`] - Portable PDB metadata: root, streams, debug tables, custom debug information
//! - [`legacy`] - Windows PDB reader over the MSF container
//! - [`sourcelink`] - Source Link JSON parsing and URI derivation
//! - [`provenance`] - Format dispatch and the per-document report
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`] with [`Error`]. Missing optional data,
//! such as a PDB without Source Link, is never an error.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

pub mod file;
pub mod legacy;
pub mod metadata;
pub mod prelude;
pub mod provenance;
pub mod sourcelink;

/// `pdbscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `pdbscope` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use pdbscope::Error;
///
/// let mut out = Vec::new();
/// match pdbscope::process_file(std::path::Path::new("app.pdb"), &mut out) {
///     Ok(found) => println!("found: {found}"),
///     Err(Error::NotSupported) => println!("not a PDB"),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

pub use file::{parser::Parser, File};
pub use metadata::portablepdb::PortablePdb;
pub use provenance::{process, process_file};
