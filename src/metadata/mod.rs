//! Portable PDB metadata parsing.
//!
//! A Portable PDB is an ECMA-335 metadata block whose table stream only holds the debug
//! tables. This module reads it bottom-up:
//!
//! - [`root`] - the `BSJB` metadata root and stream directory; also where the format is
//!   detected
//! - [`streams`] - `#Pdb`, the table stream and the `#Strings`, `#Blob` and `#GUID` heaps
//! - [`tables`] - row layouts of the eight debug tables
//! - [`token`] - metadata tokens naming table rows
//! - [`hashalgorithm`] - document hash algorithm identification
//! - [`customdebuginformation`] - `(owner, kind)` lookup and embedded source decoding
//! - [`portablepdb`] - the container tying them together
//!
//! # Examples
//!
//! ```rust,no_run
//! use pdbscope::metadata::{customdebuginformation::decode_embedded_source, portablepdb::PortablePdb};
//! use pdbscope::metadata::customdebuginformation::CustomDebugKind;
//!
//! let data = std::fs::read("app.pdb")?;
//! let pdb = PortablePdb::read(&data)?;
//!
//! for document in pdb.documents() {
//!     let document = document?;
//!     let kind = CustomDebugKind::EmbeddedSource.guid();
//!     if let Some(blob) = pdb.custom_debug_information(document.token, &kind) {
//!         let source = decode_embedded_source(blob)?;
//!         println!("{}: {} chars", document.name, source.content.len());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod customdebuginformation;
pub mod hashalgorithm;
pub mod portablepdb;
pub mod root;
pub mod streams;
pub mod tables;
pub mod token;
