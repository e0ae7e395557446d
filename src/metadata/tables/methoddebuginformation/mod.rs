//! MethodDebugInformation table (`0x31`).
//!
//! Parallel to the `MethodDef` table of the described assembly: row `n` holds the
//! document and sequence points of method `n`. Rows are sized here so the tables that
//! follow can be located; the sequence point blobs are not decoded.

mod raw;

pub use raw::MethodDebugInformationRaw;
