//! CustomDebugInformation table (`0x37`).
//!
//! Extension rows keyed by a kind GUID and attached to an arbitrary parent entity through
//! the `HasCustomDebugInformation` coded index. Source Link documents hang off the
//! module, embedded source off a document.
//!
//! # References
//!
//! - [Portable PDB Format - CustomDebugInformation Table](https://github.com/dotnet/runtime/blob/main/docs/design/specs/PortablePdb-Metadata.md#customdebuginformation-table-0x37)

mod raw;

pub use raw::CustomDebugInformationRaw;
