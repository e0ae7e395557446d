//! ImportScope table (`0x35`).
//!
//! Namespace and alias imports in effect for a set of local scopes. Scopes nest through
//! their parent reference; the import blobs are not decoded.

mod raw;

pub use raw::ImportScopeRaw;
