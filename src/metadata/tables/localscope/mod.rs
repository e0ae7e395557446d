//! LocalScope table (`0x32`).
//!
//! Lexical scopes of a method body with their IL range and the first local variable
//! and constant declared in them.

mod raw;

pub use raw::LocalScopeRaw;
