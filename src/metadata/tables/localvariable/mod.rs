//! LocalVariable table (`0x33`).

mod raw;

pub use raw::LocalVariableRaw;
