//! LocalConstant table (`0x34`).

mod raw;

pub use raw::LocalConstantRaw;
