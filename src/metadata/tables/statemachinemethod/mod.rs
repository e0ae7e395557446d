//! StateMachineMethod table (`0x36`).
//!
//! Maps the `MoveNext` method of a compiler generated async or iterator state machine
//! back to the user method that started it.

mod raw;

pub use raw::StateMachineMethodRaw;
