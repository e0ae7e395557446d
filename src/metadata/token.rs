//! Metadata tokens.
//!
//! A token packs a table id in its high byte and a 1-based row id in its low 24 bits.
//! Portable PDBs use them to name the parent of a custom debug information row: the
//! module is `0x00000001`, document `n` is `0x3000_0000 | n`.

use std::fmt;

/// A metadata token, the table id in bits 24-31 and the row id in bits 0-23.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// The token of the single `Module` row, owner of module-wide debug information
    pub const MODULE: Token = Token(0x0000_0001);

    /// Creates a token from its raw value.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token from a table id and a row id. Only the low 24 bits of `row` are kept.
    #[must_use]
    pub fn from_parts(table: u8, row: u32) -> Self {
        Token((u32::from(table) << 24) | (row & 0x00FF_FFFF))
    }

    /// The raw 32-bit value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The table id.
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The 1-based row id.
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// `true` for the nil token.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
