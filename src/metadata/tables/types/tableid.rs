use strum::{EnumCount, EnumIter};

/// Identifiers of the ECMA-335 and Portable PDB metadata tables.
///
/// The type-system tables (`0x00` - `0x2C`) never appear in a Portable PDB's own table
/// stream; their row counts are carried by the `#Pdb` stream because debug tables
/// reference them (`LocalScope.Method`, the `HasCustomDebugInformation` parents, ...).
/// The debug tables (`0x30` - `0x37`) are the ones actually stored.
#[derive(Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, EnumIter, EnumCount)]
#[repr(u8)]
pub enum TableId {
    /// `0x00`
    Module = 0x00,
    /// `0x01`
    TypeRef = 0x01,
    /// `0x02`
    TypeDef = 0x02,
    /// `0x03`
    FieldPtr = 0x03,
    /// `0x04`
    Field = 0x04,
    /// `0x05`
    MethodPtr = 0x05,
    /// `0x06`
    MethodDef = 0x06,
    /// `0x07`
    ParamPtr = 0x07,
    /// `0x08`
    Param = 0x08,
    /// `0x09`
    InterfaceImpl = 0x09,
    /// `0x0A`
    MemberRef = 0x0A,
    /// `0x0B`
    Constant = 0x0B,
    /// `0x0C`
    CustomAttribute = 0x0C,
    /// `0x0D`
    FieldMarshal = 0x0D,
    /// `0x0E`
    DeclSecurity = 0x0E,
    /// `0x0F`
    ClassLayout = 0x0F,
    /// `0x10`
    FieldLayout = 0x10,
    /// `0x11`
    StandAloneSig = 0x11,
    /// `0x12`
    EventMap = 0x12,
    /// `0x13`
    EventPtr = 0x13,
    /// `0x14`
    Event = 0x14,
    /// `0x15`
    PropertyMap = 0x15,
    /// `0x16`
    PropertyPtr = 0x16,
    /// `0x17`
    Property = 0x17,
    /// `0x18`
    MethodSemantics = 0x18,
    /// `0x19`
    MethodImpl = 0x19,
    /// `0x1A`
    ModuleRef = 0x1A,
    /// `0x1B`
    TypeSpec = 0x1B,
    /// `0x1C`
    ImplMap = 0x1C,
    /// `0x1D`
    FieldRVA = 0x1D,
    /// `0x1E`
    EncLog = 0x1E,
    /// `0x1F`
    EncMap = 0x1F,
    /// `0x20`
    Assembly = 0x20,
    /// `0x21`
    AssemblyProcessor = 0x21,
    /// `0x22`
    AssemblyOS = 0x22,
    /// `0x23`
    AssemblyRef = 0x23,
    /// `0x24`
    AssemblyRefProcessor = 0x24,
    /// `0x25`
    AssemblyRefOS = 0x25,
    /// `0x26`
    File = 0x26,
    /// `0x27`
    ExportedType = 0x27,
    /// `0x28`
    ManifestResource = 0x28,
    /// `0x29`
    NestedClass = 0x29,
    /// `0x2A`
    GenericParam = 0x2A,
    /// `0x2B`
    MethodSpec = 0x2B,
    /// `0x2C`
    GenericParamConstraint = 0x2C,
    /// `0x30` - source documents
    Document = 0x30,
    /// `0x31` - per-method document and sequence points
    MethodDebugInformation = 0x31,
    /// `0x32` - lexical scopes of a method
    LocalScope = 0x32,
    /// `0x33` - local variable names
    LocalVariable = 0x33,
    /// `0x34` - local constant names and values
    LocalConstant = 0x34,
    /// `0x35` - namespace import scopes
    ImportScope = 0x35,
    /// `0x36` - kickoff methods of async and iterator state machines
    StateMachineMethod = 0x36,
    /// `0x37` - GUID-keyed extension data
    CustomDebugInformation = 0x37,
}

impl TableId {
    /// Number of slots needed to index every table id by its numeric value
    pub const SLOTS: usize = 0x38;

    /// First id of the Portable PDB debug tables
    pub const FIRST_DEBUG_TABLE: u8 = 0x30;

    /// Returns `true` for the Portable PDB debug tables `0x30` - `0x37`.
    #[must_use]
    pub fn is_debug_table(self) -> bool {
        self as u8 >= Self::FIRST_DEBUG_TABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ordering() {
        let ids: Vec<TableId> = TableId::iter().collect();

        assert_eq!(ids.len(), TableId::COUNT);
        assert_eq!(ids.first(), Some(&TableId::Module));
        assert_eq!(ids.last(), Some(&TableId::CustomDebugInformation));
        assert!(ids.windows(2).all(|pair| (pair[0] as u8) < (pair[1] as u8)));
        assert!(ids.iter().all(|id| (*id as usize) < TableId::SLOTS));
    }

    #[test]
    fn debug_tables() {
        assert!(TableId::Document.is_debug_table());
        assert!(TableId::CustomDebugInformation.is_debug_table());
        assert!(!TableId::GenericParamConstraint.is_debug_table());
        assert_eq!(TableId::iter().filter(|id| id.is_debug_table()).count(), 8);
    }
}
