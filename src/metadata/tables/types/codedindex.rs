use strum::{EnumCount, EnumIter};

use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{TableId, TableInfoRef},
        token::Token,
    },
    Error::OutOfBounds,
    Result,
};

/// Coded index kinds used by the Portable PDB debug tables.
///
/// A coded index stores a row id shifted left by enough bits to hold a tag selecting
/// the target table. The debug tables only use `HasCustomDebugInformation`, which is
/// the `HasCustomAttribute` target list extended by five debug tables.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
#[repr(usize)]
pub enum CodedIndexType {
    /// Parent of a `CustomDebugInformation` row
    HasCustomDebugInformation,
}

impl CodedIndexType {
    /// The target tables, in tag order.
    #[must_use]
    pub fn tables(&self) -> &'static [TableId] {
        match self {
            CodedIndexType::HasCustomDebugInformation => &[
                TableId::MethodDef,
                TableId::Field,
                TableId::TypeRef,
                TableId::TypeDef,
                TableId::Param,
                TableId::InterfaceImpl,
                TableId::MemberRef,
                TableId::Module,
                TableId::DeclSecurity,
                TableId::Property,
                TableId::Event,
                TableId::StandAloneSig,
                TableId::ModuleRef,
                TableId::TypeSpec,
                TableId::Assembly,
                TableId::AssemblyRef,
                TableId::File,
                TableId::ExportedType,
                TableId::ManifestResource,
                TableId::GenericParam,
                TableId::GenericParamConstraint,
                TableId::MethodSpec,
                TableId::Document,
                TableId::LocalScope,
                TableId::LocalVariable,
                TableId::LocalConstant,
                TableId::ImportScope,
            ],
        }
    }

    /// Number of low bits holding the tag.
    #[must_use]
    pub fn tag_bits(&self) -> u8 {
        let targets = self.tables().len();
        // ceil(log2(targets)); at least one bit even for a single target
        let bits = usize::BITS - targets.saturating_sub(1).leading_zeros();
        u8::try_from(bits.max(1)).unwrap_or(u8::MAX)
    }
}

/// A decoded coded index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CodedIndex {
    /// The table the index points into
    pub tag: TableId,
    /// The 1-based row, 0 for a nil reference
    pub row: u32,
    /// `tag` and `row` combined as a metadata token
    pub token: Token,
}

impl CodedIndex {
    /// Reads a 2 or 4 byte coded index of kind `ci_type` at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the data is too short or the tag does not
    /// name a target table.
    pub fn read(
        data: &[u8],
        offset: &mut usize,
        info: &TableInfoRef,
        ci_type: CodedIndexType,
    ) -> Result<Self> {
        let coded_index = read_le_at_dyn(data, offset, info.coded_index_bytes(ci_type) == 4)?;
        let (tag, row) = Self::decode(coded_index, ci_type)?;

        Ok(CodedIndex::new(tag, row))
    }

    /// Splits a raw coded index value into its target table and row.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the tag does not name a target table.
    pub fn decode(value: u32, ci_type: CodedIndexType) -> Result<(TableId, u32)> {
        let tables = ci_type.tables();
        let tag_bits = ci_type.tag_bits();
        let tag_mask = (1_u32 << tag_bits) - 1;

        let tag = (value & tag_mask) as usize;
        let row = value >> tag_bits;

        match tables.get(tag) {
            Some(table) => Ok((*table, row)),
            None => Err(OutOfBounds),
        }
    }

    /// Creates a coded index for `row` of `tag`.
    #[must_use]
    pub fn new(tag: TableId, row: u32) -> CodedIndex {
        CodedIndex {
            tag,
            row,
            token: Token::from_parts(tag as u8, row),
        }
    }
}
