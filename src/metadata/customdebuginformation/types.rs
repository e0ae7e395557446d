//! Well-known custom debug information kinds.

use std::fmt;

/// Custom debug information kinds emitted by the .NET compilers, identified by GUID.
///
/// Only [`CustomDebugKind::SourceLink`] and [`CustomDebugKind::EmbeddedSource`] carry
/// provenance data. The others are named so they can be reported; their blobs are never
/// decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomDebugKind {
    /// Source Link JSON, attached to the module
    SourceLink,
    /// Embedded source text, attached to a document
    EmbeddedSource,
    /// Compiler options, attached to the module
    CompilationOptions,
    /// Metadata references of the compilation, attached to the module
    CompilationMetadataReferences,
    /// Hoisted local scopes of a state machine method
    StateMachineHoistedLocalScopes,
    /// `dynamic` flags of local variables and constants
    DynamicLocalVariables,
    /// Tuple element names of local variables and constants
    TupleElementNames,
    /// VB default namespace, attached to the module
    DefaultNamespace,
    /// Edit and Continue local slot map
    EncLocalSlotMap,
    /// Edit and Continue lambda and closure map
    EncLambdaAndClosureMap,
    /// Edit and Continue state machine state map
    EncStateMachineStateMap,
    /// Documents of types without method bodies
    TypeDefinitionDocuments,
    /// Primary constructor information
    PrimaryConstructorInformation,
    /// Any other kind
    Unknown(uguid::Guid),
}

const KINDS: [(CustomDebugKind, uguid::Guid); 13] = [
    (CustomDebugKind::SourceLink, uguid::guid!("cc110556-a091-4d38-9fec-25ab9a351a6a")),
    (CustomDebugKind::EmbeddedSource, uguid::guid!("0e8a571b-6926-466e-b4ad-8ab04611f5fe")),
    (CustomDebugKind::CompilationOptions, uguid::guid!("b5feec05-8cd0-4a83-96da-466284bb4bd8")),
    (
        CustomDebugKind::CompilationMetadataReferences,
        uguid::guid!("7e4d4708-096e-4c5c-aeda-cb10ba6a740d"),
    ),
    (
        CustomDebugKind::StateMachineHoistedLocalScopes,
        uguid::guid!("6da9a61e-f8c7-4874-be62-68bc5630df71"),
    ),
    (
        CustomDebugKind::DynamicLocalVariables,
        uguid::guid!("83c563c4-b4f3-47d5-b824-ba5441477ea8"),
    ),
    (CustomDebugKind::TupleElementNames, uguid::guid!("ed9fdf71-8879-4747-8ed3-fe5ede3ce710")),
    (CustomDebugKind::DefaultNamespace, uguid::guid!("58b2eab6-209f-4e4e-a22c-b2d0f910c782")),
    (CustomDebugKind::EncLocalSlotMap, uguid::guid!("755f52a8-91c5-45be-b4b8-209571e552bd")),
    (
        CustomDebugKind::EncLambdaAndClosureMap,
        uguid::guid!("a643004c-0240-496f-a783-30d64f4979de"),
    ),
    (
        CustomDebugKind::EncStateMachineStateMap,
        uguid::guid!("8b78cd68-2ede-420b-980b-e15884b8aaa3"),
    ),
    (
        CustomDebugKind::TypeDefinitionDocuments,
        uguid::guid!("932e74bc-dba9-4478-8d46-0f32a7bab3d3"),
    ),
    (
        CustomDebugKind::PrimaryConstructorInformation,
        uguid::guid!("9d40ace1-c703-4d0e-bf41-7243060a8fb5"),
    ),
];

impl CustomDebugKind {
    /// Identifies the kind named by `guid`.
    #[must_use]
    pub fn from_guid(guid: &uguid::Guid) -> Self {
        KINDS
            .iter()
            .find(|(_, known)| known == guid)
            .map_or(CustomDebugKind::Unknown(*guid), |(kind, _)| *kind)
    }

    /// The GUID identifying this kind.
    #[must_use]
    pub fn guid(&self) -> uguid::Guid {
        if let CustomDebugKind::Unknown(guid) = self {
            return *guid;
        }

        KINDS
            .iter()
            .find(|(kind, _)| kind == self)
            .map_or(uguid::Guid::ZERO, |(_, guid)| *guid)
    }
}

impl fmt::Display for CustomDebugKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomDebugKind::Unknown(guid) => write!(f, "Unknown({guid})"),
            known => write!(f, "{known:?}"),
        }
    }
}

/// Decoded embedded source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedSource {
    /// The document text
    pub content: String,
    /// `true` if the blob held a DEFLATE stream
    pub was_compressed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_guid() {
        assert_eq!(
            CustomDebugKind::from_guid(&uguid::guid!("CC110556-A091-4D38-9FEC-25AB9A351A6A")),
            CustomDebugKind::SourceLink
        );
        assert_eq!(
            CustomDebugKind::from_guid(&uguid::guid!("0E8A571B-6926-466E-B4AD-8AB04611F5FE")),
            CustomDebugKind::EmbeddedSource
        );

        let other = uguid::guid!("01234567-89ab-cdef-0123-456789abcdef");
        assert_eq!(
            CustomDebugKind::from_guid(&other),
            CustomDebugKind::Unknown(other)
        );
    }

    #[test]
    fn guid_roundtrip() {
        for (kind, guid) in KINDS {
            assert_eq!(kind.guid(), guid);
            assert_eq!(CustomDebugKind::from_guid(&guid), kind);
        }
    }

    #[test]
    fn display() {
        assert_eq!(CustomDebugKind::SourceLink.to_string(), "SourceLink");
        assert_eq!(
            CustomDebugKind::Unknown(uguid::Guid::ZERO).to_string(),
            "Unknown(00000000-0000-0000-0000-000000000000)"
        );
    }
}
