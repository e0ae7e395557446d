//! Document provenance resolution for Portable PDBs.

use std::io::Write;

use crate::{
    metadata::{
        customdebuginformation::{decode_embedded_source, CustomDebugKind},
        hashalgorithm::HashAlgorithmCache,
        portablepdb::PortablePdb,
        tables::Document,
    },
    provenance::{DocumentReport, Provenance},
    sourcelink::{PatternMap, SourceLinkMap},
    Result,
};

/// Language GUID of C#
pub const LANGUAGE_CSHARP: uguid::Guid = uguid::guid!("3f5162f8-07c6-11d3-9053-00c04fa302a1");
/// Language GUID of Visual Basic
pub const LANGUAGE_VISUAL_BASIC: uguid::Guid =
    uguid::guid!("3a12d0b8-c26c-11d0-b442-00a0244a1dd2");
/// Language GUID of F#
pub const LANGUAGE_FSHARP: uguid::Guid = uguid::guid!("ab4f38c9-b6e6-43ba-be3b-58080b2ccce3");

/// Reports where the documents of a Portable PDB come from.
///
/// Only documents of one language are reported, C# unless configured otherwise. The
/// first accepted document fixes the language for the rest of the run.
#[derive(Debug, Clone)]
pub struct DocumentResolver {
    language: uguid::Guid,
}

impl Default for DocumentResolver {
    fn default() -> Self {
        DocumentResolver {
            language: LANGUAGE_CSHARP,
        }
    }
}

impl DocumentResolver {
    /// Creates a resolver reporting C# documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver reporting documents of `language`.
    #[must_use]
    pub fn with_language(language: uguid::Guid) -> Self {
        DocumentResolver { language }
    }

    /// The language GUID documents are filtered by.
    #[must_use]
    pub fn language(&self) -> uguid::Guid {
        self.language
    }

    /// Resolves the provenance of every accepted document, in row order.
    ///
    /// Nothing is written; the Source Link map has to be supplied by the caller.
    pub fn outcomes<'p, 'a>(
        &self,
        pdb: &'p PortablePdb<'a>,
        map: &'p dyn PatternMap,
    ) -> Outcomes<'p, 'a> {
        Outcomes {
            pdb,
            map,
            documents: Box::new(pdb.documents()),
            algorithms: HashAlgorithmCache::new(),
            languages: LanguageFilter::new(self.language),
        }
    }

    /// Writes the Source Link document and one report per accepted document to `output`.
    ///
    /// Returns `true` if anything was written.
    ///
    /// # Errors
    /// Returns [`crate::Error::SourceLink`] for an invalid Source Link document,
    /// [`crate::Error::Malformed`] for an undecodable embedded source, and
    /// [`crate::Error::FileError`] if writing fails. Output written before the failure
    /// stays written.
    pub fn resolve(&self, pdb: &PortablePdb, output: &mut impl Write) -> Result<bool> {
        let mut found = false;

        let map = match pdb.source_link() {
            Some(blob) => {
                let json = String::from_utf8_lossy(blob);
                writeln!(output, "{json}")?;
                found = true;
                SourceLinkMap::parse(&json)?
            }
            None => {
                log::debug!("no Source Link document attached to the module");
                SourceLinkMap::default()
            }
        };

        for report in self.outcomes(pdb, &map) {
            writeln!(output, "{}", report?)?;
            found = true;
        }

        Ok(found)
    }
}

/// Accepts documents of one language.
///
/// Until a document has been accepted every candidate is compared with the configured
/// language; afterwards with the language of the first accepted document.
#[derive(Debug)]
struct LanguageFilter {
    expected: uguid::Guid,
    accepted: Option<uguid::Guid>,
}

impl LanguageFilter {
    fn new(expected: uguid::Guid) -> Self {
        LanguageFilter {
            expected,
            accepted: None,
        }
    }

    fn accept(&mut self, language: &uguid::Guid) -> bool {
        match self.accepted {
            Some(accepted) => accepted == *language,
            None if *language == self.expected => {
                self.accepted = Some(*language);
                true
            }
            None => false,
        }
    }
}

/// Iterator over the [`DocumentReport`]s of a Portable PDB.
///
/// Created by [`DocumentResolver::outcomes`]. Documents of other languages are skipped;
/// the first error ends the useful part of the iteration.
pub struct Outcomes<'p, 'a> {
    pdb: &'p PortablePdb<'a>,
    map: &'p dyn PatternMap,
    documents: Box<dyn Iterator<Item = Result<Document<'a>>> + 'p>,
    algorithms: HashAlgorithmCache,
    languages: LanguageFilter,
}

impl Outcomes<'_, '_> {
    fn report(&mut self, document: Document) -> Result<DocumentReport> {
        let algorithm = self
            .algorithms
            .resolve(document.hash_algorithm_index, self.pdb.guids());

        let embedded = self
            .pdb
            .custom_debug()
            .find_kind(document.token, CustomDebugKind::EmbeddedSource);

        let provenance = if let Some(blob) = embedded {
            let source = decode_embedded_source(blob)?;
            log::debug!(
                "{} is embedded ({} chars, compressed: {})",
                document.name,
                source.content.len(),
                source.was_compressed
            );
            Provenance::Embedded(source.content)
        } else if let Some(uri) = self.map.lookup(&document.name) {
            Provenance::LinkedUri(uri)
        } else {
            Provenance::LocalOnly(document.name.clone())
        };

        Ok(DocumentReport::new(
            document.name,
            provenance,
            algorithm,
            document.hash,
        ))
    }
}

impl Iterator for Outcomes<'_, '_> {
    type Item = Result<DocumentReport>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let document = match self.documents.next()? {
                Ok(document) => document,
                Err(error) => return Some(Err(error)),
            };

            if !self.languages.accept(&document.language) {
                log::trace!("skipping {} ({})", document.name, document.language);
                continue;
            }

            return Some(self.report(document));
        }
    }
}
