use std::io::Write;

use pdbscope::{
    provenance::{Container, DocumentReport, DocumentResolver, Provenance},
    sourcelink::SourceLinkMap,
};
use serde::Serialize;

/// Machine readable form of the whole report.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_server_data: Option<String>,
    pub documents: Vec<JsonDocument>,
}

#[derive(Debug, Serialize)]
pub struct JsonDocument {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub algorithm: String,
    pub hash: String,
}

impl From<DocumentReport> for JsonDocument {
    fn from(report: DocumentReport) -> Self {
        let (kind, uri, content) = match report.provenance {
            Provenance::Embedded(text) => ("embedded", None, Some(text)),
            Provenance::LinkedUri(uri) => ("linked", Some(uri), None),
            Provenance::LocalOnly(_) => ("local", None, None),
        };

        JsonDocument {
            name: report.name,
            kind,
            uri,
            content,
            algorithm: report.algorithm.to_string(),
            hash: report.hash,
        }
    }
}

impl JsonReport {
    /// Returns `true` if the report carries any provenance information.
    pub fn found(&self) -> bool {
        self.source_link.is_some() || self.source_server_data.is_some() || !self.documents.is_empty()
    }
}

/// Collects the report of `container` without writing anything.
pub fn collect(container: &Container) -> anyhow::Result<JsonReport> {
    let mut report = JsonReport {
        format: container.format(),
        source_link: None,
        source_server_data: None,
        documents: Vec::new(),
    };

    match container {
        Container::Portable(pdb) => {
            let map = match pdb.source_link() {
                Some(blob) => {
                    let json = String::from_utf8_lossy(blob).into_owned();
                    let map = SourceLinkMap::parse(&json)?;
                    report.source_link = Some(json);
                    map
                }
                None => SourceLinkMap::default(),
            };

            for document in DocumentResolver::new().outcomes(pdb, &map) {
                report.documents.push(document?.into());
            }
        }
        Container::Windows(reader) => {
            report.source_server_data = reader
                .source_server_data()?
                .map(|data| String::from_utf8_lossy(&data).into_owned());
        }
    }

    Ok(report)
}

/// Writes the report of `container` as pretty printed JSON, returning whether anything
/// was found.
pub fn write_json(container: &Container, output: &mut impl Write) -> anyhow::Result<bool> {
    let report = collect(container)?;

    serde_json::to_writer_pretty(&mut *output, &report)?;
    writeln!(output)?;
    Ok(report.found())
}
