//! Container format detection.
//!
//! Input is tried as a Portable PDB first. Only a missing `BSJB` signature falls back to
//! the Windows PDB reader; any other Portable PDB failure is reported as is.

use std::{io::Write, path::Path};

use crate::{
    file::File,
    legacy::{LegacySymReader, MsfSymReader},
    metadata::portablepdb::PortablePdb,
    provenance::DocumentResolver,
    Error, Result,
};

/// A debug symbol file of either supported format.
pub enum Container<'a> {
    /// A Portable PDB
    Portable(PortablePdb<'a>),
    /// A Windows PDB, only reachable through its source server data
    Windows(Box<dyn LegacySymReader + 'a>),
}

impl<'a> Container<'a> {
    /// Detects the format of `data` and parses it.
    ///
    /// # Errors
    /// Returns the Portable PDB error for input starting with `BSJB`, otherwise the
    /// Windows PDB error, [`crate::Error::NotSupported`] if `data` is neither format.
    pub fn open(data: &'a [u8]) -> Result<Container<'a>> {
        match PortablePdb::read(data) {
            Ok(pdb) => {
                log::debug!("reading Portable PDB");
                Ok(Container::Portable(pdb))
            }
            Err(Error::NotPortablePdb) => {
                let reader = MsfSymReader::read(data)?;
                log::debug!("reading Windows PDB");
                Ok(Container::Windows(Box::new(reader)))
            }
            Err(error) => Err(error),
        }
    }

    /// Short name of the container format.
    #[must_use]
    pub fn format(&self) -> &'static str {
        match self {
            Container::Portable(_) => "Portable PDB",
            Container::Windows(_) => "Windows PDB",
        }
    }

    /// Writes the provenance report with the default resolver.
    ///
    /// # Errors
    /// See [`Container::report_with`].
    pub fn report(&self, output: &mut impl Write) -> Result<bool> {
        self.report_with(&DocumentResolver::default(), output)
    }

    /// Writes the provenance report to `output`, returning `true` if anything was found.
    ///
    /// A Portable PDB is reported through `resolver`. A Windows PDB contributes its source
    /// server data verbatim, followed by a newline.
    ///
    /// # Errors
    /// Propagates resolver, reader and write failures.
    pub fn report_with(&self, resolver: &DocumentResolver, output: &mut impl Write) -> Result<bool> {
        match self {
            Container::Portable(pdb) => resolver.resolve(pdb, output),
            Container::Windows(reader) => match reader.source_server_data()? {
                Some(data) => {
                    writeln!(output, "{}", String::from_utf8_lossy(&data))?;
                    Ok(true)
                }
                None => Ok(false),
            },
        }
    }
}

/// Writes the provenance report of the symbol file in `input` to `output`.
///
/// Returns `true` if any provenance information was written.
///
/// # Errors
/// Returns [`crate::Error::NotSupported`] if `input` is neither a Portable nor a Windows
/// PDB, and propagates parse and write failures.
///
/// # Examples
///
/// ```rust
/// let mut output = Vec::new();
/// assert!(pdbscope::process(b"not a pdb", &mut output).is_err());
/// assert!(output.is_empty());
/// ```
pub fn process(input: &[u8], output: &mut impl Write) -> Result<bool> {
    let container = Container::open(input)?;
    let found = container.report(output)?;

    log::debug!("{} processed, found: {}", container.format(), found);
    Ok(found)
}

/// Maps the file at `path` and runs [`process`] on it.
///
/// # Errors
/// Returns [`crate::Error::FileError`] if the file cannot be opened,
/// [`crate::Error::Empty`] for an empty file, and propagates [`process`] failures.
pub fn process_file(path: &Path, output: &mut impl Write) -> Result<bool> {
    let file = File::from_file(path)?;
    log::debug!("{}: {} bytes", path.display(), file.len());

    process(file.data(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{
        raw_embedded_source, MsfBuilder, PortablePdbBuilder, HASH_SHA1, LANGUAGE_CSHARP,
    };

    fn run(input: &[u8]) -> (Result<bool>, String) {
        let mut output = Vec::new();
        let found = process(input, &mut output);
        (found, String::from_utf8(output).unwrap())
    }

    #[test]
    fn portable() {
        let image = PortablePdbBuilder::new()
            .source_link(r#"{"documents":{}}"#)
            .document("/src/a.cs", LANGUAGE_CSHARP, HASH_SHA1, &[0x0F])
            .embedded_source(1, &raw_embedded_source(b"a"))
            .build();

        assert!(matches!(
            Container::open(&image).unwrap(),
            Container::Portable(_)
        ));

        let (found, output) = run(&image);
        assert!(found.unwrap());
        assert_eq!(
            output,
            "{\"documents\":{}}\nEmbedded /src/a.cs SHA1 0f\na\n"
        );
    }

    #[test]
    fn windows() {
        let image = MsfBuilder::new()
            .named_stream("srcsrv", b"SRCSRV: ini ------\r\nVERSION=2")
            .build();

        let container = Container::open(&image).unwrap();
        assert_eq!(container.format(), "Windows PDB");

        let (found, output) = run(&image);
        assert!(found.unwrap());
        assert_eq!(output, "SRCSRV: ini ------\r\nVERSION=2\n");
    }

    #[test]
    fn windows_without_source_server_data() {
        let image = MsfBuilder::new().build();

        let (found, output) = run(&image);
        assert!(!found.unwrap());
        assert!(output.is_empty());
    }

    #[test]
    fn neither_format() {
        for input in [&b""[..], b"BS", b"MZ\x90\x00\x03\x00\x00\x00"] {
            let (found, output) = run(input);
            assert!(matches!(found, Err(Error::NotSupported)));
            assert!(output.is_empty());
        }
    }

    #[test]
    fn corrupt_portable_pdb_does_not_fall_back() {
        let image = PortablePdbBuilder::new().without_pdb_stream().build();

        let (found, _) = run(&image);
        assert!(matches!(found, Err(Error::Malformed { .. })));
    }

    #[test]
    fn from_disk() {
        let image = PortablePdbBuilder::new()
            .document("/src/a.cs", LANGUAGE_CSHARP, HASH_SHA1, &[0x01])
            .build();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&image).unwrap();

        let mut output = Vec::new();
        assert!(process_file(file.path(), &mut output).unwrap());
        assert_eq!(output, b"/src/a.cs SHA1 01\n");
    }

    #[test]
    fn missing_file() {
        let mut output = Vec::new();
        assert!(matches!(
            process_file(Path::new("/nonexistent/app.pdb"), &mut output),
            Err(Error::FileError(_))
        ));
    }
}
