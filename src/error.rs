use thiserror::Error;

/// Builds an [`Error::Malformed`] tagged with the call site.
macro_rules! malformed_error {
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// Everything that can go wrong while reading a symbol file.
///
/// The variants fall into four groups:
///
/// ## Format detection
/// - [`Error::NotPortablePdb`] - The input is not a Portable PDB. This is the signal the
///   format dispatcher uses to fall back to the Windows PDB reader; it never escapes
///   [`crate::process`].
///
/// ## Structural corruption
/// - [`Error::Malformed`] - Corrupted or invalid file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of a structure
/// - [`Error::SourceLink`] - The Source Link JSON document is invalid
///
/// ## Unsupported input
/// - [`Error::NotSupported`] - Neither a Portable PDB nor an MSF 7.00 Windows PDB
/// - [`Error::Empty`] - Empty input provided
///
/// ## I/O
/// - [`Error::FileError`] - Filesystem or output stream errors
///
/// Absence of provenance data is never an error; it is reported through the `bool`
/// returned by [`crate::process`].
///
/// # Examples
///
/// ```rust,no_run
/// use pdbscope::Error;
///
/// let mut out = Vec::new();
/// match pdbscope::process_file("app.pdb".as_ref(), &mut out) {
///     Ok(true) => println!("{}", String::from_utf8_lossy(&out)),
///     Ok(false) => println!("No source link information found."),
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input does not start with the metadata signature of a Portable PDB.
    ///
    /// Raised only while probing the input format; the dispatcher reacts to it by
    /// handing the input to the Windows PDB reader instead.
    #[error("Input is not a Portable PDB")]
    NotPortablePdb,

    /// A structure inside the file contradicts the format.
    ///
    /// Covers bad headers, dangling heap indices, unknown stream names and embedded
    /// sources that fail to decompress. `file` and `line` locate the check that failed.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// What was wrong
        message: String,
        /// Source file of the failed check
        file: &'static str,
        /// Source line of the failed check
        line: u32,
    },

    /// A read ran past the end of its stream, heap, table or blob.
    #[error("Read past the end of the data")]
    OutOfBounds,

    /// Neither the Portable PDB parser nor the Windows PDB reader accepted the input.
    #[error("Not a Portable PDB or an MSF 7.00 Windows PDB")]
    NotSupported,

    /// The input has zero length.
    #[error("Input is empty")]
    Empty,

    /// Opening or mapping the input failed, or writing the report did.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The Source Link document could not be parsed.
    ///
    /// Either the payload is not valid JSON, or one of its path/URI patterns violates
    /// the wildcard rules.
    #[error("Invalid Source Link document - {0}")]
    SourceLink(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SourceLink(error.to_string())
    }
}
