//! Source provenance reporting.
//!
//! Ties the container readers together: [`process`] detects the format of a symbol file
//! and writes where the source of every document can be found.
//!
//! For a Portable PDB the report is the Source Link JSON attached to the module, followed
//! by one [`DocumentReport`] per document of the reported language. A document is either
//! embedded, linked through Source Link, or known only by its build-time path:
//!
//! ```text
//! {"documents":{"C:\\src\\*":"https://raw.example.com/org/repo/abc/*"}}
//! https://raw.example.com/org/repo/abc/Program.cs SHA256 9f2c...
//! Embedded C:\obj\AssemblyInfo.cs SHA256 41d0...
//! <document text>
//! C:\other\Local.cs SHA1 0b1e...
//! ```
//!
//! For a Windows PDB the report is the content of its `srcsrv` or `sourcelink` stream.

mod dispatch;
mod outcome;
mod resolver;

pub use dispatch::{process, process_file, Container};
pub use outcome::{to_hex, DocumentReport, Provenance};
pub use resolver::{
    DocumentResolver, Outcomes, LANGUAGE_CSHARP, LANGUAGE_FSHARP, LANGUAGE_VISUAL_BASIC,
};
