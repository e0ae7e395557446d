use std::path::PathBuf;

use clap::Parser;

/// Exit code when provenance information was printed
pub const EXIT_FOUND: i32 = 0;
/// Exit code when the PDB holds no provenance information
pub const EXIT_NOT_FOUND: i32 = 404;
/// Exit code when the input file cannot be opened
pub const EXIT_CANNOT_OPEN: i32 = 66;
/// Exit code for a missing argument or any other failure
pub const EXIT_FAILURE: i32 = 255;

/// pdbscope - print the Source Link mapping, embedded sources and document hashes of a PDB
#[derive(Debug, Parser)]
#[command(name = "pdbscope", version, about, long_about = None)]
pub struct Cli {
    /// Path to the Portable or Windows PDB file.
    #[arg(value_name = "PDBFILE")]
    pub path: Option<PathBuf>,

    /// Emit the report as JSON instead of the line format.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    pub verbose: bool,
}
