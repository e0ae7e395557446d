mod app;
mod output;

use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use pdbscope::{provenance::Container, File};

use crate::app::{Cli, EXIT_CANNOT_OPEN, EXIT_FAILURE, EXIT_FOUND, EXIT_NOT_FOUND};

fn main() {
    if let Err(error) = ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    }) {
        eprintln!("failed to set Ctrl+C handler: {error}");
    }

    let cli = Cli::parse();

    // pdbscope info+ on stderr; --verbose enables debug; RUST_LOG overrides
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("pdbscope", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let Some(path) = &cli.path else {
        println!("{}", Cli::command().render_usage());
        println!("Missing input file.");
        return EXIT_FAILURE;
    };

    let file = match File::from_file(path) {
        Ok(file) => file,
        Err(pdbscope::Error::FileError(error)) => {
            log::debug!("{}: {}", path.display(), error);
            eprintln!("Cannot open the given file.");
            return EXIT_CANNOT_OPEN;
        }
        Err(error) => {
            eprintln!("Exception: {error}");
            return EXIT_FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    let result = report(file.data(), cli.json, &mut output);
    let flushed = output.flush();
    drop(output);

    match (result, flushed) {
        (Ok(true), Ok(())) => EXIT_FOUND,
        (Ok(false), Ok(())) => {
            if !cli.json {
                println!("No source link information found.");
            }
            EXIT_NOT_FOUND
        }
        (Err(error), _) => {
            eprintln!("Exception: {error:#}");
            EXIT_FAILURE
        }
        (Ok(_), Err(error)) => {
            eprintln!("Exception: {error}");
            EXIT_FAILURE
        }
    }
}

fn report(data: &[u8], json: bool, output: &mut impl Write) -> anyhow::Result<bool> {
    let container = Container::open(data).context("unrecognized symbol file")?;

    let found = if json {
        output::write_json(&container, output)?
    } else {
        container.report(output)?
    };

    log::debug!("{}: found {}", container.format(), found);
    Ok(found)
}
