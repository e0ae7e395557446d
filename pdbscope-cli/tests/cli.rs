//! Runs the `pdbscope` binary against crafted symbol files.

#[path = "../../src/test/builders.rs"]
mod builders;

use std::{
    io::Write,
    path::Path,
    process::{Command, Output},
};

use builders::*;

const SOURCE_LINK: &str = r#"{"documents":{"/src/*":"https://example.com/raw/*"}}"#;

fn pdbscope(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdbscope"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn pdbscope_file(image: &[u8], extra: &[&str]) -> Output {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(image).unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let mut args: Vec<&str> = extra.to_vec();
    args.push(&path);
    pdbscope(&args)
}

/// Exit status as observed by the parent; Unix truncates it to one byte.
fn status(code: i32) -> Option<i32> {
    if cfg!(unix) {
        Some(code & 0xFF)
    } else {
        Some(code)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn found() {
    let image = PortablePdbBuilder::new()
        .source_link(SOURCE_LINK)
        .document("/src/Program.cs", LANGUAGE_CSHARP, HASH_SHA256, &[0x12, 0x34])
        .build();

    let output = pdbscope_file(&image, &[]);
    assert_eq!(output.status.code(), status(0));
    assert_eq!(
        stdout(&output),
        format!("{SOURCE_LINK}\nhttps://example.com/raw/Program.cs SHA256 1234\n")
    );
}

#[test]
fn not_found() {
    let image = PortablePdbBuilder::new().build();

    let output = pdbscope_file(&image, &[]);
    assert_eq!(output.status.code(), status(404));
    assert_eq!(stdout(&output), "No source link information found.\n");
}

#[test]
fn windows_pdb() {
    let image = MsfBuilder::new().named_stream("srcsrv", b"SRCSRV: ini").build();

    let output = pdbscope_file(&image, &[]);
    assert_eq!(output.status.code(), status(0));
    assert_eq!(stdout(&output), "SRCSRV: ini\n");
}

#[test]
fn windows_pdb_without_source_server_data() {
    let image = MsfBuilder::new().build();

    let output = pdbscope_file(&image, &[]);
    assert_eq!(output.status.code(), status(404));
    assert_eq!(stdout(&output), "No source link information found.\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn cannot_open() {
    let missing = Path::new(env!("CARGO_TARGET_TMPDIR")).join("does-not-exist.pdb");

    let output = pdbscope(&[missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), status(66));
    assert_eq!(stderr(&output), "Cannot open the given file.\n");
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_argument() {
    let output = pdbscope(&[]);
    assert_eq!(output.status.code(), status(255));

    let text = stdout(&output);
    assert!(text.starts_with("Usage: pdbscope"));
    assert!(text.ends_with("Missing input file.\n"));
}

#[test]
fn unsupported_file() {
    let output = pdbscope_file(b"MZ\x90\x00 definitely not a PDB", &[]);
    assert_eq!(output.status.code(), status(255));
    assert!(stderr(&output).starts_with("Exception: "));
}

#[test]
fn corrupt_embedded_source() {
    let image = PortablePdbBuilder::new()
        .document("/src/a.cs", LANGUAGE_CSHARP, HASH_SHA256, &[0x01])
        .embedded_source(1, &[0x10, 0x00, 0x00, 0x00, 0xFF, 0xFF])
        .build();

    let output = pdbscope_file(&image, &[]);
    assert_eq!(output.status.code(), status(255));
    assert!(stderr(&output).contains("Exception: "));
}

#[test]
fn json() {
    let image = PortablePdbBuilder::new()
        .source_link(SOURCE_LINK)
        .document("/src/a.cs", LANGUAGE_CSHARP, HASH_SHA1, &[0xAB])
        .document("/obj/b.cs", LANGUAGE_CSHARP, HASH_SHA1, &[0xCD])
        .embedded_source(2, &raw_embedded_source(b"class B {}"))
        .build();

    let output = pdbscope_file(&image, &["--json"]);
    assert_eq!(output.status.code(), status(0));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["format"], "Portable PDB");
    assert_eq!(report["source_link"], SOURCE_LINK);
    assert_eq!(report["documents"][0]["kind"], "linked");
    assert_eq!(report["documents"][0]["uri"], "https://example.com/raw/a.cs");
    assert_eq!(report["documents"][0]["algorithm"], "SHA1");
    assert_eq!(report["documents"][1]["kind"], "embedded");
    assert_eq!(report["documents"][1]["content"], "class B {}");
    assert_eq!(report["documents"][1]["hash"], "cd");
}

#[test]
fn json_not_found() {
    let image = PortablePdbBuilder::new().build();

    let output = pdbscope_file(&image, &["--json"]);
    assert_eq!(output.status.code(), status(404));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["documents"], serde_json::json!([]));
}

#[test]
fn verbose_logs_to_stderr() {
    let image = PortablePdbBuilder::new()
        .document("/src/a.cs", LANGUAGE_CSHARP, HASH_SHA1, &[0xAB])
        .build();

    let output = pdbscope_file(&image, &["--verbose"]);
    assert_eq!(output.status.code(), status(0));
    assert_eq!(stdout(&output), "/src/a.cs SHA1 ab\n");
    assert!(stderr(&output).contains("Portable PDB"));
}
