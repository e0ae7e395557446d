//! End-to-end reports of crafted Portable PDBs.
//!
//! The images model what the C# compiler emits for a small project:
//!
//! ```text
//! C:\src\app\Program.cs          linked through Source Link
//! C:\src\app\obj\Generated.cs    embedded, DEFLATE compressed
//! C:\src\app\Notes.cs            embedded, stored raw
//! D:\elsewhere\Local.cs          outside every Source Link pattern
//! ```

#[path = "../src/test/builders.rs"]
mod builders;

use std::io::Write;

use builders::*;
use flate2::{write::DeflateEncoder, Compression};
use pdbscope::prelude::*;

const SOURCE_LINK: &str =
    r#"{"documents":{"C:\\src\\app\\*":"https://raw.example.com/org/app/0123abc/*"}}"#;

const GENERATED: &str = "// <auto-generated/>\nnamespace App { static class Generated { } }\n";

fn compressed_embedded_source(text: &str) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();

    let mut blob = (text.len() as i32).to_le_bytes().to_vec();
    blob.extend_from_slice(&encoder.finish().unwrap());
    blob
}

fn project_pdb() -> Vec<u8> {
    let sha256: Vec<u8> = (0..32).collect();

    PortablePdbBuilder::new()
        .pdb_id([0x5A; 20])
        .source_link(SOURCE_LINK)
        .document("C:\\src\\app\\Program.cs", LANGUAGE_CSHARP, HASH_SHA256, &sha256)
        .document("C:\\src\\app\\obj\\Generated.cs", LANGUAGE_CSHARP, HASH_SHA256, &[0xAA; 4])
        .document("C:\\src\\app\\Notes.cs", LANGUAGE_CSHARP, HASH_SHA1, &[0xBB; 2])
        .document("D:\\elsewhere\\Local.cs", LANGUAGE_CSHARP, HASH_MD5, &[0xCC])
        .embedded_source(2, &compressed_embedded_source(GENERATED))
        .embedded_source(3, &raw_embedded_source(b"\xEF\xBB\xBFnotes"))
        .custom_debug_information(Parent::Module, KIND_COMPILATION_OPTIONS, b"language\0C#\0")
        .build()
}

#[test]
fn report_lines() -> Result<()> {
    let image = project_pdb();
    let mut output = Vec::new();

    assert!(pdbscope::process(&image, &mut output)?);

    let expected = format!(
        "{SOURCE_LINK}\n\
         https://raw.example.com/org/app/0123abc/Program.cs SHA256 {}\n\
         Embedded C:\\src\\app\\obj\\Generated.cs SHA256 aaaaaaaa\n\
         {GENERATED}\n\
         Embedded C:\\src\\app\\Notes.cs SHA1 bbbb\n\
         notes\n\
         D:\\elsewhere\\Local.cs MD5 cc\n",
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"
    );
    assert_eq!(String::from_utf8(output).unwrap(), expected);
    Ok(())
}

#[test]
fn structured_outcomes() -> Result<()> {
    let image = project_pdb();
    let pdb = PortablePdb::read(&image)?;
    assert_eq!(pdb.pdb_id(), &[0x5A; 20]);
    assert_eq!(pdb.document_count(), 4);

    let map = SourceLinkMap::parse(&String::from_utf8_lossy(pdb.source_link().unwrap()))?;
    let reports = DocumentResolver::new()
        .outcomes(&pdb, &map)
        .collect::<Result<Vec<_>>>()?;

    assert_eq!(
        reports[0].provenance,
        Provenance::LinkedUri("https://raw.example.com/org/app/0123abc/Program.cs".to_string())
    );
    assert_eq!(reports[1].provenance, Provenance::Embedded(GENERATED.to_string()));
    assert_eq!(reports[2].algorithm, HashAlgorithm::Sha1);
    assert_eq!(
        reports[3].provenance,
        Provenance::LocalOnly("D:\\elsewhere\\Local.cs".to_string())
    );
    Ok(())
}

#[test]
fn compressed_source_decodes() -> Result<()> {
    let image = project_pdb();
    let pdb = PortablePdb::read(&image)?;

    let blob = pdb
        .custom_debug()
        .find_kind(Token(0x3000_0002), CustomDebugKind::EmbeddedSource)
        .unwrap();
    let source = pdbscope::metadata::customdebuginformation::decode_embedded_source(blob)?;

    assert!(source.was_compressed);
    assert_eq!(source.content, GENERATED);
    Ok(())
}

#[test]
fn truncated_deflate_stream_is_fatal() {
    let mut blob = compressed_embedded_source(GENERATED);
    blob.truncate(blob.len() / 2);

    let image = PortablePdbBuilder::new()
        .document("C:\\src\\a.cs", LANGUAGE_CSHARP, HASH_SHA256, &[0x01])
        .embedded_source(1, &blob)
        .build();

    let mut output = Vec::new();
    assert!(matches!(
        pdbscope::process(&image, &mut output),
        Err(Error::Malformed { .. })
    ));
}

#[test]
fn mixed_languages() -> Result<()> {
    let image = PortablePdbBuilder::new()
        .document("/src/Lib.fs", LANGUAGE_FSHARP, HASH_SHA256, &[0x01])
        .document("/src/App.cs", LANGUAGE_CSHARP, HASH_SHA256, &[0x02])
        .document("/src/Module.vb", LANGUAGE_VB, HASH_SHA256, &[0x03])
        .document("/src/Other.cs", LANGUAGE_CSHARP, HASH_SHA256, &[0x04])
        .build();

    let mut output = Vec::new();
    assert!(pdbscope::process(&image, &mut output)?);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "/src/App.cs SHA256 02\n/src/Other.cs SHA256 04\n"
    );
    Ok(())
}

#[test]
fn large_tables() -> Result<()> {
    let mut builder = PortablePdbBuilder::new()
        .type_system_rows(0x06, 70_000)
        .large_blob_indices();
    for index in 0..300 {
        builder = builder.document(
            &format!("/src/File{index}.cs"),
            LANGUAGE_CSHARP,
            HASH_SHA256,
            &[index as u8],
        );
    }
    let image = builder.build();

    let mut output = Vec::new();
    assert!(pdbscope::process(&image, &mut output)?);

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 300);
    assert_eq!(text.lines().last(), Some("/src/File299.cs SHA256 2b"));
    Ok(())
}

#[test]
fn from_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(&project_pdb())?;

    let loaded = File::from_file(file.path())?;
    let container = Container::open(loaded.data())?;
    assert_eq!(container.format(), "Portable PDB");

    let mut output = Vec::new();
    assert!(pdbscope::process_file(file.path(), &mut output)?);
    assert!(output.starts_with(SOURCE_LINK.as_bytes()));
    Ok(())
}

#[test]
fn empty_file() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let mut output = Vec::new();
    assert!(matches!(
        pdbscope::process_file(file.path(), &mut output),
        Err(Error::Empty)
    ));
}
