//! Helpers for building synthetic class files and jars in tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::ZipWriter;

use crate::model::ClassArtifact;

/// Assemble a minimal class file for the given internal name.
///
/// The constant pool holds the class's own name plus one `CONSTANT_Class`
/// entry per referenced internal name; the body is empty.
pub fn class_bytes(name: &str, referenced: &[&str]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // minor
    out.extend_from_slice(&52u16.to_be_bytes()); // major (Java 8)

    let pool_count = 1 + 2 * (1 + referenced.len() as u16);
    out.extend_from_slice(&pool_count.to_be_bytes());
    let mut utf8_index = 1u16;
    for entry_name in std::iter::once(&name).chain(referenced.iter()) {
        out.push(1); // CONSTANT_Utf8
        out.extend_from_slice(&(entry_name.len() as u16).to_be_bytes());
        out.extend_from_slice(entry_name.as_bytes());
        out.push(7); // CONSTANT_Class
        out.extend_from_slice(&utf8_index.to_be_bytes());
        utf8_index += 2;
    }

    out.extend_from_slice(&0x0021u16.to_be_bytes()); // access flags
    out.extend_from_slice(&2u16.to_be_bytes()); // this_class
    out.extend_from_slice(&0u16.to_be_bytes()); // super_class
    out.extend_from_slice(&0u16.to_be_bytes()); // interfaces
    out.extend_from_slice(&0u16.to_be_bytes()); // fields
    out.extend_from_slice(&0u16.to_be_bytes()); // methods
    out.extend_from_slice(&0u16.to_be_bytes()); // attributes
    out
}

/// Write a synthetic class file under `root` at its package path and load it
/// back as an artifact with an origin.
pub fn write_class_file(root: &Path, name: &str, referenced: &[&str]) -> ClassArtifact {
    let path = root.join(format!("{name}.class"));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, class_bytes(name, referenced)).unwrap();
    ClassArtifact::from_file(&path).unwrap()
}

/// Build a jar at `path` containing one synthetic class entry per
/// `(internal_name, referenced)` pair.
pub fn make_jar(path: &Path, classes: &[(&str, &[&str])]) -> PathBuf {
    let file = File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default();

    for (name, referenced) in classes {
        writer
            .start_file(format!("{name}.class"), options)
            .unwrap();
        writer.write_all(&class_bytes(name, referenced)).unwrap();
    }
    writer.finish().unwrap();
    path.to_path_buf()
}
