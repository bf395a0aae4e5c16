//! Jar archive collaborators: entry listing, extraction to disk and
//! assembly of the minimized output jar.

mod exploder;
mod maker;
mod reader;

pub use exploder::{ExplodedJar, JarExploder};
pub use maker::JarMaker;
pub use reader::{list_entries, JarEntry};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::CLASS_EXTENSION;

/// File extension of jar archives.
pub const JAR_EXTENSION: &str = "jar";

/// True if the entry path names a compiled class.
pub fn is_class_entry(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext == CLASS_EXTENSION)
}

/// True for class files that are compiler metadata rather than addressable
/// classes: module and package descriptors and anything under `META-INF/`.
pub fn is_metadata_entry(path: &str) -> bool {
    path.starts_with("META-INF/")
        || path.ends_with("module-info.class")
        || path.ends_with("package-info.class")
}

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("could not open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read archive {path}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("could not create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("archive {archive} holds an entry escaping its root: {entry}")]
    UnsafeEntry { archive: PathBuf, entry: String },
}
