use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::BundleError;

/// One entry of a jar archive.
#[derive(Debug, Clone)]
pub struct JarEntry {
    /// Slash-delimited path inside the archive.
    pub path: String,
    pub is_dir: bool,
    pub bytes: Vec<u8>,
}

/// List every entry of the jar at `path`, with its content.
pub fn list_entries(path: &Path) -> Result<Vec<JarEntry>, BundleError> {
    let file = File::open(path).map_err(|source| BundleError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| BundleError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|source| BundleError::Archive {
            path: path.to_path_buf(),
            source,
        })?;

        let is_dir = entry.is_dir();
        let mut bytes = Vec::new();
        if !is_dir {
            entry
                .read_to_end(&mut bytes)
                .map_err(|source| BundleError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        entries.push(JarEntry {
            path: entry.name().to_string(),
            is_dir,
            bytes,
        });
    }
    Ok(entries)
}
