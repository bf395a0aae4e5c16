use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::write::FileOptions;
use zip::ZipWriter;

use super::BundleError;
use crate::model::ClassArtifact;

/// Assembles a set of class artifacts into one output jar.
///
/// Package directory entries are written exactly once even when shared by
/// many classes, and a duplicate class entry path is never written twice.
pub struct JarMaker {
    output: PathBuf,
}

impl JarMaker {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn make(&self, artifacts: &BTreeSet<ClassArtifact>) -> Result<PathBuf, BundleError> {
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| BundleError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = File::create(&self.output).map_err(|source| BundleError::Open {
            path: self.output.clone(),
            source,
        })?;
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default();

        let mut dir_entries: HashSet<String> = HashSet::new();
        let mut class_entries: HashSet<String> = HashSet::new();

        for artifact in artifacts {
            let entry_path = artifact.name().to_entry_path();

            // one directory entry per package level, shared across classes
            let mut dir = String::new();
            for segment in parent_segments(&entry_path) {
                dir.push_str(segment);
                dir.push('/');
                if dir_entries.insert(dir.clone()) {
                    writer
                        .add_directory(dir.trim_end_matches('/'), options)
                        .map_err(|source| BundleError::Archive {
                            path: self.output.clone(),
                            source,
                        })?;
                }
            }

            if !class_entries.insert(entry_path.clone()) {
                continue;
            }
            writer
                .start_file(&entry_path, options)
                .map_err(|source| BundleError::Archive {
                    path: self.output.clone(),
                    source,
                })?;
            writer
                .write_all(artifact.bytes())
                .map_err(|source| BundleError::Write {
                    path: self.output.clone(),
                    source,
                })?;
        }

        writer.finish().map_err(|source| BundleError::Archive {
            path: self.output.clone(),
            source,
        })?;

        debug!(
            "packaged {} classes into {}",
            class_entries.len(),
            self.output.display()
        );
        Ok(self.output.clone())
    }
}

fn parent_segments(entry_path: &str) -> impl Iterator<Item = &str> {
    let mut segments: Vec<&str> = entry_path.split('/').collect();
    segments.pop(); // the file name itself is not a directory
    segments.into_iter()
}
