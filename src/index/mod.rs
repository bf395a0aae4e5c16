//! Trie index over the class entries of many jars.
//!
//! Lookup cost is proportional to the number of package segments in the
//! queried name, not to the number of indexed classes. That asymptotic
//! difference is the whole reason the indexed minimization strategy exists.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::bundle::{self, BundleError};
use crate::model::{ArtifactError, ClassArtifact, ClassName};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("could not read archive {archive}")]
    Archive {
        archive: PathBuf,
        #[source]
        source: BundleError,
    },
    #[error("archive {archive} holds an invalid class entry")]
    InvalidEntry {
        archive: PathBuf,
        #[source]
        source: ArtifactError,
    },
    #[error("class not present in index: {name}")]
    NotFound { name: ClassName },
}

/// One node per path segment. A node holds a class artifact payload exactly
/// when its path spells a class entry.
#[derive(Debug, Default)]
struct IndexNode {
    children: HashMap<String, IndexNode>,
    payload: Option<ClassArtifact>,
}

/// In-memory index of many archives' class entries.
///
/// Built in one bulk pass over the given archives, then queried; it is a
/// single writer structure and must not be mutated while lookups are in
/// flight. When two archives carry an entry at the same path the first
/// archive in the given order wins.
#[derive(Debug, Default)]
pub struct LibraryIndex {
    root: IndexNode,
    classes: usize,
}

impl LibraryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every entry of every given archive.
    ///
    /// Any unreadable archive or unparseable class entry aborts indexing.
    /// Compiler metadata that is not an addressable class (`module-info`,
    /// `package-info`, `META-INF` entries) is skipped.
    pub fn index(&mut self, archives: &[PathBuf]) -> Result<&mut Self, IndexError> {
        for archive in archives {
            let entries =
                bundle::list_entries(archive).map_err(|source| IndexError::Archive {
                    archive: archive.clone(),
                    source,
                })?;

            for entry in entries {
                if entry.is_dir || bundle::is_metadata_entry(&entry.path) {
                    continue;
                }

                let artifact = if bundle::is_class_entry(&entry.path) {
                    let artifact = ClassArtifact::from_bytes(entry.bytes, &entry.path)
                        .map_err(|source| IndexError::InvalidEntry {
                            archive: archive.clone(),
                            source,
                        })?;
                    Some(artifact)
                } else {
                    None
                };

                self.insert(&entry.path, artifact);
            }
            debug!("indexed {}, {} classes total", archive.display(), self.classes);
        }
        Ok(self)
    }

    fn insert(&mut self, path: &str, artifact: Option<ClassArtifact>) {
        let mut node = &mut self.root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = node.children.entry(segment.to_string()).or_default();
        }
        // first archive wins, never overwrite an existing payload
        if let Some(artifact) = artifact {
            if node.payload.is_none() {
                node.payload = Some(artifact);
                self.classes += 1;
            }
        }
    }

    /// True if a class entry exists at the name's path.
    pub fn contains(&self, name: &ClassName) -> bool {
        self.find(name).is_some()
    }

    /// The artifact indexed at the name's path, if any.
    pub fn find(&self, name: &ClassName) -> Option<&ClassArtifact> {
        let mut node = &self.root;
        for segment in name.to_entry_path().split('/') {
            node = node.children.get(segment)?;
        }
        node.payload.as_ref()
    }

    /// Like [`find`](Self::find), but for callers that have already
    /// established the name must exist.
    pub fn get(&self, name: &ClassName) -> Result<&ClassArtifact, IndexError> {
        self.find(name).ok_or_else(|| IndexError::NotFound {
            name: name.clone(),
        })
    }

    /// Number of indexed class entries. Intermediate path nodes don't count.
    pub fn size(&self) -> usize {
        self.classes
    }
}
