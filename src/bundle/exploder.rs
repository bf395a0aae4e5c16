use std::path::{Path, PathBuf};

use tracing::debug;

use super::{reader, BundleError};

/// A jar whose entries have been materialized under a working directory.
#[derive(Debug, Clone)]
pub struct ExplodedJar {
    pub jar: PathBuf,
    pub extracted_to: PathBuf,
}

/// Extracts jar entries to loose files under a working directory.
///
/// Each jar gets its own subdirectory named after the jar file, so two jars
/// holding the same entry path never collide. Re-extracting a jar rewrites
/// its files in place and leaves everything else untouched.
pub struct JarExploder {
    work_dir: PathBuf,
}

impl JarExploder {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn explode_all(&self, jars: &[PathBuf]) -> Result<Vec<ExplodedJar>, BundleError> {
        jars.iter().map(|jar| self.explode(jar)).collect()
    }

    pub fn explode(&self, jar: &Path) -> Result<ExplodedJar, BundleError> {
        let jar_name = jar
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed.jar".to_string());
        let target = self.work_dir.join(&jar_name);

        debug!("extracting {} to {}", jar.display(), target.display());

        for entry in reader::list_entries(jar)? {
            let destination = safe_join(&target, &entry.path).ok_or_else(|| {
                BundleError::UnsafeEntry {
                    archive: jar.to_path_buf(),
                    entry: entry.path.clone(),
                }
            })?;

            if entry.is_dir {
                std::fs::create_dir_all(&destination).map_err(|source| {
                    BundleError::CreateDir {
                        path: destination.clone(),
                        source,
                    }
                })?;
                continue;
            }

            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent).map_err(|source| BundleError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&destination, &entry.bytes).map_err(|source| BundleError::Write {
                path: destination.clone(),
                source,
            })?;
        }

        Ok(ExplodedJar {
            jar: jar.to_path_buf(),
            extracted_to: target,
        })
    }
}

/// Join an archive entry path onto `root`, refusing traversal components.
fn safe_join(root: &Path, entry: &str) -> Option<PathBuf> {
    let mut result = root.to_path_buf();
    for component in entry.split('/') {
        if component.is_empty() || component == "." {
            continue;
        }
        if component == ".." {
            return None;
        }
        result.push(component);
    }
    Some(result)
}
