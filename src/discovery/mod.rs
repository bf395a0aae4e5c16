//! File discovery under a root directory, filtered by extension.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::trace;

/// Builder-style file finder.
///
/// Walks everything under the root including hidden files; library and
/// work directories are not subject to ignore rules the way project trees
/// are. Results come back sorted for deterministic downstream iteration.
pub struct Files {
    root: PathBuf,
    extension: Option<String>,
    recursive: bool,
}

impl Files {
    pub fn under(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: None,
            recursive: true,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn non_recursive(mut self) -> Self {
        self.recursive = false;
        self
    }

    pub fn list(self) -> Vec<PathBuf> {
        let mut walker = WalkBuilder::new(&self.root);
        walker
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(false);
        if !self.recursive {
            walker.max_depth(Some(1));
        }

        let mut files: Vec<PathBuf> = walker
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.into_path())
            .filter(|path| self.matches_extension(path))
            .inspect(|path| trace!("found {}", path.display()))
            .collect();
        files.sort();
        files
    }

    fn matches_extension(&self, path: &Path) -> bool {
        match &self.extension {
            Some(wanted) => path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy() == *wanted),
            None => true,
        }
    }
}
