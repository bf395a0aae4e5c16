use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tree_sitter::Parser as TsParser;

use super::{DependencySet, NameError};
use crate::resolver;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read source file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin} does not parse as Java source")]
    InvalidSource { origin: String },
    #[error("wildcard imports are not supported: {import}")]
    WildcardImport { import: String },
    #[error("import does not name a valid class: {import}")]
    MalformedImport {
        import: String,
        #[source]
        source: NameError,
    },
}

/// A Java source file held in memory.
///
/// Construction validates the text against the Java grammar and fails on
/// syntax errors. Declared import dependencies are extracted on first
/// request and cached.
#[derive(Debug, Clone)]
pub struct SourceArtifact {
    text: String,
    origin: Option<PathBuf>,
    dependencies: OnceLock<DependencySet>,
}

impl SourceArtifact {
    /// Wrap source text, validating it parses as Java.
    pub fn from_text(text: impl Into<String>, origin: &str) -> Result<Self, SourceError> {
        let text = text.into();
        if !parses_as_java(&text) {
            return Err(SourceError::InvalidSource {
                origin: origin.to_string(),
            });
        }
        Ok(Self {
            text,
            origin: None,
            dependencies: OnceLock::new(),
        })
    }

    /// Read and wrap a `.java` file from disk, remembering its path.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut artifact = Self::from_text(text, &path.display().to_string())?;
        artifact.origin = Some(path.to_path_buf());
        Ok(artifact)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// The class names this source imports. Computed once and cached.
    pub fn dependencies(&self) -> Result<&DependencySet, SourceError> {
        if let Some(deps) = self.dependencies.get() {
            return Ok(deps);
        }
        let deps = resolver::source_dependencies(&self.text)?;
        Ok(self.dependencies.get_or_init(|| deps))
    }
}

fn parses_as_java(text: &str) -> bool {
    let mut parser = TsParser::new();
    parser
        .set_language(&tree_sitter_java::language())
        .expect("Failed to load Java grammar");
    match parser.parse(text, None) {
        Some(tree) => !tree.root_node().has_error(),
        None => false,
    }
}
