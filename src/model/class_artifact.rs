use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;

use super::{ClassName, DependencySet, NameError};
use crate::classfile::{self, ClassParseError};
use crate::resolver;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not read class file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin} is not a valid compiled class")]
    InvalidClass {
        origin: String,
        #[source]
        source: ClassParseError,
    },
    #[error("{origin} declares a malformed class name")]
    MalformedName {
        origin: String,
        #[source]
        source: NameError,
    },
}

/// A compiled class held in memory.
///
/// Owns the raw bytes and the qualified name parsed from the class file
/// header. Construction fails when the bytes are not a structurally valid
/// class file. Direct dependencies are extracted on first request and cached.
///
/// Equality, ordering and hashing use the qualified name only, so a set of
/// artifacts keeps exactly one entry per class name.
#[derive(Debug, Clone)]
pub struct ClassArtifact {
    name: ClassName,
    bytes: Vec<u8>,
    origin: Option<PathBuf>,
    dependencies: OnceLock<DependencySet>,
}

impl ClassArtifact {
    /// Wrap compiled class bytes, parsing the qualified name from the header.
    ///
    /// `origin` is used in error messages only; pass the entry path or file
    /// path the bytes came from.
    pub fn from_bytes(bytes: Vec<u8>, origin: &str) -> Result<Self, ArtifactError> {
        let info = classfile::parse_class(&bytes).map_err(|source| ArtifactError::InvalidClass {
            origin: origin.to_string(),
            source,
        })?;
        let name = ClassName::new(info.name.replace('/', ".")).map_err(|source| {
            ArtifactError::MalformedName {
                origin: origin.to_string(),
                source,
            }
        })?;
        Ok(Self {
            name,
            bytes,
            origin: None,
            dependencies: OnceLock::new(),
        })
    }

    /// Read and wrap a `.class` file from disk, remembering its path.
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut artifact = Self::from_bytes(bytes, &path.display().to_string())?;
        artifact.origin = Some(path.to_path_buf());
        Ok(artifact)
    }

    pub fn name(&self) -> &ClassName {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The on-disk path this artifact was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Direct dependencies of this class, excluding itself and platform
    /// classes. Computed once and cached.
    pub fn dependencies(&self) -> Result<&DependencySet, ArtifactError> {
        if let Some(deps) = self.dependencies.get() {
            return Ok(deps);
        }
        let deps = resolver::class_dependencies(&self.bytes, &self.name)?;
        Ok(self.dependencies.get_or_init(|| deps))
    }
}

impl PartialEq for ClassArtifact {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ClassArtifact {}

impl PartialOrd for ClassArtifact {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassArtifact {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for ClassArtifact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
