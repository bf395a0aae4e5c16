//! Transitive closure of required library classes, under two strategies.
//!
//! Both strategies run the same worklist: a frontier of not yet expanded
//! names plus a visited set, looped until the frontier drains. They differ
//! in how a name is located: the linear strategy scans a shrinking candidate
//! pool with a matcher, the indexed strategy queries a trie built over the
//! library jars. For identical inputs both arrive at the same name set.

mod indexed;
mod linear;

pub use indexed::IndexedStrategy;
pub use linear::LinearStrategy;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::bundle::BundleError;
use crate::index::IndexError;
use crate::model::{
    ArtifactError, ClassArtifact, ClassName, DependencySet, SourceArtifact,
};
use crate::resolver::ResolveError;

#[derive(Debug, Error)]
pub enum MinimizeError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Bundle(#[from] BundleError),
    #[error("forced include not found in libraries: {name}")]
    ForcedIncludeNotFound { name: ClassName },
}

/// Extra inclusion requests beyond what the sources reference.
#[derive(Debug, Default, Clone)]
pub struct MinimizeOptions {
    forced_classes: DependencySet,
    forced_jars: Vec<PathBuf>,
}

impl MinimizeOptions {
    /// Require a class in the result. It seeds the closure like a source
    /// dependency, so its transitive dependencies come along. Failing to
    /// locate it is a hard error, never a silent omission.
    pub fn force_class(mut self, name: ClassName) -> Self {
        self.forced_classes.insert(name);
        self
    }

    /// Include every class of a jar wholesale, without dependency chasing.
    pub fn force_jar(mut self, jar: impl Into<PathBuf>) -> Self {
        self.forced_jars.push(jar.into());
        self
    }

    pub fn forced_classes(&self) -> &DependencySet {
        &self.forced_classes
    }

    pub fn forced_jars(&self) -> &[PathBuf] {
        &self.forced_jars
    }
}

/// Outcome of one minimization run.
#[derive(Debug)]
pub struct MinimizationResult {
    artifacts: BTreeSet<ClassArtifact>,
    source_count: usize,
    candidates_before: usize,
    elapsed: Duration,
}

impl MinimizationResult {
    pub(crate) fn new(
        artifacts: BTreeSet<ClassArtifact>,
        source_count: usize,
        candidates_before: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            artifacts,
            source_count,
            candidates_before,
            elapsed,
        }
    }

    /// The minimal artifact set, ordered by qualified name.
    pub fn artifacts(&self) -> &BTreeSet<ClassArtifact> {
        &self.artifacts
    }

    /// Qualified names of the artifacts in the result.
    pub fn names(&self) -> DependencySet {
        self.artifacts
            .iter()
            .map(|artifact| artifact.name().clone())
            .collect()
    }

    /// How many source files seeded the run.
    pub fn source_count(&self) -> usize {
        self.source_count
    }

    /// Library classes available before minimization.
    pub fn candidates_before(&self) -> usize {
        self.candidates_before
    }

    /// Library classes surviving minimization.
    pub fn candidates_after(&self) -> usize {
        self.artifacts.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Computes the transitive closure of required library classes.
pub trait MinimizationStrategy {
    /// The form libraries are supplied in: loose artifacts for the linear
    /// strategy, jar paths for the indexed one.
    type Library;

    fn minimize(
        &self,
        sources: Vec<SourceArtifact>,
        libraries: Vec<Self::Library>,
    ) -> Result<MinimizationResult, MinimizeError>;
}

/// Load every addressable class of a forced jar for wholesale inclusion.
fn forced_jar_artifacts(jars: &[PathBuf]) -> Result<Vec<ClassArtifact>, MinimizeError> {
    use crate::bundle;

    let mut artifacts = Vec::new();
    for jar in jars {
        for entry in bundle::list_entries(jar)? {
            if entry.is_dir || !bundle::is_class_entry(&entry.path) || bundle::is_metadata_entry(&entry.path) {
                continue;
            }
            artifacts.push(ClassArtifact::from_bytes(entry.bytes, &entry.path)?);
        }
    }
    Ok(artifacts)
}
