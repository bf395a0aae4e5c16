use std::collections::{BTreeSet, HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use super::{
    forced_jar_artifacts, MinimizationResult, MinimizationStrategy, MinimizeError,
    MinimizeOptions,
};
use crate::index::LibraryIndex;
use crate::model::{ClassArtifact, ClassName, SourceArtifact, JAVA_ROOT_PACKAGE};
use crate::resolver::ConcurrentSourceResolver;

/// Minimization backed by a trie index over the library jars.
///
/// Builds the index in one bulk pass, then walks the dependency closure
/// with point queries. Each lookup costs one trie walk instead of a scan
/// over every candidate, which is what makes this strategy scale to large
/// library sets. The index is finite and the visited set only grows, which
/// guarantees termination.
pub struct IndexedStrategy {
    resolver: ConcurrentSourceResolver,
    options: MinimizeOptions,
}

impl IndexedStrategy {
    pub fn new(resolver: ConcurrentSourceResolver) -> Self {
        Self {
            resolver,
            options: MinimizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MinimizeOptions) -> Self {
        self.options = options;
        self
    }
}

impl MinimizationStrategy for IndexedStrategy {
    type Library = PathBuf;

    fn minimize(
        &self,
        sources: Vec<SourceArtifact>,
        libraries: Vec<PathBuf>,
    ) -> Result<MinimizationResult, MinimizeError> {
        let started = Instant::now();
        let source_count = sources.len();

        let resolved = self.resolver.resolve(&sources)?;

        let mut index = LibraryIndex::new();
        index.index(&libraries)?;
        let candidates_before = index.size();

        info!(
            "minimizing {} sources against {} indexed classes",
            source_count, candidates_before
        );

        let mut frontier: VecDeque<ClassName> = resolved.into_iter().collect();
        frontier.extend(self.options.forced_classes().iter().cloned());

        let mut result: BTreeSet<ClassArtifact> =
            forced_jar_artifacts(self.options.forced_jars())?
                .into_iter()
                .collect();
        let mut visited: HashSet<ClassName> = HashSet::new();

        while let Some(name) = frontier.pop_front() {
            if !visited.insert(name.clone()) {
                continue;
            }
            if name.is_under_package_root(JAVA_ROOT_PACKAGE) {
                continue;
            }

            let Some(artifact) = index.find(&name) else {
                if self.options.forced_classes().contains(&name) {
                    return Err(MinimizeError::ForcedIncludeNotFound { name });
                }
                debug!("not in index: {name}");
                continue;
            };

            for dependency in artifact.dependencies()? {
                if !visited.contains(dependency) {
                    frontier.push_back(dependency.clone());
                }
            }
            result.insert(artifact.clone());
        }

        let elapsed = started.elapsed();
        info!(
            "kept {} of {} indexed classes in {:?}",
            result.len(),
            candidates_before,
            elapsed
        );
        Ok(MinimizationResult::new(
            result,
            source_count,
            candidates_before,
            elapsed,
        ))
    }
}
