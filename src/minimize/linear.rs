use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Instant;

use tracing::{debug, info};

use super::{
    forced_jar_artifacts, MinimizationResult, MinimizationStrategy, MinimizeError,
    MinimizeOptions,
};
use crate::matcher::UnanimousMatcher;
use crate::model::{ClassArtifact, ClassName, SourceArtifact, JAVA_ROOT_PACKAGE};
use crate::resolver::ConcurrentSourceResolver;

/// Minimization by scanning a shrinking candidate pool.
///
/// Every frontier name is checked against the remaining candidates with the
/// configured matcher; a matched candidate moves out of the pool and into
/// the result, so each candidate is matched at most once and the scan cost
/// falls as the closure grows. The pool is finite and strictly shrinks,
/// which guarantees termination.
pub struct LinearStrategy {
    matcher: UnanimousMatcher,
    resolver: ConcurrentSourceResolver,
    options: MinimizeOptions,
}

impl LinearStrategy {
    pub fn new(matcher: UnanimousMatcher, resolver: ConcurrentSourceResolver) -> Self {
        Self {
            matcher,
            resolver,
            options: MinimizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MinimizeOptions) -> Self {
        self.options = options;
        self
    }
}

impl MinimizationStrategy for LinearStrategy {
    type Library = ClassArtifact;

    fn minimize(
        &self,
        sources: Vec<SourceArtifact>,
        libraries: Vec<ClassArtifact>,
    ) -> Result<MinimizationResult, MinimizeError> {
        let started = Instant::now();
        let source_count = sources.len();

        let mut pool = libraries;
        pool.sort();
        let candidates_before = pool.len();

        info!(
            "minimizing {} sources against {} candidate classes",
            source_count, candidates_before
        );

        let resolved = self.resolver.resolve(&sources)?;
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

            let (matched, rest): (Vec<ClassArtifact>, Vec<ClassArtifact>) = pool
                .into_iter()
                .partition(|candidate| self.matcher.matches(&name, candidate));
            pool = rest;

            if matched.is_empty() {
                debug!("no candidate for {name}");
                continue;
            }
            for artifact in matched {
                for dependency in artifact.dependencies()? {
                    if !visited.contains(dependency) {
                        frontier.push_back(dependency.clone());
                    }
                }
                result.insert(artifact);
            }
        }

        for forced in self.options.forced_classes() {
            if !result.iter().any(|artifact| artifact.name() == forced) {
                return Err(MinimizeError::ForcedIncludeNotFound {
                    name: forced.clone(),
                });
            }
        }

        let elapsed = started.elapsed();
        info!(
            "kept {} of {} candidate classes in {:?}",
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
