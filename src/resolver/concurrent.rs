use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::model::{DependencySet, SourceArtifact, SourceError};

/// How long a resolution batch may take before it is abandoned.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("source resolution did not finish within {timeout:?}")]
    Timeout { timeout: Duration },
    #[error("a resolution worker exited without reporting a result")]
    Disconnected,
}

/// Resolves many sources in parallel on a shared worker pool.
///
/// The pool is owned by the caller; the resolver only submits tasks and
/// joins on their results, it never shuts the pool down. One task runs per
/// source, results are merged after the join, and any single failure or a
/// missed deadline fails the whole batch with no partial result.
pub struct ConcurrentSourceResolver {
    pool: Arc<rayon::ThreadPool>,
    timeout: Duration,
}

impl ConcurrentSourceResolver {
    pub fn new(pool: Arc<rayon::ThreadPool>) -> Self {
        Self {
            pool,
            timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the union of all sources' import dependencies.
    pub fn resolve(&self, sources: &[SourceArtifact]) -> Result<DependencySet, ResolveError> {
        debug!("resolving {} sources in parallel", sources.len());

        let (tx, rx) = mpsc::channel();
        for source in sources {
            let tx = tx.clone();
            let source = source.clone();
            self.pool.spawn(move || {
                let result = source.dependencies().map(|deps| deps.clone());
                // a send failure means the batch was already abandoned
                let _ = tx.send(result);
            });
        }
        drop(tx);

        let deadline = Instant::now() + self.timeout;
        let mut merged = DependencySet::new();
        for _ in 0..sources.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(Ok(deps)) => merged.extend(deps),
                Ok(Err(error)) => return Err(ResolveError::Source(error)),
                Err(RecvTimeoutError::Timeout) => {
                    return Err(ResolveError::Timeout {
                        timeout: self.timeout,
                    })
                }
                Err(RecvTimeoutError::Disconnected) => return Err(ResolveError::Disconnected),
            }
        }

        debug!("resolved {} distinct dependencies", merged.len());
        Ok(merged)
    }
}
