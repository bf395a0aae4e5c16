//! Decides whether a candidate class artifact satisfies a dependency name.

mod conditions;

pub use conditions::{PackagePathSubstring, QualifiedNameEquality, ShortNameVsFileName};

use crate::model::{ClassArtifact, ClassName};

/// One opinion on whether a candidate artifact is the class a name refers to.
///
/// Conditions are stateless predicates; a matcher combines several of them.
pub trait MatchingCondition: Send + Sync {
    fn satisfied(&self, name: &ClassName, artifact: &ClassArtifact) -> bool;
}

/// A matcher that requires every configured condition to be satisfied.
///
/// With no conditions configured it matches everything. That vacuous policy
/// is intentional: an empty condition set expresses "no opinion", not "no
/// match".
pub struct UnanimousMatcher {
    conditions: Vec<Box<dyn MatchingCondition>>,
}

impl UnanimousMatcher {
    pub fn new(conditions: Vec<Box<dyn MatchingCondition>>) -> Self {
        Self { conditions }
    }

    /// The standard configuration: exact qualified name equality, which is
    /// authoritative because every artifact has a parsed name.
    pub fn standard() -> Self {
        Self::new(vec![Box::new(QualifiedNameEquality)])
    }

    pub fn matches(&self, name: &ClassName, artifact: &ClassArtifact) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.satisfied(name, artifact))
    }
}
