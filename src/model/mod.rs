//! Value types for the minimization pipeline: validated class names and the
//! source/class artifacts dependencies are extracted from.

mod class_artifact;
mod class_name;
mod source_artifact;

pub use class_artifact::{ArtifactError, ClassArtifact};
pub use class_name::{ClassName, NameError};
pub use source_artifact::{SourceArtifact, SourceError};

use std::collections::BTreeSet;

/// A deduplicated set of class names with deterministic iteration order.
pub type DependencySet = BTreeSet<ClassName>;

/// File extension of compiled class files.
pub const CLASS_EXTENSION: &str = "class";

/// File extension of Java source files.
pub const SOURCE_EXTENSION: &str = "java";

/// Root package of the Java platform. Classes under it ship with the
/// runtime and are never packaged into a minimized jar.
pub const JAVA_ROOT_PACKAGE: &str = "java";
