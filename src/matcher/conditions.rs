use super::MatchingCondition;
use crate::model::{ClassArtifact, ClassName};

/// Matches when the name equals the artifact's own parsed qualified name.
///
/// Authoritative whenever the artifact has been parsed, which construction
/// guarantees.
pub struct QualifiedNameEquality;

impl MatchingCondition for QualifiedNameEquality {
    fn satisfied(&self, name: &ClassName, artifact: &ClassArtifact) -> bool {
        name == artifact.name()
    }
}

/// Case-insensitive comparison of the name's last segment against the
/// artifact's file stem.
///
/// A fallback for matching on-disk candidates without parsing each one.
/// Never matches an artifact that has no origin path.
pub struct ShortNameVsFileName;

impl MatchingCondition for ShortNameVsFileName {
    fn satisfied(&self, name: &ClassName, artifact: &ClassArtifact) -> bool {
        let Some(stem) = artifact
            .origin()
            .and_then(|path| path.file_stem())
            .and_then(|stem| stem.to_str())
        else {
            return false;
        };
        name.short_name().eq_ignore_ascii_case(stem)
    }
}

/// Matches when the artifact's origin path contains the name's package
/// segments as a substring.
///
/// Known to produce false positives: a candidate under an unrelated parent
/// package whose path happens to contain the same run of segments will
/// match, e.g. `com.thing.Bad` against `.../org/wrong/com/thing/Bad.class`.
/// Kept for compatibility with existing matcher configurations; not part of
/// the standard set.
pub struct PackagePathSubstring;

impl MatchingCondition for PackagePathSubstring {
    fn satisfied(&self, name: &ClassName, artifact: &ClassArtifact) -> bool {
        let Some(origin) = artifact.origin() else {
            return false;
        };
        let packages: Vec<&str> = {
            let mut segments: Vec<&str> = name.as_str().split('.').collect();
            segments.pop(); // drop the short name
            segments
        };
        let joined_packages = packages.concat();

        let flattened_path: String = origin
            .to_string_lossy()
            .chars()
            .filter(|ch| *ch != std::path::MAIN_SEPARATOR)
            .collect();
        flattened_path.contains(&joined_packages)
    }
}
