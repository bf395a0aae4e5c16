use crate::classfile;
use crate::model::{ArtifactError, ClassName, DependencySet, JAVA_ROOT_PACKAGE};

/// Extract the direct class dependencies recorded in compiled class bytes.
///
/// Walks every `CONSTANT_Class` entry of the constant pool, normalizes
/// descriptor notation, and drops the class's own name and anything under
/// the platform root package.
pub fn class_dependencies(
    bytes: &[u8],
    own_name: &ClassName,
) -> Result<DependencySet, ArtifactError> {
    let info = classfile::parse_class(bytes).map_err(|source| ArtifactError::InvalidClass {
        origin: own_name.to_string(),
        source,
    })?;

    let mut result = DependencySet::new();
    for raw in &info.referenced {
        let Some(internal) = normalize_reference(raw) else {
            continue;
        };
        let dotted = internal.replace('/', ".");

        let name =
            ClassName::new(dotted).map_err(|source| ArtifactError::MalformedName {
                origin: own_name.to_string(),
                source,
            })?;

        if &name == own_name || name.is_under_package_root(JAVA_ROOT_PACKAGE) {
            continue;
        }
        result.insert(name);
    }
    Ok(result)
}

/// Reduce a constant pool class reference to a plain internal name.
///
/// References are usually plain (`com/acme/Widget`) but array types appear
/// in descriptor form (`[Lcom/acme/Widget;`, `[[I`). Returns `None` for
/// primitive array descriptors, which name no class. A bare name is only
/// treated as an object descriptor when it carries both the `L` prefix and
/// the `;` suffix, so legitimate names starting with `L` survive.
fn normalize_reference(raw: &str) -> Option<&str> {
    let was_array = raw.starts_with('[');
    let stripped = raw.trim_start_matches('[');

    if let Some(object) = stripped
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
    {
        return Some(object);
    }
    if was_array {
        // remaining single-letter descriptors are primitive element types
        return None;
    }
    Some(stripped)
}
