use crate::model::{ClassName, DependencySet, SourceError};

const IMPORT_KEYWORD: &str = "import";
const STATIC_KEYWORD: &str = "static";
const WILDCARD_SUFFIX: &str = "*";
const STATEMENT_TERMINATOR: char = ';';

/// Modifiers that may precede a type declaration keyword.
const TYPE_MODIFIERS: &[&str] = &["public", "final", "abstract", "sealed", "non-sealed", "strictfp"];

/// Keywords that open a type declaration.
const TYPE_KEYWORDS: &[&str] = &["class", "interface", "enum", "record", "@interface"];

/// Extract the imported class names from Java source text.
///
/// Scans line by line and stops at the first type declaration, since imports
/// must precede it. Wildcard imports cannot be resolved to a single class
/// and fail the whole file rather than being dropped.
pub fn source_dependencies(text: &str) -> Result<DependencySet, SourceError> {
    let mut result = DependencySet::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        let trimmed = line.trim_start();

        if opens_type_declaration(trimmed) {
            break;
        }

        let Some(rest) = strip_keyword(trimmed, IMPORT_KEYWORD) else {
            continue;
        };
        let rest = rest.trim_start();
        // static member imports refer to the owning class path
        let rest = match strip_keyword(rest, STATIC_KEYWORD) {
            Some(after_static) => after_static.trim_start(),
            None => rest,
        };

        let import = rest.trim_end().trim_end_matches(STATEMENT_TERMINATOR).trim_end();
        if import.ends_with(WILDCARD_SUFFIX) {
            return Err(SourceError::WildcardImport {
                import: line.trim().to_string(),
            });
        }

        let name = ClassName::new(import).map_err(|source| SourceError::MalformedImport {
            import: line.trim().to_string(),
            source,
        })?;
        result.insert(name);
    }

    Ok(result)
}

fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    // require whitespace after the keyword so "importantly" does not match
    rest.starts_with(char::is_whitespace).then_some(rest)
}

fn opens_type_declaration(line: &str) -> bool {
    let mut tokens = line.split_whitespace().peekable();
    while let Some(&token) = tokens.peek() {
        if TYPE_MODIFIERS.contains(&token) {
            tokens.next();
            continue;
        }
        return TYPE_KEYWORDS.contains(&token);
    }
    false
}
