use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when a string fails qualified-name validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("class name is empty")]
    Empty,
    #[error("class name has an empty segment: {0}")]
    EmptySegment(String),
    #[error("class name segment starts with {ch:?}: {name}")]
    BadSegmentStart { name: String, ch: char },
    #[error("class name contains invalid character {ch:?}: {name}")]
    InvalidCharacter { name: String, ch: char },
}

/// A validated, fully qualified class name such as `com.acme.Widget`.
///
/// Segments are dot separated. Each segment starts with a letter, underscore
/// or dollar sign and continues with letters, digits, underscores or dollar
/// signs, so a purely numeric segment is rejected along with empty segments
/// and leading or trailing dots. Equality, ordering and hashing all use the
/// normalized string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    pub fn new(raw: impl Into<String>) -> Result<Self, NameError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(NameError::Empty);
        }
        for segment in raw.split('.') {
            validate_segment(&raw, segment)?;
        }
        Ok(Self(raw))
    }

    /// The last segment, e.g. `Widget` for `com.acme.Widget`.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// The normalized dotted form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the first segment equals the given package root.
    pub fn is_under_package_root(&self, root: &str) -> bool {
        self.0.split('.').next() == Some(root)
    }

    /// The corresponding jar entry path, e.g. `com/acme/Widget.class`.
    pub fn to_entry_path(&self) -> String {
        format!("{}.{}", self.0.replace('.', "/"), super::CLASS_EXTENSION)
    }
}

fn validate_segment(name: &str, segment: &str) -> Result<(), NameError> {
    let mut chars = segment.chars();
    let first = chars
        .next()
        .ok_or_else(|| NameError::EmptySegment(name.to_string()))?;
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return Err(NameError::BadSegmentStart {
            name: name.to_string(),
            ch: first,
        });
    }
    for ch in chars {
        if !(ch.is_alphanumeric() || ch == '_' || ch == '$') {
            return Err(NameError::InvalidCharacter {
                name: name.to_string(),
                ch,
            });
        }
    }
    Ok(())
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClassName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClassName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}
