use std::fmt;

use serde::{Deserialize, Serialize};

/// The prefix shared by every generated field name.
pub const FIELD_NAME_PREFIX: &str = "question-";

/// The name shared by all widgets of one question, e.g. `"question-3"`.
///
/// Field identity is positional: the name is derived from the question's
/// 0-based index in the list, never from its content. It is the key under
/// which the question's values appear in an [`AnswerRecord`](crate::AnswerRecord).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName {
    name: String,
}

impl FieldName {
    /// Create a field name from any string.
    ///
    /// Names that do not follow the `question-<index>` scheme are allowed;
    /// they show up when a document carries controls the renderer did not
    /// build (for example from a custom widget).
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The field name for the question at the given 0-based index.
    pub fn for_index(index: usize) -> Self {
        Self::new(format!("{FIELD_NAME_PREFIX}{index}"))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The question index encoded in this name, if it is exactly the name
    /// [`for_index`](Self::for_index) produces. `question-01` has no index.
    pub fn index(&self) -> Option<usize> {
        let digits = self.name.strip_prefix(FIELD_NAME_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index: usize = digits.parse().ok()?;
        (index.to_string() == digits).then_some(index)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for FieldName {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
