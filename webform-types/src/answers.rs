use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::FieldName;

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for field: {0}")]
    MissingField(FieldName),

    #[error("Expected a single answer for field '{field}', got {count}")]
    NotSingle { field: FieldName, count: usize },
}

/// The answers collected from a submitted form.
///
/// Maps each field name to the values submitted under it, in document order.
/// It is a list because checkbox groups and multi-selects submit several
/// values under one name; a field with a single value still maps to a
/// one-element list. Field names keep the order of their first occurrence.
///
/// Serializes to a JSON object of string arrays, which is the webhook body:
///
/// ```
/// use webform_types::AnswerRecord;
///
/// let mut answers = AnswerRecord::new();
/// answers.push("question-0", "Alice");
/// answers.push("question-1", "x");
/// answers.push("question-1", "y");
///
/// assert_eq!(
///     serde_json::to_string(&answers).unwrap(),
///     r#"{"question-0":["Alice"],"question-1":["x","y"]}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    values: IndexMap<FieldName, Vec<String>>,
}

impl AnswerRecord {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Group `(name, value)` entries, as produced by form encoding, by name.
    pub fn from_entries<I, N, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<FieldName>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in entries {
            record.push(name, value);
        }
        record
    }

    /// Append a value to the list for the given field.
    pub fn push(&mut self, field: impl Into<FieldName>, value: impl Into<String>) {
        self.values
            .entry(field.into())
            .or_default()
            .push(value.into());
    }

    /// Get all values submitted for the given field.
    pub fn get(&self, field: &FieldName) -> Option<&[String]> {
        self.values.get(field).map(Vec::as_slice)
    }

    /// Get the values submitted for the question at the given index.
    pub fn for_question(&self, index: usize) -> Option<&[String]> {
        self.get(&FieldName::for_index(index))
    }

    /// Get the only value submitted for the given field.
    pub fn get_single(&self, field: &FieldName) -> Result<&str, AnswerError> {
        match self.get(field) {
            Some([value]) => Ok(value.as_str()),
            Some(values) => Err(AnswerError::NotSingle {
                field: field.clone(),
                count: values.len(),
            }),
            None => Err(AnswerError::MissingField(field.clone())),
        }
    }

    /// Check if the field has any values.
    pub fn contains(&self, field: &FieldName) -> bool {
        self.values.contains_key(field)
    }

    /// Check if `value` is among the values of the given field.
    pub fn contains_value(&self, field: &FieldName, value: &str) -> bool {
        self.get(field)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Get an iterator over all field-values pairs, in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &[String])> {
        self.values.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Get the number of fields with at least one value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render the record as a plain-text table for diagnostics.
    pub fn to_table(&self) -> String {
        let header = ("field", "values");
        let rows: Vec<(&str, String)> = self
            .values
            .iter()
            .map(|(field, values)| (field.as_str(), values.join(", ")))
            .collect();

        let name_width = rows
            .iter()
            .map(|(name, _)| name.len())
            .chain([header.0.len()])
            .max()
            .unwrap_or_default();

        let mut table = format!("{:<name_width$} | {}\n", header.0, header.1);
        table.push_str(&format!("{}-+-{}\n", "-".repeat(name_width), "-".repeat(6)));
        for (name, values) in rows {
            table.push_str(&format!("{name:<name_width$} | {values}\n"));
        }
        table
    }
}

impl fmt::Display for AnswerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table())
    }
}

impl IntoIterator for AnswerRecord {
    type Item = (FieldName, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<FieldName, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<N, V> FromIterator<(N, V)> for AnswerRecord
where
    N: Into<FieldName>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn groups_by_first_occurrence() {
        let answers = AnswerRecord::from_entries([
            ("question-1", "x"),
            ("question-0", "Alice"),
            ("question-1", "y"),
        ]);

        let fields: Vec<_> = answers.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(fields, vec!["question-1", "question-0"]);
        assert_eq!(answers.for_question(1).unwrap(), ["x", "y"]);
        assert_eq!(answers.for_question(0).unwrap(), ["Alice"]);
    }

    #[test]
    fn single_value_access() {
        let answers = AnswerRecord::from_entries([
            ("question-0", "a"),
            ("question-1", "b"),
            ("question-1", "c"),
        ]);

        assert_eq!(answers.get_single(&FieldName::for_index(0)).unwrap(), "a");
        assert!(matches!(
            answers.get_single(&FieldName::for_index(1)),
            Err(AnswerError::NotSingle { count: 2, .. })
        ));
        assert!(matches!(
            answers.get_single(&FieldName::for_index(2)),
            Err(AnswerError::MissingField(_))
        ));
    }

    #[test]
    fn contains_value() {
        let answers = AnswerRecord::from_entries([("question-0", "Yes")]);

        assert!(answers.contains_value(&FieldName::for_index(0), "Yes"));
        assert!(!answers.contains_value(&FieldName::for_index(0), "No"));
        assert!(!answers.contains_value(&FieldName::for_index(1), "Yes"));
    }

    #[test]
    fn deserializes_webhook_body() {
        let answers: AnswerRecord =
            serde_json::from_str(r#"{"question-0":["a"],"question-2":["b","c"]}"#).unwrap();

        assert_eq!(answers.len(), 2);
        assert_eq!(answers.for_question(2).unwrap(), ["b", "c"]);
    }

    #[test]
    fn table_dump() {
        let answers = AnswerRecord::from_entries([
            ("question-0", "Alice"),
            ("question-10", "x"),
            ("question-10", "y"),
        ]);

        assert_eq!(
            answers.to_table(),
            "field       | values\n\
             ------------+-------\n\
             question-0  | Alice\n\
             question-10 | x, y\n"
        );
    }
}
