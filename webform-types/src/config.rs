use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FormError, Question, RenderOptions, validate_conditions};

/// A complete form configuration: the questions and how to render them.
///
/// This is the on-disk format read by the command line tool:
///
/// ```json
/// {
///   "questions": [{ "text": "Name", "type": "text", "required": true }],
///   "options": { "style": "default", "webhookUrl": "https://example.com/hook" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    pub questions: Vec<Question>,

    #[serde(default)]
    pub options: RenderOptions,
}

impl FormConfig {
    pub fn new(questions: Vec<Question>, options: RenderOptions) -> Self {
        Self { questions, options }
    }

    /// Parse a config from JSON and check its display conditions.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        let config: Self = serde_json::from_str(json)?;
        validate_conditions(&config.questions)?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the config as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, FormError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::QuestionKind;

    #[test]
    fn parse_minimal_config() {
        let config =
            FormConfig::from_json(r#"{ "questions": [{ "text": "Name", "type": "text" }] }"#)
                .unwrap();

        assert_eq!(config.questions.len(), 1);
        assert_eq!(config.options, RenderOptions::default());
    }

    #[test]
    fn invalid_condition_is_rejected() {
        let result = FormConfig::from_json(
            r#"{ "questions": [{
                "text": "Name",
                "type": "text",
                "conditional": [{ "questionId": "question-3", "value": "x" }]
            }] }"#,
        );

        assert!(matches!(result, Err(FormError::UnknownConditionTarget { .. })));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            FormConfig::from_json("{ \"questions\": "),
            Err(FormError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            FormConfig::load("/definitely/not/here.json"),
            Err(FormError::Io(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_questions() {
        let config = FormConfig::new(
            vec![
                Question::new("Rating", QuestionKind::radio(["1", "2", "3"])).required(),
                Question::new("Comments", QuestionKind::TextArea).shown_when("question-0", "1"),
            ],
            RenderOptions::new().with_style("default"),
        );

        let json = config.to_json().unwrap();
        assert_eq!(FormConfig::from_json(&json).unwrap(), config);
    }
}
