use crate::FieldName;

/// Error type for form configuration problems.
///
/// These are detected when a form is mounted or a config file is loaded; a
/// form that hits one is never rendered.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The container element the form should be attached to does not exist.
    #[error("Could not find container element with ID {0}")]
    ContainerNotFound(String),

    #[error("Condition of {question} refers to unknown field '{target}'")]
    UnknownConditionTarget { question: FieldName, target: String },

    #[error("Condition of {0} refers to the question itself")]
    SelfReferencingCondition(FieldName),

    #[error("Failed to read form config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid form config: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    /// Check if this error means the form had nowhere to be rendered.
    pub fn is_missing_container(&self) -> bool {
        matches!(self, Self::ContainerNotFound(_))
    }
}
