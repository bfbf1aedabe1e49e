//! Core types for the webform crate.
//!
//! This crate provides the presentation-agnostic model of a form:
//! - `Question` and `QuestionKind` - Individual questions and their widget kinds
//! - `FieldName` and `AnswerRecord` - Positional field names and submitted values
//! - `Condition` and `visible_questions` - Conditional display
//! - `RenderOptions` and `FormConfig` - Rendering options and the config file format

mod field_name;
pub use field_name::{FIELD_NAME_PREFIX, FieldName};

mod answers;
pub use answers::{AnswerError, AnswerRecord};

mod question;
pub use question::{
    ChoiceQuestion, CustomQuestion, NumberQuestion, Question, QuestionKind, SelectOption,
    SelectQuestion,
};

mod condition;
pub use condition::{Condition, validate_conditions, visible_questions};

mod options;
pub use options::{DEFAULT_FORM_CLASS, DEFAULT_STYLESHEET_BASE, RenderOptions};

mod config;
pub use config::FormConfig;

mod error;
pub use error::FormError;
