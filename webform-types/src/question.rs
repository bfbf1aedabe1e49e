use serde::{Deserialize, Serialize};

use crate::{Condition, FieldName};

/// A single question in a form.
///
/// The serialized shape is flat, with the kind selected by a `type` tag:
///
/// ```
/// use webform_types::{Question, QuestionKind};
///
/// let question: Question = serde_json::from_str(
///     r#"{ "text": "Favourite colour?", "type": "radio",
///          "answers": ["Red", "Blue"], "required": true }"#,
/// )
/// .unwrap();
///
/// assert!(question.is_required());
/// assert!(matches!(question.kind(), QuestionKind::Radio(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The label shown next to the widgets.
    text: String,

    /// The kind of question (determines the widget).
    #[serde(flatten)]
    kind: QuestionKind,

    /// Maximum number of characters for text-like widgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_characters: Option<u32>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,

    /// A regular expression handed to the native `pattern` constraint.
    #[serde(default, rename = "validation", skip_serializing_if = "Option::is_none")]
    validation_pattern: Option<String>,

    /// Conditions that must all hold for the question to be shown.
    #[serde(default, rename = "conditional", skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<Condition>,
}

impl Question {
    /// Create a new optional question without constraints.
    pub fn new(text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            text: text.into(),
            kind,
            max_characters: None,
            required: false,
            placeholder: None,
            validation_pattern: None,
            conditions: Vec::new(),
        }
    }

    /// Get the label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn max_characters(&self) -> Option<u32> {
        self.max_characters
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn validation_pattern(&self) -> Option<&str> {
        self.validation_pattern.as_deref()
    }

    /// Get the display conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Check if the question is shown regardless of other answers.
    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the maximum number of characters.
    pub fn with_max_characters(mut self, max: u32) -> Self {
        self.max_characters = Some(max);
        self
    }

    /// Set a validation pattern.
    pub fn with_validation(mut self, pattern: impl Into<String>) -> Self {
        self.validation_pattern = Some(pattern.into());
        self
    }

    /// Only show this question when the answers to `field` contain `value`.
    ///
    /// Multiple calls add further conditions; all of them must hold.
    pub fn shown_when(mut self, field: impl Into<FieldName>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::new(field, value));
        self
    }
}

/// The kind of question, determining which widget is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionKind {
    /// Single-line text input.
    #[serde(rename = "text")]
    Text,

    #[serde(rename = "email")]
    Email,

    /// Phone number input.
    #[serde(rename = "tel")]
    Tel,

    /// Numeric input with optional bounds and step.
    #[serde(rename = "number")]
    Number(NumberQuestion),

    #[serde(rename = "date")]
    Date,

    #[serde(rename = "time")]
    Time,

    /// Local date and time input.
    #[serde(rename = "datetime-local")]
    DateTimeLocal,

    /// Pick exactly one of the answers.
    #[serde(rename = "radio")]
    Radio(ChoiceQuestion),

    /// Pick any number of the answers.
    #[serde(rename = "checkbox")]
    Checkbox(ChoiceQuestion),

    /// Drop-down (or list box when `multiple` is set).
    #[serde(rename = "select")]
    Select(SelectQuestion),

    /// Multi-line free text.
    #[serde(rename = "textarea")]
    TextArea,

    /// A widget built by a caller-registered factory.
    #[serde(rename = "custom")]
    Custom(CustomQuestion),
}

impl QuestionKind {
    /// A radio question with the given answers.
    pub fn radio<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Radio(ChoiceQuestion::new(answers))
    }

    /// A checkbox question with the given answers.
    pub fn checkbox<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Checkbox(ChoiceQuestion::new(answers))
    }

    /// A single select with the given options.
    pub fn select(options: Vec<SelectOption>) -> Self {
        Self::Select(SelectQuestion::new(options))
    }

    /// A number input without constraints.
    pub fn number() -> Self {
        Self::Number(NumberQuestion::default())
    }

    /// The `type` attribute of the native `<input>` this kind renders as.
    ///
    /// Returns `None` for kinds that are not rendered as `<input>` elements.
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            Self::Text => Some("text"),
            Self::Email => Some("email"),
            Self::Tel => Some("tel"),
            Self::Number(_) => Some("number"),
            Self::Date => Some("date"),
            Self::Time => Some("time"),
            Self::DateTimeLocal => Some("datetime-local"),
            Self::Radio(_) => Some("radio"),
            Self::Checkbox(_) => Some("checkbox"),
            Self::Select(_) | Self::TextArea | Self::Custom(_) => None,
        }
    }

    /// The serialized `type` tag of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::TextArea => "textarea",
            Self::Custom(_) => "custom",
            other => other.input_type().unwrap_or("text"),
        }
    }

    /// Check if this kind renders a single native `<input>` that takes typed text.
    pub fn is_single_input(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Email
                | Self::Tel
                | Self::Number(_)
                | Self::Date
                | Self::Time
                | Self::DateTimeLocal
        )
    }

    /// Check if this kind renders one input per answer choice.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Radio(_) | Self::Checkbox(_))
    }
}

/// Configuration for a number question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl NumberQuestion {
    /// Create a number question with bounds.
    pub fn with_bounds(min_value: Option<f64>, max_value: Option<f64>) -> Self {
        Self {
            min_value,
            max_value,
            step: None,
        }
    }

    /// Set the step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
}

/// Configuration for radio and checkbox questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    /// The choices, in display order. Each choice is also the submitted value.
    #[serde(default)]
    pub answers: Vec<String>,
}

impl ChoiceQuestion {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

/// A (label, value) pair of a select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Visible text of the option.
    pub label: String,

    /// Submitted value of the option.
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Configuration for a select question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectQuestion {
    #[serde(default)]
    pub options: Vec<SelectOption>,

    /// Allow selecting more than one option.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
}

impl SelectQuestion {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            multiple: false,
        }
    }

    /// Allow selecting more than one option.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

/// A question whose widget is supplied by the embedding application.
///
/// The renderer only knows the component name; everything else is passed
/// through to the registered factory untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomQuestion {
    /// Name the widget factory is registered under.
    #[serde(rename = "customComponent")]
    pub component: String,

    /// Opaque configuration for the factory.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub props: serde_json::Value,
}

impl CustomQuestion {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            props: serde_json::Value::Null,
        }
    }

    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        self.props = props;
        self
    }
}
