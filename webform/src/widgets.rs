//! Field-group construction: one `<fieldset>` per question.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};
use webform_types::{
    CustomQuestion, FieldName, NumberQuestion, Question, QuestionKind, SelectQuestion,
};

use crate::Document;

/// Builds the widgets of a `custom` question.
///
/// Factories are registered by component name on a
/// [`FormBuilder`](crate::FormBuilder). The factory appends whatever it needs
/// to `group`, a detached element whose children are moved into the
/// question's `<fieldset>` once the factory succeeds. On error nothing it
/// built is kept. Controls it creates should use `field_name` as their
/// `name` so their values land in the answer record.
pub trait WidgetFactory<D: Document> {
    fn build(
        &self,
        document: &mut D,
        question: &CustomQuestion,
        field_name: &FieldName,
        group: &D::Node,
    ) -> anyhow::Result<()>;
}

impl<D, F> WidgetFactory<D> for F
where
    D: Document,
    F: Fn(&mut D, &CustomQuestion, &FieldName, &D::Node) -> anyhow::Result<()>,
{
    fn build(
        &self,
        document: &mut D,
        question: &CustomQuestion,
        field_name: &FieldName,
        group: &D::Node,
    ) -> anyhow::Result<()> {
        self(document, question, field_name, group)
    }
}

/// Widget factories by component name.
pub struct WidgetRegistry<D: Document> {
    factories: HashMap<String, Box<dyn WidgetFactory<D>>>,
}

impl<D: Document> Default for WidgetRegistry<D> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<D: Document> fmt::Debug for WidgetRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("WidgetRegistry")
            .field("components", &names)
            .finish()
    }
}

impl<D: Document> WidgetRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one with the same name.
    pub fn register(
        &mut self,
        component: impl Into<String>,
        factory: impl WidgetFactory<D> + 'static,
    ) {
        self.factories.insert(component.into(), Box::new(factory));
    }

    pub fn get(&self, component: &str) -> Option<&dyn WidgetFactory<D>> {
        self.factories.get(component).map(Box::as_ref)
    }

    pub fn contains(&self, component: &str) -> bool {
        self.factories.contains_key(component)
    }
}

/// Build the field group of the question at `index`.
pub(crate) fn field_group<D: Document>(
    document: &mut D,
    question: &Question,
    index: usize,
    widgets: &WidgetRegistry<D>,
) -> D::Node {
    let name = FieldName::for_index(index);

    let fieldset = document.create_element("fieldset");
    let legend = document.create_text_element("legend", &format!("Question {}", index + 1));
    document.append_child(&fieldset, &legend);

    let label = document.create_text_element("label", question.text());
    document.add_class(&label, "question-title");
    if question.is_required() {
        document.add_class(&label, "required");
    }
    document.append_child(&fieldset, &label);

    match question.kind() {
        kind if kind.is_single_input() => {
            let input = input_element(document, question, &name);
            document.append_child(&fieldset, &input);
        }

        QuestionKind::Radio(choices) | QuestionKind::Checkbox(choices) => {
            for choice in &choices.answers {
                let input = input_element(document, question, &name);
                document.set_attribute(&input, "value", choice);
                document.append_child(&fieldset, &input);

                let choice_label = document.create_text_element("label", choice);
                document.add_class(&choice_label, "form-check-label");
                document.append_child(&fieldset, &choice_label);
            }
        }

        QuestionKind::Select(select) => {
            let select = select_element(document, question, select, &name);
            document.append_child(&fieldset, &select);
        }

        QuestionKind::TextArea => {
            let textarea = textarea_element(document, question, &name);
            document.append_child(&fieldset, &textarea);
        }

        QuestionKind::Custom(custom) => match widgets.get(&custom.component) {
            Some(factory) => {
                debug!(component = %custom.component, field = %name, "building custom widget");
                let scratch = document.create_element("fieldset");
                match factory.build(document, custom, &name, &scratch) {
                    Ok(()) => {
                        for child in document.child_nodes(&scratch) {
                            document.append_child(&fieldset, &child);
                        }
                    }
                    Err(e) => warn!(
                        component = %custom.component,
                        field = %name,
                        "custom widget failed: {e:#}"
                    ),
                }
            }
            None => {
                warn!(
                    component = %custom.component,
                    field = %name,
                    "no widget registered for custom component"
                );
            }
        },

        // `is_single_input` covers every remaining kind.
        _ => {}
    }

    fieldset
}

/// Build an `<input>` of the question's type with its constraints.
fn input_element<D: Document>(document: &mut D, question: &Question, name: &FieldName) -> D::Node {
    let kind = question.kind();
    let input = document.create_element("input");
    document.set_attribute(&input, "type", kind.input_type().unwrap_or("text"));
    document.set_attribute(&input, "name", name.as_str());
    document.add_class(
        &input,
        if kind.is_choice() {
            "form-check-input"
        } else {
            "form-control"
        },
    );

    if question.is_required() {
        document.set_flag(&input, "required", true);
    }
    // Choice inputs carry only `required`; text constraints mean nothing there.
    if kind.is_choice() {
        return input;
    }

    text_constraints(document, &input, question);
    if let Some(pattern) = question.validation_pattern().filter(|p| !p.is_empty()) {
        document.set_attribute(&input, "pattern", pattern);
    }
    if let QuestionKind::Number(number) = kind {
        number_constraints(document, &input, number);
    }
    input
}

fn text_constraints<D: Document>(document: &mut D, node: &D::Node, question: &Question) {
    if let Some(max) = question.max_characters().filter(|max| *max != 0) {
        document.set_attribute(node, "maxlength", &max.to_string());
    }
    if let Some(placeholder) = question.placeholder().filter(|p| !p.is_empty()) {
        document.set_attribute(node, "placeholder", placeholder);
    }
}

/// Apply `min`, `max` and `step`.
///
/// Like every numeric constraint, a bound of `0` counts as unset and is
/// dropped. Zero bounds cannot be expressed.
fn number_constraints<D: Document>(document: &mut D, node: &D::Node, number: &NumberQuestion) {
    if let Some(min) = truthy(number.min_value) {
        document.set_attribute(node, "min", &min.to_string());
    }
    if let Some(max) = truthy(number.max_value) {
        document.set_attribute(node, "max", &max.to_string());
    }
    if let Some(step) = truthy(number.step) {
        document.set_attribute(node, "step", &step.to_string());
    }
}

fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

fn select_element<D: Document>(
    document: &mut D,
    question: &Question,
    config: &SelectQuestion,
    name: &FieldName,
) -> D::Node {
    let select = document.create_element("select");
    document.set_attribute(&select, "name", name.as_str());
    document.add_class(&select, "form-control");
    if question.is_required() {
        document.set_flag(&select, "required", true);
    }
    if config.multiple {
        document.set_flag(&select, "multiple", true);
    }

    for option in &config.options {
        let node = document.create_element("option");
        document.set_attribute(&node, "value", &option.value);
        document.set_text(&node, &option.label);
        document.append_child(&select, &node);
    }
    select
}

fn textarea_element<D: Document>(
    document: &mut D,
    question: &Question,
    name: &FieldName,
) -> D::Node {
    let textarea = document.create_element("textarea");
    document.set_attribute(&textarea, "name", name.as_str());
    document.add_class(&textarea, "form-control");
    if question.is_required() {
        document.set_flag(&textarea, "required", true);
    }
    text_constraints(document, &textarea, question);
    textarea
}
