//! The form renderer: mounting, submit, clear and conditional display.

use tracing::{debug, error, info, warn};
use webform_types::{
    AnswerRecord, FormError, Question, RenderOptions, validate_conditions, visible_questions,
};

use crate::widgets::{self, WidgetFactory, WidgetRegistry};
use crate::{DeliveryTask, Document, WebhookClient};

/// The elements of a mounted form.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedForm<N> {
    /// The `<form>` element.
    pub form: N,
    /// One `<fieldset>` per question, in question order.
    pub groups: Vec<N>,
    /// The submit control.
    pub submit: N,
    /// The clear control.
    pub clear: N,
}

/// Events the embedding page routes to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent<N> {
    /// The form was submitted. Native navigation is the host's to suppress.
    Submit,
    /// An element was clicked.
    Click(N),
    /// A control's value changed.
    Input,
}

/// The result of a submit.
#[derive(Debug)]
pub struct Submission {
    /// The collected answers.
    pub answers: AnswerRecord,
    /// The webhook delivery started for this submit, if a webhook is
    /// configured and delivery could be started.
    pub delivery: Option<DeliveryTask>,
}

/// Renders a form from a question list into a container element and handles
/// its submit and clear controls.
///
/// Construction mounts the form immediately. When the container cannot be
/// found the renderer logs the problem and stays unmounted: nothing is
/// rendered and every handler does nothing.
///
/// ```
/// use webform::{FormRenderer, MemoryDocument};
/// use webform_types::{Question, QuestionKind, RenderOptions};
///
/// let document = MemoryDocument::with_container("app");
/// let questions = vec![Question::new("Your name", QuestionKind::Text)];
///
/// let mut renderer = FormRenderer::new(document, "app", questions, RenderOptions::default());
/// let input = renderer.document().elements_by_name(renderer.document().root(), "question-0")[0];
/// renderer.document_mut().set_value(input, "Alice");
///
/// let submission = renderer.submit().unwrap();
/// assert_eq!(submission.answers.for_question(0).unwrap(), ["Alice"]);
/// ```
#[derive(Debug)]
pub struct FormRenderer<D: Document> {
    document: D,
    questions: Vec<Question>,
    options: RenderOptions,
    webhook: Option<WebhookClient>,
    form: Option<RenderedForm<D::Node>>,
    visibility: Vec<bool>,
}

/// Configures a [`FormRenderer`] before it is mounted.
///
/// Needed when the form has `custom` questions, whose widgets must be
/// registered before rendering.
#[derive(Debug)]
pub struct FormBuilder<D: Document> {
    document: D,
    options: RenderOptions,
    widgets: WidgetRegistry<D>,
    webhook: Option<WebhookClient>,
}

impl<D: Document> FormBuilder<D> {
    /// Set the render options.
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Register the widget factory for a custom component.
    pub fn widget(
        mut self,
        component: impl Into<String>,
        factory: impl WidgetFactory<D> + 'static,
    ) -> Self {
        self.widgets.register(component, factory);
        self
    }

    /// Use a preconfigured webhook client instead of one built from the options.
    pub fn webhook(mut self, client: WebhookClient) -> Self {
        self.webhook = Some(client);
        self
    }

    /// Build the renderer and mount the form, logging configuration errors.
    pub fn mount(self, container_id: &str, questions: Vec<Question>) -> FormRenderer<D> {
        let (mut renderer, widgets) = self.into_parts(questions);
        if let Err(e) = renderer.mount(container_id, &widgets) {
            error!("{e}");
        }
        renderer
    }

    /// Build the renderer and mount the form, returning configuration errors.
    pub fn try_mount(
        self,
        container_id: &str,
        questions: Vec<Question>,
    ) -> Result<FormRenderer<D>, FormError> {
        let (mut renderer, widgets) = self.into_parts(questions);
        renderer.mount(container_id, &widgets)?;
        Ok(renderer)
    }

    fn into_parts(self, questions: Vec<Question>) -> (FormRenderer<D>, WidgetRegistry<D>) {
        let renderer = FormRenderer {
            document: self.document,
            questions,
            options: self.options,
            webhook: self.webhook,
            form: None,
            visibility: Vec::new(),
        };
        (renderer, self.widgets)
    }
}

impl<D: Document> FormRenderer<D> {
    /// Start configuring a renderer for the given document.
    pub fn builder(document: D) -> FormBuilder<D> {
        FormBuilder {
            document,
            options: RenderOptions::default(),
            widgets: WidgetRegistry::new(),
            webhook: None,
        }
    }

    /// Render the questions into the element with id `container_id`.
    ///
    /// Configuration errors are logged and leave the renderer unmounted.
    pub fn new(
        document: D,
        container_id: &str,
        questions: Vec<Question>,
        options: RenderOptions,
    ) -> Self {
        Self::builder(document).options(options).mount(container_id, questions)
    }

    /// Render the questions into the element with id `container_id`,
    /// returning configuration errors instead of logging them.
    pub fn try_new(
        document: D,
        container_id: &str,
        questions: Vec<Question>,
        options: RenderOptions,
    ) -> Result<Self, FormError> {
        Self::builder(document).options(options).try_mount(container_id, questions)
    }

    fn mount(&mut self, container_id: &str, widgets: &WidgetRegistry<D>) -> Result<(), FormError> {
        let container = self
            .document
            .element_by_id(container_id)
            .ok_or_else(|| FormError::ContainerNotFound(container_id.to_string()))?;
        validate_conditions(&self.questions)?;

        if self.questions.is_empty() {
            warn!(container = container_id, "rendering a form without questions");
        }
        if self.webhook.is_none() {
            self.webhook = self.options.webhook().map(WebhookClient::new);
        }

        let form = self.render(&container, widgets);
        debug!(
            container = container_id,
            questions = self.questions.len(),
            "form rendered"
        );
        self.form = Some(form);
        self.visibility = vec![true; self.questions.len()];
        self.refresh_visibility();
        Ok(())
    }

    fn render(
        &mut self,
        container: &D::Node,
        widgets: &WidgetRegistry<D>,
    ) -> RenderedForm<D::Node> {
        let document = &mut self.document;

        let form = document.create_element("form");
        document.add_class(&form, &self.options.form_class);

        let groups = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let group = widgets::field_group(document, question, index, widgets);
                document.append_child(&form, &group);
                group
            })
            .collect();

        let submit = button(document, "submit", "Submit", "btn-primary");
        document.append_child(&form, &submit);
        let clear = button(document, "button", "Clear", "btn-secondary");
        document.append_child(&form, &clear);

        document.append_child(container, &form);

        debug!(style = ?self.options.style, "stylesheet");
        if let Some(href) = self.options.stylesheet_href() {
            match document.head() {
                Some(head) => {
                    let link = document.create_element("link");
                    document.set_attribute(&link, "rel", "stylesheet");
                    document.set_attribute(&link, "href", &href);
                    document.append_child(&head, &link);
                }
                None => warn!(href = %href, "document has no head, stylesheet not linked"),
            }
        }

        RenderedForm {
            form,
            groups,
            submit,
            clear,
        }
    }

    /// Check if the form was mounted.
    pub fn is_rendered(&self) -> bool {
        self.form.is_some()
    }

    /// The mounted form's elements.
    pub fn rendered(&self) -> Option<&RenderedForm<D::Node>> {
        self.form.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document, e.g. to simulate user input.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Give the document back.
    pub fn into_document(self) -> D {
        self.document
    }

    /// The visibility flag of every question, in question order.
    pub fn visibility(&self) -> &[bool] {
        &self.visibility
    }

    /// Dispatch an event to its handler.
    ///
    /// Returns the submission when the event submitted the form.
    pub fn handle(&mut self, event: FormEvent<D::Node>) -> Option<Submission> {
        match event {
            FormEvent::Submit => self.submit(),
            FormEvent::Click(node) => {
                let form = self.form.as_ref()?;
                if node == form.submit {
                    self.submit()
                } else if node == form.clear {
                    self.clear();
                    None
                } else {
                    None
                }
            }
            FormEvent::Input => {
                self.refresh_visibility();
                None
            }
        }
    }

    /// Read the current answers from the form.
    pub fn answers(&self) -> Option<AnswerRecord> {
        let form = self.form.as_ref()?;
        Some(AnswerRecord::from_entries(self.document.form_entries(&form.form)))
    }

    /// Collect the answers and start webhook delivery if configured.
    ///
    /// Returns as soon as delivery is spawned; delivery failures are logged
    /// by the delivery task and never reach the form.
    pub fn submit(&mut self) -> Option<Submission> {
        let Some(answers) = self.answers() else {
            warn!("submit ignored: form is not rendered");
            return None;
        };
        info!("collected answers\n{}", answers.to_table());

        let delivery = self
            .webhook
            .as_ref()
            .and_then(|webhook| match webhook.spawn(answers.clone()) {
                Ok(task) => Some(task),
                Err(e) => {
                    error!(url = webhook.url(), "webhook error: {e}");
                    None
                }
            });

        Some(Submission { answers, delivery })
    }

    /// Reset every field to its default state.
    pub fn clear(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        self.document.reset_form(&form.form);
        self.refresh_visibility();
    }

    /// Re-evaluate display conditions and show or hide field groups.
    ///
    /// Hidden groups are disabled as well, so their answers are not
    /// collected. Evaluation repeats until stable so chains of conditions
    /// settle in one call.
    pub fn refresh_visibility(&mut self) {
        if self.questions.iter().all(Question::is_unconditional) {
            return;
        }
        let Some(form) = self.form.as_ref() else {
            return;
        };

        for _ in 0..=self.questions.len() {
            let answers = AnswerRecord::from_entries(self.document.form_entries(&form.form));
            let visible = visible_questions(&self.questions, &answers);
            if visible == self.visibility {
                break;
            }

            for ((group, now), before) in form.groups.iter().zip(&visible).zip(&self.visibility) {
                if now != before {
                    self.document.set_flag(group, "hidden", !now);
                    self.document.set_flag(group, "disabled", !now);
                }
            }
            self.visibility = visible;
        }
    }
}

fn button<D: Document>(document: &mut D, kind: &str, label: &str, style: &str) -> D::Node {
    let button = document.create_element("input");
    document.set_attribute(&button, "type", kind);
    document.set_attribute(&button, "value", label);
    document.add_class(&button, "btn");
    document.add_class(&button, style);
    button
}
