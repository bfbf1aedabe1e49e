//! # webform
//!
//! Render survey forms from a list of question descriptors.
//!
//! A [`FormRenderer`] mounts a form into a container element of a
//! [`Document`], collects the answers on submit and optionally posts them to
//! a webhook. The document is injected: [`MemoryDocument`] covers tests and
//! static HTML generation, other implementations can bind a live page.
//!
//! ## Usage
//!
//! ```rust
//! use webform::{FormRenderer, MemoryDocument, Question, QuestionKind, RenderOptions};
//!
//! let questions = vec![
//!     Question::new("What is your name?", QuestionKind::Text).required(),
//!     Question::new(
//!         "How did you hear about us?",
//!         QuestionKind::radio(["Friend", "Search", "Other"]),
//!     ),
//! ];
//!
//! let renderer = FormRenderer::new(
//!     MemoryDocument::with_container("survey"),
//!     "survey",
//!     questions,
//!     RenderOptions::new().with_style("default"),
//! );
//! assert!(renderer.is_rendered());
//! ```
//!
//! ## Field names
//!
//! Every control of question `i` is named `question-<i>`. Submitted answers
//! are an [`AnswerRecord`] keyed by those names, each holding every value the
//! form produced for that name.
//!
//! ## Custom components
//!
//! Questions of kind `custom` are built by a [`WidgetFactory`] registered
//! under the component's name with [`FormBuilder::widget`]. Unregistered
//! components render an empty field group.
//!
//! ## Webhook delivery
//!
//! When a webhook URL is configured, submit spawns a [`DeliveryTask`] on the
//! current tokio runtime. The form never waits for it.

pub use webform_types::*;

mod document;
pub use document::Document;

mod memory;
pub use memory::{MemoryDocument, NodeId};

mod html;
pub use html::{PAGE_CONTAINER_ID, escape_html, render_page};

mod widgets;
pub use widgets::{WidgetFactory, WidgetRegistry};

mod delivery;
pub use delivery::{DeliveryError, DeliveryTask, WebhookClient};

mod renderer;
pub use renderer::{FormBuilder, FormEvent, FormRenderer, RenderedForm, Submission};
