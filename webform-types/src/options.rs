use serde::{Deserialize, Serialize};

/// Directory stylesheets are looked up in when none is configured.
pub const DEFAULT_STYLESHEET_BASE: &str = "../dist/css";

/// Class put on the generated `<form>` element when none is configured.
pub const DEFAULT_FORM_CLASS: &str = "surveyForm";

/// Options for rendering a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Endpoint that receives every submission as JSON.
    pub webhook_url: Option<String>,

    /// Name of a stylesheet to link, resolved as `<stylesheet_base>/<style>.css`.
    pub style: Option<String>,

    /// Directory the stylesheet name is resolved against.
    pub stylesheet_base: String,

    /// CSS class of the generated form element.
    pub form_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            webhook_url: None,
            style: None,
            stylesheet_base: DEFAULT_STYLESHEET_BASE.to_string(),
            form_class: DEFAULT_FORM_CLASS.to_string(),
        }
    }
}

impl RenderOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver submissions to the given endpoint.
    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Link the stylesheet with the given name.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Resolve stylesheet names against a different directory.
    pub fn with_stylesheet_base(mut self, base: impl Into<String>) -> Self {
        self.stylesheet_base = base.into();
        self
    }

    /// Set a custom CSS class for the form element.
    pub fn with_form_class(mut self, class: impl Into<String>) -> Self {
        self.form_class = class.into();
        self
    }

    /// The href of the configured stylesheet, if any.
    ///
    /// An empty style name counts as unset.
    pub fn stylesheet_href(&self) -> Option<String> {
        let style = self.style.as_deref().filter(|s| !s.is_empty())?;
        let base = self.stylesheet_base.trim_end_matches('/');
        Some(format!("{base}/{style}.css"))
    }

    /// The configured webhook endpoint, if any. An empty URL counts as unset.
    pub fn webhook(&self) -> Option<&str> {
        self.webhook_url.as_deref().filter(|url| !url.is_empty())
    }
}
