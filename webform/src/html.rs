//! HTML serialization and standalone page generation.

use webform_types::{FormError, Question, RenderOptions};

use crate::{FormRenderer, MemoryDocument, NodeId};

/// Id of the container `render_page` mounts the form into.
pub const PAGE_CONTAINER_ID: &str = "survey";

/// Render a standalone HTML page holding the form for the given questions.
///
/// The form is mounted into an in-memory document exactly as it would be in
/// a browser, then the whole page is serialized.
pub fn render_page(
    title: Option<&str>,
    questions: Vec<Question>,
    options: RenderOptions,
) -> Result<String, FormError> {
    let mut document = MemoryDocument::with_container(PAGE_CONTAINER_ID);
    if let Some(title) = title {
        document.set_title(title);
    }

    let renderer = FormRenderer::try_new(document, PAGE_CONTAINER_ID, questions, options)?;
    Ok(renderer.document().to_html())
}

/// Append the indented HTML of `node` and its subtree to `html`.
pub(crate) fn write_element(
    document: &MemoryDocument,
    node: NodeId,
    indent: usize,
    html: &mut String,
) {
    let ind = "  ".repeat(indent);
    let tag = document.tag(node);

    html.push_str(&format!("{ind}<{tag}"));
    for (name, value) in document.attributes(node) {
        if value.is_empty() {
            html.push_str(&format!(" {name}"));
        } else {
            html.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
        }
    }
    html.push('>');

    if document.is_void(node) {
        html.push('\n');
        return;
    }

    let children = document.children(node);
    if children.is_empty() {
        if let Some(text) = document.text(node) {
            html.push_str(&escape_html(text));
        }
        html.push_str(&format!("</{tag}>\n"));
        return;
    }

    html.push('\n');
    for child in children {
        write_element(document, *child, indent + 1, html);
    }
    html.push_str(&format!("{ind}</{tag}>\n"));
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
