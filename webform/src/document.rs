//! The document capability the renderer works against.

use std::fmt;

/// Access to a document tree: element lookup, creation and the two form
/// operations the renderer needs (encoding and reset).
///
/// The renderer never touches a global document. Whoever mounts a form hands
/// it an implementation of this trait: [`MemoryDocument`](crate::MemoryDocument)
/// in tests and for static HTML generation, or a binding to a live browser
/// document.
pub trait Document {
    /// A handle to an element of this document.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Find a connected element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// The `<head>` element, if the document has one.
    fn head(&self) -> Option<Self::Node>;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Set an attribute, replacing any previous value.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    /// Replace the element's content with a text node.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Append `child` as the last child of `parent`, detaching it first if needed.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// The element's children, in order.
    fn child_nodes(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// The `(name, value)` entries the form would submit, in tree order.
    ///
    /// Implementations follow the browser's form-encoding rules: unnamed
    /// controls, buttons and disabled controls are skipped, checkboxes and
    /// radio buttons contribute only when checked, selects contribute their
    /// selected options.
    fn form_entries(&self, form: &Self::Node) -> Vec<(String, String)>;

    /// Restore every control of the form to its default state.
    fn reset_form(&mut self, form: &Self::Node);

    /// Add a class to the element's `class` attribute.
    fn add_class(&mut self, node: &Self::Node, class: &str) {
        let classes = match self.attribute(node, "class") {
            Some(existing) if existing.split_whitespace().any(|c| c == class) => return,
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &classes);
    }

    /// Set or remove a boolean attribute such as `required` or `hidden`.
    fn set_flag(&mut self, node: &Self::Node, name: &str, on: bool) {
        if on {
            self.set_attribute(node, name, "");
        } else {
            self.remove_attribute(node, name);
        }
    }

    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Create an element holding the given text.
    fn create_text_element(&mut self, tag: &str, text: &str) -> Self::Node {
        let node = self.create_element(tag);
        self.set_text(&node, text);
        node
    }
}
