//! An in-process document tree.
//!
//! `MemoryDocument` keeps elements in an arena and models the parts of a
//! browser document a form needs: attributes, text content, and the live
//! state of form controls (typed values, checkedness, option selectedness)
//! kept apart from their default state in the attributes. That split is what
//! makes form reset and form encoding behave like a browser.

use crate::Document;

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["input", "link", "meta", "br", "hr", "img"];

/// Input types that never contribute to form data.
const BUTTON_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "image", "file"];

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// Value typed by the user, overriding the default value.
    dirty_value: Option<String>,
    /// Checkedness set by the user, overriding the `checked` attribute.
    dirty_checked: Option<bool>,
    /// Selectedness set by the user, overriding the `selected` attribute.
    dirty_selected: Option<bool>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn input_type(&self) -> String {
        self.attribute("type")
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "text".to_string())
    }

    fn clear_dirty_state(&mut self) {
        self.dirty_value = None;
        self.dirty_checked = None;
        self.dirty_selected = None;
    }
}

/// An in-memory document with `<html>`, `<head>` and `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    mutations: usize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create an empty page.
    pub fn new() -> Self {
        let mut document = Self {
            nodes: vec![Element::new("html")],
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            mutations: 0,
        };
        document.set_attribute(&NodeId(0), "lang", "en");

        let head = document.create_element("head");
        let charset = document.create_element("meta");
        document.set_attribute(&charset, "charset", "UTF-8");
        document.append_child(&head, &charset);
        let viewport = document.create_element("meta");
        document.set_attribute(&viewport, "name", "viewport");
        document.set_attribute(&viewport, "content", "width=device-width, initial-scale=1.0");
        document.append_child(&head, &viewport);

        let body = document.create_element("body");
        document.append_child(&NodeId(0), &head);
        document.append_child(&NodeId(0), &body);

        document.head = head;
        document.body = body;
        document.mutations = 0;
        document
    }

    /// Create a page whose body holds an empty `<div>` with the given id.
    pub fn with_container(id: &str) -> Self {
        let mut document = Self::new();
        document.add_container(id);
        document.mutations = 0;
        document
    }

    /// Append an empty `<div>` with the given id to the body.
    pub fn add_container(&mut self, id: &str) -> NodeId {
        let container = self.create_element("div");
        self.set_attribute(&container, "id", id);
        let body = self.body;
        self.append_child(&body, &container);
        container
    }

    /// Set the page title.
    pub fn set_title(&mut self, title: &str) {
        let existing = self.descendants(self.head).into_iter().find(|n| self.tag(*n) == "title");
        let node = match existing {
            Some(node) => node,
            None => {
                let node = self.create_element("title");
                let head = self.head;
                self.append_child(&head, &node);
                node
            }
        };
        self.set_text(&node, title);
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head_element(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of mutating operations performed since the document was set up.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.0]
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.element(node).tag
    }

    /// The element's own text content, if it has one.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).text.as_deref()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.element(node).children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).parent
    }

    /// The element's attributes in the order they were first set.
    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        &self.element(node).attributes
    }

    /// All descendants of `node` in tree order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            found.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    /// Descendants of `node` with the given tag, in tree order.
    pub fn elements_by_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|n| self.tag(*n) == tag)
            .collect()
    }

    /// Descendants of `node` with the given `name` attribute, in tree order.
    pub fn elements_by_name(&self, node: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|n| self.element(*n).attribute("name") == Some(name))
            .collect()
    }

    /// The element directly following `node` under the same parent.
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|n| *n == node)?;
        siblings.get(position + 1).copied()
    }

    /// The form owning a control: its nearest `<form>` ancestor.
    fn owning_form(&self, node: NodeId) -> Option<NodeId> {
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            if self.tag(ancestor) == "form" {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// Check if a control is disabled, either itself or through a disabled
    /// `<fieldset>` ancestor.
    pub fn is_disabled(&self, node: NodeId) -> bool {
        if self.element(node).attribute("disabled").is_some() {
            return true;
        }
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            let element = self.element(ancestor);
            if element.tag == "fieldset" && element.attribute("disabled").is_some() {
                return true;
            }
            current = element.parent;
        }
        false
    }

    /// The current value of an `<input>` or `<textarea>`.
    pub fn value(&self, node: NodeId) -> String {
        let element = self.element(node);
        if let Some(value) = &element.dirty_value {
            return value.clone();
        }
        match element.tag.as_str() {
            "textarea" => element.text.clone().unwrap_or_default(),
            _ => element.attribute("value").unwrap_or_default().to_string(),
        }
    }

    /// Type into an `<input>` or `<textarea>`.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.element_mut(node).dirty_value = Some(value.to_string());
    }

    /// The current checkedness of a checkbox or radio button.
    pub fn is_checked(&self, node: NodeId) -> bool {
        let element = self.element(node);
        element
            .dirty_checked
            .unwrap_or_else(|| element.attribute("checked").is_some())
    }

    /// Check or uncheck a checkbox or radio button.
    ///
    /// Checking a radio button unchecks the others of its group in the same form.
    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        let element = self.element(node);
        let is_radio = element.tag == "input" && element.input_type() == "radio";
        let name = element.attribute("name").map(str::to_string);

        if checked
            && is_radio
            && let Some(name) = name
        {
            let scope = self.owning_form(node).unwrap_or(self.root);
            for other in self.elements_by_name(scope, &name) {
                let is_other_radio = {
                    let el = self.element(other);
                    el.tag == "input" && el.input_type() == "radio"
                };
                if other != node && is_other_radio {
                    self.element_mut(other).dirty_checked = Some(false);
                }
            }
        }
        self.element_mut(node).dirty_checked = Some(checked);
    }

    /// The current selectedness of an `<option>`.
    pub fn is_selected(&self, option: NodeId) -> bool {
        let element = self.element(option);
        element
            .dirty_selected
            .unwrap_or_else(|| element.attribute("selected").is_some())
    }

    /// Select or deselect an `<option>`.
    ///
    /// Selecting an option of a single select deselects its other options.
    pub fn set_selected(&mut self, option: NodeId, selected: bool) {
        if selected
            && let Some(select) = self.enclosing_select(option)
            && self.element(select).attribute("multiple").is_none()
        {
            for other in self.elements_by_tag(select, "option") {
                self.element_mut(other).dirty_selected = Some(false);
            }
        }
        self.element_mut(option).dirty_selected = Some(selected);
    }

    fn enclosing_select(&self, option: NodeId) -> Option<NodeId> {
        let mut current = self.parent(option);
        while let Some(ancestor) = current {
            if self.tag(ancestor) == "select" {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    fn option_value(&self, option: NodeId) -> String {
        let element = self.element(option);
        element
            .attribute("value")
            .map(str::to_string)
            .or_else(|| element.text.clone())
            .unwrap_or_default()
    }

    /// The options of a select that count as selected.
    ///
    /// A single select with nothing selected falls back to its first enabled
    /// option, the way a drop-down displays it.
    pub fn selected_options(&self, select: NodeId) -> Vec<NodeId> {
        let options = self.elements_by_tag(select, "option");
        let selected: Vec<NodeId> = options
            .iter()
            .copied()
            .filter(|o| self.is_selected(*o))
            .collect();

        let multiple = self.element(select).attribute("multiple").is_some();
        if !multiple && selected.is_empty() {
            return options
                .into_iter()
                .find(|o| self.element(*o).attribute("disabled").is_none())
                .into_iter()
                .collect();
        }
        if !multiple {
            // Several `selected` attributes on a single select: the last one wins.
            return selected.last().copied().into_iter().collect();
        }
        selected
    }

    /// Serialize the subtree rooted at `node` as indented HTML.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut html = String::new();
        crate::html::write_element(self, node, 0, &mut html);
        html
    }

    /// Serialize the whole page, including the doctype.
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>\n{}", self.outer_html(self.root))
    }

    pub(crate) fn is_void(&self, node: NodeId) -> bool {
        VOID_ELEMENTS.contains(&self.tag(node))
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.element(*n).attribute("id") == Some(id))
    }

    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.mutations += 1;
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node).attribute(name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.mutations += 1;
        let element = self.element_mut(*node);
        match element.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        let element = self.element_mut(*node);
        let before = element.attributes.len();
        element.attributes.retain(|(n, _)| n != name);
        if element.attributes.len() != before {
            self.mutations += 1;
        }
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        self.mutations += 1;
        let children = std::mem::take(&mut self.element_mut(*node).children);
        for child in children {
            self.element_mut(child).parent = None;
        }
        self.element_mut(*node).text = Some(text.to_string());
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.mutations += 1;
        if let Some(old_parent) = self.element(*child).parent {
            self.element_mut(old_parent).children.retain(|c| c != child);
        }
        self.element_mut(*child).parent = Some(*parent);
        self.element_mut(*parent).children.push(*child);
    }

    fn child_nodes(&self, node: &NodeId) -> Vec<NodeId> {
        self.children(*node).to_vec()
    }

    fn form_entries(&self, form: &NodeId) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for node in self.descendants(*form) {
            let element = self.element(node);
            let Some(name) = element.attribute("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if self.is_disabled(node) {
                continue;
            }

            match element.tag.as_str() {
                "input" => {
                    let input_type = element.input_type();
                    if BUTTON_INPUT_TYPES.contains(&input_type.as_str()) {
                        continue;
                    }
                    if input_type == "checkbox" || input_type == "radio" {
                        if self.is_checked(node) {
                            let value = element.attribute("value").unwrap_or("on");
                            entries.push((name.to_string(), value.to_string()));
                        }
                    } else {
                        entries.push((name.to_string(), self.value(node)));
                    }
                }
                "select" => {
                    for option in self.selected_options(node) {
                        if self.element(option).attribute("disabled").is_none() {
                            entries.push((name.to_string(), self.option_value(option)));
                        }
                    }
                }
                "textarea" => entries.push((name.to_string(), self.value(node))),
                _ => {}
            }
        }
        entries
    }

    fn reset_form(&mut self, form: &NodeId) {
        self.mutations += 1;
        for node in self.descendants(*form) {
            self.element_mut(node).clear_dirty_state();
        }
    }
}
