//! In-memory document model the controllers operate on.
//!
//! Elements live in an arena owned by [`Document`] and are addressed by
//! [`ElementId`]. Ids stay valid after removal: a removed element is simply
//! detached, so timers that fire late (ripple cleanup, notification removal)
//! can still refer to it safely.
//!
//! ```text
//! Document
//! ├── head     <style> blocks injected by the controllers
//! └── body     page content
//! ```
//!
//! Only elements reachable from `head` or `body` are *attached*; queries
//! ([`Document::select`], [`Document::element_by_id`]) see attached elements
//! only, in document order.

use crate::selector::SelectorList;
use crate::types::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Stable handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    /// Inline style declarations in insertion order.
    style: Vec<(String, String)>,
    text: String,
    rect: Rect,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: Vec::new(),
            text: String::new(),
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Set an attribute. `class` replaces the class list instead.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        self.attributes.insert(name, value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// `data-*` attribute lookup: `data("speed")` reads `data-speed`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{key}"))
    }

    pub fn set_data(&mut self, key: &str, value: &str) {
        self.set_attr(&format!("data-{key}"), value);
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property, replacing an existing value in place.
    pub fn set_style(&mut self, property: &str, value: &str) {
        match self.style.iter_mut().find(|(p, _)| p == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.style.push((property.to_string(), value.to_string())),
        }
    }

    pub fn styles(&self) -> &[(String, String)] {
        &self.style
    }

    /// Inline declarations serialized as a `style` attribute value.
    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Form control value (the `value` attribute), empty when unset.
    pub fn value(&self) -> &str {
        self.attr("value").unwrap_or("")
    }

    pub fn set_value(&mut self, value: &str) {
        self.set_attr("value", value);
    }

    /// Layout box in document coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    head: ElementId,
    body: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let nodes = vec![Element::new("head"), Element::new("body")];
        Self {
            nodes,
            head: ElementId(0),
            body: ElementId(1),
        }
    }

    pub fn head(&self) -> ElementId {
        self.head
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Element::new(tag));
        ElementId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.nodes[id.0].children
    }

    /// Append `child` as the last child of `parent`, moving it if it was
    /// already attached elsewhere. Appending an element into its own subtree
    /// is ignored.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if child == self.head || child == self.body || self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Detach an element (and its subtree) from the document.
    ///
    /// Returns `false` if it was already detached or is a root.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.head || id == self.body || self.nodes[id.0].parent.is_none() {
            return false;
        }
        self.detach(id);
        true
    }

    pub fn clear_children(&mut self, id: ElementId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn is_attached(&self, id: ElementId) -> bool {
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            current = parent;
        }
        current == self.head || current == self.body
    }

    /// All descendants of `root` in pre-order, excluding `root` itself.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Attached elements in document order.
    fn document_order(&self) -> Vec<ElementId> {
        let mut out = vec![self.head];
        out.extend(self.descendants(self.head));
        out.push(self.body);
        out.extend(self.descendants(self.body));
        out
    }

    pub fn query_all(&self, selectors: &SelectorList) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|id| selectors.matches(self, *id))
            .collect()
    }

    /// Query with selector text. Invalid selectors match nothing.
    pub fn select(&self, selector: &str) -> Vec<ElementId> {
        match SelectorList::parse(selector) {
            Ok(list) => self.query_all(&list),
            Err(err) => {
                warn!(%err, "ignoring invalid selector");
                Vec::new()
            }
        }
    }

    pub fn select_first(&self, selector: &str) -> Option<ElementId> {
        self.select(selector).into_iter().next()
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        if id.is_empty() {
            return None;
        }
        self.document_order()
            .into_iter()
            .find(|el| self.get(*el).id() == Some(id))
    }

    /// Inject a `<style>` block into `<head>`.
    pub fn add_style_rules(&mut self, css: &str) -> ElementId {
        let style = self.create_element("style");
        self.get_mut(style).set_text(css);
        let head = self.head;
        self.append_child(head, style);
        style
    }

    /// Text of every injected `<style>` block, in insertion order.
    pub fn style_rules(&self) -> Vec<&str> {
        self.children(self.head)
            .iter()
            .map(|id| self.get(*id))
            .filter(|el| el.tag() == "style")
            .map(|el| el.text())
            .collect()
    }

    /// Build an element tree from a spec and append it to `parent`.
    pub fn insert_spec(&mut self, parent: ElementId, spec: &ElementSpec) -> ElementId {
        let id = self.create_element(&spec.tag);
        {
            let el = self.get_mut(id);
            if let Some(html_id) = &spec.id {
                el.set_attr("id", html_id);
            }
            for class in &spec.classes {
                el.add_class(class);
            }
            for (name, value) in &spec.attributes {
                el.set_attr(name, value);
            }
            el.set_text(&spec.text);
            if let Some(rect) = spec.rect {
                el.set_rect(rect);
            }
        }
        self.append_child(parent, id);
        for child in &spec.children {
            self.insert_spec(id, child);
        }
        id
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
    }

    fn is_ancestor(&self, ancestor: ElementId, of: ElementId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }
}

/// Declarative element description, used by fixtures and scenario files.
///
/// ```json
/// { "tag": "img", "classes": ["mystic-image"],
///   "attributes": { "data-src": "images/altar.jpg" },
///   "rect": { "x": 0, "y": 1800, "width": 400, "height": 300 } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = Some(Rect::new(x, y, width, height));
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}
