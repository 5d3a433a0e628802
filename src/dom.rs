//! Retained document model
//!
//! A deliberately small stand-in for the parts of a DOM the behavior layer
//! touches: tags, ids, class lists, attributes, layout geometry, and the
//! value/disabled/focus state of form controls. There is no markup parsing
//! and no text content; embedders construct the tree programmatically and
//! supply element geometry up front (layout is out of scope here).
//!
//! Nodes live in a flat arena addressed by [`NodeId`]. Parent/child links
//! are kept so containment queries ("was this click inside the menu?")
//! work the way `Node.contains` does.

use rustc_hash::FxHashMap;

use crate::geometry::Rect;

/// Index of an element in the document arena
pub type NodeId = usize;

/// A single element: tag, identity, class list, attributes, geometry, and
/// form-control state
///
/// Attributes are stored as ordered name/value pairs; names are unique.
/// Class order is preserved and duplicates are rejected on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
  tag: String,
  id: Option<String>,
  classes: Vec<String>,
  attributes: Vec<(String, String)>,
  rect: Rect,
  value: String,
  disabled: bool,
  parent: Option<NodeId>,
  children: Vec<NodeId>,
}

impl Element {
  fn new(tag: &str, parent: Option<NodeId>) -> Self {
    Self {
      tag: tag.to_ascii_lowercase(),
      id: None,
      classes: Vec::new(),
      attributes: Vec::new(),
      rect: Rect::ZERO,
      value: String::new(),
      disabled: false,
      parent,
      children: Vec::new(),
    }
  }

  /// Lowercased tag name
  pub fn tag(&self) -> &str {
    &self.tag
  }

  /// Element id, if one was assigned
  pub fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }

  /// Layout rect in absolute document coordinates
  pub fn rect(&self) -> Rect {
    self.rect
  }

  /// Class list in insertion order
  pub fn classes(&self) -> &[String] {
    &self.classes
  }

  /// Returns true when the class list contains `class`
  pub fn has_class(&self, class: &str) -> bool {
    self.classes.iter().any(|existing| existing == class)
  }

  /// Returns the attribute value, if the attribute is present
  pub fn get_attribute_ref(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(attr, _)| attr == name)
      .map(|(_, value)| value.as_str())
  }

  /// Returns true when the attribute is present (even with an empty value)
  pub fn has_attribute(&self, name: &str) -> bool {
    self.attributes.iter().any(|(attr, _)| attr == name)
  }

  /// Current control value (meaningful for form fields)
  pub fn value(&self) -> &str {
    &self.value
  }

  /// Whether the control is disabled
  pub fn is_disabled(&self) -> bool {
    self.disabled
  }

  /// Parent element, if any
  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  /// Child ids in document order
  pub fn children(&self) -> &[NodeId] {
    &self.children
  }
}

/// The page document: an arena of elements plus focus state
///
/// # Examples
///
/// ```
/// use vitrine::dom::Document;
/// use vitrine::Rect;
///
/// let mut doc = Document::new();
/// let body = doc.create_element("body");
/// let header = doc.append_child(body, "header");
/// doc.set_id(header, "header");
/// doc.set_rect(header, Rect::from_xywh(0.0, 0.0, 1280.0, 80.0));
///
/// assert_eq!(doc.by_id("header"), Some(header));
/// assert!(doc.contains(body, header));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
  nodes: Vec<Element>,
  ids: FxHashMap<String, NodeId>,
  focus: Option<NodeId>,
}

impl Document {
  /// Creates an empty document
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a root-level element and returns its id
  pub fn create_element(&mut self, tag: &str) -> NodeId {
    self.nodes.push(Element::new(tag, None));
    self.nodes.len() - 1
  }

  /// Appends a child under `parent` and returns its id
  ///
  /// # Panics
  ///
  /// Panics if `parent` is not a node of this document; tree construction
  /// is embedder code and a bad parent id is a programming error there.
  pub fn append_child(&mut self, parent: NodeId, tag: &str) -> NodeId {
    assert!(parent < self.nodes.len(), "append_child: bad parent id");
    self.nodes.push(Element::new(tag, Some(parent)));
    let child = self.nodes.len() - 1;
    self.nodes[parent].children.push(child);
    child
  }

  /// Looks up an element, if the id is in range
  pub fn node(&self, id: NodeId) -> Option<&Element> {
    self.nodes.get(id)
  }

  /// Number of elements in the document
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Resolves an element id attribute to its node
  ///
  /// With duplicate ids the first assignment wins, as `getElementById`
  /// would resolve it.
  pub fn by_id(&self, id: &str) -> Option<NodeId> {
    self.ids.get(id).copied()
  }

  /// Assigns the element id and indexes it
  pub fn set_id(&mut self, node: NodeId, id: &str) {
    if let Some(element) = self.nodes.get_mut(node) {
      element.id = Some(id.to_string());
      self.ids.entry(id.to_string()).or_insert(node);
    }
  }

  /// Sets the element's layout rect
  pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
    if let Some(element) = self.nodes.get_mut(node) {
      element.rect = rect;
    }
  }

  /// Adds a class if not already present; returns true when added
  pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
    match self.nodes.get_mut(node) {
      Some(element) if !element.has_class(class) => {
        element.classes.push(class.to_string());
        true
      }
      _ => false,
    }
  }

  /// Removes a class; returns true when it was present
  pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
    match self.nodes.get_mut(node) {
      Some(element) => {
        let before = element.classes.len();
        element.classes.retain(|existing| existing != class);
        element.classes.len() != before
      }
      None => false,
    }
  }

  /// Toggles a class and returns whether it is now present
  pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
    if self.has_class(node, class) {
      self.remove_class(node, class);
      false
    } else {
      self.add_class(node, class);
      true
    }
  }

  /// Returns true when the node exists and carries the class
  pub fn has_class(&self, node: NodeId, class: &str) -> bool {
    self
      .nodes
      .get(node)
      .map(|element| element.has_class(class))
      .unwrap_or(false)
  }

  /// Sets an attribute, replacing any existing value
  pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
    if let Some(element) = self.nodes.get_mut(node) {
      match element.attributes.iter_mut().find(|(attr, _)| attr == name) {
        Some((_, existing)) => *existing = value.to_string(),
        None => element.attributes.push((name.to_string(), value.to_string())),
      }
    }
  }

  /// Removes an attribute; returns true when it was present
  pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
    match self.nodes.get_mut(node) {
      Some(element) => {
        let before = element.attributes.len();
        element.attributes.retain(|(attr, _)| attr != name);
        element.attributes.len() != before
      }
      None => false,
    }
  }

  /// Sets a form control's value
  pub fn set_value(&mut self, node: NodeId, value: &str) {
    if let Some(element) = self.nodes.get_mut(node) {
      element.value = value.to_string();
    }
  }

  /// Enables or disables a form control
  pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
    if let Some(element) = self.nodes.get_mut(node) {
      element.disabled = disabled;
    }
  }

  /// The currently focused element, if any
  pub fn focused(&self) -> Option<NodeId> {
    self.focus
  }

  /// Moves focus (or clears it with `None`)
  pub fn set_focus(&mut self, node: Option<NodeId>) {
    self.focus = node.filter(|id| *id < self.nodes.len());
  }

  /// All elements with the given tag, in document order
  pub fn elements_with_tag(&self, tag: &str) -> Vec<NodeId> {
    self
      .nodes
      .iter()
      .enumerate()
      .filter(|(_, element)| element.tag == tag)
      .map(|(id, _)| id)
      .collect()
  }

  /// All elements carrying the given class, in document order
  pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
    self
      .nodes
      .iter()
      .enumerate()
      .filter(|(_, element)| element.has_class(class))
      .map(|(id, _)| id)
      .collect()
  }

  /// All elements carrying the given attribute, in document order
  pub fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
    self
      .nodes
      .iter()
      .enumerate()
      .filter(|(_, element)| element.has_attribute(name))
      .map(|(id, _)| id)
      .collect()
  }

  /// Preorder walk of the subtree rooted at `root`, excluding `root` itself
  pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = match self.nodes.get(root) {
      Some(element) => element.children.iter().rev().copied().collect(),
      None => return out,
    };
    while let Some(id) = stack.pop() {
      out.push(id);
      for child in self.nodes[id].children.iter().rev() {
        stack.push(*child);
      }
    }
    out
  }

  /// Returns true when `node` is `ancestor` or sits inside its subtree
  ///
  /// Mirrors `Node.contains`, which the outside-click menu close relies on.
  pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
    if ancestor == node {
      return self.nodes.get(ancestor).is_some();
    }
    let mut current = self.nodes.get(node).and_then(|element| element.parent);
    while let Some(id) = current {
      if id == ancestor {
        return true;
      }
      current = self.nodes[id].parent;
    }
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::Rect;

  fn tiny_doc() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();
    let body = doc.create_element("body");
    let menu = doc.append_child(body, "nav");
    let link = doc.append_child(menu, "a");
    (doc, body, menu, link)
  }

  #[test]
  fn test_contains_walks_ancestors() {
    let (doc, body, menu, link) = tiny_doc();
    assert!(doc.contains(body, link));
    assert!(doc.contains(menu, link));
    assert!(doc.contains(menu, menu));
    assert!(!doc.contains(link, menu));
  }

  #[test]
  fn test_class_toggle() {
    let (mut doc, body, ..) = tiny_doc();
    assert!(doc.toggle_class(body, "active"));
    assert!(doc.has_class(body, "active"));
    assert!(!doc.toggle_class(body, "active"));
    assert!(!doc.has_class(body, "active"));
  }

  #[test]
  fn test_add_class_rejects_duplicates() {
    let (mut doc, body, ..) = tiny_doc();
    assert!(doc.add_class(body, "loaded"));
    assert!(!doc.add_class(body, "loaded"));
    assert_eq!(doc.node(body).unwrap().classes().len(), 1);
  }

  #[test]
  fn test_attributes_replace_and_remove() {
    let (mut doc, _, _, link) = tiny_doc();
    doc.set_attribute(link, "href", "#home");
    doc.set_attribute(link, "href", "#about");
    assert_eq!(doc.node(link).unwrap().get_attribute_ref("href"), Some("#about"));
    assert!(doc.remove_attribute(link, "href"));
    assert!(!doc.remove_attribute(link, "href"));
  }

  #[test]
  fn test_duplicate_id_first_wins() {
    let (mut doc, body, menu, _) = tiny_doc();
    doc.set_id(body, "main");
    doc.set_id(menu, "main");
    assert_eq!(doc.by_id("main"), Some(body));
  }

  #[test]
  fn test_descendants_preorder() {
    let mut doc = Document::new();
    let body = doc.create_element("body");
    let first = doc.append_child(body, "section");
    let nested = doc.append_child(first, "div");
    let second = doc.append_child(body, "section");
    assert_eq!(doc.descendants(body), vec![first, nested, second]);
  }

  #[test]
  fn test_rect_roundtrip() {
    let (mut doc, body, ..) = tiny_doc();
    let rect = Rect::from_xywh(0.0, 10.0, 100.0, 200.0);
    doc.set_rect(body, rect);
    assert_eq!(doc.node(body).unwrap().rect(), rect);
  }
}
