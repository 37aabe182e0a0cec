//! Tree utilities over the reference-counted DOM.
//!
//! The whole crate builds into `markup5ever_rcdom` trees; this module is
//! the single place that touches raw `Node` internals. Everything else
//! goes through these helpers.
//!
//! Insertion is a move: appending a node that already sits under another
//! parent detaches it from that parent first. Nodes are never cloned.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::{local_name, namespace_url, ns, Attribute, LocalName, QualName};
use log::debug;
use tendril::StrTendril;

pub use markup5ever_rcdom::{Handle, Node, NodeData};
use markup5ever_rcdom::SerializableHandle;

// ═══════════════════════════════════════════════════════════════════════════════
// NODE CREATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Create a detached HTML element.
///
/// `<template>` elements get their content slot populated, matching what
/// the parser produces for markup-sourced templates.
pub fn create_element(tag: &str) -> Handle {
    let template_contents = if tag.eq_ignore_ascii_case("template") {
        Some(Node::new(NodeData::Document))
    } else {
        None
    };
    Node::new(NodeData::Element {
        name: QualName::new(None, ns!(html), LocalName::from(tag)),
        attrs: RefCell::new(Vec::new()),
        template_contents: RefCell::new(template_contents),
        mathml_annotation_xml_integration_point: false,
    })
}

/// Create a detached element carrying the given attributes.
pub fn create_element_with_attrs(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let element = create_element(tag);
    for &(name, value) in attrs {
        set_attribute(&element, name, value);
    }
    element
}

/// Create a detached text node. The text is stored verbatim.
pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// STRUCTURE: PARENT / CHILD MOVES
// ═══════════════════════════════════════════════════════════════════════════════

/// Current parent of a node, if attached.
pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

/// Remove a node from its parent's child list, if it has one.
pub fn detach(node: &Handle) {
    if let Some(parent) = parent(node) {
        let mut children = parent.children.borrow_mut();
        if let Some(pos) = children.iter().position(|c| Rc::ptr_eq(c, node)) {
            children.remove(pos);
        }
    }
    node.parent.set(None);
}

/// Append a child, moving it out of its previous parent first.
pub fn append(parent: &Handle, child: Handle) {
    detach(&child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Insert `node` into `parent`'s children immediately before `reference`.
///
/// Falls back to a plain append when `reference` is not a child of
/// `parent`.
pub fn insert_before(parent: &Handle, node: Handle, reference: &Handle) {
    detach(&node);
    let mut children = parent.children.borrow_mut();
    match children.iter().position(|c| Rc::ptr_eq(c, reference)) {
        Some(pos) => {
            node.parent.set(Some(Rc::downgrade(parent)));
            children.insert(pos, node);
        }
        None => {
            drop(children);
            append(parent, node);
        }
    }
}

/// Detach and return all children of a node, preserving order.
pub fn take_children(node: &Handle) -> Vec<Handle> {
    let drained: Vec<Handle> = node.children.borrow_mut().drain(..).collect();
    for child in &drained {
        child.parent.set(None);
    }
    drained
}

// ═══════════════════════════════════════════════════════════════════════════════
// ELEMENT INSPECTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Lowercased local name of an element node.
pub fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_lowercase()),
        _ => None,
    }
}

/// Attribute value by name, for element nodes.
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.to_string() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Set (or replace) an attribute on an element node. No-op for other
/// node kinds.
pub fn set_attribute(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        if let Some(attr) = attrs.iter_mut().find(|attr| attr.name.local.to_string() == name) {
            attr.value = StrTendril::from(value);
        } else {
            attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(name)),
                value: StrTendril::from(value),
            });
        }
    }
}

/// Whether an element's `class` attribute carries `token` as a
/// whitespace-separated entry.
pub fn has_class(node: &Handle, token: &str) -> bool {
    match attribute(node, "class") {
        Some(classes) => classes.split_whitespace().any(|t| t == token),
        None => false,
    }
}

/// Content slot of a `<template>` element, `None` for everything else.
///
/// A template acts as a single-slot deferred container: content parsed
/// or mounted into it lands in this slot, not in its child list.
pub fn template_slot(node: &Handle) -> Option<Handle> {
    match &node.data {
        NodeData::Element {
            name,
            template_contents,
            ..
        } if name.ns == ns!(html) && name.local == local_name!("template") => {
            template_contents.borrow().clone()
        }
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRAVERSAL AND TEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// First descendant of `root` (depth-first, document order) matching the
/// predicate. Does not descend into template content slots, and does not
/// consider `root` itself.
pub fn find_first<F>(root: &Handle, pred: &F) -> Option<Handle>
where
    F: Fn(&Handle) -> bool,
{
    for child in root.children.borrow().iter() {
        if pred(child) {
            return Some(child.clone());
        }
        if let Some(found) = find_first(child, pred) {
            return Some(found);
        }
    }
    None
}

/// Concatenated text of all descendant text nodes, document order.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Replace a node's children with a single text node.
pub fn set_text(node: &Handle, text: &str) {
    take_children(node);
    append(node, create_text(text));
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERIALIZATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Serialize a node's children to an HTML string.
pub fn serialize_children(node: &Handle) -> String {
    let mut buf = Vec::new();
    let target: SerializableHandle = node.clone().into();
    if let Err(err) = serialize(&mut buf, &target, SerializeOpts::default()) {
        debug!("fragment serialization failed: {}", err);
        return String::new();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

// ═══════════════════════════════════════════════════════════════════════════════
// FRAGMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// A detached, appendable container of markup nodes not yet attached to
/// a live tree.
///
/// Cloning a `Fragment` aliases the same underlying tree; the clone and
/// the original see each other's mutations. Mounting a fragment moves
/// its children out, leaving every alias empty.
#[derive(Clone)]
pub struct Fragment {
    root: Handle,
}

impl Fragment {
    /// New empty fragment.
    pub fn new() -> Self {
        Fragment {
            root: Node::new(NodeData::Document),
        }
    }

    /// The fragment's root node, usable as a mount target.
    pub fn handle(&self) -> &Handle {
        &self.root
    }

    /// Snapshot of the fragment's current top-level nodes.
    pub fn children(&self) -> Vec<Handle> {
        self.root.children.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.root.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.borrow().is_empty()
    }

    /// Concatenated text content of the fragment.
    pub fn text(&self) -> String {
        text_content(&self.root)
    }

    /// Serialize the fragment's contents to an HTML string.
    pub fn to_html(&self) -> String {
        serialize_children(&self.root)
    }

    /// Detach and return all top-level nodes, leaving the fragment (and
    /// every alias of it) empty.
    pub fn take_children(&self) -> Vec<Handle> {
        take_children(&self.root)
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_moves_between_parents() {
        let first = create_element("div");
        let second = create_element("div");
        let child = create_element("span");

        append(&first, child.clone());
        assert_eq!(first.children.borrow().len(), 1);

        append(&second, child.clone());
        assert_eq!(first.children.borrow().len(), 0);
        assert_eq!(second.children.borrow().len(), 1);
        assert!(Rc::ptr_eq(&parent(&child).unwrap(), &second));
    }

    #[test]
    fn test_insert_before_ordering() {
        let parent_el = create_element("ul");
        let a = create_element("li");
        let c = create_element("li");
        append(&parent_el, a.clone());
        append(&parent_el, c.clone());

        let b = create_element("li");
        insert_before(&parent_el, b.clone(), &c);

        let children = parent_el.children.borrow();
        assert!(Rc::ptr_eq(&children[0], &a));
        assert!(Rc::ptr_eq(&children[1], &b));
        assert!(Rc::ptr_eq(&children[2], &c));
    }

    #[test]
    fn test_insert_before_missing_reference_appends() {
        let parent_el = create_element("div");
        let stranger = create_element("span");
        let node = create_element("b");
        insert_before(&parent_el, node.clone(), &stranger);
        assert!(Rc::ptr_eq(&parent_el.children.borrow()[0], &node));
    }

    #[test]
    fn test_class_token_matching() {
        let el = create_element_with_attrs("span", &[("class", "big ref:value other")]);
        assert!(has_class(&el, "ref:value"));
        assert!(has_class(&el, "big"));
        // token match, not substring match
        assert!(!has_class(&el, "ref:val"));
        assert!(!has_class(&el, "value"));
    }

    #[test]
    fn test_set_attribute_replaces() {
        let el = create_element("div");
        set_attribute(&el, "id", "a");
        set_attribute(&el, "id", "b");
        assert_eq!(attribute(&el, "id").as_deref(), Some("b"));
    }

    #[test]
    fn test_find_first_document_order() {
        let root = create_element("div");
        let nested = create_element("p");
        append(&nested, create_element_with_attrs("em", &[("class", "mark")]));
        append(&root, nested);
        append(&root, create_element_with_attrs("em", &[("class", "mark")]));

        // the nested match comes first in document order
        let found = find_first(&root, &|n| has_class(n, "mark")).unwrap();
        let found_parent = parent(&found).unwrap();
        assert!(Rc::ptr_eq(&found_parent, &root.children.borrow()[0]));
    }

    #[test]
    fn test_text_content_and_set_text() {
        let el = create_element("div");
        append(&el, create_text("a"));
        let inner = create_element("b");
        append(&inner, create_text("c"));
        append(&el, inner);
        assert_eq!(text_content(&el), "ac");

        set_text(&el, "replaced");
        assert_eq!(text_content(&el), "replaced");
        assert_eq!(el.children.borrow().len(), 1);
    }

    #[test]
    fn test_template_slot() {
        let template = create_element("template");
        let slot = template_slot(&template).unwrap();
        append(&slot, create_element("li"));
        // slot content is not in the template's own child list
        assert!(template.children.borrow().is_empty());
        assert_eq!(slot.children.borrow().len(), 1);

        assert!(template_slot(&create_element("div")).is_none());
    }

    #[test]
    fn test_fragment_take_children() {
        let fragment = Fragment::new();
        append(fragment.handle(), create_element("a"));
        append(fragment.handle(), create_element("b"));
        assert_eq!(fragment.len(), 2);

        let taken = fragment.take_children();
        assert_eq!(taken.len(), 2);
        assert!(fragment.is_empty());
        assert!(parent(&taken[0]).is_none());
    }

    #[test]
    fn test_serialize_children_escapes_text() {
        let el = create_element("div");
        append(&el, create_text("<b>x</b>"));
        assert_eq!(serialize_children(&el), "&lt;b&gt;x&lt;/b&gt;");
    }
}
