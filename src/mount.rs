//! The mount engine: content normalization and attachment.
//!
//! `mount` flattens a polymorphic content value depth-first into
//! primitive nodes and appends them to a target, in the left-to-right
//! order of the input. Components and fragments are moved, not copied:
//! after mounting, their source container is empty.

use log::trace;

use crate::component::Component;
use crate::dom::{self, Fragment, Handle};

/// A content value accepted by all mount operations.
///
/// Sequences nest to arbitrary depth; `Empty` contributes nothing
/// wherever it appears. Text is always inserted as a text node, never
/// parsed as markup.
pub enum Mountable {
    Empty,
    Node(Handle),
    Text(String),
    Fragment(Fragment),
    Component(Component),
    List(Vec<Mountable>),
}

impl From<Handle> for Mountable {
    fn from(node: Handle) -> Self {
        Mountable::Node(node)
    }
}

impl From<&str> for Mountable {
    fn from(text: &str) -> Self {
        Mountable::Text(text.to_string())
    }
}

impl From<String> for Mountable {
    fn from(text: String) -> Self {
        Mountable::Text(text)
    }
}

impl From<Fragment> for Mountable {
    fn from(fragment: Fragment) -> Self {
        Mountable::Fragment(fragment)
    }
}

impl From<Component> for Mountable {
    fn from(component: Component) -> Self {
        Mountable::Component(component)
    }
}

impl From<Vec<Mountable>> for Mountable {
    fn from(items: Vec<Mountable>) -> Self {
        Mountable::List(items)
    }
}

impl<T: Into<Mountable>> From<Option<T>> for Mountable {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Mountable::Empty,
        }
    }
}

impl FromIterator<Mountable> for Mountable {
    fn from_iter<I: IntoIterator<Item = Mountable>>(iter: I) -> Self {
        Mountable::List(iter.into_iter().collect())
    }
}

/// Mount content into a target container.
///
/// The target is either an ordinary container node or a `<template>`
/// placeholder. For a placeholder, the normalized content first lands in
/// the template's content slot; once normalization completes, the slot's
/// entire contents move to immediately precede the template in its
/// parent, leaving the template in place but empty. A detached template
/// keeps the content in its slot.
pub fn mount<M: Into<Mountable>>(content: M, target: &Handle) {
    let content = content.into();
    match dom::template_slot(target) {
        Some(slot) => {
            attach(content, &slot);
            if let Some(parent) = dom::parent(target) {
                let relocated = dom::take_children(&slot);
                trace!("relocating {} node(s) out of placeholder slot", relocated.len());
                for node in relocated {
                    dom::insert_before(&parent, node, target);
                }
            }
        }
        None => attach(content, target),
    }
}

/// Depth-first, order-preserving normalization and attachment.
fn attach(content: Mountable, target: &Handle) {
    match content {
        Mountable::Empty => {}
        Mountable::Node(node) => dom::append(target, node),
        Mountable::Text(text) => dom::append(target, dom::create_text(&text)),
        Mountable::Fragment(fragment) => {
            for node in fragment.take_children() {
                dom::append(target, node);
            }
        }
        Mountable::Component(component) => {
            for node in component.fragment().take_children() {
                dom::append(target, node);
            }
        }
        Mountable::List(items) => {
            for item in items {
                attach(item, target);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::component;

    fn names(target: &Handle) -> Vec<String> {
        target
            .children
            .borrow()
            .iter()
            .map(|c| dom::element_name(c).unwrap_or_else(|| "#text".to_string()))
            .collect()
    }

    #[test]
    fn test_empty_values_mount_nothing() {
        let target = dom::create_element("div");
        mount(Mountable::Empty, &target);
        mount(Mountable::List(Vec::new()), &target);
        mount(
            Mountable::List(vec![
                Mountable::Empty,
                Mountable::List(vec![Mountable::Empty, Mountable::Empty]),
            ]),
            &target,
        );
        assert!(target.children.borrow().is_empty());
    }

    #[test]
    fn test_nested_lists_flatten_in_order() {
        let target = dom::create_element("div");
        mount(
            Mountable::List(vec![
                dom::create_element("a").into(),
                Mountable::List(vec![
                    dom::create_element("b").into(),
                    Mountable::Empty,
                    Mountable::List(vec![dom::create_element("i").into()]),
                ]),
                "tail".into(),
            ]),
            &target,
        );
        assert_eq!(names(&target), ["a", "b", "i", "#text"]);
    }

    #[test]
    fn test_text_is_never_parsed_as_markup() {
        let target = dom::create_element("div");
        mount("<b>x</b>", &target);
        let children = target.children.borrow();
        assert_eq!(children.len(), 1);
        match &children[0].data {
            dom::NodeData::Text { contents } => {
                assert_eq!(contents.borrow().to_string(), "<b>x</b>");
            }
            _ => panic!("expected a text node"),
        }
    }

    #[test]
    fn test_node_mount_is_a_move() {
        let old_home = dom::create_element("div");
        let node = dom::create_element("span");
        dom::append(&old_home, node.clone());

        let target = dom::create_element("div");
        mount(node, &target);
        assert!(old_home.children.borrow().is_empty());
        assert_eq!(target.children.borrow().len(), 1);
    }

    #[test]
    fn test_component_is_spent_after_mount() {
        let factory = component(|cx| {
            dom::append(cx.fragment().handle(), dom::create_element("p"));
            Ok(())
        });
        let built = factory.create(()).unwrap();

        let target = dom::create_element("div");
        mount(built.clone(), &target);
        assert_eq!(target.children.borrow().len(), 1);
        assert!(built.fragment().is_empty());

        // second mount of the same (aliased) component adds nothing
        mount(built, &target);
        assert_eq!(target.children.borrow().len(), 1);
    }

    #[test]
    fn test_fragment_children_move_on_mount() {
        let fragment = crate::parse_markup("<i>a</i><i>b</i>");
        let target = dom::create_element("div");
        mount(fragment.clone(), &target);
        assert_eq!(target.children.borrow().len(), 2);
        assert!(fragment.is_empty());
    }

    #[test]
    fn test_placeholder_content_lands_before_it() {
        let parent = dom::create_element("ul");
        dom::append(&parent, dom::create_element("li"));
        let placeholder = dom::create_element("template");
        dom::append(&parent, placeholder.clone());
        dom::append(&parent, dom::create_element("li"));

        mount(
            Mountable::List(vec![
                dom::create_element("a").into(),
                dom::create_element("b").into(),
            ]),
            &placeholder,
        );

        assert_eq!(names(&parent), ["li", "a", "b", "template", "li"]);
        // the template stays, gains no children, and its slot is drained
        assert!(placeholder.children.borrow().is_empty());
        assert!(dom::template_slot(&placeholder)
            .unwrap()
            .children
            .borrow()
            .is_empty());
    }

    #[test]
    fn test_detached_placeholder_keeps_content_in_slot() {
        let placeholder = dom::create_element("template");
        mount(dom::create_element("a"), &placeholder);
        let slot = dom::template_slot(&placeholder).unwrap();
        assert_eq!(slot.children.borrow().len(), 1);
        assert!(placeholder.children.borrow().is_empty());
    }
}
