//! In-memory live tree with DOM-like mutation semantics.
//!
//! Invariants:
//! - Handles are never reused; a detached node keeps its record and can be re-inserted.
//! - A node has at most one parent, and operations must not create cycles.
//! - `append_child` and `replace_with` move a node that already has a parent.
//! - Removing or replacing a node with no parent (other than the root) is a no-op,
//!   matching DOM `remove()`/`replaceWith()` on a detached node.

use crate::live::LiveTree;
use crate::types::{Attributes, Description, Element};
use std::sync::Arc;

/// Handle to a node in an [`ArenaTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("unknown node {0:?}")]
    MissingNode(NodeKey),
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeKey),
    #[error("appending {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: NodeKey, child: NodeKey },
}

/// Counts of mutations performed on an arena since the last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutationCounters {
    pub nodes_created: u64,
    pub attributes_set: u64,
    pub attributes_removed: u64,
    pub children_appended: u64,
    pub nodes_removed: u64,
    pub nodes_replaced: u64,
}

impl MutationCounters {
    pub fn is_zero(&self) -> bool {
        *self == MutationCounters::default()
    }
}

#[derive(Default)]
pub struct ArenaTree {
    nodes: Vec<NodeRecord>,
    root: Option<NodeKey>,
    counters: MutationCounters,
}

struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

enum NodeKind {
    Element {
        tag: Arc<str>,
        attributes: Vec<(Arc<str>, String)>,
    },
    Text {
        text: String,
    },
}

impl ArenaTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `description` and make it the root of the tree.
    pub fn mount(&mut self, description: &Description) -> Result<NodeKey, ArenaError> {
        let node = self.render(description)?;
        self.root = Some(node);
        Ok(node)
    }

    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    pub fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.nodes.get(node.0 as usize).and_then(|record| record.parent)
    }

    /// True when `node` is reachable from the root.
    pub fn is_attached(&self, node: NodeKey) -> bool {
        let mut current = node;
        loop {
            if self.root == Some(current) {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn attribute(&self, node: NodeKey, name: &str) -> Option<&str> {
        match &self.nodes.get(node.0 as usize)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| &**k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn tag(&self, node: NodeKey) -> Option<&str> {
        match &self.nodes.get(node.0 as usize)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn text(&self, node: NodeKey) -> Option<&str> {
        match &self.nodes.get(node.0 as usize)?.kind {
            NodeKind::Text { text } => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn counters(&self) -> MutationCounters {
        self.counters
    }

    pub fn reset_counters(&mut self) {
        self.counters = MutationCounters::default();
    }

    /// Materialize the live subtree at `node` back into a description.
    pub fn to_description(&self, node: NodeKey) -> Result<Description, ArenaError> {
        let record = self.record(node)?;
        let description = match &record.kind {
            NodeKind::Text { text } => Description::Text(text.clone()),
            NodeKind::Element { tag, attributes } => {
                let children = record
                    .children
                    .iter()
                    .map(|child| self.to_description(*child))
                    .collect::<Result<Vec<_>, _>>()?;
                Description::Element(Element {
                    tag: Arc::clone(tag),
                    attrs: attributes
                        .iter()
                        .map(|(k, v)| (k, v.as_str()))
                        .collect::<Attributes>(),
                    children,
                })
            }
        };
        Ok(description)
    }

    fn record(&self, node: NodeKey) -> Result<&NodeRecord, ArenaError> {
        self.nodes
            .get(node.0 as usize)
            .ok_or(ArenaError::MissingNode(node))
    }

    fn record_mut(&mut self, node: NodeKey) -> Result<&mut NodeRecord, ArenaError> {
        self.nodes
            .get_mut(node.0 as usize)
            .ok_or(ArenaError::MissingNode(node))
    }

    fn insert_node(&mut self, kind: NodeKind) -> NodeKey {
        let key = NodeKey(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        self.counters.nodes_created += 1;
        key
    }

    fn attributes_mut(
        &mut self,
        node: NodeKey,
    ) -> Result<&mut Vec<(Arc<str>, String)>, ArenaError> {
        match &mut self.record_mut(node)?.kind {
            NodeKind::Element { attributes, .. } => Ok(attributes),
            NodeKind::Text { .. } => Err(ArenaError::NotAnElement(node)),
        }
    }

    fn detach(&mut self, node: NodeKey) -> Result<(), ArenaError> {
        if let Some(parent) = self.record_mut(node)?.parent.take() {
            self.record_mut(parent)?.children.retain(|k| *k != node);
        }
        Ok(())
    }

    fn is_descendant(&self, ancestor: NodeKey, maybe_descendant: NodeKey) -> bool {
        let mut current = Some(maybe_descendant);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}

impl LiveTree for ArenaTree {
    type Node = NodeKey;
    type Error = ArenaError;

    fn create_element(&mut self, tag: &str) -> Result<NodeKey, ArenaError> {
        Ok(self.insert_node(NodeKind::Element {
            tag: Arc::from(tag),
            attributes: Vec::new(),
        }))
    }

    fn create_text(&mut self, text: &str) -> Result<NodeKey, ArenaError> {
        Ok(self.insert_node(NodeKind::Text {
            text: text.to_string(),
        }))
    }

    fn set_attribute(&mut self, node: &NodeKey, name: &str, value: &str) -> Result<(), ArenaError> {
        let attributes = self.attributes_mut(*node)?;
        match attributes.iter_mut().find(|(k, _)| &**k == name) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => attributes.push((Arc::from(name), value.to_string())),
        }
        self.counters.attributes_set += 1;
        Ok(())
    }

    fn remove_attribute(&mut self, node: &NodeKey, name: &str) -> Result<(), ArenaError> {
        let attributes = self.attributes_mut(*node)?;
        attributes.retain(|(k, _)| &**k != name);
        self.counters.attributes_removed += 1;
        Ok(())
    }

    fn remove(&mut self, node: &NodeKey) -> Result<(), ArenaError> {
        let attached = self.record(*node)?.parent.is_some();
        if attached {
            self.detach(*node)?;
        } else if self.root == Some(*node) {
            self.root = None;
        } else {
            return Ok(());
        }
        self.counters.nodes_removed += 1;
        Ok(())
    }

    fn replace_with(&mut self, node: &NodeKey, replacement: &NodeKey) -> Result<(), ArenaError> {
        if node == replacement {
            return Ok(());
        }
        if self.is_descendant(*replacement, *node) {
            return Err(ArenaError::CycleDetected {
                parent: *replacement,
                child: *node,
            });
        }
        self.detach(*replacement)?;
        if self.root == Some(*replacement) {
            self.root = None;
        }
        let parent = self.record(*node)?.parent;
        match parent {
            Some(parent) => {
                let siblings = &mut self.record_mut(parent)?.children;
                if let Some(slot) = siblings.iter_mut().find(|k| **k == *node) {
                    *slot = *replacement;
                }
                self.record_mut(*replacement)?.parent = Some(parent);
                self.record_mut(*node)?.parent = None;
            }
            None if self.root == Some(*node) => self.root = Some(*replacement),
            None => return Ok(()),
        }
        self.counters.nodes_replaced += 1;
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeKey, child: &NodeKey) -> Result<(), ArenaError> {
        if self.is_descendant(*child, *parent) {
            return Err(ArenaError::CycleDetected {
                parent: *parent,
                child: *child,
            });
        }
        if let NodeKind::Text { .. } = self.record(*parent)?.kind {
            return Err(ArenaError::NotAnElement(*parent));
        }
        self.detach(*child)?;
        if self.root == Some(*child) {
            self.root = None;
        }
        self.record_mut(*parent)?.children.push(*child);
        self.record_mut(*child)?.parent = Some(*parent);
        self.counters.children_appended += 1;
        Ok(())
    }

    fn children(&self, node: &NodeKey) -> Result<Vec<NodeKey>, ArenaError> {
        Ok(self.record(*node)?.children.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_moves_existing_child() {
        let mut tree = ArenaTree::new();
        let a = tree.create_element("a").expect("a");
        let b = tree.create_element("b").expect("b");
        let c = tree.create_text("c").expect("c");
        tree.append_child(&a, &c).expect("append");
        tree.append_child(&b, &c).expect("move");
        assert!(tree.children(&a).expect("children").is_empty());
        assert_eq!(tree.children(&b).expect("children"), vec![c]);
        assert_eq!(tree.parent(c), Some(b));
    }

    #[test]
    fn append_rejects_cycles() {
        let mut tree = ArenaTree::new();
        let outer = tree.create_element("div").expect("outer");
        let inner = tree.create_element("div").expect("inner");
        tree.append_child(&outer, &inner).expect("append");
        let err = tree.append_child(&inner, &outer).expect_err("cycle");
        assert!(matches!(err, ArenaError::CycleDetected { .. }));
    }

    #[test]
    fn text_nodes_reject_attributes_and_children() {
        let mut tree = ArenaTree::new();
        let text = tree.create_text("t").expect("text");
        let other = tree.create_text("o").expect("other");
        assert!(matches!(
            tree.set_attribute(&text, "id", "x"),
            Err(ArenaError::NotAnElement(_))
        ));
        assert!(matches!(
            tree.append_child(&text, &other),
            Err(ArenaError::NotAnElement(_))
        ));
    }

    #[test]
    fn replace_root_moves_root_slot() {
        let mut tree = ArenaTree::new();
        let root = tree.mount(&Description::text("a")).expect("mount");
        let next = tree.create_text("b").expect("create");
        tree.replace_with(&root, &next).expect("replace");
        assert_eq!(tree.root(), Some(next));
        assert!(!tree.is_attached(root));
        assert!(tree.is_attached(next));
    }

    #[test]
    fn replace_keeps_sibling_position() {
        let mut tree = ArenaTree::new();
        let root = tree
            .mount(
                &Element::new("ol")
                    .with_child("1")
                    .with_child("2")
                    .with_child("3")
                    .into(),
            )
            .expect("mount");
        let middle = tree.children(&root).expect("children")[1];
        let next = tree.create_text("two").expect("create");
        tree.replace_with(&middle, &next).expect("replace");
        assert_eq!(
            tree.to_description(root).expect("materialize"),
            Element::new("ol")
                .with_child("1")
                .with_child("two")
                .with_child("3")
                .into()
        );
        assert_eq!(tree.parent(middle), None);
    }

    #[test]
    fn detached_replace_is_noop() {
        let mut tree = ArenaTree::new();
        let loose = tree.create_text("x").expect("create");
        let other = tree.create_text("y").expect("create");
        tree.replace_with(&loose, &other).expect("replace");
        assert_eq!(tree.counters().nodes_replaced, 0);
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn detached_remove_is_noop() {
        let mut tree = ArenaTree::new();
        let loose = tree.create_text("x").expect("create");
        tree.reset_counters();
        tree.remove(&loose).expect("remove");
        assert!(tree.counters().is_zero());

        let root = tree.mount(&Description::text("r")).expect("mount");
        tree.reset_counters();
        tree.remove(&root).expect("remove root");
        assert_eq!(tree.root(), None);
        assert_eq!(tree.counters().nodes_removed, 1);
    }

    #[test]
    fn unknown_handles_are_errors() {
        let tree = ArenaTree::new();
        assert!(matches!(
            tree.children(&NodeKey(7)),
            Err(ArenaError::MissingNode(NodeKey(7)))
        ));
    }
}
