//! Boundary to the host tree that patches mutate.
//!
//! The reconciler never owns live nodes. It only asks the host to create nodes
//! (through the renderer) and to mutate existing ones through this trait.

use crate::types::Description;
use std::fmt;

/// A mutable host tree (DOM-equivalent, retained-mode UI tree, terminal cells, ...).
///
/// `Node` is a cheap handle into the host tree. Handles stay valid after a node is
/// detached, so a removed or replaced node can still be inspected.
pub trait LiveTree {
    type Node: Clone + PartialEq + fmt::Debug;
    type Error: std::error::Error + 'static;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

    fn create_text(&mut self, text: &str) -> Result<Self::Node, Self::Error>;

    fn set_attribute(
        &mut self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    fn remove_attribute(&mut self, node: &Self::Node, name: &str) -> Result<(), Self::Error>;

    /// Detach `node` from its parent.
    fn remove(&mut self, node: &Self::Node) -> Result<(), Self::Error>;

    /// Put `replacement` where `node` currently is, detaching `node`.
    fn replace_with(
        &mut self,
        node: &Self::Node,
        replacement: &Self::Node,
    ) -> Result<(), Self::Error>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node)
    -> Result<(), Self::Error>;

    /// Current children of `node`, in document order.
    fn children(&self, node: &Self::Node) -> Result<Vec<Self::Node>, Self::Error>;

    /// Build a fresh, detached subtree for `description`.
    ///
    /// Hosts with a faster construction path may override this.
    fn render(&mut self, description: &Description) -> Result<Self::Node, Self::Error>
    where
        Self: Sized,
    {
        crate::render::render(self, description)
    }
}
