//! Virtual-tree reconciliation.
//!
//! Given the previous and the next [`Description`] of a UI tree, [`diff`] computes a
//! [`Patch`] that brings a previously rendered live tree in line with the next
//! description while leaving unaffected nodes (and their identity) alone. The live tree
//! is anything implementing [`LiveTree`]; [`ArenaTree`] is an in-memory host.
//!
//! ```
//! use vdom::{ArenaTree, Description, Element, diff};
//!
//! let old: Description = Element::new("ul").with_child(Element::new("li").with_child("a")).into();
//! let new: Description = Element::new("ul")
//!     .with_child(Element::new("li").with_child("a"))
//!     .with_child(Element::new("li").with_child("b"))
//!     .into();
//!
//! let mut tree = ArenaTree::new();
//! let root = tree.mount(&old).unwrap();
//! let patched = diff(Some(&old), &new).apply(&mut tree, root).unwrap();
//! assert_eq!(patched, Some(root));
//! assert_eq!(tree.to_description(root).unwrap(), new);
//! ```

pub mod arena;
pub mod attr_diff;
pub mod config;
pub mod diff;
pub mod error;
pub mod golden_corpus;
pub mod json;
pub mod live;
pub mod patch;
pub mod render;
#[cfg(any(test, feature = "snapshot"))]
pub mod snapshot;
pub mod stats;

mod types;

pub use crate::arena::{ArenaError, ArenaTree, MutationCounters, NodeKey};
pub use crate::attr_diff::{AttrOp, AttrPatch, diff_attributes, diff_attributes_with};
pub use crate::config::{AttributeValues, ChildCountPolicy, ChildShrink, DiffConfig};
pub use crate::diff::{Reconciler, diff, diff_children, diff_with_config};
pub use crate::error::{DescriptionError, PatchError};
pub use crate::live::LiveTree;
pub use crate::patch::{ChildPatch, Patch};
pub use crate::render::render;
pub use crate::stats::PatchStats;
pub use crate::types::{Attributes, Description, Element};

/// Diff `old` against `new` and apply the result to `node` in one step.
///
/// Returns the live node now occupying the position, as [`Patch::apply`] does.
pub fn reconcile<T: LiveTree>(
    tree: &mut T,
    node: T::Node,
    old: Option<&Description>,
    new: &Description,
    config: DiffConfig,
) -> Result<Option<T::Node>, PatchError<T::Error>> {
    let patch = diff_with_config(old, new, config);
    log::debug!(target: "vdom.diff", "reconcile: {}", patch.stats());
    patch.apply(tree, node)
}
