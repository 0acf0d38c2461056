//! Attribute-set comparison for a single element.
//!
//! Contract:
//! - Keys only in the old mapping are removed, in old-mapping order.
//! - Keys only in the new mapping are set, in new-mapping order.
//! - Removals always precede sets.
//! - Under [`AttributeValues::Compare`], keys on both sides with a different value are
//!   set as well, interleaved with additions in new-mapping order.
//! - Applying the result never changes node identity.

use crate::config::AttributeValues;
use crate::live::LiveTree;
use crate::types::Attributes;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrOp {
    Remove { name: Arc<str> },
    Set { name: Arc<str>, value: String },
}

/// Ordered attribute mutations for one live node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrPatch {
    ops: Vec<AttrOp>,
}

impl AttrPatch {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttrOp> {
        self.ops.iter()
    }

    pub fn apply<T: LiveTree>(&self, tree: &mut T, node: &T::Node) -> Result<(), T::Error> {
        for op in &self.ops {
            match op {
                AttrOp::Remove { name } => tree.remove_attribute(node, name)?,
                AttrOp::Set { name, value } => tree.set_attribute(node, name, value)?,
            }
        }
        Ok(())
    }
}

pub fn diff_attributes(old: &Attributes, new: &Attributes) -> AttrPatch {
    diff_attributes_with(old, new, AttributeValues::default())
}

pub fn diff_attributes_with(
    old: &Attributes,
    new: &Attributes,
    mode: AttributeValues,
) -> AttrPatch {
    let mut ops = Vec::new();
    for (name, _) in old.iter() {
        if !new.contains_key(name) {
            ops.push(AttrOp::Remove {
                name: Arc::clone(name),
            });
        }
    }
    for (name, value) in new.iter() {
        let changed = match old.get(name) {
            None => true,
            Some(previous) => mode == AttributeValues::Compare && previous != value,
        };
        if changed {
            ops.push(AttrOp::Set {
                name: Arc::clone(name),
                value: value.to_string(),
            });
        }
    }
    AttrPatch { ops }
}
