//! Patch model produced by the reconciler and applied to a live tree.
//!
//! Invariants:
//! - Building a patch never touches a live tree; only `apply` mutates.
//! - `apply` returns the live node now occupying the patched position: the same
//!   handle for `Keep` and `Update`, a freshly rendered one for `Replace`, and `None`
//!   after `Remove`.
//! - Child patches are positional: entry `i` applies to the live child at index `i`
//!   at the time the parent patch starts.
//! - Application stops at the first error. There is no rollback.

use crate::attr_diff::AttrPatch;
use crate::config::ChildCountPolicy;
use crate::error::PatchError;
use crate::live::LiveTree;
use crate::stats::PatchStats;
use crate::types::Description;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch {
    /// Leave the node untouched.
    Keep,
    /// Detach the node; nothing occupies the position afterwards.
    Remove,
    /// Render the description and swap it in for the node.
    Replace(Description),
    /// Mutate the node in place: attributes first, then children.
    Update {
        attrs: AttrPatch,
        children: ChildPatch,
    },
    /// Apply each patch to the result of the previous one.
    Sequence(Vec<Patch>),
}

impl Patch {
    pub fn apply<T: LiveTree>(
        &self,
        tree: &mut T,
        node: T::Node,
    ) -> Result<Option<T::Node>, PatchError<T::Error>> {
        match self {
            Patch::Keep => Ok(Some(node)),
            Patch::Remove => {
                log::debug!(target: "vdom.patch", "remove {node:?}");
                tree.remove(&node)?;
                Ok(None)
            }
            Patch::Replace(description) => {
                let replacement = tree.render(description)?;
                log::debug!(target: "vdom.patch", "replace {node:?} with {replacement:?}");
                tree.replace_with(&node, &replacement)?;
                Ok(Some(replacement))
            }
            Patch::Update { attrs, children } => {
                attrs.apply(tree, &node)?;
                children.apply(tree, &node)?;
                Ok(Some(node))
            }
            Patch::Sequence(patches) => {
                let mut current = Some(node);
                for patch in patches {
                    let Some(node) = current.take() else {
                        break;
                    };
                    current = patch.apply(tree, node)?;
                }
                Ok(current)
            }
        }
    }

    /// Compose `self` followed by `next` into a single patch.
    pub fn then(self, next: Patch) -> Patch {
        match (self, next) {
            (Patch::Keep, next) => next,
            (first, Patch::Keep) => first,
            (Patch::Sequence(mut first), Patch::Sequence(rest)) => {
                first.extend(rest);
                Patch::Sequence(first)
            }
            (Patch::Sequence(mut first), next) => {
                first.push(next);
                Patch::Sequence(first)
            }
            (first, Patch::Sequence(mut rest)) => {
                rest.insert(0, first);
                Patch::Sequence(rest)
            }
            (first, next) => Patch::Sequence(vec![first, next]),
        }
    }

    /// True when applying this patch performs no mutation.
    pub fn is_noop(&self) -> bool {
        match self {
            Patch::Keep => true,
            Patch::Remove | Patch::Replace(_) => false,
            Patch::Update { attrs, children } => attrs.is_empty() && children.is_noop(),
            Patch::Sequence(patches) => patches.iter().all(Patch::is_noop),
        }
    }

    pub fn stats(&self) -> PatchStats {
        let mut stats = PatchStats::default();
        stats.record(self);
        stats
    }
}

/// Positional reconciliation of one element's child list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildPatch {
    /// Length of the old child list the patch was computed against.
    pub(crate) expected_len: usize,
    /// Every child was removed: detach the parent itself.
    pub(crate) detach_parent: bool,
    pub(crate) positional: Vec<Patch>,
    /// Number of trailing old children to remove after the positional patches.
    pub(crate) truncate: usize,
    pub(crate) appends: Vec<Description>,
    pub(crate) count_policy: ChildCountPolicy,
}

impl ChildPatch {
    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    pub fn detaches_parent(&self) -> bool {
        self.detach_parent
    }

    pub fn positional(&self) -> &[Patch] {
        &self.positional
    }

    pub fn truncated(&self) -> usize {
        self.truncate
    }

    pub fn appends(&self) -> &[Description] {
        &self.appends
    }

    pub fn is_noop(&self) -> bool {
        !self.detach_parent
            && self.truncate == 0
            && self.appends.is_empty()
            && self.positional.iter().all(Patch::is_noop)
    }

    pub fn apply<T: LiveTree>(
        &self,
        tree: &mut T,
        parent: &T::Node,
    ) -> Result<(), PatchError<T::Error>> {
        if self.detach_parent {
            log::debug!(target: "vdom.patch", "all children removed; detaching {parent:?}");
            tree.remove(parent)?;
            return Ok(());
        }

        let live = tree.children(parent)?;
        if live.len() != self.expected_len {
            match self.count_policy {
                ChildCountPolicy::Strict => {
                    return Err(PatchError::ChildCountMismatch {
                        expected: self.expected_len,
                        actual: live.len(),
                    });
                }
                ChildCountPolicy::Bounded => {
                    log::warn!(
                        target: "vdom.patch",
                        "{parent:?} has {} children, patch expects {}; bounding iteration",
                        live.len(),
                        self.expected_len
                    );
                }
            }
        }

        for (child, patch) in live.iter().zip(&self.positional) {
            patch.apply(tree, child.clone())?;
        }

        let start = self.positional.len().min(live.len());
        let end = (start + self.truncate).min(live.len());
        for child in &live[start..end] {
            log::debug!(target: "vdom.patch", "remove surplus child {child:?}");
            tree.remove(child)?;
        }

        for description in &self.appends {
            let child = tree.render(description)?;
            tree.append_child(parent, &child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaTree;
    use crate::types::Element;

    #[test]
    fn keep_performs_no_mutations() {
        let mut tree = ArenaTree::new();
        let node = tree.mount(&Description::text("a")).expect("mount");
        tree.reset_counters();
        let result = Patch::Keep.apply(&mut tree, node).expect("apply");
        assert_eq!(result, Some(node));
        assert!(tree.counters().is_zero());
    }

    #[test]
    fn remove_yields_nothing() {
        let mut tree = ArenaTree::new();
        let root = tree
            .mount(&Element::new("div").with_child("x").into())
            .expect("mount");
        let child = tree.children(&root).expect("children")[0];
        let result = Patch::Remove.apply(&mut tree, child).expect("apply");
        assert_eq!(result, None);
        assert!(tree.children(&root).expect("children").is_empty());
    }

    #[test]
    fn sequence_stops_after_removal() {
        let mut tree = ArenaTree::new();
        let root = tree
            .mount(&Element::new("div").with_child("x").into())
            .expect("mount");
        let child = tree.children(&root).expect("children")[0];
        let patch = Patch::Remove.then(Patch::Replace(Description::text("y")));
        assert!(matches!(patch, Patch::Sequence(ref steps) if steps.len() == 2));
        tree.reset_counters();
        let result = patch.apply(&mut tree, child).expect("apply");
        assert_eq!(result, None);
        assert_eq!(tree.counters().nodes_created, 0);
    }

    #[test]
    fn composed_patch_matches_stepwise_application() {
        let a: Description = Element::new("div").with_child("x").into();
        let b: Description = Element::new("span").with_child("x").into();
        let c: Description = Element::new("span")
            .with_attr("id", "k")
            .with_child("y")
            .with_child(Element::new("b"))
            .into();
        let first = crate::diff::diff(Some(&a), &b);
        let second = crate::diff::diff(Some(&b), &c);

        let mut stepwise = ArenaTree::new();
        let root = stepwise.mount(&a).expect("mount");
        let mid = first
            .apply(&mut stepwise, root)
            .expect("first")
            .expect("first node");
        let end = second
            .apply(&mut stepwise, mid)
            .expect("second")
            .expect("second node");

        let mut composed = ArenaTree::new();
        let root = composed.mount(&a).expect("mount");
        let node = first
            .then(second)
            .apply(&mut composed, root)
            .expect("composed")
            .expect("composed node");

        assert_ne!(node, root, "replacement flows into the next step");
        assert_eq!(composed.root(), Some(node));
        assert_eq!(composed.to_description(node).expect("composed tree"), c);
        assert_eq!(
            stepwise.to_description(end).expect("stepwise tree"),
            composed.to_description(node).expect("composed tree")
        );
    }

    #[test]
    fn keep_is_identity_for_composition() {
        let replace = Patch::Replace(Description::text("y"));
        assert_eq!(Patch::Keep.then(replace.clone()), replace);
        assert_eq!(replace.clone().then(Patch::Keep), replace);
    }

    #[test]
    fn strict_child_count_mismatch_is_an_error() {
        let mut tree = ArenaTree::new();
        let root = tree
            .mount(&Element::new("ul").with_child("a").with_child("b").into())
            .expect("mount");
        let patch = ChildPatch {
            expected_len: 1,
            detach_parent: false,
            positional: vec![Patch::Keep],
            truncate: 0,
            appends: Vec::new(),
            count_policy: ChildCountPolicy::Strict,
        };
        let err = patch.apply(&mut tree, &root).expect_err("mismatch");
        assert!(matches!(
            err,
            PatchError::ChildCountMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn bounded_child_count_patches_common_prefix() {
        let mut tree = ArenaTree::new();
        let root = tree
            .mount(&Element::new("ul").with_child("a").into())
            .expect("mount");
        let patch = ChildPatch {
            expected_len: 2,
            detach_parent: false,
            positional: vec![
                Patch::Replace(Description::text("z")),
                Patch::Replace(Description::text("never")),
            ],
            truncate: 0,
            appends: Vec::new(),
            count_policy: ChildCountPolicy::Bounded,
        };
        patch.apply(&mut tree, &root).expect("apply");
        let after = tree.to_description(root).expect("materialize");
        assert_eq!(after, Element::new("ul").with_child("z").into());
    }
}
