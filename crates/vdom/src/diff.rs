//! Tree reconciliation: compare two descriptions and produce a [`Patch`].
//!
//! Contract:
//! - Case precedence, first match wins: old absent, element tag mismatch, either side
//!   text, same-tag elements.
//! - Node kind is part of the sum type, so tag comparison only runs on two elements;
//!   a text/element pair always replaces.
//! - Same-tag elements keep their live identity: only attributes and children change.
//! - Children are matched by position. New trailing children are rendered and appended.
//! - An element whose children all disappear is detached as a whole.
//! - Nothing here touches a live tree.
//!
//! Complexity: O(n) in the number of nodes of the shorter tree, plus the size of
//! every subtree that has to be rendered.

use crate::attr_diff::diff_attributes_with;
use crate::config::{ChildShrink, DiffConfig};
use crate::patch::{ChildPatch, Patch};
use crate::types::Description;

/// Stateless reconciler carrying only its configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reconciler {
    config: DiffConfig,
}

impl Reconciler {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub fn diff(&self, old: Option<&Description>, new: &Description) -> Patch {
        let Some(old) = old else {
            log::trace!(target: "vdom.diff", "no previous description; removing");
            return Patch::Remove;
        };

        match (old, new) {
            (Description::Element(prev), Description::Element(next)) if prev.tag != next.tag => {
                log::trace!(
                    target: "vdom.diff",
                    "tag changed <{}> -> <{}>; replacing",
                    prev.tag,
                    next.tag
                );
                Patch::Replace(new.clone())
            }
            (Description::Text(_), _) | (_, Description::Text(_)) => {
                if old == new {
                    Patch::Keep
                } else {
                    log::trace!(target: "vdom.diff", "text changed; replacing");
                    Patch::Replace(new.clone())
                }
            }
            (Description::Element(prev), Description::Element(next)) => Patch::Update {
                attrs: diff_attributes_with(&prev.attrs, &next.attrs, self.config.attribute_values),
                children: self.diff_children(&prev.children, &next.children),
            },
        }
    }

    pub fn diff_children(&self, old: &[Description], new: &[Description]) -> ChildPatch {
        let mut patch = ChildPatch {
            expected_len: old.len(),
            detach_parent: false,
            positional: Vec::new(),
            truncate: 0,
            appends: Vec::new(),
            count_policy: self.config.child_count,
        };

        if new.is_empty() && !old.is_empty() {
            log::trace!(
                target: "vdom.diff",
                "all {} children removed; detaching parent",
                old.len()
            );
            patch.detach_parent = true;
            return patch;
        }

        patch.positional = old
            .iter()
            .zip(new)
            .map(|(prev, next)| self.diff(Some(prev), next))
            .collect();

        if new.len() < old.len() && self.config.child_shrink == ChildShrink::Truncate {
            patch.truncate = old.len() - new.len();
        }

        patch.appends = new.iter().skip(old.len()).cloned().collect();
        patch
    }
}

pub fn diff(old: Option<&Description>, new: &Description) -> Patch {
    Reconciler::default().diff(old, new)
}

pub fn diff_with_config(old: Option<&Description>, new: &Description, config: DiffConfig) -> Patch {
    Reconciler::new(config).diff(old, new)
}

pub fn diff_children(old: &[Description], new: &[Description]) -> ChildPatch {
    Reconciler::default().diff_children(old, new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaTree;
    use crate::config::{AttributeValues, ChildCountPolicy};
    use crate::golden_corpus::fixtures;
    use crate::live::LiveTree;
    use crate::types::Element;

    fn div() -> Element {
        Element::new("div")
    }

    #[test]
    fn absent_old_removes() {
        assert_eq!(diff(None, &Description::text("x")), Patch::Remove);
    }

    #[test]
    fn tag_change_replaces() {
        let old: Description = div().with_child("a").into();
        let new: Description = Element::new("span").with_child("a").into();
        assert_eq!(diff(Some(&old), &new), Patch::Replace(new.clone()));
    }

    #[test]
    fn equal_text_keeps() {
        let a = Description::text("a");
        assert_eq!(diff(Some(&a), &a.clone()), Patch::Keep);
    }

    #[test]
    fn text_and_element_replace_in_both_directions() {
        let text = Description::text("a");
        let element: Description = div().into();
        assert_eq!(diff(Some(&text), &element), Patch::Replace(element.clone()));
        assert_eq!(diff(Some(&element), &text), Patch::Replace(text.clone()));
    }

    #[test]
    fn same_tag_updates_in_place() {
        let old: Description = div().with_attr("id", "a").into();
        let new: Description = div().with_attr("class", "b").into();
        let Patch::Update { attrs, children } = diff(Some(&old), &new) else {
            panic!("expected update");
        };
        assert_eq!(attrs.len(), 2);
        assert!(children.is_noop());
    }

    #[test]
    fn identical_trees_produce_noop() {
        for fixture in fixtures() {
            let patch = diff(Some(&fixture.new), &fixture.new);
            assert!(
                patch.is_noop(),
                "{} ({}): {patch:?}",
                fixture.name,
                fixture.covers
            );
        }
    }

    #[test]
    fn growth_appends_in_order() {
        let d1: Description = Element::new("li").with_child("1").into();
        let d2: Description = Element::new("li").with_child("2").into();
        let patch = diff_children(&[], &[d1.clone(), d2.clone()]);
        assert!(patch.positional().is_empty());
        assert_eq!(patch.appends(), &[d1, d2]);
    }

    #[test]
    fn shrink_to_empty_detaches_parent() {
        let patch = diff_children(&[Description::text("a"), Description::text("b")], &[]);
        assert!(patch.detaches_parent());
        assert!(patch.positional().is_empty());
        assert!(patch.appends().is_empty());
    }

    #[test]
    fn empty_to_empty_is_noop() {
        assert!(diff_children(&[], &[]).is_noop());
    }

    #[test]
    fn partial_shrink_truncates_or_retains() {
        let old = [
            Description::text("a"),
            Description::text("b"),
            Description::text("c"),
        ];
        let new = [Description::text("a")];
        assert_eq!(diff_children(&old, &new).truncated(), 2);
        let baseline = Reconciler::new(DiffConfig::baseline()).diff_children(&old, &new);
        assert_eq!(baseline.truncated(), 0);
        assert_eq!(baseline.positional(), &[Patch::Keep]);
    }

    #[test]
    fn baseline_config_ignores_value_changes() {
        let old: Description = div().with_attr("title", "a").into();
        let new: Description = div().with_attr("title", "b").into();
        let patch = diff_with_config(Some(&old), &new, DiffConfig::baseline());
        assert!(patch.is_noop());
        let patch = diff_with_config(
            Some(&old),
            &new,
            DiffConfig {
                attribute_values: AttributeValues::Compare,
                ..DiffConfig::baseline()
            },
        );
        assert_eq!(patch.stats().attribute_ops, 1);
    }

    #[test]
    fn nested_mismatch_replaces_locally() {
        let old: Description = div()
            .with_child(Element::new("p").with_child("x"))
            .with_child(Element::new("p").with_child("y"))
            .into();
        let new: Description = div()
            .with_child(Element::new("p").with_child("x"))
            .with_child(Element::new("h1").with_child("y"))
            .into();

        let mut tree = ArenaTree::new();
        let root = tree.mount(&old).expect("mount");
        let before = tree.children(&root).expect("children");

        let result = diff(Some(&old), &new)
            .apply(&mut tree, root)
            .expect("apply");
        assert_eq!(result, Some(root));

        let after = tree.children(&root).expect("children");
        assert_eq!(after[0], before[0]);
        assert_ne!(after[1], before[1]);
        assert!(!tree.is_attached(before[1]));
        assert_eq!(tree.to_description(root).expect("materialize"), new);
    }

    #[test]
    fn config_carries_child_count_policy() {
        let reconciler = Reconciler::new(DiffConfig {
            child_count: ChildCountPolicy::Bounded,
            ..DiffConfig::default()
        });
        let mut tree = ArenaTree::new();
        let root = tree
            .mount(&div().with_child("a").with_child("extra").into())
            .expect("mount");
        let patch = reconciler.diff(
            Some(&div().with_child("a").into()),
            &div().with_child("b").into(),
        );
        patch.apply(&mut tree, root).expect("bounded apply");
        assert_eq!(
            tree.to_description(root).expect("materialize"),
            div().with_child("b").with_child("extra").into()
        );
    }
}
