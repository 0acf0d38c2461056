//! Shared description pairs for reconciliation tests and benchmarks.
//!
//! Every fixture satisfies: applying `diff(old, new)` to a fresh render of `old` under the
//! default config yields a live tree equal to `new`.

use crate::types::{Description, Element};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FixtureKind {
    Text,
    Attribute,
    Tag,
    ChildGrowth,
    ChildShrink,
    Nested,
}

#[derive(Clone, Debug)]
pub struct DiffFixture {
    pub name: &'static str,
    pub kind: FixtureKind,
    pub covers: &'static str,
    pub old: Description,
    pub new: Description,
}

fn li(text: &str) -> Element {
    Element::new("li").with_child(text)
}

pub fn fixtures() -> Vec<DiffFixture> {
    vec![
        DiffFixture {
            name: "text_same",
            kind: FixtureKind::Text,
            covers: "equal text short-circuits",
            old: Description::text("hello"),
            new: Description::text("hello"),
        },
        DiffFixture {
            name: "text_changed",
            kind: FixtureKind::Text,
            covers: "text replacement",
            old: Description::text("hello"),
            new: Description::text("world"),
        },
        DiffFixture {
            name: "text_to_element",
            kind: FixtureKind::Tag,
            covers: "kind change replaces",
            old: Element::new("p").with_child(Description::text("x")).into(),
            new: Element::new("p").with_child(Element::new("b").with_child("x")).into(),
        },
        DiffFixture {
            name: "attr_added_removed",
            kind: FixtureKind::Attribute,
            covers: "presence changes",
            old: Element::new("div").with_attr("id", "main").into(),
            new: Element::new("div").with_attr("class", "wide").into(),
        },
        DiffFixture {
            name: "attr_value_changed",
            kind: FixtureKind::Attribute,
            covers: "value changes under compare mode",
            old: Element::new("a").with_attr("href", "/old").with_child("go").into(),
            new: Element::new("a").with_attr("href", "/new").with_child("go").into(),
        },
        DiffFixture {
            name: "tag_changed",
            kind: FixtureKind::Tag,
            covers: "tag mismatch renders fresh subtree",
            old: Element::new("div").with_child("a").into(),
            new: Element::new("section").with_attr("id", "s").with_child("a").into(),
        },
        DiffFixture {
            name: "children_grow",
            kind: FixtureKind::ChildGrowth,
            covers: "appends in order",
            old: Element::new("ul").with_child(li("1")).into(),
            new: Element::new("ul")
                .with_children([li("1"), li("2"), li("3")])
                .into(),
        },
        DiffFixture {
            name: "children_from_empty",
            kind: FixtureKind::ChildGrowth,
            covers: "appends into empty parent",
            old: Element::new("ul").into(),
            new: Element::new("ul").with_children([li("a"), li("b")]).into(),
        },
        DiffFixture {
            name: "children_shrink",
            kind: FixtureKind::ChildShrink,
            covers: "surplus children truncated",
            old: Element::new("ul")
                .with_children([li("1"), li("2"), li("3")])
                .into(),
            new: Element::new("ul").with_child(li("1")).into(),
        },
        DiffFixture {
            name: "nested_mixed",
            kind: FixtureKind::Nested,
            covers: "localized replacement inside preserved ancestors",
            old: Element::new("main")
                .with_child(
                    Element::new("header")
                        .with_attr("class", "top")
                        .with_child(Element::new("h1").with_child("Title")),
                )
                .with_child(
                    Element::new("article")
                        .with_child(Element::new("p").with_child("one"))
                        .with_child(Element::new("p").with_child("two")),
                )
                .into(),
            new: Element::new("main")
                .with_child(
                    Element::new("header")
                        .with_attr("class", "top sticky")
                        .with_child(Element::new("h2").with_child("Title")),
                )
                .with_child(
                    Element::new("article")
                        .with_child(Element::new("p").with_child("one"))
                        .with_child(Element::new("p").with_child("2"))
                        .with_child(Element::new("footer").with_child("end")),
                )
                .into(),
        },
    ]
}

/// A `<ul>` with `items` list entries, each carrying an index attribute.
pub fn wide_list(items: usize, label: &str) -> Description {
    Element::new("ul")
        .with_children((0..items).map(|i| {
            Element::new("li")
                .with_attr("data-index", i.to_string())
                .with_child(format!("{label} {i}"))
        }))
        .into()
}

/// A chain of nested `<div>`s `depth` levels deep ending in a text leaf.
pub fn deep_chain(depth: usize, leaf: &str) -> Description {
    let mut node = Description::text(leaf);
    for level in (0..depth).rev() {
        node = Element::new("div")
            .with_attr("data-level", level.to_string())
            .with_child(node)
            .into();
    }
    node
}
