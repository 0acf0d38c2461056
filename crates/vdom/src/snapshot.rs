use crate::types::{Attributes, Description, Element};
use std::fmt::{self, Write};
use std::sync::OnceLock;

/// Deterministic serialization and equivalence rules for reconciliation tests.
/// Not a stable format.
///
/// Equivalence rules:
/// - Node kinds must match.
/// - Element tags must match.
/// - Attribute names and values must match; order only counts when
///   `attribute_order_significant` is set.
/// - Text must match exactly.
/// - Child lists must match pairwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapshotOptions {
    pub attribute_order_significant: bool,
}

#[derive(Debug)]
pub struct TreeSnapshot {
    lines: Vec<String>,
}

impl TreeSnapshot {
    pub fn new(root: &Description, options: SnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for TreeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct TreeMismatch<'a> {
    path: String,
    detail: String,
    expected_node: &'a Description,
    actual_node: &'a Description,
    options: SnapshotOptions,
    expected_subtree: OnceLock<String>,
    actual_subtree: OnceLock<String>,
}

impl fmt::Display for TreeMismatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected_subtree = self
            .expected_subtree
            .get_or_init(|| TreeSnapshot::new(self.expected_node, self.options).render());
        let actual_subtree = self
            .actual_subtree
            .get_or_init(|| TreeSnapshot::new(self.actual_node, self.options).render());
        writeln!(f, "tree mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected subtree:\n{expected_subtree}")?;
        writeln!(f, "actual subtree:\n{actual_subtree}")?;
        Ok(())
    }
}

impl std::error::Error for TreeMismatch<'_> {}

pub fn assert_tree_eq(expected: &Description, actual: &Description, options: SnapshotOptions) {
    if let Err(mismatch) = compare_trees(expected, actual, options) {
        panic!("{mismatch}");
    }
}

pub fn compare_trees<'a>(
    expected: &'a Description,
    actual: &'a Description,
    options: SnapshotOptions,
) -> Result<(), Box<TreeMismatch<'a>>> {
    let mut path = vec![node_label(expected)];
    compare_nodes(expected, actual, &options, &mut path)
}

fn compare_nodes<'a>(
    expected: &'a Description,
    actual: &'a Description,
    options: &SnapshotOptions,
    path: &mut Vec<String>,
) -> Result<(), Box<TreeMismatch<'a>>> {
    let fail = |path: &[String], detail: &str| {
        Err(Box::new(mismatch(path, detail, expected, actual, options)))
    };
    match (expected, actual) {
        (Description::Text(expected_text), Description::Text(actual_text)) => {
            if expected_text != actual_text {
                return fail(path, "text");
            }
            Ok(())
        }
        (Description::Element(exp), Description::Element(act)) => {
            if exp.tag != act.tag {
                return fail(path, "element tag");
            }
            if options.attribute_order_significant {
                let exp_attrs = exp.attrs.iter().collect::<Vec<_>>();
                let act_attrs = act.attrs.iter().collect::<Vec<_>>();
                if exp_attrs != act_attrs {
                    return fail(path, "attributes (ordered)");
                }
            } else if exp.attrs != act.attrs {
                return fail(path, "attributes");
            }
            compare_children(exp, act, expected, actual, options, path)
        }
        _ => fail(path, "node kind"),
    }
}

fn compare_children<'a>(
    exp: &'a Element,
    act: &'a Element,
    expected_parent: &'a Description,
    actual_parent: &'a Description,
    options: &SnapshotOptions,
    path: &mut Vec<String>,
) -> Result<(), Box<TreeMismatch<'a>>> {
    if exp.children.len() != act.children.len() {
        return Err(Box::new(mismatch(
            path,
            &format!(
                "child count (expected {}, actual {})",
                exp.children.len(),
                act.children.len()
            ),
            expected_parent,
            actual_parent,
            options,
        )));
    }
    for (idx, (e, a)) in exp.children.iter().zip(act.children.iter()).enumerate() {
        path.push(format!("{}[{}]", node_label(e), idx));
        let result = compare_nodes(e, a, options, path);
        path.pop();
        result?;
    }
    Ok(())
}

fn mismatch<'a>(
    path: &[String],
    detail: &str,
    expected: &'a Description,
    actual: &'a Description,
    options: &SnapshotOptions,
) -> TreeMismatch<'a> {
    TreeMismatch {
        path: format!("/{}", path.join("/")),
        detail: detail.to_string(),
        expected_node: expected,
        actual_node: actual,
        options: *options,
        expected_subtree: OnceLock::new(),
        actual_subtree: OnceLock::new(),
    }
}

fn node_label(node: &Description) -> String {
    match node {
        Description::Text(_) => "#text".to_string(),
        Description::Element(element) => {
            let mut label = String::from(&*element.tag);
            if let Some(id) = element.attrs.get("id").filter(|v| !v.is_empty()) {
                label.push('#');
                write_escaped(&mut label, id);
            } else if let Some(class) = element.attrs.get("class").filter(|v| !v.is_empty()) {
                label.push_str(".class=");
                write_escaped(&mut label, class);
            }
            label
        }
    }
}

fn walk_snapshot(
    node: &Description,
    options: &SnapshotOptions,
    indent_level: usize,
    out: &mut Vec<String>,
) {
    const INDENT_STEP: usize = 2;
    let mut line = " ".repeat(indent_level * INDENT_STEP);
    match node {
        Description::Text(text) => {
            line.push('"');
            write_escaped(&mut line, text);
            line.push('"');
            out.push(line);
        }
        Description::Element(element) => {
            line.push('<');
            line.push_str(&element.tag);
            write_attrs(&mut line, &element.attrs, options);
            line.push('>');
            out.push(line);
            for child in &element.children {
                walk_snapshot(child, options, indent_level + 1, out);
            }
        }
    }
}

fn write_attrs(out: &mut String, attrs: &Attributes, options: &SnapshotOptions) {
    let mut entries = attrs.iter().collect::<Vec<_>>();
    if !options.attribute_order_significant {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }
    for (name, value) in entries {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        write_escaped(out, value);
        out.push('"');
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SnapshotOptions, TreeSnapshot, assert_tree_eq, compare_trees};
    use crate::types::{Description, Element};

    #[test]
    fn attribute_order_ignored_by_default() {
        let expected: Description = Element::new("div")
            .with_attr("id", "a")
            .with_attr("class", "b")
            .into();
        let actual: Description = Element::new("div")
            .with_attr("class", "b")
            .with_attr("id", "a")
            .into();
        assert_tree_eq(&expected, &actual, SnapshotOptions::default());
        let strict = SnapshotOptions {
            attribute_order_significant: true,
        };
        assert!(compare_trees(&expected, &actual, strict).is_err());
    }

    #[test]
    fn mismatch_path_includes_id_label() {
        let expected: Description = Element::new("div")
            .with_attr("id", "main")
            .with_child(Element::new("p").with_child("a"))
            .into();
        let actual: Description = Element::new("div")
            .with_attr("id", "main")
            .with_child(Element::new("p").with_child("b"))
            .into();
        let err = compare_trees(&expected, &actual, SnapshotOptions::default())
            .expect_err("expected mismatch");
        let message = err.to_string();
        assert!(message.contains("/div#main/p[0]/#text[0]"), "{message}");
    }

    #[test]
    fn snapshot_lines_are_indented() {
        let tree: Description = Element::new("ul")
            .with_child(Element::new("li").with_attr("b", "2").with_attr("a", "1"))
            .into();
        let snapshot = TreeSnapshot::new(&tree, SnapshotOptions::default());
        assert_eq!(snapshot.as_lines(), ["<ul>", "  <li a=\"1\" b=\"2\">"]);
    }
}
