use std::sync::Arc;

/// Immutable description of one position in a UI tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Description {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: Arc<str>,
    pub attrs: Attributes,
    pub children: Vec<Description>,
}

impl Description {
    pub fn text(text: impl Into<String>) -> Self {
        Description::Text(text.into())
    }

    /// An element with no attributes and no children.
    pub fn element(tag: &str) -> Self {
        Description::Element(Element::new(tag))
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Description::Element(element) => Some(&element.tag),
            Description::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Description::Element(element) => Some(element),
            Description::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Description::Text(text) => Some(text),
            Description::Element(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Description::Text(_))
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        match self {
            Description::Text(_) => 1,
            Description::Element(element) => {
                1 + element
                    .children
                    .iter()
                    .map(Description::node_count)
                    .sum::<usize>()
            }
        }
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: Arc::from(tag),
            attrs: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Description>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children<I, D>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Description>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

impl From<Element> for Description {
    fn from(element: Element) -> Self {
        Description::Element(element)
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::Text(text.to_string())
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Description::Text(text)
    }
}

/// Attribute mapping of a single element.
///
/// Keys are unique. Entries keep insertion order so that diffs and renders are
/// deterministic, but equality ignores order.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    entries: Vec<(Arc<str>, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| &**k == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((Arc::from(name), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| &**k == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| &**k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| &**k == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k) == Some(v.as_str()))
    }
}

impl Eq for Attributes {}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k.as_ref(), v);
        }
        attrs
    }
}
