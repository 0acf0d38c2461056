use crate::live::LiveTree;
use crate::types::Description;

/// Render `description` from scratch into `tree`.
///
/// Attributes are set in mapping order and children are appended in order, so the
/// result matches the description exactly before it is attached anywhere.
pub fn render<T: LiveTree>(tree: &mut T, description: &Description) -> Result<T::Node, T::Error> {
    match description {
        Description::Text(text) => tree.create_text(text),
        Description::Element(element) => {
            let node = tree.create_element(&element.tag)?;
            for (name, value) in element.attrs.iter() {
                tree.set_attribute(&node, name, value)?;
            }
            for child in &element.children {
                let child_node = tree.render(child)?;
                tree.append_child(&node, &child_node)?;
            }
            Ok(node)
        }
    }
}
