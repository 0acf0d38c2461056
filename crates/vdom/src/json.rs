//! JSON shape of a description.
//!
//! A JSON string is a text leaf. An element is an object with a string `tagName`, an
//! optional `attrs` object and a `children` array:
//!
//! ```json
//! { "tagName": "ul", "attrs": { "class": "menu" }, "children": ["first", { "tagName": "li", "children": [] }] }
//! ```
//!
//! Attribute mappings are lenient: a missing or non-object `attrs` is empty, numbers and
//! booleans are stringified, and `null` values drop the attribute. Everything else that
//! does not fit the shape is [`DescriptionError::Malformed`].

use crate::error::DescriptionError;
use crate::types::{Attributes, Description, Element};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::sync::Arc;

pub fn from_json_str(input: &str) -> Result<Description, DescriptionError> {
    let value: Value = serde_json::from_str(input)?;
    from_json_value(&value)
}

pub fn from_json_value(value: &Value) -> Result<Description, DescriptionError> {
    let mut path = String::from("$");
    decode(value, &mut path)
}

pub fn to_json_value(description: &Description) -> Value {
    match description {
        Description::Text(text) => Value::String(text.clone()),
        Description::Element(element) => {
            let mut attrs = Map::new();
            for (name, value) in element.attrs.iter() {
                attrs.insert(name.to_string(), Value::String(value.to_string()));
            }
            let mut object = Map::new();
            object.insert("tagName".to_string(), Value::String(element.tag.to_string()));
            object.insert("attrs".to_string(), Value::Object(attrs));
            object.insert(
                "children".to_string(),
                Value::Array(element.children.iter().map(to_json_value).collect()),
            );
            Value::Object(object)
        }
    }
}

fn decode(value: &Value, path: &mut String) -> Result<Description, DescriptionError> {
    let object = match value {
        Value::String(text) => return Ok(Description::Text(text.clone())),
        Value::Object(object) => object,
        _ => return Err(malformed(path, "expected a string or an element object")),
    };

    let tag = match object.get("tagName") {
        Some(Value::String(tag)) if !tag.is_empty() => tag,
        Some(_) => return Err(malformed(path, "tagName must be a non-empty string")),
        None => return Err(malformed(path, "missing tagName")),
    };

    let attrs = match object.get("attrs") {
        Some(Value::Object(map)) => decode_attrs(map),
        _ => Attributes::new(),
    };

    let items = match object.get("children") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(malformed(path, "children must be an array")),
        None => return Err(malformed(path, "missing children")),
    };

    let mut children = Vec::with_capacity(items.len());
    let base_len = path.len();
    for (i, item) in items.iter().enumerate() {
        path.push_str(".children[");
        path.push_str(&i.to_string());
        path.push(']');
        children.push(decode(item, path)?);
        path.truncate(base_len);
    }

    Ok(Description::Element(Element {
        tag: Arc::from(tag.as_str()),
        attrs,
        children,
    }))
}

fn decode_attrs(map: &Map<String, Value>) -> Attributes {
    let mut attrs = Attributes::new();
    for (name, value) in map {
        match value {
            Value::String(s) => attrs.insert(name, s.as_str()),
            Value::Number(n) => attrs.insert(name, n.to_string()),
            Value::Bool(b) => attrs.insert(name, b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                log::trace!(target: "vdom.diff", "dropping non-scalar attribute {name}");
            }
        }
    }
    attrs
}

fn malformed(path: &str, reason: &'static str) -> DescriptionError {
    DescriptionError::Malformed {
        path: path.to_string(),
        reason,
    }
}

impl Serialize for Description {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json_value(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Description {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        from_json_value(&value).map_err(serde::de::Error::custom)
    }
}
