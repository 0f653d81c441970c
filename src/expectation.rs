//! Expectation trees
//!
//! An expectation is a hand-written description of the shape a decoded JSON
//! document must have. It mirrors the JSON it describes:
//!
//! ```text
//! {
//!   "blocks": "number",
//!   "bestblockhash": "string",
//!   "warnings": "string_empty",
//!   "softforks": [ { "id": "string", "version": "number" } ]
//! }
//! ```
//!
//! Leaves are one of six tags, objects map property names to expectations,
//! and a single-element array means "array whose elements all match this".

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ShapeError};

/// Primitive expectation tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafTag {
    /// Non-empty string
    String,
    /// Any string, empty allowed
    StringEmpty,
    /// Non-zero number
    Number,
    /// Any number. The name suggests zero only, but every number is accepted.
    NumberZero,
    /// `true` or `false`
    Bool,
    /// JSON `null`
    Null,
}

impl LeafTag {
    pub const ALL: [LeafTag; 6] = [
        LeafTag::String,
        LeafTag::StringEmpty,
        LeafTag::Number,
        LeafTag::NumberZero,
        LeafTag::Bool,
        LeafTag::Null,
    ];

    /// The tag as written in expectation trees
    pub fn as_str(&self) -> &'static str {
        match self {
            LeafTag::String => "string",
            LeafTag::StringEmpty => "string_empty",
            LeafTag::Number => "number",
            LeafTag::NumberZero => "number_zero",
            LeafTag::Bool => "bool",
            LeafTag::Null => "null",
        }
    }
}

impl fmt::Display for LeafTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeafTag {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self> {
        LeafTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| ShapeError::malformed("/", format!("unknown leaf tag '{}'", s)))
    }
}

/// A node of an expectation tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    Leaf(LeafTag),
    Object(BTreeMap<String, Expectation>),
    /// Array wrapper; well-formed only with exactly one element
    Array(Vec<Expectation>),
}

impl Expectation {
    pub const STRING: Expectation = Expectation::Leaf(LeafTag::String);
    pub const STRING_EMPTY: Expectation = Expectation::Leaf(LeafTag::StringEmpty);
    pub const NUMBER: Expectation = Expectation::Leaf(LeafTag::Number);
    pub const NUMBER_ZERO: Expectation = Expectation::Leaf(LeafTag::NumberZero);
    pub const BOOL: Expectation = Expectation::Leaf(LeafTag::Bool);
    pub const NULL: Expectation = Expectation::Leaf(LeafTag::Null);

    pub fn leaf(tag: LeafTag) -> Self {
        Expectation::Leaf(tag)
    }

    /// Build an object expectation from `(key, expectation)` pairs
    pub fn object<K, I>(props: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Expectation)>,
    {
        Expectation::Object(props.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Array whose every element matches `inner`
    pub fn array_of(inner: Expectation) -> Self {
        Expectation::Array(vec![inner])
    }

    /// Element expectation of an array wrapper; any other node is returned as is
    pub fn unwrap_array(&self) -> Result<&Expectation> {
        match self {
            Expectation::Array(items) => match items.as_slice() {
                [inner] => Ok(inner),
                [] => Err(ShapeError::malformed("/", "array wrapper has no element expectation")),
                _ => Err(ShapeError::malformed(
                    "/",
                    format!("array wrapper has {} element expectations, expected 1", items.len()),
                )),
            },
            other => Ok(other),
        }
    }

    /// Shape name used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Expectation::Leaf(tag) => tag.as_str(),
            Expectation::Object(_) => "object",
            Expectation::Array(_) => "array",
        }
    }

    pub fn as_leaf(&self) -> Option<LeafTag> {
        match self {
            Expectation::Leaf(tag) => Some(*tag),
            _ => None,
        }
    }

    /// Convert back to the JSON form it was written in
    pub fn to_json(&self) -> Value {
        match self {
            Expectation::Leaf(tag) => Value::String(tag.as_str().to_string()),
            Expectation::Object(props) => Value::Object(
                props.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Expectation::Array(items) => Value::Array(items.iter().map(Expectation::to_json).collect()),
        }
    }

    fn from_json_at(value: &Value, pointer: &str) -> Result<Self> {
        match value {
            Value::String(s) => s
                .parse::<LeafTag>()
                .map(Expectation::Leaf)
                .map_err(|_| ShapeError::malformed(pointer, format!("unknown leaf tag '{}'", s))),
            Value::Object(map) => {
                let mut props = BTreeMap::new();
                for (key, sub) in map {
                    let sub_pointer = format!("{}/{}", pointer.trim_end_matches('/'), key);
                    props.insert(key.clone(), Self::from_json_at(sub, &sub_pointer)?);
                }
                Ok(Expectation::Object(props))
            }
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, sub)| Self::from_json_at(sub, &format!("{}/{}", pointer.trim_end_matches('/'), i)))
                .collect::<Result<Vec<_>>>()
                .map(Expectation::Array),
            other => Err(ShapeError::malformed(
                pointer,
                format!("expected a leaf tag, object or array, found {}", other),
            )),
        }
    }
}

impl From<LeafTag> for Expectation {
    fn from(tag: LeafTag) -> Self {
        Expectation::Leaf(tag)
    }
}

impl TryFrom<&Value> for Expectation {
    type Error = ShapeError;

    fn try_from(value: &Value) -> Result<Self> {
        Self::from_json_at(value, "/")
    }
}

impl TryFrom<Value> for Expectation {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self> {
        Self::try_from(&value)
    }
}

impl FromStr for Expectation {
    type Err = ShapeError;

    /// Parse an expectation written as JSON text
    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::try_from(&value)
    }
}

impl Serialize for Expectation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Expectation::Leaf(tag) => serializer.serialize_str(tag.as_str()),
            Expectation::Object(props) => {
                let mut map = serializer.serialize_map(Some(props.len()))?;
                for (key, sub) in props {
                    map.serialize_entry(key, sub)?;
                }
                map.end()
            }
            Expectation::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for sub in items {
                    seq.serialize_element(sub)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Expectation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Expectation::try_from(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_nested_expectation() {
        let exp = Expectation::try_from(&json!({
            "hash": "string",
            "tx": [{ "txid": "string", "fee": "number_zero" }]
        }))
        .unwrap();

        let expected = Expectation::object([
            ("hash", Expectation::STRING),
            (
                "tx",
                Expectation::array_of(Expectation::object([
                    ("txid", Expectation::STRING),
                    ("fee", Expectation::NUMBER_ZERO),
                ])),
            ),
        ]);
        assert_eq!(exp, expected);
    }

    #[test]
    fn test_unknown_tag_is_malformed() {
        let err = Expectation::try_from(&json!({ "a": { "b": "integer" } })).unwrap_err();
        assert!(err.is_malformed_expectation());
        assert_eq!(err.path(), Some("/a/b"));
    }

    #[test]
    fn test_non_string_leaf_is_malformed() {
        let err = Expectation::try_from(&json!([true])).unwrap_err();
        assert!(err.is_malformed_expectation());
        assert_eq!(err.path(), Some("/0"));
    }

    #[test]
    fn test_unwrap_array() {
        let inner = Expectation::object([("a", Expectation::NUMBER)]);
        let wrapped = Expectation::array_of(inner.clone());
        assert_eq!(wrapped.unwrap_array().unwrap(), &inner);
        assert_eq!(inner.unwrap_array().unwrap(), &inner);

        let empty = Expectation::Array(Vec::new());
        assert!(empty.unwrap_array().unwrap_err().is_malformed_expectation());

        let two = Expectation::Array(vec![Expectation::STRING, Expectation::NUMBER]);
        assert!(two.unwrap_array().is_err());
    }

    #[test]
    fn test_serde_shape() {
        let exp: Expectation = serde_json::from_str(r#"{"ok": "bool", "items": ["string"]}"#).unwrap();
        assert_eq!(exp.describe(), "object");
        assert_eq!(
            serde_json::to_value(&exp).unwrap(),
            json!({ "ok": "bool", "items": ["string"] })
        );
        assert_eq!(exp.to_json(), json!({ "ok": "bool", "items": ["string"] }));
    }

    #[test]
    fn test_leaf_tag_from_str() {
        for tag in LeafTag::ALL {
            assert_eq!(tag.as_str().parse::<LeafTag>().unwrap(), tag);
        }
        assert!("boolean".parse::<LeafTag>().is_err());
    }
}
