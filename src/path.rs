//! Key paths used in diagnostics

use std::fmt;

/// Default label of the first path segment
pub const ROOT_LABEL: &str = "root";

/// Root-relative sequence of property names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Start a path at the given root label
    pub fn root(label: impl Into<String>) -> Self {
        Self(vec![label.into()])
    }

    /// Path of a property under this one
    pub fn child(&self, key: &str) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(key.to_string());
        Self(segments)
    }

    /// Last segment (the property name, or the root label)
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or(ROOT_LABEL)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl Default for KeyPath {
    fn default() -> Self {
        Self::root(ROOT_LABEL)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_paths() {
        let root = KeyPath::default();
        let nested = root.child("block").child("hash");
        assert_eq!(root.to_string(), "root");
        assert_eq!(nested.to_string(), "root.block.hash");
        assert_eq!(nested.leaf(), "hash");
        assert_eq!(nested.depth(), 2);
    }

    #[test]
    fn test_custom_root() {
        let path = KeyPath::root("response").child("result");
        assert_eq!(path.to_string(), "response.result");
        assert_eq!(path.segments().len(), 2);
    }
}
