//! Error types for shape validation

use thiserror::Error;

/// Result type for shape operations
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Shape validation errors
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("'{path}' {kind} prop does not meet expected type '{expected}' {value}")]
    TypeMismatch {
        path: String,
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("unknown prop '{key}' found under '{path}'")]
    UnknownProperty { key: String, path: String },

    #[error("missing required prop '{key}' under '{path}'")]
    MissingProperty { key: String, path: String },

    #[error("malformed expectation at '{path}': {reason}")]
    MalformedExpectation { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShapeError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedExpectation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Key path where validation stopped, if the error came from a document check
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::UnknownProperty { path, .. }
            | Self::MissingProperty { path, .. }
            | Self::MalformedExpectation { path, .. } => Some(path),
            Self::Io(_) | Self::Json(_) => None,
        }
    }

    /// Whether the error blames the expectation tree rather than the document
    pub fn is_malformed_expectation(&self) -> bool {
        matches!(self, Self::MalformedExpectation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = ShapeError::TypeMismatch {
            path: "root.blocks".to_string(),
            kind: "number",
            value: "0".to_string(),
            expected: "number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'root.blocks' number prop does not meet expected type 'number' 0"
        );
        assert_eq!(err.path(), Some("root.blocks"));
    }

    #[test]
    fn test_unknown_property_message() {
        let err = ShapeError::UnknownProperty {
            key: "c".to_string(),
            path: "root".to_string(),
        };
        assert_eq!(err.to_string(), "unknown prop 'c' found under 'root'");
        assert!(!err.is_malformed_expectation());
    }
}
