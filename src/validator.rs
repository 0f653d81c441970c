//! Shape Validator
//!
//! Recursively checks a decoded JSON document against an [`Expectation`] tree.
//! Validation is fail-fast: the first mismatch is returned and nothing else
//! is reported.
//!
//! ## Matching rules
//!
//! | Document | Passes when |
//! |----------|-------------|
//! | string   | `string` and non-empty, or `string_empty` |
//! | number   | `number` and non-zero, or `number_zero` (any number) |
//! | bool     | `bool` |
//! | null     | `null` |
//! | array    | every element matches the unwrapped element expectation |
//! | object   | every present key is declared and its value matches |
//!
//! Keys declared by the expectation but absent from the document are only
//! reported when [`ValidatorOptions::require_properties`] is set.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::error::{Result, ShapeError};
use crate::expectation::{Expectation, LeafTag};
use crate::path::{KeyPath, ROOT_LABEL};

/// Options controlling validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Label of the first key path segment
    pub root_label: String,
    /// Report declared keys missing from document objects
    pub require_properties: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            root_label: ROOT_LABEL.to_string(),
            require_properties: false,
        }
    }
}

/// Stateless matcher; one instance may be shared across threads
#[derive(Debug, Clone, Default)]
pub struct ShapeValidator {
    options: ValidatorOptions,
}

/// Validate with default options
pub fn validate(document: &Value, expectation: &Expectation) -> Result<()> {
    ShapeValidator::new().validate(document, expectation)
}

/// Kind name of a document value as it appears in diagnostics
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl ShapeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Check `document` against `expectation`, starting at the root label
    pub fn validate(&self, document: &Value, expectation: &Expectation) -> Result<()> {
        let root = KeyPath::root(self.options.root_label.clone());
        self.check(&root, document, expectation)
    }

    fn check(&self, path: &KeyPath, document: &Value, expectation: &Expectation) -> Result<()> {
        trace!(path = %path, kind = kind_name(document), expected = expectation.describe(), "checking");

        match document {
            Value::String(s) => match expectation.as_leaf() {
                Some(LeafTag::String) if !s.is_empty() => Ok(()),
                Some(LeafTag::StringEmpty) => Ok(()),
                _ => Err(mismatch(path, document, expectation)),
            },
            Value::Bool(_) => match expectation.as_leaf() {
                Some(LeafTag::Bool) => Ok(()),
                _ => Err(mismatch(path, document, expectation)),
            },
            Value::Null => match expectation.as_leaf() {
                Some(LeafTag::Null) => Ok(()),
                _ => Err(mismatch(path, document, expectation)),
            },
            Value::Number(n) => {
                let Some(n) = n.as_f64() else {
                    debug!(path = %path, value = %document, "number not representable as f64, skipping");
                    return Ok(());
                };
                match expectation.as_leaf() {
                    Some(LeafTag::Number) if n != 0.0 => Ok(()),
                    Some(LeafTag::NumberZero) => Ok(()),
                    _ => Err(mismatch(path, document, expectation)),
                }
            }
            Value::Array(items) => {
                let inner = element_expectation(path, expectation)?;
                for item in items {
                    // Elements share the array's key path
                    self.check(path, item, inner)?;
                }
                Ok(())
            }
            Value::Object(props) => {
                let Expectation::Object(expected_props) = expectation else {
                    return Err(mismatch(path, document, expectation));
                };
                self.check_required(path, props, expected_props)?;

                for (key, value) in props {
                    let Some(sub) = expected_props.get(key) else {
                        return Err(ShapeError::UnknownProperty {
                            key: key.clone(),
                            path: path.to_string(),
                        });
                    };
                    let child = path.child(key);
                    let sub = element_expectation(&child, sub)?;
                    self.check(&child, value, sub)?;
                }
                Ok(())
            }
        }
    }

    fn check_required(
        &self,
        path: &KeyPath,
        props: &Map<String, Value>,
        expected_props: &BTreeMap<String, Expectation>,
    ) -> Result<()> {
        for key in expected_props.keys() {
            if props.contains_key(key) {
                continue;
            }
            if !self.options.require_properties {
                debug!(path = %path, key = %key, "declared prop absent, not required");
                break;
            }
            return Err(ShapeError::MissingProperty {
                key: key.clone(),
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

fn element_expectation<'a>(path: &KeyPath, expectation: &'a Expectation) -> Result<&'a Expectation> {
    expectation.unwrap_array().map_err(|err| match err {
        ShapeError::MalformedExpectation { reason, .. } => ShapeError::malformed(path.to_string(), reason),
        other => other,
    })
}

fn mismatch(path: &KeyPath, document: &Value, expectation: &Expectation) -> ShapeError {
    ShapeError::TypeMismatch {
        path: path.to_string(),
        kind: kind_name(document),
        value: document.to_string(),
        expected: expectation.describe().to_string(),
    }
}
