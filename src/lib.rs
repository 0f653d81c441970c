//! Response Shape Checking
//!
//! Asserts that decoded JSON responses (from RPC or HTTP APIs) have the shape
//! described by a small, hand-written expectation tree.
//!
//! ## Features
//!
//! - **Leaf Tags**: `string`, `string_empty`, `number`, `number_zero`, `bool`, `null`
//! - **Closed Objects**: properties not declared in the expectation are rejected
//! - **Homogeneous Arrays**: `[inner]` checks every element against `inner`
//! - **Key Paths**: errors name where in the document the mismatch was found
//!
//! ## Example
//!
//! ```
//! use response_shape::{validate, Expectation};
//! use serde_json::json;
//!
//! let expectation: Expectation = r#"{"height": "number", "tx": ["string"]}"#.parse().unwrap();
//! assert!(validate(&json!({"height": 700000, "tx": ["ab12"]}), &expectation).is_ok());
//! assert!(validate(&json!({"height": 0, "tx": []}), &expectation).is_err());
//! ```

pub mod config;
pub mod error;
pub mod expectation;
pub mod fixtures;
pub mod path;
pub mod validator;

pub use config::ShapeConfig;
pub use error::{Result, ShapeError};
pub use expectation::{Expectation, LeafTag};
pub use fixtures::{FixturePair, check_pair, discover_pairs, load_expectation, load_json};
pub use path::KeyPath;
pub use validator::{ShapeValidator, ValidatorOptions, kind_name, validate};
