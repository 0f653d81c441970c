//! Fixture Suites
//!
//! Loads document/expectation pairs from disk. A pair is an expectation file
//! `<name>.expect.json` sitting next to a document file `<name>.json`.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::SuiteConfig;
use crate::error::Result;
use crate::expectation::Expectation;
use crate::validator::ShapeValidator;

/// A document file and the expectation it must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePair {
    /// Fixture name (file name without suffix)
    pub name: String,
    pub document: PathBuf,
    pub expectation: PathBuf,
}

/// Read and decode a JSON document
pub fn load_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read and parse an expectation tree
pub fn load_expectation(path: &Path) -> Result<Expectation> {
    let value = load_json(path)?;
    Expectation::try_from(&value)
}

/// Find all fixture pairs under `dir`, sorted by expectation path
pub fn discover_pairs(dir: &Path, config: &SuiteConfig) -> Vec<FixturePair> {
    let mut pairs = Vec::new();

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(name) = file_name.strip_suffix(config.expectation_suffix.as_str()) else {
            continue;
        };

        let document = path.with_file_name(format!("{}{}", name, config.document_suffix));
        if document == path || !document.is_file() {
            warn!(expectation = %path.display(), "no document for expectation");
            continue;
        }

        debug!(name, "found fixture pair");
        pairs.push(FixturePair {
            name: name.to_string(),
            document,
            expectation: path.to_path_buf(),
        });
    }

    pairs.sort_by(|a, b| a.expectation.cmp(&b.expectation));
    pairs
}

/// Load both files of a pair and validate the document
pub fn check_pair(validator: &ShapeValidator, pair: &FixturePair) -> Result<()> {
    let document = load_json(&pair.document)?;
    let expectation = load_expectation(&pair.expectation)?;
    validator.validate(&document, &expectation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_discover_pairs() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "getinfo.json", r#"{"version": 1}"#);
        write(dir.path(), "getinfo.expect.json", r#"{"version": "number"}"#);
        write(dir.path(), "orphan.expect.json", r#"{"a": "string"}"#);
        write(dir.path(), "unrelated.json", r#"{}"#);

        let pairs = discover_pairs(dir.path(), &SuiteConfig::default());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].name, "getinfo");
        assert!(pairs[0].document.ends_with("getinfo.json"));

        assert!(check_pair(&ShapeValidator::new(), &pairs[0]).is_ok());
    }

    #[test]
    fn test_check_pair_reports_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tx.json", r#"{"txid": ""}"#);
        write(dir.path(), "tx.expect.json", r#"{"txid": "string"}"#);

        let pairs = discover_pairs(dir.path(), &SuiteConfig::default());
        let err = check_pair(&ShapeValidator::new(), &pairs[0]).unwrap_err();
        assert_eq!(err.path(), Some("root.txid"));
    }

    #[test]
    fn test_load_expectation_rejects_bad_tag() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.expect.json", r#"{"a": 5}"#);
        let err = load_expectation(&dir.path().join("bad.expect.json")).unwrap_err();
        assert!(err.is_malformed_expectation());
    }
}
