//! Configuration for shape checking
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (shapes.toml)
//! - Environment variables (SHAPES__*)
//!
//! ## Example config file (shapes.toml):
//! ```toml
//! [validation]
//! root_label = "root"
//! require_properties = false
//!
//! [suite]
//! document_suffix = ".json"
//! expectation_suffix = ".expect.json"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::path::ROOT_LABEL;
use crate::validator::ValidatorOptions;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Fixture suite settings
    #[serde(default)]
    pub suite: SuiteConfig,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// First segment of every reported key path
    #[serde(default = "default_root_label")]
    pub root_label: String,

    /// Fail when a declared property is missing from the document
    #[serde(default)]
    pub require_properties: bool,
}

/// Fixture suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Suffix of document files
    #[serde(default = "default_document_suffix")]
    pub document_suffix: String,

    /// Suffix of expectation files
    #[serde(default = "default_expectation_suffix")]
    pub expectation_suffix: String,
}

// Default value functions
fn default_root_label() -> String {
    ROOT_LABEL.to_string()
}

fn default_document_suffix() -> String {
    ".json".to_string()
}

fn default_expectation_suffix() -> String {
    ".expect.json".to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            root_label: default_root_label(),
            require_properties: false,
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            document_suffix: default_document_suffix(),
            expectation_suffix: default_expectation_suffix(),
        }
    }
}

impl ShapeConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["shapes.toml", ".shapes.toml", "config/shapes.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "shapes") {
            let xdg_config = config_dir.config_dir().join("shapes.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SHAPES")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = self
            .to_toml()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Options for a [`crate::ShapeValidator`]
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            root_label: self.validation.root_label.clone(),
            require_properties: self.validation.require_properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShapeConfig::default();
        assert!(!config.validation.require_properties);
        assert_eq!(config.validator_options(), ValidatorOptions::default());
        assert_eq!(config.suite.expectation_suffix, ".expect.json");
    }

    #[test]
    fn test_serialize_config() {
        let config = ShapeConfig::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("[validation]"));
        assert!(toml_str.contains("[suite]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[validation]\nroot_label = \"response\"\nrequire_properties = true\n",
        )
        .unwrap();

        let config = ShapeConfig::load_from(Some(path.to_str().unwrap())).unwrap();
        let options = config.validator_options();
        assert_eq!(options.root_label, "response");
        assert!(options.require_properties);
        assert_eq!(config.suite.document_suffix, ".json");
    }
}
