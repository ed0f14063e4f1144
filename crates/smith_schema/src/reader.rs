//! Rule file reading utilities.
//!
//! A rule document holds a `rules` mapping from node-type name to rule body:
//!
//! ```yaml
//! rules:
//!   leaf:
//!     content:
//!       rules: [nonEmptyContent]
//!   group:
//!     children:
//!       - names: [leaf]
//!         min: 1
//!         max: 2
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{SchemaError, SchemaResult};
use crate::models::Rule;
use crate::provider::RuleSet;

/// Supported rule document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Yaml,
    Json,
    Toml,
}

impl RuleFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(RuleFormat::Yaml),
            "json" => Some(RuleFormat::Json),
            "toml" => Some(RuleFormat::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    rules: BTreeMap<String, Rule>,
}

impl RuleDocument {
    fn into_rules(self) -> impl Iterator<Item = Rule> {
        self.rules.into_iter().map(|(name, mut rule)| {
            rule.name = name;
            rule
        })
    }
}

/// Reader for rule files.
pub struct RuleReader;

impl RuleReader {
    /// Parse a rule document from text.
    pub fn parse(content: &str, format: RuleFormat) -> SchemaResult<RuleSet> {
        let document: RuleDocument = match format {
            RuleFormat::Yaml => serde_yaml::from_str(content)?,
            RuleFormat::Json => serde_json::from_str(content)?,
            RuleFormat::Toml => toml::from_str(content)?,
        };
        Ok(document.into_rules().collect())
    }

    /// Parse a YAML rule document.
    pub fn from_yaml_str(content: &str) -> SchemaResult<RuleSet> {
        Self::parse(content, RuleFormat::Yaml)
    }

    /// Read a single rule file.
    pub fn read_file(path: impl AsRef<Path>) -> SchemaResult<RuleSet> {
        let path = path.as_ref();
        let format = RuleFormat::from_path(path).ok_or_else(|| SchemaError::InvalidFormat {
            path: path.to_path_buf(),
            message: "expected a .yaml, .yml, .json or .toml file".to_string(),
        })?;
        debug!("Reading rules from {:?}", path);

        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Read every rule file directly inside a directory.
    ///
    /// Files with unrecognised extensions are skipped. A node type defined
    /// in more than one file is an error.
    pub fn read_dir(path: impl AsRef<Path>) -> SchemaResult<RuleSet> {
        let path = path.as_ref();
        let mut rules = RuleSet::new();

        let mut files: Vec<_> = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && RuleFormat::from_path(p).is_some())
            .collect();
        files.sort();

        for file in files {
            let loaded = Self::read_file(&file)?;
            if let Some(name) = loaded.names().into_iter().find(|n| rules.contains(n)) {
                return Err(SchemaError::DuplicateRule {
                    name: name.to_string(),
                    path: file,
                });
            }
            debug!("Loaded {} rules from {:?}", loaded.len(), file);
            rules.extend(loaded);
        }

        Ok(rules)
    }

    /// Load rules from a file or a directory of files.
    pub fn load(path: impl AsRef<Path>) -> SchemaResult<RuleSet> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SchemaError::NotFound(path.to_path_buf()));
        }

        let rules = if path.is_dir() {
            Self::read_dir(path)?
        } else {
            Self::read_file(path)?
        };
        info!("Loaded {} node types from {:?}", rules.len(), path);
        Ok(rules)
    }
}
