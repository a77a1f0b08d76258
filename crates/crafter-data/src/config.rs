//! Load configuration.
//!
//! Names where each record kind lives under a data root and how duplicate
//! names are treated. Readable from any supported data format.

use crafter_catalog::DuplicatePolicy;
use serde::Deserialize;
use std::path::Path;

use crate::format::deserialize_file;
use crate::loader::DataLoadError;

/// Where to find each record kind, and the duplicate-name policy.
///
/// Each location is a path relative to the data root. It may name a
/// directory of data files, or the base name of a single data file
/// (`recipes` matches `recipes.ron`, `recipes.json` or `recipes.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    pub recipes: String,
    pub types: String,
    pub groups: String,
    pub duplicates: DuplicatePolicy,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            recipes: "recipes".to_string(),
            types: "types".to_string(),
            groups: "groups".to_string(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl LoadConfig {
    /// Read a config file (`.ron`, `.json` or `.toml`). Missing keys keep
    /// their defaults.
    pub fn from_file(path: &Path) -> Result<Self, DataLoadError> {
        deserialize_file(path)
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}
