//! Record sources: where the loader acquires raw records from.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::LoadConfig;
use crate::format::{data_files_in, deserialize_records, find_data_file};
use crate::loader::DataLoadError;
use crate::schema::{PropertyTypeData, PropertyTypeGroupData, RecipeData};

/// Supplies the three independent record collections. No collection depends
/// on another, so they may be acquired in any order.
pub trait RecordSource {
    fn recipes(&self) -> Result<Vec<RecipeData>, DataLoadError>;
    fn property_types(&self) -> Result<Vec<PropertyTypeData>, DataLoadError>;
    fn property_type_groups(&self) -> Result<Vec<PropertyTypeGroupData>, DataLoadError>;
}

// ===========================================================================
// In-memory source
// ===========================================================================

/// Records already resident in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub recipes: Vec<RecipeData>,
    pub types: Vec<PropertyTypeData>,
    pub groups: Vec<PropertyTypeGroupData>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipe(mut self, recipe: RecipeData) -> Self {
        self.recipes.push(recipe);
        self
    }

    pub fn with_type(mut self, property_type: PropertyTypeData) -> Self {
        self.types.push(property_type);
        self
    }

    pub fn with_group(mut self, group: PropertyTypeGroupData) -> Self {
        self.groups.push(group);
        self
    }
}

impl RecordSource for MemorySource {
    fn recipes(&self) -> Result<Vec<RecipeData>, DataLoadError> {
        Ok(self.recipes.clone())
    }

    fn property_types(&self) -> Result<Vec<PropertyTypeData>, DataLoadError> {
        Ok(self.types.clone())
    }

    fn property_type_groups(&self) -> Result<Vec<PropertyTypeGroupData>, DataLoadError> {
        Ok(self.groups.clone())
    }
}

// ===========================================================================
// Filesystem source
// ===========================================================================

/// Records read from a data root laid out per [`LoadConfig`].
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    config: LoadConfig,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, config: LoadConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// The files holding records of one kind: every data file under the
    /// `location` directory, or the single `location.*` file.
    pub fn files_for(&self, location: &str) -> Result<Vec<PathBuf>, DataLoadError> {
        let dir = self.root.join(location);
        let (parent, base_name) = match (dir.parent(), dir.file_name().and_then(|n| n.to_str())) {
            (Some(parent), Some(base_name)) => (parent.to_path_buf(), base_name.to_string()),
            _ => {
                return Err(DataLoadError::MissingRequired {
                    file: location.to_string(),
                    dir: self.root.clone(),
                });
            }
        };
        let file = find_data_file(&parent, &base_name)?;

        match (dir.is_dir(), file) {
            (true, Some(file)) => Err(DataLoadError::ConflictingSources { dir, file }),
            (true, None) => data_files_in(&dir),
            (false, Some(file)) => Ok(vec![file]),
            (false, None) => Err(DataLoadError::MissingRequired {
                file: location.to_string(),
                dir: self.root.clone(),
            }),
        }
    }

    fn read_kind<T: DeserializeOwned>(
        &self,
        location: &str,
        toml_key: &str,
    ) -> Result<Vec<T>, DataLoadError> {
        let mut records = Vec::new();
        for file in self.files_for(location)? {
            let batch: Vec<T> = deserialize_records(&file, toml_key)?;
            tracing::trace!(file = %file.display(), records = batch.len(), "read data file");
            records.extend(batch);
        }
        Ok(records)
    }
}

impl RecordSource for DirSource {
    fn recipes(&self) -> Result<Vec<RecipeData>, DataLoadError> {
        self.read_kind(&self.config.recipes, "recipes")
    }

    fn property_types(&self) -> Result<Vec<PropertyTypeData>, DataLoadError> {
        self.read_kind(&self.config.types, "types")
    }

    fn property_type_groups(&self) -> Result<Vec<PropertyTypeGroupData>, DataLoadError> {
        self.read_kind(&self.config.groups, "groups")
    }
}
