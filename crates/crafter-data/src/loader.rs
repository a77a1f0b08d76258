//! Load pipeline: acquires records, populates the catalog, links it.

use crafter_catalog::{
    Catalog, CatalogBuilder, CatalogError, DuplicatePolicy, PropertyType, PropertyTypeGroup,
    Recipe,
};
use std::path::{Path, PathBuf};

use crate::config::LoadConfig;
use crate::source::{DirSource, RecordSource};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// Neither a directory nor a data file exists for a record kind.
    #[error("required data '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A record kind has both a directory and a single data file.
    #[error("conflicting sources: directory {dir} and file {file}")]
    ConflictingSources { dir: PathBuf, file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// Populating or linking the catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Pipeline
// ===========================================================================

/// Build a fresh, fully linked catalog from `source`.
///
/// Acquires all three record kinds, inserts them, then links groups before
/// recipes. The first error from any step is returned unchanged.
#[tracing::instrument(level = "debug", skip_all, fields(duplicates = ?duplicates))]
pub fn load_catalog(
    source: &impl RecordSource,
    duplicates: DuplicatePolicy,
) -> Result<Catalog, DataLoadError> {
    let recipes = source.recipes()?;
    let groups = source.property_type_groups()?;
    let types = source.property_types()?;
    tracing::debug!(
        recipes = recipes.len(),
        groups = groups.len(),
        types = types.len(),
        "acquired records"
    );

    let mut builder = CatalogBuilder::with_policy(duplicates);
    for record in types {
        builder.put_property_type(PropertyType::from(record))?;
    }
    for record in groups {
        builder.put_group(PropertyTypeGroup::from(record))?;
    }
    for record in recipes {
        builder.put_recipe(Recipe::from(record))?;
    }

    let catalog = builder.build()?;
    tracing::debug!(
        recipes = catalog.recipe_count(),
        groups = catalog.group_count(),
        types = catalog.property_type_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Load a catalog from a data root laid out per `config`.
pub fn load_catalog_dir(root: &Path, config: &LoadConfig) -> Result<Catalog, DataLoadError> {
    let source = DirSource::new(root, config.clone());
    load_catalog(&source, config.duplicates)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use crate::source::MemorySource;
    use crafter_catalog::EntryKind;

    fn oak() -> PropertyTypeData {
        serde_json::from_str(r#"{"name": "oak", "weight_factor": 1.0}"#).unwrap()
    }

    fn group(name: &str, refs: &[&str]) -> PropertyTypeGroupData {
        PropertyTypeGroupData {
            name: name.to_string(),
            type_refs: refs.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn ring() -> RecipeData {
        serde_json::from_str(
            r#"{"name": "ring", "components": [{"name": "band", "properties": [{"name": "material", "type_group_refs": ["wood_group"]}]}]}"#,
        )
        .unwrap()
    }

    /// A source whose recipe collection cannot be read.
    struct FailingSource;

    impl RecordSource for FailingSource {
        fn recipes(&self) -> Result<Vec<RecipeData>, DataLoadError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "recipes unreadable").into())
        }

        fn property_types(&self) -> Result<Vec<PropertyTypeData>, DataLoadError> {
            Ok(Vec::new())
        }

        fn property_type_groups(&self) -> Result<Vec<PropertyTypeGroupData>, DataLoadError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn load_empty_source() {
        let catalog = load_catalog(&MemorySource::new(), DuplicatePolicy::Reject).unwrap();
        assert_eq!(catalog.recipe_count(), 0);
        assert_eq!(catalog.group_count(), 0);
        assert_eq!(catalog.property_type_count(), 0);
    }

    #[test]
    fn load_links_ring_through_group() {
        let source = MemorySource::new()
            .with_type(oak())
            .with_group(group("wood_group", &["oak"]))
            .with_recipe(ring());
        let catalog = load_catalog(&source, DuplicatePolicy::Reject).unwrap();

        let ring = catalog.recipe("ring").unwrap();
        let material = &ring.components[0].properties[0];
        let wood_group = catalog.type_groups(material).next().unwrap();
        let first = catalog.group_types(wood_group).next().unwrap();
        assert_eq!(first.name, "oak");
    }

    #[test]
    fn load_missing_group_type_fails() {
        let source = MemorySource::new().with_group(group("wood_group", &["nonexistent_type"]));
        let err = load_catalog(&source, DuplicatePolicy::Reject).unwrap_err();
        match err {
            DataLoadError::Catalog(CatalogError::UnresolvedGroupType { name, group }) => {
                assert_eq!(name, "nonexistent_type");
                assert_eq!(group, "wood_group");
            }
            other => panic!("expected UnresolvedGroupType, got: {other:?}"),
        }
    }

    #[test]
    fn load_reports_group_error_before_recipe_error() {
        let source = MemorySource::new()
            .with_group(group("wood_group", &["nonexistent_type"]))
            .with_recipe(ring());
        let err = load_catalog(&source, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Catalog(CatalogError::UnresolvedGroupType { .. })
        ));
    }

    #[test]
    fn load_duplicate_rejected() {
        let source = MemorySource::new().with_type(oak()).with_type(oak());
        let err = load_catalog(&source, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Catalog(CatalogError::DuplicateName {
                kind: EntryKind::PropertyType,
                ..
            })
        ));
    }

    #[test]
    fn load_duplicate_replaced() {
        let source = MemorySource::new().with_type(oak()).with_type(oak());
        let catalog = load_catalog(&source, DuplicatePolicy::Replace).unwrap();
        assert_eq!(catalog.property_type_count(), 1);
        assert!(catalog.property_type("oak").is_some());
    }

    #[test]
    fn acquisition_error_propagates_unchanged() {
        let err = load_catalog(&FailingSource, DuplicatePolicy::Reject).unwrap_err();
        match err {
            DataLoadError::Io(io) => {
                assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
                assert!(io.to_string().contains("recipes unreadable"));
            }
            other => panic!("expected Io, got: {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "recipes".to_string(),
            dir: PathBuf::from("/data"),
        };
        assert!(format!("{e}").contains("recipes"));
        assert!(format!("{e}").contains("/data"));

        let e = DataLoadError::ConflictingSources {
            dir: PathBuf::from("/data/types"),
            file: PathBuf::from("/data/types.ron"),
        };
        let msg = format!("{e}");
        assert!(msg.contains("/data/types"));
        assert!(msg.contains("types.ron"));

        let e = DataLoadError::Parse {
            file: PathBuf::from("bad.ron"),
            detail: "syntax error".to_string(),
        };
        assert!(format!("{e}").contains("bad.ron"));
        assert!(format!("{e}").contains("syntax error"));

        // Catalog errors keep their own message.
        let inner = CatalogError::UnresolvedGroupType {
            group: "wood_group".to_string(),
            name: "nonexistent_type".to_string(),
        };
        let expected = inner.to_string();
        let e = DataLoadError::from(inner);
        assert_eq!(format!("{e}"), expected);
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
