//! Serde data file structs for catalog content definitions.
//!
//! These structs define the on-disk format for recipes, property types and
//! property type groups. They are deserialized from RON, JSON, or TOML data
//! files and then converted into catalog records by the loader. References
//! between records stay as plain names here; the catalog links them.

use crafter_catalog::{Component, Factor, Property, PropertyType, PropertyTypeGroup, Recipe};
use serde::Deserialize;

// ===========================================================================
// Recipes
// ===========================================================================

/// A recipe definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    pub name: String,
    #[serde(default)]
    pub base_value: f64,
    #[serde(default)]
    pub base_weight: f64,
    #[serde(default)]
    pub components: Vec<ComponentData>,
}

/// A component section of a recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentData {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub properties: Vec<PropertyData>,
}

/// A property of a component, referencing types and groups by name.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyData {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, alias = "types")]
    pub type_refs: Vec<String>,
    #[serde(default, alias = "type_groups")]
    pub type_group_refs: Vec<String>,
}

// ===========================================================================
// Property types
// ===========================================================================

/// A property type definition in a data file.
///
/// Omitted factors default to [`Factor::IDENTITY`] (1.0), not zero, so a
/// type that leaves out a factor leaves the base value or weight unscaled.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyTypeData {
    pub name: String,
    #[serde(default)]
    pub weight_factor: Factor,
    #[serde(default)]
    pub minor_value_factor: Factor,
    #[serde(default)]
    pub minor_value_variants: Vec<String>,
    #[serde(default)]
    pub avg_value_factor: Factor,
    #[serde(default)]
    pub avg_value_variants: Vec<String>,
    #[serde(default)]
    pub major_value_factor: Factor,
    #[serde(default)]
    pub major_value_variants: Vec<String>,
    #[serde(default)]
    pub prefix_references: Vec<String>,
}

/// A property type group definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyTypeGroupData {
    pub name: String,
    #[serde(default, alias = "types")]
    pub type_refs: Vec<String>,
}

// ===========================================================================
// Conversion into catalog records
// ===========================================================================

impl From<PropertyTypeData> for PropertyType {
    fn from(data: PropertyTypeData) -> Self {
        PropertyType {
            name: data.name,
            weight_factor: data.weight_factor,
            minor_value_factor: data.minor_value_factor,
            minor_value_variants: data.minor_value_variants,
            avg_value_factor: data.avg_value_factor,
            avg_value_variants: data.avg_value_variants,
            major_value_factor: data.major_value_factor,
            major_value_variants: data.major_value_variants,
            prefixes: data.prefix_references,
        }
    }
}

impl From<PropertyTypeGroupData> for PropertyTypeGroup {
    fn from(data: PropertyTypeGroupData) -> Self {
        PropertyTypeGroup::new(&data.name, data.type_refs)
    }
}

impl From<PropertyData> for Property {
    fn from(data: PropertyData) -> Self {
        Property::new(&data.name, data.required, data.type_refs, data.type_group_refs)
    }
}

impl From<ComponentData> for Component {
    fn from(data: ComponentData) -> Self {
        Component {
            name: data.name,
            required: data.required,
            properties: data.properties.into_iter().map(Property::from).collect(),
        }
    }
}

impl From<RecipeData> for Recipe {
    fn from(data: RecipeData) -> Self {
        Recipe {
            name: data.name,
            base_value: data.base_value,
            base_weight: data.base_weight,
            components: data.components.into_iter().map(Component::from).collect(),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
