//! Catalog entities.
//!
//! Records arrive carrying name references (`type_refs`, `type_group_refs`).
//! The link passes fill the matching id lists; until then those lists are
//! empty. Recipes own their components and properties outright, while groups
//! and properties only hold ids into the catalog's tables.

use crate::factor::{Factor, ValueTier};
use crate::id::{PropertyTypeGroupId, PropertyTypeId};

// ===========================================================================
// Property types
// ===========================================================================

/// A concrete value a property can take, e.g. a material such as "oak".
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyType {
    pub name: String,
    pub weight_factor: Factor,
    pub minor_value_factor: Factor,
    pub minor_value_variants: Vec<String>,
    pub avg_value_factor: Factor,
    pub avg_value_variants: Vec<String>,
    pub major_value_factor: Factor,
    pub major_value_variants: Vec<String>,
    /// Prefixes usable when naming a generated item.
    pub prefixes: Vec<String>,
}

/// A variant label paired with the factor of the tier it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeVariant<'a> {
    pub label: &'a str,
    pub value: Factor,
}

impl PropertyType {
    /// A property type with identity factors and no variants or prefixes.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            weight_factor: Factor::IDENTITY,
            minor_value_factor: Factor::IDENTITY,
            minor_value_variants: Vec::new(),
            avg_value_factor: Factor::IDENTITY,
            avg_value_variants: Vec::new(),
            major_value_factor: Factor::IDENTITY,
            major_value_variants: Vec::new(),
            prefixes: Vec::new(),
        }
    }

    pub fn value_factor(&self, tier: ValueTier) -> Factor {
        match tier {
            ValueTier::Minor => self.minor_value_factor,
            ValueTier::Average => self.avg_value_factor,
            ValueTier::Major => self.major_value_factor,
        }
    }

    pub fn variants(&self, tier: ValueTier) -> &[String] {
        match tier {
            ValueTier::Minor => &self.minor_value_variants,
            ValueTier::Average => &self.avg_value_variants,
            ValueTier::Major => &self.major_value_variants,
        }
    }

    /// Variant labels of `tier`, each tagged with that tier's value factor.
    pub fn tier_variants(&self, tier: ValueTier) -> impl Iterator<Item = TypeVariant<'_>> {
        let value = self.value_factor(tier);
        self.variants(tier).iter().map(move |label| TypeVariant {
            label: label.as_str(),
            value,
        })
    }
}

// ===========================================================================
// Property type groups
// ===========================================================================

/// A named set of property types, referenced collectively by a property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTypeGroup {
    pub name: String,
    pub type_refs: Vec<String>,
    pub(crate) types: Vec<PropertyTypeId>,
}

impl PropertyTypeGroup {
    pub fn new(name: &str, type_refs: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            type_refs,
            types: Vec::new(),
        }
    }

    /// Resolved members, in `type_refs` order. Empty until linked.
    pub fn types(&self) -> &[PropertyTypeId] {
        &self.types
    }
}

// ===========================================================================
// Recipes
// ===========================================================================

/// A customizable axis of a component, e.g. "material".
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub required: bool,
    pub type_refs: Vec<String>,
    pub type_group_refs: Vec<String>,
    pub(crate) types: Vec<PropertyTypeId>,
    pub(crate) type_groups: Vec<PropertyTypeGroupId>,
}

impl Property {
    pub fn new(
        name: &str,
        required: bool,
        type_refs: Vec<String>,
        type_group_refs: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            required,
            type_refs,
            type_group_refs,
            types: Vec::new(),
            type_groups: Vec::new(),
        }
    }

    /// Directly referenced types, in `type_refs` order. Empty until linked.
    pub fn types(&self) -> &[PropertyTypeId] {
        &self.types
    }

    /// Referenced groups, in `type_group_refs` order. Empty until linked.
    pub fn type_groups(&self) -> &[PropertyTypeGroupId] {
        &self.type_groups
    }
}

/// A structural section of an item, e.g. "blade".
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub required: bool,
    pub properties: Vec<Property>,
}

/// A template describing how to generate one kind of item.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub base_value: f64,
    pub base_weight: f64,
    pub components: Vec<Component>,
}

impl Recipe {
    /// Every property of every component, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&Component, &Property)> {
        self.components
            .iter()
            .flat_map(|c| c.properties.iter().map(move |p| (c, p)))
    }

    /// Components that generation must always fill.
    pub fn required_components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| c.required)
    }
}
