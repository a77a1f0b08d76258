//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::catalog::CatalogBuilder;
use crate::factor::Factor;
use crate::model::*;

// ===========================================================================
// Record constructors
// ===========================================================================

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

pub fn make_type(name: &str) -> PropertyType {
    PropertyType::new(name)
}

pub fn make_weighted_type(name: &str, weight: f64) -> PropertyType {
    PropertyType {
        weight_factor: Factor(weight),
        ..PropertyType::new(name)
    }
}

pub fn make_group(name: &str, type_refs: &[&str]) -> PropertyTypeGroup {
    PropertyTypeGroup::new(name, strings(type_refs))
}

pub fn make_property(name: &str, type_refs: &[&str], group_refs: &[&str]) -> Property {
    Property::new(name, true, strings(type_refs), strings(group_refs))
}

pub fn make_component(name: &str, properties: Vec<Property>) -> Component {
    Component {
        name: name.to_string(),
        required: true,
        properties,
    }
}

pub fn make_recipe(name: &str, components: Vec<Component>) -> Recipe {
    Recipe {
        name: name.to_string(),
        base_value: 1.0,
        base_weight: 1.0,
        components,
    }
}

// ===========================================================================
// Catalog shapes
// ===========================================================================

/// `n_types` types, `n_groups` groups each holding every type, and
/// `n_recipes` recipes whose single property references all of them.
pub fn make_wide_builder(n_types: usize, n_groups: usize, n_recipes: usize) -> CatalogBuilder {
    let mut b = CatalogBuilder::new();
    let type_names: Vec<String> = (0..n_types).map(|i| format!("type_{i}")).collect();
    let group_names: Vec<String> = (0..n_groups).map(|i| format!("group_{i}")).collect();

    for name in &type_names {
        b.put_property_type(make_type(name))
            .expect("fixture names are unique");
    }
    for name in &group_names {
        b.put_group(PropertyTypeGroup::new(name, type_names.clone()))
            .expect("fixture names are unique");
    }
    for i in 0..n_recipes {
        let property = Property::new("material", true, type_names.clone(), group_names.clone());
        b.put_recipe(make_recipe(
            &format!("recipe_{i}"),
            vec![make_component("body", vec![property])],
        ))
        .expect("fixture names are unique");
    }
    b
}
