//! Name-reference resolution.
//!
//! Groups are linked before recipes so that any group a property references
//! already carries its own resolved members. Both passes walk their tables in
//! insertion order and stop at the first reference that does not resolve.

use std::collections::HashMap;

use crate::catalog::{CatalogBuilder, CatalogError, EntryKind};
use crate::id::{PropertyTypeGroupId, PropertyTypeId};
use crate::model::Property;

impl CatalogBuilder {
    /// Pass 1: resolve every group's `type_refs` into property type ids.
    #[tracing::instrument(level = "debug", skip_all, fields(groups = self.groups.len()))]
    pub(crate) fn link_groups(&mut self) -> Result<(), CatalogError> {
        let type_names = &self.type_name_to_id;
        let mut resolved = 0usize;

        for group in &mut self.groups {
            let types = group
                .type_refs
                .iter()
                .map(|name| {
                    type_names
                        .get(name)
                        .copied()
                        .ok_or_else(|| CatalogError::UnresolvedGroupType {
                            group: group.name.clone(),
                            name: name.clone(),
                        })
                })
                .collect::<Result<Vec<PropertyTypeId>, CatalogError>>()?;
            resolved += types.len();
            group.types = types;
        }

        tracing::debug!(resolved, "linked property type groups");
        Ok(())
    }

    /// Pass 2: resolve every recipe property's type and group references.
    #[tracing::instrument(level = "debug", skip_all, fields(recipes = self.recipes.len()))]
    pub(crate) fn link_recipes(&mut self) -> Result<(), CatalogError> {
        let type_names = &self.type_name_to_id;
        let group_names = &self.group_name_to_id;
        let mut resolved = 0usize;

        for recipe in &mut self.recipes {
            for component in &mut recipe.components {
                for property in &mut component.properties {
                    let at = RefSite {
                        recipe: &recipe.name,
                        component: &component.name,
                    };
                    resolved += link_property(property, type_names, group_names, &at)?;
                }
            }
        }

        tracing::debug!(resolved, "linked recipes");
        Ok(())
    }
}

/// Where a property sits, for error reporting.
struct RefSite<'a> {
    recipe: &'a str,
    component: &'a str,
}

impl RefSite<'_> {
    fn unresolved(&self, property: &str, name: &str, expected_kind: EntryKind) -> CatalogError {
        CatalogError::UnresolvedPropertyRef {
            recipe: self.recipe.to_string(),
            component: self.component.to_string(),
            property: property.to_string(),
            name: name.to_string(),
            expected_kind,
        }
    }
}

fn link_property(
    property: &mut Property,
    type_names: &HashMap<String, PropertyTypeId>,
    group_names: &HashMap<String, PropertyTypeGroupId>,
    at: &RefSite<'_>,
) -> Result<usize, CatalogError> {
    let types = property
        .type_refs
        .iter()
        .map(|name| {
            type_names
                .get(name)
                .copied()
                .ok_or_else(|| at.unresolved(&property.name, name, EntryKind::PropertyType))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let type_groups = property
        .type_group_refs
        .iter()
        .map(|name| {
            group_names
                .get(name)
                .copied()
                .ok_or_else(|| at.unresolved(&property.name, name, EntryKind::PropertyTypeGroup))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let count = types.len() + type_groups.len();
    property.types = types;
    property.type_groups = type_groups;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use crate::catalog::{CatalogBuilder, CatalogError, EntryKind};
    use crate::id::*;
    use crate::test_utils::*;

    fn woods() -> CatalogBuilder {
        let mut b = CatalogBuilder::new();
        for name in ["oak", "ash", "maple"] {
            b.put_property_type(make_type(name)).unwrap();
        }
        b
    }

    // -----------------------------------------------------------------------
    // Group pass
    // -----------------------------------------------------------------------

    #[test]
    fn group_types_follow_reference_order() {
        let mut b = woods();
        b.put_group(make_group("wood", &["maple", "oak", "ash"])).unwrap();
        b.link().unwrap();

        let group = b.get_group(PropertyTypeGroupId(0)).unwrap();
        assert_eq!(
            group.types(),
            &[PropertyTypeId(2), PropertyTypeId(0), PropertyTypeId(1)]
        );
    }

    #[test]
    fn group_with_missing_type_fails() {
        let mut b = woods();
        b.put_group(make_group("wood", &["oak", "nonexistent_type"]))
            .unwrap();
        let err = b.link().unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnresolvedGroupType {
                group: "wood".to_string(),
                name: "nonexistent_type".to_string(),
            }
        );
    }

    #[test]
    fn first_missing_reference_wins() {
        let mut b = woods();
        b.put_group(make_group("a", &["oak", "first_missing"])).unwrap();
        b.put_group(make_group("b", &["second_missing"])).unwrap();
        let err = b.build().unwrap_err();
        assert_eq!(err.name(), "first_missing");
    }

    #[test]
    fn empty_group_links_to_nothing() {
        let mut b = woods();
        b.put_group(make_group("none", &[])).unwrap();
        let catalog = b.build().unwrap();
        assert!(catalog.group("none").unwrap().types().is_empty());
    }

    // -----------------------------------------------------------------------
    // Recipe pass
    // -----------------------------------------------------------------------

    #[test]
    fn recipe_properties_resolve_types_and_groups() {
        let mut b = woods();
        b.put_group(make_group("wood", &["oak", "ash"])).unwrap();
        b.put_recipe(make_recipe(
            "bow",
            vec![
                make_component("limb", vec![make_property("material", &["maple"], &["wood"])]),
                make_component("grip", vec![make_property("wrap", &["ash", "oak"], &[])]),
            ],
        ))
        .unwrap();
        let catalog = b.build().unwrap();

        let bow = catalog.recipe("bow").unwrap();
        let limb = &bow.components[0].properties[0];
        assert_eq!(limb.types(), &[PropertyTypeId(2)]);
        assert_eq!(limb.type_groups(), &[PropertyTypeGroupId(0)]);

        let wrap = &bow.components[1].properties[0];
        assert_eq!(wrap.types(), &[PropertyTypeId(1), PropertyTypeId(0)]);
        assert!(wrap.type_groups().is_empty());
    }

    #[test]
    fn recipe_with_missing_type_names_site() {
        let mut b = woods();
        b.put_recipe(make_recipe(
            "bow",
            vec![make_component("limb", vec![make_property("material", &["yew"], &[])])],
        ))
        .unwrap();
        let err = b.build().unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnresolvedPropertyRef {
                recipe: "bow".to_string(),
                component: "limb".to_string(),
                property: "material".to_string(),
                name: "yew".to_string(),
                expected_kind: EntryKind::PropertyType,
            }
        );
    }

    #[test]
    fn recipe_with_missing_group_reports_group_kind() {
        let mut b = woods();
        b.put_recipe(make_recipe(
            "bow",
            vec![make_component("limb", vec![make_property("material", &[], &["wood"])])],
        ))
        .unwrap();
        let err = b.build().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnresolvedPropertyRef {
                expected_kind: EntryKind::PropertyTypeGroup,
                ref name,
                ..
            } if name == "wood"
        ));
    }

    #[test]
    fn broken_group_fails_before_recipes() {
        let mut b = woods();
        b.put_group(make_group("wood", &["nonexistent_type"])).unwrap();
        // The recipe is itself broken too; the group error must surface first.
        b.put_recipe(make_recipe(
            "bow",
            vec![make_component("limb", vec![make_property("material", &["yew"], &["wood"])])],
        ))
        .unwrap();
        let err = b.build().unwrap_err();
        assert!(
            matches!(err, CatalogError::UnresolvedGroupType { ref group, ref name } if group == "wood" && name == "nonexistent_type"),
            "got: {err:?}"
        );
    }

    // -----------------------------------------------------------------------
    // Re-linking
    // -----------------------------------------------------------------------

    #[test]
    fn relink_does_not_accumulate() {
        let mut b = woods();
        b.put_group(make_group("wood", &["oak", "ash"])).unwrap();
        b.put_recipe(make_recipe(
            "bow",
            vec![make_component("limb", vec![make_property("material", &["maple"], &["wood"])])],
        ))
        .unwrap();

        b.link().unwrap();
        let first = b.clone();
        b.link().unwrap();

        assert_eq!(b.get_group(PropertyTypeGroupId(0)).unwrap().types().len(), 2);
        let limb = &b.get_recipe(RecipeId(0)).unwrap().components[0].properties[0];
        assert_eq!(limb.types().len(), 1);
        assert_eq!(limb.type_groups().len(), 1);
        assert_eq!(first.build().unwrap(), b.build().unwrap());
    }
}
