use crate::id::*;
use crate::model::{Property, PropertyType, PropertyTypeGroup, Recipe};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// The three name-keyed tables of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Recipe,
    PropertyType,
    PropertyTypeGroup,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Recipe => "recipe",
            EntryKind::PropertyType => "property type",
            EntryKind::PropertyTypeGroup => "property type group",
        };
        f.write_str(label)
    }
}

/// An owned record headed for one of the catalog tables.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Recipe(Recipe),
    PropertyType(PropertyType),
    PropertyTypeGroup(PropertyTypeGroup),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Recipe(_) => EntryKind::Recipe,
            Entry::PropertyType(_) => EntryKind::PropertyType,
            Entry::PropertyTypeGroup(_) => EntryKind::PropertyTypeGroup,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Recipe(r) => &r.name,
            Entry::PropertyType(t) => &t.name,
            Entry::PropertyTypeGroup(g) => &g.name,
        }
    }
}

/// A borrowed record returned by [`Catalog::get`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryRef<'a> {
    Recipe(&'a Recipe),
    PropertyType(&'a PropertyType),
    PropertyTypeGroup(&'a PropertyTypeGroup),
}

/// What to do when a record arrives under a name already in its table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the load with [`CatalogError::DuplicateName`].
    #[default]
    Reject,
    /// Keep the later record under the existing id.
    Replace,
}

// ===========================================================================
// Builder
// ===========================================================================

/// Mutable catalog under construction.
/// Two-phase lifecycle: insertion (`put_*`) -> linking ([`CatalogBuilder::build`]).
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    policy: DuplicatePolicy,
    pub(crate) types: Vec<PropertyType>,
    pub(crate) type_name_to_id: HashMap<String, PropertyTypeId>,
    pub(crate) groups: Vec<PropertyTypeGroup>,
    pub(crate) group_name_to_id: HashMap<String, PropertyTypeGroupId>,
    pub(crate) recipes: Vec<Recipe>,
    pub(crate) recipe_name_to_id: HashMap<String, RecipeId>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            types: Vec::new(),
            type_name_to_id: HashMap::new(),
            groups: Vec::new(),
            group_name_to_id: HashMap::new(),
            recipes: Vec::new(),
            recipe_name_to_id: HashMap::new(),
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Insert a property type under its name. Returns its ID.
    pub fn put_property_type(&mut self, record: PropertyType) -> Result<PropertyTypeId, CatalogError> {
        let name = record.name.clone();
        put_entry(
            self.policy,
            EntryKind::PropertyType,
            &mut self.types,
            &mut self.type_name_to_id,
            name,
            record,
        )
    }

    /// Insert a property type group under its name. Returns its ID.
    pub fn put_group(&mut self, record: PropertyTypeGroup) -> Result<PropertyTypeGroupId, CatalogError> {
        let name = record.name.clone();
        put_entry(
            self.policy,
            EntryKind::PropertyTypeGroup,
            &mut self.groups,
            &mut self.group_name_to_id,
            name,
            record,
        )
    }

    /// Insert a recipe under its name. Returns its ID.
    pub fn put_recipe(&mut self, record: Recipe) -> Result<RecipeId, CatalogError> {
        let name = record.name.clone();
        put_entry(
            self.policy,
            EntryKind::Recipe,
            &mut self.recipes,
            &mut self.recipe_name_to_id,
            name,
            record,
        )
    }

    /// Insert any record into the table matching its kind.
    pub fn put(&mut self, entry: Entry) -> Result<(), CatalogError> {
        match entry {
            Entry::Recipe(r) => self.put_recipe(r).map(|_| ()),
            Entry::PropertyType(t) => self.put_property_type(t).map(|_| ()),
            Entry::PropertyTypeGroup(g) => self.put_group(g).map(|_| ()),
        }
    }

    pub fn property_type_id(&self, name: &str) -> Option<PropertyTypeId> {
        self.type_name_to_id.get(name).copied()
    }

    pub fn group_id(&self, name: &str) -> Option<PropertyTypeGroupId> {
        self.group_name_to_id.get(name).copied()
    }

    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    pub fn get_group(&self, id: PropertyTypeGroupId) -> Option<&PropertyTypeGroup> {
        self.groups.get(id.index())
    }

    pub fn get_recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id.index())
    }

    /// Run both link passes, groups first. Safe to call again: resolved id
    /// lists are rebuilt from the name references every time.
    pub fn link(&mut self) -> Result<(), CatalogError> {
        self.link_groups()?;
        self.link_recipes()
    }

    /// Link and freeze into an immutable catalog.
    pub fn build(mut self) -> Result<Catalog, CatalogError> {
        self.link()?;

        Ok(Catalog {
            types: self.types,
            type_name_to_id: self.type_name_to_id,
            groups: self.groups,
            group_name_to_id: self.group_name_to_id,
            recipes: self.recipes,
            recipe_name_to_id: self.recipe_name_to_id,
        })
    }
}

fn put_entry<T, I: ArenaId + fmt::Display>(
    policy: DuplicatePolicy,
    kind: EntryKind,
    table: &mut Vec<T>,
    names: &mut HashMap<String, I>,
    name: String,
    record: T,
) -> Result<I, CatalogError> {
    if let Some(&id) = names.get(&name) {
        return match policy {
            DuplicatePolicy::Reject => Err(CatalogError::DuplicateName { kind, name }),
            DuplicatePolicy::Replace => {
                tracing::warn!(%kind, %name, %id, "replacing earlier record with the same name");
                table[id.index()] = record;
                Ok(id)
            }
        };
    }

    let id = I::from_index(table.len());
    tracing::trace!(%kind, %name, %id, "catalog entry added");
    table.push(record);
    names.insert(name, id);
    Ok(id)
}

// ===========================================================================
// Frozen catalog
// ===========================================================================

/// Immutable, fully linked catalog. Frozen after build(). Thread-safe to share.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    types: Vec<PropertyType>,
    type_name_to_id: HashMap<String, PropertyTypeId>,
    groups: Vec<PropertyTypeGroup>,
    group_name_to_id: HashMap<String, PropertyTypeGroupId>,
    recipes: Vec<Recipe>,
    recipe_name_to_id: HashMap<String, RecipeId>,
}

impl Catalog {
    pub fn get_property_type(&self, id: PropertyTypeId) -> Option<&PropertyType> {
        self.types.get(id.index())
    }

    pub fn get_group(&self, id: PropertyTypeGroupId) -> Option<&PropertyTypeGroup> {
        self.groups.get(id.index())
    }

    pub fn get_recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id.index())
    }

    pub fn property_type_id(&self, name: &str) -> Option<PropertyTypeId> {
        self.type_name_to_id.get(name).copied()
    }

    pub fn group_id(&self, name: &str) -> Option<PropertyTypeGroupId> {
        self.group_name_to_id.get(name).copied()
    }

    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    pub fn property_type(&self, name: &str) -> Option<&PropertyType> {
        self.property_type_id(name)
            .and_then(|id| self.get_property_type(id))
    }

    pub fn group(&self, name: &str) -> Option<&PropertyTypeGroup> {
        self.group_id(name).and_then(|id| self.get_group(id))
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipe_id(name).and_then(|id| self.get_recipe(id))
    }

    /// Exact, case-sensitive lookup in the table for `kind`.
    pub fn get(&self, kind: EntryKind, name: &str) -> Result<EntryRef<'_>, CatalogError> {
        let found = match kind {
            EntryKind::Recipe => self.recipe(name).map(EntryRef::Recipe),
            EntryKind::PropertyType => self.property_type(name).map(EntryRef::PropertyType),
            EntryKind::PropertyTypeGroup => self.group(name).map(EntryRef::PropertyTypeGroup),
        };
        found.ok_or_else(|| CatalogError::NotFound {
            kind,
            name: name.to_string(),
        })
    }

    pub fn contains(&self, kind: EntryKind, name: &str) -> bool {
        match kind {
            EntryKind::Recipe => self.recipe_name_to_id.contains_key(name),
            EntryKind::PropertyType => self.type_name_to_id.contains_key(name),
            EntryKind::PropertyTypeGroup => self.group_name_to_id.contains_key(name),
        }
    }

    pub fn property_type_count(&self) -> usize {
        self.types.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Property types in insertion order.
    pub fn property_types(&self) -> impl Iterator<Item = (PropertyTypeId, &PropertyType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (PropertyTypeId::from_index(i), t))
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (PropertyTypeGroupId, &PropertyTypeGroup)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, g)| (PropertyTypeGroupId::from_index(i), g))
    }

    /// Recipes in insertion order.
    pub fn recipes(&self) -> impl Iterator<Item = (RecipeId, &Recipe)> {
        self.recipes
            .iter()
            .enumerate()
            .map(|(i, r)| (RecipeId::from_index(i), r))
    }

    /// Members of a linked group.
    pub fn group_types<'a>(
        &'a self,
        group: &'a PropertyTypeGroup,
    ) -> impl Iterator<Item = &'a PropertyType> + 'a {
        group
            .types()
            .iter()
            .filter_map(|&id| self.get_property_type(id))
    }

    /// Types a property references directly.
    pub fn direct_types<'a>(&'a self, property: &'a Property) -> impl Iterator<Item = &'a PropertyType> + 'a {
        property
            .types()
            .iter()
            .filter_map(|&id| self.get_property_type(id))
    }

    /// Groups a property references.
    pub fn type_groups<'a>(
        &'a self,
        property: &'a Property,
    ) -> impl Iterator<Item = &'a PropertyTypeGroup> + 'a {
        property
            .type_groups()
            .iter()
            .filter_map(|&id| self.get_group(id))
    }

    /// Every type a property can take: direct types first, then group members
    /// in group order. A type reachable more than once appears only at its
    /// first position.
    pub fn candidate_types(&self, property: &Property) -> Vec<(PropertyTypeId, &PropertyType)> {
        let via_groups = property
            .type_groups()
            .iter()
            .filter_map(|&gid| self.get_group(gid))
            .flat_map(|g| g.types().iter().copied());

        let mut seen = HashSet::new();
        property
            .types()
            .iter()
            .copied()
            .chain(via_groups)
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.get_property_type(id).map(|t| (id, t)))
            .collect()
    }
}

// ===========================================================================
// Errors
// ===========================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// A group lists a property type that is not in the catalog.
    #[error("unresolved property type '{name}' in group '{group}'")]
    UnresolvedGroupType { group: String, name: String },

    /// A recipe property references a type or group that is not in the catalog.
    #[error(
        "unresolved {expected_kind} '{name}' in recipe '{recipe}', component '{component}', property '{property}'"
    )]
    UnresolvedPropertyRef {
        recipe: String,
        component: String,
        property: String,
        name: String,
        expected_kind: EntryKind,
    },

    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: EntryKind, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntryKind, name: String },
}

impl CatalogError {
    /// The reference or entry name the error is about.
    pub fn name(&self) -> &str {
        match self {
            CatalogError::UnresolvedGroupType { name, .. }
            | CatalogError::UnresolvedPropertyRef { name, .. }
            | CatalogError::DuplicateName { name, .. }
            | CatalogError::NotFound { name, .. } => name,
        }
    }
}
