//! Crafter Catalog -- the linked, read-only store of item recipes and the
//! property types they draw from.
//!
//! Records reference each other by name. A [`catalog::CatalogBuilder`]
//! collects them, the link passes resolve every name into a typed arena id,
//! and the result is frozen into an immutable [`catalog::Catalog`].
//!
//! # Two-Pass Linking
//!
//! 1. **Groups** -- every [`model::PropertyTypeGroup`] resolves its type
//!    references against the property-type table.
//! 2. **Recipes** -- every [`model::Property`] of every component resolves its
//!    type references, then its group references against the already linked
//!    group table.
//!
//! ```rust,ignore
//! let mut builder = CatalogBuilder::new();
//! builder.put_property_type(PropertyType::new("oak"))?;
//! builder.put_group(PropertyTypeGroup::new("wood", vec!["oak".into()]))?;
//! let catalog = builder.build()?;
//! ```
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Frozen name-keyed tables with id-based traversal.
//! - [`catalog::CatalogBuilder`] -- Insertion phase and link passes.
//! - [`catalog::CatalogError`] -- Unresolved references and duplicate names.
//! - [`factor::Factor`] -- Multiplicative scalar applied to base value/weight.

pub mod catalog;
pub mod factor;
pub mod id;
pub mod link;
pub mod model;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use catalog::{Catalog, CatalogBuilder, CatalogError, DuplicatePolicy, Entry, EntryKind, EntryRef};
pub use factor::{Factor, ValueTier};
pub use id::{PropertyTypeGroupId, PropertyTypeId, RecipeId};
pub use model::{Component, Property, PropertyType, PropertyTypeGroup, Recipe, TypeVariant};
