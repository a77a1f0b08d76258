use std::fmt;

/// Arena-index conversion shared by the catalog id types.
pub trait ArenaId: Copy {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl ArenaId for $name {
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifies a property type in the catalog. Cheap to copy and compare.
    PropertyTypeId,
    "type"
);

arena_id!(
    /// Identifies a property type group in the catalog.
    PropertyTypeGroupId,
    "group"
);

arena_id!(
    /// Identifies a recipe in the catalog.
    RecipeId,
    "recipe"
);
