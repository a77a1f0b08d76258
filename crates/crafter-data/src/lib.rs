//! Data files for the crafter catalog.
//!
//! Reads recipes, property types and property type groups from RON, JSON or
//! TOML files, then hands them to [`crafter_catalog`] to be linked.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crafter_data::{LoadConfig, load_catalog_dir};
//!
//! let catalog = load_catalog_dir(Path::new("data/"), &LoadConfig::default())?;
//! let ring = catalog.recipe("ring").unwrap();
//! ```

pub mod config;
pub mod format;
pub mod loader;
pub mod schema;
pub mod source;

#[cfg(test)]
mod test_support;

pub use config::LoadConfig;
pub use loader::{DataLoadError, load_catalog, load_catalog_dir};
pub use source::{DirSource, MemorySource, RecordSource};
