//! # MUTAGEN Core
//!
//! Pure item-fusion math for the MUTAGEN fusion station.
//!
//! ## Design Principles
//!
//! 1. **Acyclic by construction** - fusion products only reference items that
//!    already existed, so evaluation is plain structural recursion
//! 2. **No randomness here** - this crate decides the odds, the station rolls
//! 3. **Constant tables** - compatibility and decay are compiled-in data
//! 4. **External configuration** - base items are declared in TOML files
//!
//! ## Example
//!
//! ```rust,ignore
//! use mutagen_core::{ItemCatalog, ClassTag, success_chance};
//!
//! let mut catalog = ItemCatalog::from_toml_str(&std::fs::read_to_string("data/fusion.toml")?)?;
//! let wing = catalog.find_by_name("Honey Wing").unwrap();
//! let fang = catalog.find_by_name("Mantis Fang").unwrap();
//!
//! let chance = success_chance(&catalog, wing, fang);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod chance;
pub mod error;
pub mod evaluator;
pub mod tables;

pub use catalog::{
    BaseItemConfig, CatalogConfig, ClassSet, ClassTag, ItemCatalog, ItemEntry, ItemId, ItemKind,
    SourceStack,
};
pub use chance::{
    chance_breakdown, clamp_percent, compatibility_percent, format_percent, success_chance,
    ChanceBreakdown,
};
pub use error::{CatalogError, CatalogResult};
pub use evaluator::{class_set_of, depth_of, leaf_tally, stability_of};
pub use tables::{compatibility, decay_for_depth, set_compatibility};
