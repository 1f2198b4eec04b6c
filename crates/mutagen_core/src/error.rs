//! # Catalog Error Types
//!
//! Errors raised while building the item catalog. Evaluation of an item that
//! is already in the catalog cannot fail.

use thiserror::Error;

use crate::catalog::ItemId;

/// Errors that can occur while building or extending the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A base item was declared with a stability outside `[0, 100]`.
    #[error("stability {stability} of item '{name}' is outside [0, 100]")]
    StabilityOutOfRange {
        /// Name of the offending item.
        name: String,
        /// The rejected value.
        stability: f32,
    },

    /// A composite referenced an item the catalog does not hold.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// A composite was built from an empty source list.
    #[error("composite must have at least one source")]
    EmptySources,

    /// A composite source carried a count of zero.
    #[error("source {0} has a count of zero")]
    ZeroSourceCount(ItemId),

    /// Two base items share a name.
    #[error("duplicate item name: {0}")]
    DuplicateName(String),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
