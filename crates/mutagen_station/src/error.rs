//! # Station Error Types
//!
//! Precondition failures of slot operations are never returned as `Err`:
//! the operation becomes a no-op and the error is carried in the
//! [`StationReport`](crate::report::StationReport). Only setup (config
//! loading) returns `Result`.

use mutagen_core::{CatalogError, ItemId};
use thiserror::Error;

use crate::slots::SlotId;

/// Errors that can occur in the fusion station.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StationError {
    /// A placement asked for zero units.
    #[error("placement count must be at least 1")]
    ZeroCount,

    /// Merge was requested without two staged ingredients.
    #[error("merge needs two ingredients")]
    MissingIngredients,

    /// The output slot holds nothing to move or claim.
    #[error("output slot is empty")]
    OutputEmpty,

    /// The ingredient slot holds nothing to move or return.
    #[error("ingredient slot {0} is empty")]
    IngredientEmpty(SlotId),

    /// The operation only accepts an ingredient slot.
    #[error("{0} is not an ingredient slot")]
    NotAnIngredientSlot(SlotId),

    /// Source and destination are the same slot.
    #[error("cannot move {0} onto itself")]
    SameSlot(SlotId),

    /// Strict supply policy: the inventory cannot cover the placement.
    #[error("insufficient supply of item {item}: need {required}, have {available}")]
    InsufficientSupply {
        /// The item being placed.
        item: ItemId,
        /// The amount requested.
        required: u32,
        /// The amount the inventory holds.
        available: u32,
    },

    /// The catalog rejected an item or a fusion product.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for station setup.
pub type StationResult<T> = Result<T, StationError>;
