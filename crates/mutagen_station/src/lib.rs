//! # MUTAGEN Station
//!
//! The fusion bench: two ingredient slots, one output slot, and the
//! transactions that move items between them and the player's inventory.
//!
//! ## Design Principles
//!
//! 1. **Reports, not events** - every operation returns a [`StationReport`]
//!    describing what changed; the caller refreshes UI and stats from it
//! 2. **Recoverable preconditions** - nothing here panics or returns `Err`
//!    once the station is built
//! 3. **Deterministic rolls** - one seeded ChaCha stream drives every merge
//! 4. **External configuration** - station policy and base items in TOML
//!
//! ## Example
//!
//! ```rust,ignore
//! use mutagen_station::{DraggedStack, FusionConfig, FusionStation, Pool, PooledInventory, SlotId};
//!
//! let config = FusionConfig::load("data/fusion.toml")?;
//! let catalog = config.build_catalog()?;
//! let wing = catalog.find_by_name("Honey Wing").unwrap();
//!
//! let mut station = FusionStation::new(catalog, PooledInventory::new(), config.station);
//! station.inventory_mut().add_units(wing, 3);
//!
//! let report = station.handle_drop(SlotId::IngredientA, DraggedStack::from_inventory(Pool::Active, wing, 3));
//! assert!(report.inventory_changed());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod drag;
pub mod error;
pub mod inventory;
pub mod report;
pub mod roller;
pub mod slots;
pub mod station;

pub use config::{FusionConfig, StationConfig, SupplyPolicy, DEFAULT_SEED};
pub use drag::{DragOrigin, DraggedStack};
pub use error::{StationError, StationResult};
pub use inventory::{Inventory, ItemStack, Pool, PooledInventory, MAX_ACTIVE_ITEMS, MAX_INVENTORY_SLOTS};
pub use report::{chance_label, display_label, MergeOutcome, Operation, Shortfall, StationReport};
pub use roller::{ChanceRoller, SeededRoller};
pub use slots::{IngredientStack, SlotId, Slots};
pub use station::FusionStation;
