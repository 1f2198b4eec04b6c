//! # Inventory Contract
//!
//! The station consumes ingredients from, and returns them to, an external
//! inventory through the [`Inventory`] trait. [`PooledInventory`] is the
//! reference implementation: every pickup is its own entry in the "all"
//! list, and the first few are mirrored into the "active" (equipped) list.

use mutagen_core::ItemId;

/// Maximum entries in a [`PooledInventory`].
pub const MAX_INVENTORY_SLOTS: usize = 64;

/// Maximum entries auto-filled into the active pool.
pub const MAX_ACTIVE_ITEMS: usize = 5;

/// A named inventory pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pool {
    /// The equipped/selected subset.
    Active,
    /// Everything owned.
    All,
}

/// The inventory collaborator.
///
/// The station is the only mutator while it runs; implementations need no
/// synchronization.
pub trait Inventory {
    /// Adds one unit. Returns whether the unit was accepted.
    fn add_item(&mut self, item: ItemId) -> bool;

    /// Removes up to `count` units of `item` from `pool`. Returns how many
    /// were actually removed.
    fn remove_up_to(&mut self, pool: Pool, item: ItemId, count: u32) -> u32;

    /// Counts the units of `item` held in `pool`.
    fn count(&self, pool: Pool, item: ItemId) -> u32;
}

/// A stack of one item type in an inventory list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack {
    /// The item type.
    pub item: ItemId,
    /// Number of units in this stack.
    pub count: u32,
}

impl ItemStack {
    /// Creates a new item stack.
    #[inline]
    #[must_use]
    pub const fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }
}

/// Reference inventory with an "all" list and an "active" list.
#[derive(Clone, Debug)]
pub struct PooledInventory {
    /// Everything owned, one entry per pickup.
    all: Vec<ItemStack>,
    /// Equipped subset.
    active: Vec<ItemStack>,
    /// Maximum entries in `all`.
    capacity: usize,
    /// Maximum entries auto-filled into `active`.
    max_active: usize,
}

impl PooledInventory {
    /// Creates an empty inventory with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(MAX_INVENTORY_SLOTS, MAX_ACTIVE_ITEMS)
    }

    /// Creates an empty inventory with custom limits.
    #[must_use]
    pub fn with_limits(capacity: usize, max_active: usize) -> Self {
        Self {
            all: Vec::with_capacity(capacity),
            active: Vec::with_capacity(max_active),
            capacity,
            max_active,
        }
    }

    /// Returns the number of entries in the "all" list.
    #[inline]
    #[must_use]
    pub fn used_slots(&self) -> usize {
        self.all.len()
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks if the inventory is full.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.all.len() >= self.capacity
    }

    /// Entries of a pool, in insertion order.
    #[must_use]
    pub fn entries(&self, pool: Pool) -> &[ItemStack] {
        match pool {
            Pool::Active => &self.active,
            Pool::All => &self.all,
        }
    }

    /// Adds `count` units one at a time. Returns how many were accepted.
    pub fn add_units(&mut self, item: ItemId, count: u32) -> u32 {
        let mut accepted = 0;
        for _ in 0..count {
            if !self.add_item(item) {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    fn list_mut(&mut self, pool: Pool) -> &mut Vec<ItemStack> {
        match pool {
            Pool::Active => &mut self.active,
            Pool::All => &mut self.all,
        }
    }
}

impl Default for PooledInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory for PooledInventory {
    fn add_item(&mut self, item: ItemId) -> bool {
        if self.is_full() {
            return false;
        }

        self.all.push(ItemStack::new(item, 1));
        if self.active.len() < self.max_active {
            self.active.push(ItemStack::new(item, 1));
        }
        true
    }

    fn remove_up_to(&mut self, pool: Pool, item: ItemId, count: u32) -> u32 {
        let list = self.list_mut(pool);
        let mut removed = 0;

        // Newest entries go first.
        let mut i = list.len();
        while i > 0 && removed < count {
            i -= 1;
            if list[i].item != item {
                continue;
            }

            let take = (count - removed).min(list[i].count);
            list[i].count -= take;
            removed += take;

            if list[i].count == 0 {
                list.remove(i);
            }
        }

        removed
    }

    fn count(&self, pool: Pool, item: ItemId) -> u32 {
        self.entries(pool)
            .iter()
            .filter(|s| s.item == item)
            .map(|s| s.count)
            .sum()
    }
}
