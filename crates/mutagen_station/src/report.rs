//! # Station Reports
//!
//! Every mutating station operation returns a [`StationReport`] instead of
//! firing events. The caller re-renders from [`StationReport::slots`] and
//! recomputes player stats when [`StationReport::inventory_changed`] is set.

use mutagen_core::{format_percent, ItemCatalog, ItemId};

use crate::error::StationError;
use crate::slots::{IngredientStack, SlotId, Slots};

/// The operation a report describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Stage an inventory stack into a slot.
    Place,
    /// Roll a fusion.
    Merge,
    /// Return ingredients, discard output.
    ClearAll,
    /// Reuse the output as an ingredient.
    MoveOutputIntoIngredient,
    /// Move a staged stack to the other ingredient slot.
    MoveIngredientToIngredient,
    /// Move the output into inventory.
    ClaimOutput,
    /// Return a single ingredient slot.
    ReturnIngredient,
    /// Return ingredients, keep output.
    CloseStation,
}

/// Placement that asked for more than the inventory held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortfall {
    /// The item being placed.
    pub item: ItemId,
    /// Units staged in the slot.
    pub requested: u32,
    /// Units actually removed from the "all" pool.
    pub removed: u32,
}

impl Shortfall {
    /// Units staged but never paid for.
    #[inline]
    #[must_use]
    pub const fn missing(&self) -> u32 {
        self.requested - self.removed
    }
}

/// The outcome of one merge roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeOutcome {
    /// Success chance in `[0, 100]`.
    pub chance: f32,
    /// The uniform draw in `[0, 100]`.
    pub draw: f32,
    /// `draw <= chance`.
    pub success: bool,
    /// The new composite, on success.
    pub product: Option<ItemId>,
}

impl MergeOutcome {
    /// Chance label with the outcome suffix, e.g. `"Success: 45% (Failed)"`.
    #[must_use]
    pub fn label(&self) -> String {
        let suffix = if self.success { "(Success)" } else { "(Failed)" };
        format!("{} {suffix}", chance_label(Some(self.chance)))
    }
}

/// What one station operation changed.
#[derive(Clone, Debug, PartialEq)]
pub struct StationReport {
    /// The operation that ran.
    pub operation: Operation,
    /// Set when a precondition failed; nothing else changed.
    pub rejection: Option<StationError>,
    /// Slots whose contents changed.
    pub changed_slots: Vec<SlotId>,
    /// Net inventory changes (item, delta: positive=added, negative=removed).
    pub item_changes: Vec<(ItemId, i64)>,
    /// Units the inventory refused while returning or claiming.
    pub lost: Vec<(ItemId, u32)>,
    /// Set when a placement could not be fully paid for.
    pub shortfall: Option<Shortfall>,
    /// Set by a merge that rolled.
    pub merge: Option<MergeOutcome>,
    /// Slot contents after the operation.
    pub slots: Slots,
}

impl StationReport {
    pub(crate) fn new(operation: Operation, slots: Slots) -> Self {
        Self {
            operation,
            rejection: None,
            changed_slots: Vec::new(),
            item_changes: Vec::new(),
            lost: Vec::new(),
            shortfall: None,
            merge: None,
            slots,
        }
    }

    pub(crate) fn rejected(operation: Operation, slots: Slots, error: StationError) -> Self {
        let mut report = Self::new(operation, slots);
        report.rejection = Some(error);
        report
    }

    /// Returns true if a precondition failed.
    #[inline]
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Returns true if any slot changed.
    #[inline]
    #[must_use]
    pub fn slots_changed(&self) -> bool {
        !self.changed_slots.is_empty()
    }

    /// Returns true if the inventory changed (stats need recomputing).
    #[inline]
    #[must_use]
    pub fn inventory_changed(&self) -> bool {
        !self.item_changes.is_empty()
    }

    /// Net inventory change of one item.
    #[must_use]
    pub fn delta_of(&self, item: ItemId) -> i64 {
        self.item_changes
            .iter()
            .filter(|(id, _)| *id == item)
            .map(|(_, delta)| *delta)
            .sum()
    }

    /// Units of one item lost to inventory rejections.
    #[must_use]
    pub fn lost_of(&self, item: ItemId) -> u32 {
        self.lost
            .iter()
            .filter(|(id, _)| *id == item)
            .map(|(_, count)| *count)
            .sum()
    }

    pub(crate) fn mark_changed(&mut self, slot: SlotId) {
        if !self.changed_slots.contains(&slot) {
            self.changed_slots.push(slot);
        }
    }

    pub(crate) fn record_change(&mut self, item: ItemId, delta: i64) {
        if delta == 0 {
            return;
        }
        if let Some(entry) = self.item_changes.iter_mut().find(|(id, _)| *id == item) {
            entry.1 += delta;
        } else {
            self.item_changes.push((item, delta));
        }
        self.item_changes.retain(|(_, d)| *d != 0);
    }

    pub(crate) fn record_lost(&mut self, item: ItemId, count: u32) {
        if count == 0 {
            return;
        }
        if let Some(entry) = self.lost.iter_mut().find(|(id, _)| *id == item) {
            entry.1 += count;
        } else {
            self.lost.push((item, count));
        }
    }
}

/// Slot label: `"Name"` for one unit, `"Name xN"` otherwise.
#[must_use]
pub fn display_label(catalog: &ItemCatalog, stack: &IngredientStack) -> String {
    let name = catalog
        .name(stack.item())
        .map_or_else(|| stack.item().to_string(), str::to_owned);
    if stack.count() > 1 {
        format!("{name} x{}", stack.count())
    } else {
        name
    }
}

/// Chance label: `"Success: 45%"`, or `"Success: --"` with no pair staged.
#[must_use]
pub fn chance_label(chance: Option<f32>) -> String {
    match chance {
        Some(value) => format!("Success: {}%", format_percent(value)),
        None => "Success: --".to_owned(),
    }
}
