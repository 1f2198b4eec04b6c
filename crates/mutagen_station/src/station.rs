//! # Fusion Station
//!
//! **Owns the three slots and is the only code that touches the inventory.**
//!
//! ## Rules
//!
//! 1. **Pay on placement** - staged units leave the inventory when placed,
//!    not when merged
//! 2. **Displace, never mix** - placing a different item first returns the
//!    current occupant, one `add_item` per unit
//! 3. **Output is merge-only** - written only by a successful merge, cleared
//!    only by a claim, a clear, a move into an ingredient slot, or a new merge
//! 4. **No panics, no `Err`** - a failed precondition is a no-op carried in
//!    the returned [`StationReport`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use mutagen_station::{FusionStation, PooledInventory, Pool, SlotId, StationConfig};
//!
//! let mut station = FusionStation::new(catalog, PooledInventory::new(), StationConfig::default());
//! station.place_into_slot(SlotId::IngredientA, wing, 2, Pool::Active);
//! station.place_into_slot(SlotId::IngredientB, fang, 1, Pool::All);
//!
//! let report = station.merge();
//! if let Some(outcome) = report.merge {
//!     println!("{}", outcome.label());
//! }
//! station.claim_output_to_inventory();
//! ```

use mutagen_core::{
    chance_breakdown, CatalogError, ChanceBreakdown, ItemCatalog, ItemId, SourceStack,
};
use tracing::{debug, info, warn};

use crate::config::{StationConfig, SupplyPolicy};
use crate::error::StationError;
use crate::inventory::{Inventory, Pool};
use crate::report::{chance_label, display_label, MergeOutcome, Operation, Shortfall, StationReport};
use crate::roller::{ChanceRoller, SeededRoller};
use crate::slots::{IngredientStack, SlotId, Slots};

/// The fusion station: two ingredient slots, one output slot.
pub struct FusionStation<I: Inventory, R: ChanceRoller = SeededRoller> {
    /// Base items plus every composite created so far.
    catalog: ItemCatalog,
    /// The inventory collaborator.
    inventory: I,
    /// Shared pseudorandom source for merge rolls.
    roller: R,
    /// Station policy.
    config: StationConfig,
    /// Slot contents.
    slots: Slots,
}

impl<I: Inventory> FusionStation<I, SeededRoller> {
    /// Creates a station rolling from `config.seed`.
    #[must_use]
    pub fn new(catalog: ItemCatalog, inventory: I, config: StationConfig) -> Self {
        let roller = SeededRoller::new(config.seed);
        Self::with_roller(catalog, inventory, config, roller)
    }
}

impl<I: Inventory, R: ChanceRoller> FusionStation<I, R> {
    /// Creates a station with a custom roller.
    #[must_use]
    pub fn with_roller(catalog: ItemCatalog, inventory: I, config: StationConfig, roller: R) -> Self {
        Self {
            catalog,
            inventory,
            roller,
            config,
            slots: Slots::new(),
        }
    }

    // ===================== Queries =====================

    /// Contents of one slot.
    #[inline]
    #[must_use]
    pub fn slot(&self, slot: SlotId) -> Option<IngredientStack> {
        self.slots.get(slot)
    }

    /// Contents of all slots.
    #[inline]
    #[must_use]
    pub const fn slots(&self) -> &Slots {
        &self.slots
    }

    /// The unclaimed fusion result.
    #[inline]
    #[must_use]
    pub const fn output(&self) -> Option<ItemId> {
        self.slots.output()
    }

    /// Returns true if both ingredients are staged.
    #[inline]
    #[must_use]
    pub fn can_merge(&self) -> bool {
        self.slots.pair().is_some()
    }

    /// Success chance of the staged pair, or `None` with fewer than two.
    #[must_use]
    pub fn current_chance(&self) -> Option<f32> {
        self.chance_breakdown().map(|b| b.chance)
    }

    /// Every factor behind [`Self::current_chance`].
    #[must_use]
    pub fn chance_breakdown(&self) -> Option<ChanceBreakdown> {
        self.slots
            .pair()
            .map(|(a, b)| chance_breakdown(&self.catalog, a.item(), b.item()))
    }

    /// `"Success: 45%"`, or `"Success: --"` with fewer than two ingredients.
    #[must_use]
    pub fn chance_label(&self) -> String {
        chance_label(self.current_chance())
    }

    /// `"Name xN"` label of a slot, or `None` if it is empty.
    #[must_use]
    pub fn slot_label(&self, slot: SlotId) -> Option<String> {
        self.slots
            .get(slot)
            .map(|stack| display_label(&self.catalog, &stack))
    }

    /// The item catalog, including every composite created so far.
    #[inline]
    #[must_use]
    pub const fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// The inventory collaborator.
    #[inline]
    #[must_use]
    pub const fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Mutable access to the inventory (pickups, external edits).
    #[inline]
    pub fn inventory_mut(&mut self) -> &mut I {
        &mut self.inventory
    }

    /// Station policy.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &StationConfig {
        &self.config
    }

    // ===================== Operations =====================

    /// Stages `count` units of `item` into `slot`, paying for them now.
    ///
    /// Placing onto `Output` stages into `IngredientB`. A different item
    /// already in the slot is returned to inventory first; the same item
    /// stacks. Units come out of the active pool when `origin` is
    /// [`Pool::Active`] and always out of the "all" pool.
    pub fn place_into_slot(
        &mut self,
        slot: SlotId,
        item: ItemId,
        count: u32,
        origin: Pool,
    ) -> StationReport {
        if count == 0 {
            return self.reject(Operation::Place, StationError::ZeroCount);
        }
        if self.catalog.get(item).is_none() {
            return self.reject(
                Operation::Place,
                StationError::Catalog(CatalogError::UnknownItem(item)),
            );
        }

        let target = if slot == SlotId::Output {
            SlotId::IngredientB
        } else {
            slot
        };

        if self.config.supply_policy == SupplyPolicy::Strict {
            let available = self.inventory.count(Pool::All, item);
            if available < count {
                warn!(
                    "Rejected placement of {} x{} into {}: only {} owned",
                    item, count, target, available
                );
                return self.reject(
                    Operation::Place,
                    StationError::InsufficientSupply {
                        item,
                        required: count,
                        available,
                    },
                );
            }
        }

        let mut report = StationReport::new(Operation::Place, self.slots);

        if let Some(current) = self.slots.get(target) {
            if current.item() != item {
                self.displace(target, &mut report);
            }
        }

        if origin == Pool::Active {
            self.inventory.remove_up_to(Pool::Active, item, count);
        }
        let removed = self.inventory.remove_up_to(Pool::All, item, count);
        report.record_change(item, -i64::from(removed));

        if removed < count {
            warn!(
                "Placed {} x{} into {} but inventory only supplied {}",
                item, count, target, removed
            );
            report.shortfall = Some(Shortfall {
                item,
                requested: count,
                removed,
            });
        }

        if let Some(stack) = IngredientStack::new(item, count) {
            self.slots.stack_into(target, stack);
        }
        report.mark_changed(target);

        debug!("Placed {} x{} into {}", item, count, target);
        self.finish(report)
    }

    /// Rolls a fusion of the two staged ingredients.
    ///
    /// Success creates a composite from both stacks and puts it in
    /// `Output`. Failure destroys both stacks when `consume_on_fail` is set,
    /// otherwise returns them; `Output` ends up empty. Either way the
    /// ingredient slots are cleared.
    pub fn merge(&mut self) -> StationReport {
        let Some((a, b)) = self.slots.pair() else {
            return self.reject(Operation::Merge, StationError::MissingIngredients);
        };

        let chance = chance_breakdown(&self.catalog, a.item(), b.item()).chance;
        let draw = self.roller.roll();
        let success = draw <= chance;

        let mut report = StationReport::new(Operation::Merge, self.slots);

        let product = if success {
            let sources = vec![
                SourceStack::new(a.item(), a.count()),
                SourceStack::new(b.item(), b.count()),
            ];
            match self.catalog.add_composite(sources) {
                Ok(id) => Some(id),
                Err(e) => return self.reject(Operation::Merge, StationError::Catalog(e)),
            }
        } else {
            None
        };

        for slot in SlotId::INGREDIENTS {
            if let Some(stack) = self.slots.take_ingredient(slot) {
                if !success && !self.config.consume_on_fail {
                    self.return_stack(stack, &mut report);
                }
                report.mark_changed(slot);
            }
        }

        if let Some(previous) = self.slots.output() {
            warn!("Unclaimed output {} discarded by merge", previous);
        }
        if product.is_some() || self.slots.output().is_some() {
            report.mark_changed(SlotId::Output);
        }
        self.slots.set_output(product);

        if let Some(id) = product {
            info!(
                "Merge SUCCESS at {}% (draw {}): {}",
                chance,
                draw,
                self.catalog.name(id).unwrap_or_default()
            );
        } else {
            info!(
                "Merge FAILED at {}% (draw {}), ingredients {}",
                chance,
                draw,
                if self.config.consume_on_fail {
                    "consumed"
                } else {
                    "returned"
                }
            );
        }
        report.merge = Some(MergeOutcome {
            chance,
            draw,
            success,
            product,
        });

        self.finish(report)
    }

    /// Returns both ingredients to inventory and discards the output.
    pub fn clear_all(&mut self) -> StationReport {
        let mut report = StationReport::new(Operation::ClearAll, self.slots);

        self.return_ingredients(&mut report);
        if let Some(discarded) = self.slots.take_output() {
            debug!("Discarded unclaimed output {}", discarded);
            report.mark_changed(SlotId::Output);
        }

        self.finish(report)
    }

    /// Moves the output into an ingredient slot as a single unit.
    pub fn move_output_into_ingredient(&mut self, target: SlotId) -> StationReport {
        if !target.is_ingredient() {
            return self.reject(
                Operation::MoveOutputIntoIngredient,
                StationError::NotAnIngredientSlot(target),
            );
        }
        let Some(product) = self.slots.output() else {
            return self.reject(Operation::MoveOutputIntoIngredient, StationError::OutputEmpty);
        };

        let mut report = StationReport::new(Operation::MoveOutputIntoIngredient, self.slots);
        self.stage(target, IngredientStack::single(product), &mut report);
        self.slots.set_output(None);
        report.mark_changed(SlotId::Output);

        debug!("Moved output {} into {}", product, target);
        self.finish(report)
    }

    /// Moves the stack in `from` onto the other ingredient slot.
    ///
    /// A different item there is displaced; the same item stacks.
    pub fn move_ingredient_to_ingredient(&mut self, from: SlotId) -> StationReport {
        let Some(to) = from.other_ingredient() else {
            return self.reject(
                Operation::MoveIngredientToIngredient,
                StationError::NotAnIngredientSlot(from),
            );
        };
        let Some(stack) = self.slots.get(from) else {
            return self.reject(
                Operation::MoveIngredientToIngredient,
                StationError::IngredientEmpty(from),
            );
        };

        let mut report = StationReport::new(Operation::MoveIngredientToIngredient, self.slots);
        self.slots.take_ingredient(from);
        report.mark_changed(from);
        self.stage(to, stack, &mut report);

        debug!("Moved {} x{} from {} to {}", stack.item(), stack.count(), from, to);
        self.finish(report)
    }

    /// Adds the output to inventory and clears it.
    ///
    /// A second call finds the output empty and does nothing.
    pub fn claim_output_to_inventory(&mut self) -> StationReport {
        let Some(product) = self.slots.take_output() else {
            return self.reject(Operation::ClaimOutput, StationError::OutputEmpty);
        };

        let mut report = StationReport::new(Operation::ClaimOutput, self.slots);
        if self.inventory.add_item(product) {
            report.record_change(product, 1);
        } else {
            warn!("Inventory refused claimed output {}; it is lost", product);
            report.record_lost(product, 1);
        }
        report.mark_changed(SlotId::Output);

        debug!("Claimed output {}", product);
        self.finish(report)
    }

    /// Returns one ingredient slot to inventory.
    pub fn return_ingredient(&mut self, slot: SlotId) -> StationReport {
        if !slot.is_ingredient() {
            return self.reject(
                Operation::ReturnIngredient,
                StationError::NotAnIngredientSlot(slot),
            );
        }
        if self.slots.get(slot).is_none() {
            return self.reject(Operation::ReturnIngredient, StationError::IngredientEmpty(slot));
        }

        let mut report = StationReport::new(Operation::ReturnIngredient, self.slots);
        self.displace(slot, &mut report);
        self.finish(report)
    }

    /// Returns both ingredients to inventory; an unclaimed output stays.
    pub fn close_station(&mut self) -> StationReport {
        let mut report = StationReport::new(Operation::CloseStation, self.slots);
        self.return_ingredients(&mut report);
        self.finish(report)
    }

    // ===================== Internals =====================

    /// Puts `stack` into an ingredient slot, displacing a different item.
    fn stage(&mut self, target: SlotId, stack: IngredientStack, report: &mut StationReport) {
        if let Some(current) = self.slots.get(target) {
            if current.item() != stack.item() {
                self.displace(target, report);
            }
        }
        self.slots.stack_into(target, stack);
        report.mark_changed(target);
    }

    /// Empties an ingredient slot back into inventory.
    fn displace(&mut self, slot: SlotId, report: &mut StationReport) {
        if let Some(stack) = self.slots.take_ingredient(slot) {
            debug!("Returning {} x{} from {}", stack.item(), stack.count(), slot);
            self.return_stack(stack, report);
            report.mark_changed(slot);
        }
    }

    fn return_ingredients(&mut self, report: &mut StationReport) {
        for slot in SlotId::INGREDIENTS {
            self.displace(slot, report);
        }
    }

    /// One `add_item` per unit. Refused units are lost.
    fn return_stack(&mut self, stack: IngredientStack, report: &mut StationReport) {
        let mut accepted = 0u32;
        for _ in 0..stack.count() {
            if self.inventory.add_item(stack.item()) {
                accepted += 1;
            }
        }
        report.record_change(stack.item(), i64::from(accepted));

        let lost = stack.count() - accepted;
        if lost > 0 {
            warn!(
                "Inventory refused {} of {} returned units of {}; they are lost",
                lost,
                stack.count(),
                stack.item()
            );
            report.record_lost(stack.item(), lost);
        }
    }

    fn reject(&self, operation: Operation, error: StationError) -> StationReport {
        debug!("{:?} rejected: {}", operation, error);
        StationReport::rejected(operation, self.slots, error)
    }

    fn finish(&self, mut report: StationReport) -> StationReport {
        report.slots = self.slots;
        report
    }
}
