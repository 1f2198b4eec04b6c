//! # Drag And Drop Dispatch
//!
//! The UI layer owns the gesture (begin, update, ghost rendering). When it
//! ends it calls one of the two functions here, which pick the matching
//! station operation.
//!
//! | Dragged from | Dropped on        | Operation                        |
//! |--------------|-------------------|----------------------------------|
//! | inventory    | any slot          | `place_into_slot` (Output → B)   |
//! | output       | ingredient slot   | `move_output_into_ingredient`    |
//! | ingredient   | other ingredient  | `move_ingredient_to_ingredient`  |
//! | ingredient   | output            | `move_ingredient_to_ingredient`  |
//! | output       | outside all slots | `claim_output_to_inventory`      |
//! | ingredient   | outside all slots | `return_ingredient`              |

use mutagen_core::ItemId;

use crate::error::StationError;
use crate::inventory::{Inventory, Pool};
use crate::report::{Operation, StationReport};
use crate::roller::ChanceRoller;
use crate::slots::SlotId;
use crate::station::FusionStation;

/// Where a dragged stack came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOrigin {
    /// An inventory pool.
    Inventory(Pool),
    /// One of the station slots.
    Slot(SlotId),
}

/// The stack under the pointer when a drag ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DraggedStack {
    /// Where the drag started.
    pub origin: DragOrigin,
    /// The dragged item.
    pub item: ItemId,
    /// Units dragged.
    pub count: u32,
}

impl DraggedStack {
    /// A stack dragged out of an inventory pool.
    #[must_use]
    pub const fn from_inventory(pool: Pool, item: ItemId, count: u32) -> Self {
        Self {
            origin: DragOrigin::Inventory(pool),
            item,
            count,
        }
    }

    /// A stack dragged out of a station slot.
    #[must_use]
    pub const fn from_slot(slot: SlotId, item: ItemId, count: u32) -> Self {
        Self {
            origin: DragOrigin::Slot(slot),
            item,
            count,
        }
    }
}

impl<I: Inventory, R: ChanceRoller> FusionStation<I, R> {
    /// A drag ended over `target`.
    pub fn handle_drop(&mut self, target: SlotId, dragged: DraggedStack) -> StationReport {
        match dragged.origin {
            DragOrigin::Inventory(pool) => {
                self.place_into_slot(target, dragged.item, dragged.count, pool)
            }
            DragOrigin::Slot(SlotId::Output) => {
                if target == SlotId::Output {
                    self.same_slot(Operation::MoveOutputIntoIngredient, target)
                } else {
                    self.move_output_into_ingredient(target)
                }
            }
            DragOrigin::Slot(source) => {
                // Dropping an ingredient on Output lands in IngredientB.
                let destination = if target == SlotId::Output {
                    SlotId::IngredientB
                } else {
                    target
                };
                if destination == source {
                    self.same_slot(Operation::MoveIngredientToIngredient, source)
                } else {
                    self.move_ingredient_to_ingredient(source)
                }
            }
        }
    }

    /// A drag that started on `source` ended outside all three slots.
    pub fn handle_drag_end_outside_all_slots(&mut self, source: SlotId) -> StationReport {
        match source {
            SlotId::Output => self.claim_output_to_inventory(),
            SlotId::IngredientA | SlotId::IngredientB => self.return_ingredient(source),
        }
    }

    fn same_slot(&self, operation: Operation, slot: SlotId) -> StationReport {
        tracing::debug!("Drop on origin slot {} ignored", slot);
        StationReport::rejected(operation, *self.slots(), StationError::SameSlot(slot))
    }
}
