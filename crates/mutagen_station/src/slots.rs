//! # Station Slots
//!
//! Two ingredient slots and one output slot. Each holds at most one stack;
//! a stack never has a zero count.

use mutagen_core::ItemId;
use std::fmt;

/// One of the three station slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotId {
    /// First ingredient.
    IngredientA,
    /// Second ingredient.
    IngredientB,
    /// Unclaimed fusion result.
    Output,
}

impl SlotId {
    /// Both ingredient slots, in order.
    pub const INGREDIENTS: [Self; 2] = [Self::IngredientA, Self::IngredientB];

    /// Returns true for `IngredientA` and `IngredientB`.
    #[inline]
    #[must_use]
    pub const fn is_ingredient(self) -> bool {
        !matches!(self, Self::Output)
    }

    /// The opposite ingredient slot, or `None` for `Output`.
    #[must_use]
    pub const fn other_ingredient(self) -> Option<Self> {
        match self {
            Self::IngredientA => Some(Self::IngredientB),
            Self::IngredientB => Some(Self::IngredientA),
            Self::Output => None,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IngredientA => "IngredientA",
            Self::IngredientB => "IngredientB",
            Self::Output => "Output",
        };
        f.write_str(name)
    }
}

/// An item and a positive count staged in a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IngredientStack {
    item: ItemId,
    count: u32,
}

impl IngredientStack {
    /// Creates a stack. Returns `None` for a zero count.
    #[must_use]
    pub const fn new(item: ItemId, count: u32) -> Option<Self> {
        if count == 0 {
            None
        } else {
            Some(Self { item, count })
        }
    }

    /// A single unit.
    #[inline]
    #[must_use]
    pub const fn single(item: ItemId) -> Self {
        Self { item, count: 1 }
    }

    /// The staged item.
    #[inline]
    #[must_use]
    pub const fn item(&self) -> ItemId {
        self.item
    }

    /// Units staged (always at least 1).
    #[inline]
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Adds units of the same item.
    pub(crate) fn grow(&mut self, extra: u32) {
        self.count = self.count.saturating_add(extra);
    }
}

/// Contents of all three slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slots {
    ingredient_a: Option<IngredientStack>,
    ingredient_b: Option<IngredientStack>,
    output: Option<ItemId>,
}

impl Slots {
    /// Creates three empty slots.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ingredient_a: None,
            ingredient_b: None,
            output: None,
        }
    }

    /// Contents of a slot. The output reads as a single-unit stack.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<IngredientStack> {
        match slot {
            SlotId::IngredientA => self.ingredient_a,
            SlotId::IngredientB => self.ingredient_b,
            SlotId::Output => self.output.map(IngredientStack::single),
        }
    }

    /// The unclaimed fusion result.
    #[inline]
    #[must_use]
    pub const fn output(&self) -> Option<ItemId> {
        self.output
    }

    /// Both ingredients, if both are staged.
    #[must_use]
    pub fn pair(&self) -> Option<(IngredientStack, IngredientStack)> {
        self.ingredient_a.zip(self.ingredient_b)
    }

    /// Returns true if no slot holds anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ingredient_a.is_none() && self.ingredient_b.is_none() && self.output.is_none()
    }

    /// Mutable access to an ingredient slot. `Output` maps to `None`.
    pub(crate) fn ingredient_mut(&mut self, slot: SlotId) -> Option<&mut Option<IngredientStack>> {
        match slot {
            SlotId::IngredientA => Some(&mut self.ingredient_a),
            SlotId::IngredientB => Some(&mut self.ingredient_b),
            SlotId::Output => None,
        }
    }

    /// Stacks onto the same item or replaces whatever the slot held.
    pub(crate) fn stack_into(&mut self, slot: SlotId, stack: IngredientStack) {
        if let Some(current) = self.ingredient_mut(slot) {
            *current = Some(match *current {
                Some(mut existing) if existing.item == stack.item => {
                    existing.grow(stack.count);
                    existing
                }
                _ => stack,
            });
        }
    }

    /// Empties an ingredient slot, returning what it held.
    pub(crate) fn take_ingredient(&mut self, slot: SlotId) -> Option<IngredientStack> {
        self.ingredient_mut(slot).and_then(Option::take)
    }

    pub(crate) fn set_output(&mut self, item: Option<ItemId>) {
        self.output = item;
    }

    pub(crate) fn take_output(&mut self) -> Option<ItemId> {
        self.output.take()
    }
}
