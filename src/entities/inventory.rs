use crate::entities::item::ItemStack;
use serde::{Deserialize, Serialize};

/// Main grid, armor and off-hand.
pub const PLAYER_INVENTORY_SLOTS: usize = 41;

/// Fixed-size slot storage owned by the world: player inventories, chests,
/// barrels and the like.
pub trait Container {
    fn size(&self) -> usize;

    fn item(&self, slot: usize) -> Option<&ItemStack>;

    fn set_item(&mut self, slot: usize, item: Option<ItemStack>) -> Result<(), ContainerError>;

    /// Tells the owner that the contents changed and need to be persisted.
    fn set_changed(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    #[error("slot {slot} out of range for container of size {size}")]
    SlotOutOfRange { slot: usize, size: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
    #[serde(skip)]
    changed: bool,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_size(PLAYER_INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn with_size(size: usize) -> Self {
        Self {
            slots: vec![None; size],
            changed: false,
        }
    }

    pub fn from_slots(slots: Vec<Option<ItemStack>>) -> Self {
        Self {
            slots,
            changed: false,
        }
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    pub fn slot(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(|entry| entry.as_ref())
    }

    pub fn set_slot(&mut self, slot: usize, item: Option<ItemStack>) -> Result<(), ContainerError> {
        let size = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(ContainerError::SlotOutOfRange { slot, size })?;
        *entry = item;
        Ok(())
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Clears the changed flag, returning its previous value.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

impl Container for Inventory {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.slot(slot)
    }

    fn set_item(&mut self, slot: usize, item: Option<ItemStack>) -> Result<(), ContainerError> {
        self.set_slot(slot, item)
    }

    fn set_changed(&mut self) {
        self.changed = true;
    }
}
