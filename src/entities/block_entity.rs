use crate::entities::inventory::{Container, ContainerError, Inventory};
use crate::entities::item::ItemStack;
use crate::world::position::Position;
use serde::{Deserialize, Serialize};

/// A block with attached state. Only some of them (chests, barrels, hoppers)
/// carry storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntity {
    pub position: Position,
    pub block: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Inventory>,
    #[serde(skip)]
    dirty: bool,
}

impl BlockEntity {
    pub fn new(position: Position, block: impl Into<String>) -> Self {
        Self {
            position,
            block: block.into(),
            storage: None,
            dirty: false,
        }
    }

    pub fn with_storage(position: Position, block: impl Into<String>, storage: Inventory) -> Self {
        Self {
            storage: Some(storage),
            ..Self::new(position, block)
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// `None` for block entities without storage.
    pub fn storage_mut(&mut self) -> Option<BlockStorage<'_>> {
        let inventory = self.storage.as_mut()?;
        Some(BlockStorage {
            inventory,
            dirty: &mut self.dirty,
        })
    }
}

/// Borrowed view of a block entity's storage. Marking it changed flags the
/// owning block entity for saving.
pub struct BlockStorage<'a> {
    inventory: &'a mut Inventory,
    dirty: &'a mut bool,
}

impl Container for BlockStorage<'_> {
    fn size(&self) -> usize {
        self.inventory.size()
    }

    fn item(&self, slot: usize) -> Option<&ItemStack> {
        self.inventory.slot(slot)
    }

    fn set_item(&mut self, slot: usize, item: Option<ItemStack>) -> Result<(), ContainerError> {
        self.inventory.set_slot(slot, item)
    }

    fn set_changed(&mut self) {
        *self.dirty = true;
    }
}
