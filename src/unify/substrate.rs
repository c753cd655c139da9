//! What the walkers need from the world. Containers are only handed out inside
//! a visit callback, so nothing can hold on to one after the walk.

use crate::entities::inventory::Container;
use crate::unify::error::UnifyError;
use crate::world::position::{ChunkPos, Position};

/// A set of participants that each own one personal container.
pub trait Population {
    /// Calls `visit` once per member with the member's name and inventory.
    fn visit_members(
        &mut self,
        visit: &mut dyn FnMut(&str, &mut dyn Container) -> Result<(), UnifyError>,
    ) -> Result<(), UnifyError>;
}

/// Chunk-addressed access to storage-capable block entities.
pub trait ChunkStorage {
    /// Calls `visit` once per storage-capable block entity located in `chunk`.
    /// Returns `false` when the chunk is not loaded.
    fn visit_storage(
        &mut self,
        chunk: ChunkPos,
        visit: &mut dyn FnMut(Position, &mut dyn Container) -> Result<(), UnifyError>,
    ) -> Result<bool, UnifyError>;
}
