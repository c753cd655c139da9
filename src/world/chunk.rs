use crate::entities::block_entity::BlockEntity;
use crate::world::position::{ChunkPos, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub pos: ChunkPos,
    block_entities: Vec<BlockEntity>,
}

impl Chunk {
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            block_entities: Vec::new(),
        }
    }

    pub fn block_entities(&self) -> &[BlockEntity] {
        &self.block_entities
    }

    pub fn block_entities_mut(&mut self) -> impl Iterator<Item = &mut BlockEntity> {
        self.block_entities.iter_mut()
    }

    pub fn block_entity(&self, position: Position) -> Option<&BlockEntity> {
        self.block_entities
            .iter()
            .find(|entity| entity.position == position)
    }

    pub fn block_entity_mut(&mut self, position: Position) -> Option<&mut BlockEntity> {
        self.block_entities
            .iter_mut()
            .find(|entity| entity.position == position)
    }

    /// Replaces any block entity already at the same position.
    pub fn insert(&mut self, entity: BlockEntity) -> Result<(), String> {
        if entity.position.chunk() != self.pos {
            return Err(format!(
                "block entity at {} does not belong to chunk {}",
                entity.position, self.pos
            ));
        }
        match self.block_entity_mut(entity.position) {
            Some(existing) => *existing = entity,
            None => self.block_entities.push(entity),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_same_position() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        let position = Position::new(1, 64, 1);
        chunk
            .insert(BlockEntity::new(position, "minecraft:chest"))
            .expect("insert chest");
        chunk
            .insert(BlockEntity::new(position, "minecraft:barrel"))
            .expect("replace with barrel");

        assert_eq!(chunk.block_entities().len(), 1);
        assert_eq!(
            chunk.block_entity(position).map(|entity| entity.block.as_str()),
            Some("minecraft:barrel")
        );
    }

    #[test]
    fn insert_rejects_foreign_position() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        let err = chunk
            .insert(BlockEntity::new(Position::new(16, 64, 0), "minecraft:chest"))
            .expect_err("position is in chunk [1, 0]");
        assert!(err.contains("[0, 0]"));
    }
}
