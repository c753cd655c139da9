use crate::entities::block_entity::BlockEntity;
use crate::entities::inventory::Container;
use crate::entities::player::{PlayerId, PlayerState};
use crate::unify::error::UnifyError;
use crate::unify::substrate::{ChunkStorage, Population};
use crate::world::chunk::Chunk;
use crate::world::dimension::DimensionId;
use crate::world::loot::LootTable;
use crate::world::position::{ChunkPos, Position};
use std::collections::BTreeMap;

/// One dimension: its players and the chunks holding block entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    id: DimensionId,
    players: BTreeMap<PlayerId, PlayerState>,
    chunks: BTreeMap<ChunkPos, Chunk>,
}

impl Level {
    pub fn new(id: DimensionId) -> Self {
        Self {
            id,
            players: BTreeMap::new(),
            chunks: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &DimensionId {
        &self.id
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.values()
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(&id)
    }

    pub fn add_player(&mut self, player: PlayerState) -> Result<(), String> {
        if self.players.contains_key(&player.id) {
            return Err(format!(
                "duplicate player id {} in {}",
                player.id.0, self.id
            ));
        }
        self.players.insert(player.id, player);
        Ok(())
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn insert_block_entity(&mut self, entity: BlockEntity) -> Result<(), String> {
        let pos = entity.position.chunk();
        self.chunks
            .entry(pos)
            .or_insert_with(|| Chunk::new(pos))
            .insert(entity)
    }

    pub fn block_entity(&self, position: Position) -> Option<&BlockEntity> {
        self.chunks
            .get(&position.chunk())
            .and_then(|chunk| chunk.block_entity(position))
    }

    /// Narrows the level's population to players accepted by `filter`.
    pub fn players_matching<F>(&mut self, filter: F) -> Members<'_, F>
    where
        F: Fn(&PlayerState) -> bool,
    {
        Members {
            level: self,
            filter,
        }
    }
}

impl Population for Level {
    fn visit_members(
        &mut self,
        visit: &mut dyn FnMut(&str, &mut dyn Container) -> Result<(), UnifyError>,
    ) -> Result<(), UnifyError> {
        for player in self.players.values_mut() {
            visit(&player.name, &mut player.inventory)?;
        }
        Ok(())
    }
}

impl ChunkStorage for Level {
    fn visit_storage(
        &mut self,
        chunk: ChunkPos,
        visit: &mut dyn FnMut(Position, &mut dyn Container) -> Result<(), UnifyError>,
    ) -> Result<bool, UnifyError> {
        let Some(chunk) = self.chunks.get_mut(&chunk) else {
            return Ok(false);
        };
        for entity in chunk.block_entities_mut() {
            let position = entity.position;
            let Some(mut storage) = entity.storage_mut() else {
                continue;
            };
            visit(position, &mut storage)?;
        }
        Ok(true)
    }
}

/// Players of a level that pass a filter.
pub struct Members<'a, F> {
    level: &'a mut Level,
    filter: F,
}

impl<F> Population for Members<'_, F>
where
    F: Fn(&PlayerState) -> bool,
{
    fn visit_members(
        &mut self,
        visit: &mut dyn FnMut(&str, &mut dyn Container) -> Result<(), UnifyError>,
    ) -> Result<(), UnifyError> {
        for player in self.level.players.values_mut() {
            if !(self.filter)(&*player) {
                continue;
            }
            visit(&player.name, &mut player.inventory)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLocation {
    pub player: PlayerId,
    pub dimension: DimensionId,
    pub position: Position,
}

/// What was marked for saving since the last call to
/// [`WorldState::take_dirty`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirtySummary {
    pub players: Vec<String>,
    pub block_entities: Vec<(DimensionId, Position)>,
}

impl DirtySummary {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.block_entities.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorldState {
    levels: BTreeMap<DimensionId, Level>,
    loot_tables: BTreeMap<String, LootTable>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_level(&mut self, level: Level) -> Result<(), String> {
        if self.levels.contains_key(level.id()) {
            return Err(format!("duplicate level {}", level.id()));
        }
        self.levels.insert(level.id().clone(), level);
        Ok(())
    }

    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.levels.values()
    }

    pub fn level(&self, id: &DimensionId) -> Option<&Level> {
        self.levels.get(id)
    }

    pub fn level_mut(&mut self, id: &DimensionId) -> Option<&mut Level> {
        self.levels.get_mut(id)
    }

    /// Player names compare case-insensitively.
    pub fn find_player(&self, name: &str) -> Option<PlayerLocation> {
        self.levels.values().find_map(|level| {
            level
                .players()
                .find(|player| player.name.eq_ignore_ascii_case(name))
                .map(|player| PlayerLocation {
                    player: player.id,
                    dimension: level.id().clone(),
                    position: player.position,
                })
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.levels.values().find_map(|level| level.player(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.levels
            .values_mut()
            .find_map(|level| level.player_mut(id))
    }

    pub fn register_loot_table(&mut self, name: impl Into<String>, table: LootTable) {
        self.loot_tables.insert(name.into(), table);
    }

    pub fn loot_table(&self, name: &str) -> Option<&LootTable> {
        self.loot_tables.get(name)
    }

    pub fn loot_tables(&self) -> impl Iterator<Item = (&str, &LootTable)> {
        self.loot_tables
            .iter()
            .map(|(name, table)| (name.as_str(), table))
    }

    /// Collects and clears every pending "needs saving" flag.
    pub fn take_dirty(&mut self) -> DirtySummary {
        let mut summary = DirtySummary::default();
        for level in self.levels.values_mut() {
            for player in level.players.values_mut() {
                if player.inventory.take_changed() {
                    summary.players.push(player.name.clone());
                }
            }
            for chunk in level.chunks.values_mut() {
                for entity in chunk.block_entities_mut() {
                    if entity.take_dirty() {
                        summary
                            .block_entities
                            .push((level.id.clone(), entity.position));
                    }
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::inventory::Inventory;
    use crate::entities::item::ItemStack;

    fn overworld_with_players() -> WorldState {
        let mut level = Level::new(DimensionId::overworld());
        level
            .add_player(PlayerState::new(PlayerId(1), "Alex", Position::new(10, 64, 10)))
            .expect("add alex");
        level
            .add_player(PlayerState::new(PlayerId(2), "Steve", Position::new(-40, 70, 3)))
            .expect("add steve");
        let mut world = WorldState::new();
        world.add_level(level).expect("add level");
        world
    }

    #[test]
    fn find_player_ignores_case() {
        let world = overworld_with_players();
        let location = world.find_player("steve").expect("steve present");
        assert_eq!(location.player, PlayerId(2));
        assert_eq!(location.dimension, DimensionId::overworld());
        assert_eq!(location.position, Position::new(-40, 70, 3));
        assert!(world.find_player("Herobrine").is_none());
    }

    #[test]
    fn add_player_rejects_duplicate_id() {
        let mut level = Level::new(DimensionId::overworld());
        level
            .add_player(PlayerState::new(PlayerId(7), "A", Position::new(0, 0, 0)))
            .expect("first");
        let err = level
            .add_player(PlayerState::new(PlayerId(7), "B", Position::new(0, 0, 0)))
            .expect_err("duplicate");
        assert!(err.contains("duplicate player id 7"));
    }

    #[test]
    fn visit_storage_skips_entities_without_storage() {
        let mut level = Level::new(DimensionId::overworld());
        level
            .insert_block_entity(BlockEntity::new(Position::new(1, 64, 1), "minecraft:oak_sign"))
            .expect("sign");
        level
            .insert_block_entity(BlockEntity::with_storage(
                Position::new(2, 64, 1),
                "minecraft:chest",
                Inventory::with_size(27),
            ))
            .expect("chest");

        let mut seen = Vec::new();
        let loaded = level
            .visit_storage(ChunkPos::new(0, 0), &mut |position, container| {
                seen.push((position, container.size()));
                Ok(())
            })
            .expect("visit");
        assert!(loaded);
        assert_eq!(seen, vec![(Position::new(2, 64, 1), 27)]);

        let loaded = level
            .visit_storage(ChunkPos::new(9, 9), &mut |_, _| Ok(()))
            .expect("visit missing chunk");
        assert!(!loaded);
    }

    #[test]
    fn players_matching_filters_members() {
        let mut world = overworld_with_players();
        let level = world
            .level_mut(&DimensionId::overworld())
            .expect("overworld");
        let mut names = Vec::new();
        level
            .players_matching(|player| player.position.x >= 0)
            .visit_members(&mut |name, _| {
                names.push(name.to_string());
                Ok(())
            })
            .expect("visit");
        assert_eq!(names, vec!["Alex".to_string()]);
    }

    #[test]
    fn take_dirty_collects_and_clears() {
        let mut world = overworld_with_players();
        {
            let level = world
                .level_mut(&DimensionId::overworld())
                .expect("overworld");
            level
                .insert_block_entity(BlockEntity::with_storage(
                    Position::new(5, 60, 5),
                    "minecraft:barrel",
                    Inventory::with_size(27),
                ))
                .expect("barrel");
            level
                .visit_storage(ChunkPos::new(0, 0), &mut |_, container| {
                    container.set_item(0, Some(ItemStack::new("minecraft:apple", 1)))?;
                    container.set_changed();
                    Ok(())
                })
                .expect("visit");
        }
        world
            .player_mut(PlayerId(1))
            .expect("alex")
            .inventory
            .set_changed();

        let summary = world.take_dirty();
        assert_eq!(summary.players, vec!["Alex".to_string()]);
        assert_eq!(
            summary.block_entities,
            vec![(DimensionId::overworld(), Position::new(5, 60, 5))]
        );
        assert!(world.take_dirty().is_empty());
    }
}
