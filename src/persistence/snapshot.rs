use crate::entities::block_entity::BlockEntity;
use crate::entities::player::PlayerState;
use crate::world::dimension::DimensionId;
use crate::world::loot::LootTable;
use crate::world::state::{Level, WorldState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct WorldSnapshot {
    #[serde(default)]
    levels: Vec<LevelSnapshot>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    loot_tables: BTreeMap<String, LootTable>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LevelSnapshot {
    id: DimensionId,
    #[serde(default)]
    players: Vec<PlayerState>,
    #[serde(default)]
    block_entities: Vec<BlockEntity>,
}

impl WorldSnapshot {
    fn into_world(self) -> Result<WorldState, String> {
        let mut world = WorldState::new();
        for snapshot in self.levels {
            let mut level = Level::new(snapshot.id);
            for player in snapshot.players {
                level.add_player(player)?;
            }
            for entity in snapshot.block_entities {
                level.insert_block_entity(entity)?;
            }
            world.add_level(level)?;
        }
        for (name, table) in self.loot_tables {
            world.register_loot_table(name, table);
        }
        Ok(world)
    }

    fn from_world(world: &WorldState) -> Self {
        let levels = world
            .levels()
            .map(|level| LevelSnapshot {
                id: level.id().clone(),
                players: level.players().cloned().collect(),
                block_entities: level
                    .chunks()
                    .flat_map(|chunk| chunk.block_entities().iter().cloned())
                    .collect(),
            })
            .collect();
        let loot_tables = world
            .loot_tables()
            .map(|(name, table)| (name.to_string(), table.clone()))
            .collect();
        Self {
            levels,
            loot_tables,
        }
    }
}

/// YAML file holding the whole world, with a `.bak` copy of the previous
/// version kept on every save.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The snapshot path with `.bak` appended to its file name.
    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    pub fn load(&self) -> Result<WorldState, String> {
        let data = fs::read_to_string(&self.path).map_err(|err| {
            format!("world snapshot read failed for {}: {}", self.path.display(), err)
        })?;
        let snapshot: WorldSnapshot = serde_yaml::from_str(&data).map_err(|err| {
            format!("world snapshot parse failed for {}: {}", self.path.display(), err)
        })?;
        snapshot
            .into_world()
            .map_err(|err| format!("world snapshot invalid in {}: {}", self.path.display(), err))
    }

    pub fn save(&self, world: &WorldState) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                format!("world snapshot dir create failed for {}: {}", parent.display(), err)
            })?;
        }
        let data = serde_yaml::to_string(&WorldSnapshot::from_world(world))
            .map_err(|err| format!("world snapshot encode failed: {}", err))?;
        if self.path.exists() {
            let backup_path = self.backup_path();
            fs::copy(&self.path, &backup_path).map_err(|err| {
                format!(
                    "world snapshot backup failed for {}: {}",
                    backup_path.display(),
                    err
                )
            })?;
        }
        fs::write(&self.path, data).map_err(|err| {
            format!("world snapshot write failed for {}: {}", self.path.display(), err)
        })
    }
}
