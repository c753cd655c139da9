use crate::entities::item::{ItemKind, ItemStack};
use crate::unify::drops::DropProducer;
use serde::{Deserialize, Serialize};

const ALWAYS: u16 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    pub kind: ItemKind,
    /// Upper bound of the rolled stack size.
    pub count: u32,
    /// Per mille.
    #[serde(default = "always")]
    pub chance: u16,
}

fn always() -> u16 {
    ALWAYS
}

/// What a block or creature drops when it is broken or killed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    pub entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn roll(&self, rng: &mut LootRng) -> Vec<ItemStack> {
        let mut drops = Vec::new();
        for entry in &self.entries {
            if entry.count == 0 {
                continue;
            }
            if !rng.roll_per_mille(entry.chance) {
                continue;
            }
            let count = rng.roll_range(1, entry.count);
            drops.push(ItemStack::new(entry.kind.clone(), count));
        }
        drops
    }
}

impl DropProducer for LootTable {
    type Context = LootRng;

    fn produce(&self, rng: &mut LootRng) -> Vec<ItemStack> {
        self.roll(rng)
    }
}

/// Deterministic LCG so that seeded rolls are reproducible.
#[derive(Debug, Clone)]
pub struct LootRng {
    state: u64,
}

impl LootRng {
    pub fn from_seed(seed: u64) -> Self {
        let seed = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (self.state >> 32) as u32
    }

    pub fn roll_per_mille(&mut self, chance: u16) -> bool {
        let bucket = self.next() % 1000;
        bucket < u32::from(chance.min(ALWAYS))
    }

    pub fn roll_range(&mut self, min: u32, max: u32) -> u32 {
        let (min, max) = if min >= max { (min, min) } else { (min, max) };
        let span = u64::from(max - min) + 1;
        let value = u64::from(self.next()) % span;
        min + value as u32
    }
}

impl Default for LootRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}
