use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an item type, e.g. `minecraft:iron_ingot`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKind(String);

impl ItemKind {
    pub fn new(id: impl Into<String>) -> Self {
        ItemKind(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKind {
    fn from(id: &str) -> Self {
        ItemKind::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u32,
}

impl ItemStack {
    pub fn new(kind: impl Into<ItemKind>, count: u32) -> Self {
        Self {
            kind: kind.into(),
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Same count, different kind.
    pub fn with_kind(&self, kind: ItemKind) -> Self {
        Self {
            kind,
            count: self.count,
        }
    }
}
