pub mod chunk;
pub mod dimension;
pub mod loot;
pub mod position;
pub mod state;
