pub mod block_entity;
pub mod inventory;
pub mod item;
pub mod player;
