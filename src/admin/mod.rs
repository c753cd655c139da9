pub mod commands;
pub mod executor;
