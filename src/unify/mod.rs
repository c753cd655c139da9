//! Item unification: swapping item kinds for their canonical equivalents
//! across inventories, block-entity storage and freshly produced drops.
//!
//! - [`resolver`] -- the replacement function and its table/cache forms.
//! - [`stack`] and [`container`] -- per-stack and per-container replacement.
//! - [`scope`] -- [`Unifier`] and the single, population and spatial walkers.
//! - [`drops`] -- interception of produced item lists.
//! - [`report`] -- per-target counts and the messages built from them.
//! - [`substrate`] -- what the walkers need from the world.

pub mod container;
pub mod drops;
pub mod error;
pub mod report;
pub mod resolver;
pub mod scope;
pub mod stack;
pub mod substrate;

pub use error::UnifyError;
pub use report::UnifyReport;
pub use resolver::{CachedResolver, ReplacementTable, Resolver};
pub use scope::{ScopeTarget, Unifier};
