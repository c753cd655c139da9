//! Errors raised by the unification engine.
//!
//! Missing actors, unknown dimensions and unloaded chunks are not errors; the
//! walkers turn them into zero-count results. What remains here is either a
//! broken replacement table or a world that failed underneath a walk.

use crate::entities::inventory::ContainerError;
use crate::entities::item::ItemKind;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UnifyError {
    /// A container rejected a write during traversal.
    #[error("container write failed: {0}")]
    Container(#[from] ContainerError),

    /// A write failed after `written` earlier slots had already been
    /// rewritten.
    #[error("container write failed after {written} rewritten slots: {source}")]
    PartialWrite {
        written: usize,
        #[source]
        source: ContainerError,
    },

    #[error("failed to read replacement table {path}: {source}")]
    TableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse replacement table {path}: {source}")]
    TableParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `from` maps to `to`, which maps on to `next`; applying the table twice
    /// would not be a no-op.
    #[error("replacement {from} -> {to} is not canonical, {to} is replaced by {next}")]
    ReplacementChain {
        from: ItemKind,
        to: ItemKind,
        next: ItemKind,
    },
}

impl UnifyError {
    /// Slots already rewritten when the error was raised.
    pub fn written(&self) -> usize {
        match self {
            UnifyError::PartialWrite { written, .. } => *written,
            _ => 0,
        }
    }
}
