use crate::entities::inventory::Container;
use crate::entities::item::ItemStack;
use crate::entities::player::PlayerId;
use crate::unify::container::unify_container;
use crate::unify::drops::UnifiedDrops;
use crate::unify::error::UnifyError;
use crate::unify::report::{ReportTarget, UnifyReport};
use crate::unify::resolver::Resolver;
use crate::unify::stack::unify_stack;
use crate::unify::substrate::{ChunkStorage, Population};
use crate::world::dimension::DimensionId;
use crate::world::position::ChunkPos;
use crate::world::state::WorldState;
use tracing::{debug, info, trace, warn};

/// The set of containers one invocation works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeTarget {
    SingleInventory {
        player: PlayerId,
    },
    DimensionPopulation {
        dimension: DimensionId,
    },
    SpatialRange {
        dimension: DimensionId,
        origin: ChunkPos,
        radius: u32,
    },
}

impl ScopeTarget {
    /// Scopes whose cost grows with the world rather than with one inventory.
    pub fn is_expensive(&self) -> bool {
        !matches!(self, ScopeTarget::SingleInventory { .. })
    }
}

/// Applies one replacement function across stacks, containers and scopes.
pub struct Unifier<R> {
    resolver: R,
}

impl<R: Resolver> Unifier<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn unify_stack(&self, stack: ItemStack) -> ItemStack {
        unify_stack(&self.resolver, stack)
    }

    pub fn unify_container<C>(&self, container: &mut C) -> Result<usize, UnifyError>
    where
        C: Container + ?Sized,
    {
        unify_container(&self.resolver, container)
    }

    /// Unifies one container and flags it for saving when anything changed,
    /// including slots rewritten before a failed write.
    pub fn unify_single<C>(&self, container: &mut C) -> Result<usize, UnifyError>
    where
        C: Container + ?Sized,
    {
        let result = unify_container(&self.resolver, container);
        let written = match &result {
            Ok(changed) => *changed,
            Err(err) => err.written(),
        };
        if written > 0 {
            container.set_changed();
        }
        result
    }

    pub fn unify_population<P>(&self, population: &mut P) -> Result<UnifyReport, UnifyError>
    where
        P: Population + ?Sized,
    {
        let mut report = UnifyReport::default();
        population.visit_members(&mut |name, inventory| {
            let changed = self.unify_single(inventory)?;
            report.record(ReportTarget::Player(name.to_string()), changed);
            Ok(())
        })?;
        Ok(report)
    }

    /// Walks the chunk square around `origin` (z outer, x inner) and unifies
    /// every storage block entity in it.
    pub fn unify_spatial_range<S>(
        &self,
        storage: &mut S,
        origin: ChunkPos,
        radius: u32,
    ) -> Result<UnifyReport, UnifyError>
    where
        S: ChunkStorage + ?Sized,
    {
        let mut report = UnifyReport::default();
        for chunk in origin.square_around(radius) {
            report.chunks_visited += 1;
            let loaded = storage.visit_storage(chunk, &mut |position, container| {
                let changed = self.unify_single(container)?;
                report.record(ReportTarget::Storage(position), changed);
                Ok(())
            })?;
            if !loaded {
                trace!(%chunk, "chunk not loaded, skipped");
            }
        }
        Ok(report)
    }

    /// Resolves `target` against the world and runs the matching walker.
    /// Targets that no longer exist yield an empty report.
    pub fn unify_scope(
        &self,
        world: &mut WorldState,
        target: &ScopeTarget,
    ) -> Result<UnifyReport, UnifyError> {
        let report = match target {
            ScopeTarget::SingleInventory { player: id } => {
                let Some(player) = world.player_mut(*id) else {
                    debug!(player = id.0, "player not found, nothing to unify");
                    return Ok(UnifyReport::default());
                };
                let changed = self.unify_single(&mut player.inventory)?;
                let mut report = UnifyReport::default();
                report.record(ReportTarget::Player(player.name.clone()), changed);
                report
            }
            ScopeTarget::DimensionPopulation { dimension } => {
                let Some(level) = world.level_mut(dimension) else {
                    warn!(%dimension, "unknown dimension, nothing to unify");
                    return Ok(UnifyReport::default());
                };
                self.unify_population(level)?
            }
            ScopeTarget::SpatialRange {
                dimension,
                origin,
                radius,
            } => {
                let Some(level) = world.level_mut(dimension) else {
                    warn!(%dimension, "unknown dimension, nothing to unify");
                    return Ok(UnifyReport::default());
                };
                self.unify_spatial_range(level, *origin, *radius)?
            }
        };
        info!(
            scope = ?target,
            total = report.total,
            targets = report.breakdown.len(),
            chunks = report.chunks_visited,
            "unification finished"
        );
        Ok(report)
    }

    /// Wraps a drop producer so its output comes out unified.
    pub fn intercept<P>(&self, producer: P) -> UnifiedDrops<'_, R, P> {
        UnifiedDrops::new(&self.resolver, producer)
    }
}
