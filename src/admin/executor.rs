use crate::admin::commands::{AdminCommand, UnifyCommand};
use crate::unify::drops::DropProducer;
use crate::unify::report::{render_report, PERFORMANCE_WARNING};
use crate::unify::{Resolver, ScopeTarget, UnifyError, UnifyReport, Unifier};
use crate::world::loot::LootRng;
use crate::world::state::{PlayerLocation, WorldState};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub status: CommandStatus,
    pub messages: Vec<String>,
    pub report: Option<UnifyReport>,
}

impl CommandOutcome {
    fn new() -> Self {
        Self {
            status: CommandStatus::Success,
            messages: Vec::new(),
            report: None,
        }
    }
}

/// Maps a parsed unify verb onto a scope. `None` when the verb needs an
/// acting player and there is none.
pub fn resolve_scope(command: &UnifyCommand, actor: Option<&PlayerLocation>) -> Option<ScopeTarget> {
    match command {
        UnifyCommand::Inventory => actor.map(|actor| ScopeTarget::SingleInventory {
            player: actor.player,
        }),
        UnifyCommand::PlayersIn { dimension } => Some(ScopeTarget::DimensionPopulation {
            dimension: dimension.clone(),
        }),
        UnifyCommand::All { radius } => actor.map(|actor| ScopeTarget::SpatialRange {
            dimension: actor.dimension.clone(),
            origin: actor.position.chunk(),
            radius: *radius,
        }),
    }
}

/// Runs an admin command on behalf of `actor` (a player name, or `None` for
/// the console). Always reports success; only world failures are errors.
pub fn execute_admin_command<R: Resolver>(
    unifier: &Unifier<R>,
    world: &mut WorldState,
    actor: Option<&str>,
    command: &AdminCommand,
) -> Result<CommandOutcome, UnifyError> {
    let mut outcome = CommandOutcome::new();
    match command {
        AdminCommand::Unify(unify) => {
            let location = actor.and_then(|name| world.find_player(name));
            if let (Some(name), None) = (actor, &location) {
                debug!(actor = name, "acting player not in world");
            }
            let Some(target) = resolve_scope(unify, location.as_ref()) else {
                debug!(command = ?unify, "no acting player, nothing to unify");
                outcome.report = Some(UnifyReport::default());
                return Ok(outcome);
            };
            if target.is_expensive() {
                warn!(scope = ?target, "starting world-scale unification");
                outcome.messages.push(PERFORMANCE_WARNING.to_string());
            }
            let report = unifier.unify_scope(world, &target)?;
            outcome.messages.extend(render_report(&target, &report));
            outcome.report = Some(report);
        }
        AdminCommand::Loot { table, seed } => {
            let Some(loot) = world.loot_table(table) else {
                outcome.messages.push(format!("Unknown loot table {table}"));
                return Ok(outcome);
            };
            let mut rng = seed.map(LootRng::from_seed).unwrap_or_default();
            let drops = unifier.intercept(loot).produce(&mut rng);
            info!(table = %table, stacks = drops.len(), "loot rolled");
            if drops.is_empty() {
                outcome.messages.push(format!("{table} dropped nothing"));
            }
            for stack in &drops {
                outcome
                    .messages
                    .push(format!("{table} dropped {} x {}", stack.count, stack.kind));
            }
        }
        AdminCommand::Unknown(name) => {
            outcome.messages.push(format!("Unknown command {name}"));
        }
    }
    Ok(outcome)
}
