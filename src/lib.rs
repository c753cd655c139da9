pub mod admin;
mod config;
pub mod entities;
pub mod persistence;
pub mod telemetry;
pub mod unify;
pub mod world;

pub use admin::commands::{parse_admin_command, AdminCommand, UnifyCommand};
pub use admin::executor::{execute_admin_command, CommandOutcome, CommandStatus};
pub use unify::{
    CachedResolver, ReplacementTable, Resolver, ScopeTarget, UnifyError, UnifyReport, Unifier,
};

use tracing::info;

pub fn run(args: &[String]) -> Result<(), String> {
    let config = config::AppConfig::from_args(args)?;
    telemetry::logging::init(&config.root, config.log_filter.as_deref())?;

    let table = ReplacementTable::load(&config.table_path).map_err(|err| err.to_string())?;
    info!(
        path = %config.table_path.display(),
        entries = table.len(),
        cache = config.resolver_cache,
        "replacement table loaded"
    );
    let unifier = Unifier::new(CachedResolver::new(table, config.resolver_cache));

    let store = persistence::snapshot::SnapshotStore::new(&config.world_path);
    let mut world = store.load()?;

    let command = parse_admin_command(&config.command)?
        .ok_or_else(|| format!("not an admin command: '{}'\n{}", config.command, config::USAGE))?;
    info!(command = ?command, actor = config.actor.as_deref().unwrap_or("console"), "executing");

    let outcome = execute_admin_command(&unifier, &mut world, config.actor.as_deref(), &command)
        .map_err(|err| err.to_string())?;
    for message in &outcome.messages {
        println!("{}", message);
    }

    let dirty = world.take_dirty();
    if !dirty.is_empty() {
        store.save(&world)?;
        info!(
            players = dirty.players.len(),
            block_entities = dirty.block_entities.len(),
            path = %store.path().display(),
            "world snapshot saved"
        );
        println!(
            "- saved: players={}, block entities={}",
            dirty.players.len(),
            dirty.block_entities.len()
        );
    }
    Ok(())
}
