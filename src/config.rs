use std::path::{Path, PathBuf};

const DEFAULT_RESOLVER_CACHE: usize = 256;

pub const USAGE: &str =
    "usage: item-unify <data-root> <command...>  (e.g. '!unify all 4', '!unify playersin the_nether', '!loot tin_ore 7')";

#[derive(Debug)]
pub struct AppConfig {
    pub root: PathBuf,
    pub command: String,
    pub actor: Option<String>,
    pub table_path: PathBuf,
    pub world_path: PathBuf,
    pub resolver_cache: usize,
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        Self::from_args_with_env(args, |key| std::env::var(key).ok())
    }

    fn from_args_with_env(
        args: &[String],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        if args.len() < 3 {
            return Err(USAGE.to_string());
        }

        let root = Path::new(&args[1]).to_path_buf();
        let command = args[2..].join(" ");
        let lookup = |key: &str| non_blank(env(key));

        let actor = lookup("ITEM_UNIFY_ACTOR");
        let table_path = lookup("ITEM_UNIFY_TABLE")
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("replacements.yaml"));
        let world_path = lookup("ITEM_UNIFY_WORLD")
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("world.yaml"));
        let resolver_cache = match lookup("ITEM_UNIFY_CACHE") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| format!("ITEM_UNIFY_CACHE expected a count, got '{value}'"))?,
            None => DEFAULT_RESOLVER_CACHE,
        };
        let log_filter = lookup("ITEM_UNIFY_LOG");

        Ok(Self {
            root,
            command,
            actor,
            table_path,
            world_path,
            resolver_cache,
            log_filter,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn from_args_requires_root_and_command() {
        let err = AppConfig::from_args_with_env(&args(&["item-unify", "data"]), |_| None)
            .expect_err("missing command");
        assert_eq!(err, USAGE);
    }

    #[test]
    fn from_args_defaults_paths_under_root() {
        let config = AppConfig::from_args_with_env(
            &args(&["item-unify", "data", "!unify", "all", "3"]),
            |_| None,
        )
        .expect("config");
        assert_eq!(config.command, "!unify all 3");
        assert_eq!(config.table_path, Path::new("data").join("replacements.yaml"));
        assert_eq!(config.world_path, Path::new("data").join("world.yaml"));
        assert_eq!(config.resolver_cache, DEFAULT_RESOLVER_CACHE);
        assert!(config.actor.is_none());
    }

    #[test]
    fn from_args_reads_env_overrides_and_ignores_blanks() {
        let env: HashMap<&str, &str> = [
            ("ITEM_UNIFY_ACTOR", " Alex "),
            ("ITEM_UNIFY_TABLE", "/etc/unify/table.yaml"),
            ("ITEM_UNIFY_WORLD", "   "),
            ("ITEM_UNIFY_CACHE", "0"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_args_with_env(&args(&["item-unify", "data", "!unify"]), |key| {
            env.get(key).map(|value| value.to_string())
        })
        .expect("config");
        assert_eq!(config.actor.as_deref(), Some("Alex"));
        assert_eq!(config.table_path, PathBuf::from("/etc/unify/table.yaml"));
        assert_eq!(config.world_path, Path::new("data").join("world.yaml"));
        assert_eq!(config.resolver_cache, 0);
    }

    #[test]
    fn from_args_rejects_bad_cache_size() {
        let err = AppConfig::from_args_with_env(&args(&["item-unify", "data", "!unify"]), |key| {
            (key == "ITEM_UNIFY_CACHE").then(|| "lots".to_string())
        })
        .expect_err("bad cache");
        assert!(err.contains("ITEM_UNIFY_CACHE"));
    }
}
