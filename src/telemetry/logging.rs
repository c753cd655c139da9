use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "unify.log";
const DEFAULT_FILTER: &str = "info";
const HEADER_LINE: &str = "-------------------------------------------------------------------------------";
const HEADER_TITLE: &str = "item-unify - item unification log";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Routes `tracing` output to `<root>/log/unify.log`. The filter comes from
/// `filter`, then `RUST_LOG`, then defaults to `info`. Calling it again is a
/// no-op.
pub fn init(root: &Path, filter: Option<&str>) -> Result<(), String> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }
    let log_dir = root.join("log");
    std::fs::create_dir_all(&log_dir)
        .map_err(|err| format!("log directory create failed: {}", err))?;

    let path = log_dir.join(LOG_FILE);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| format!("open log {} failed: {}", LOG_FILE, err))?;
    if file.metadata().map(|m| m.len()).unwrap_or(0) == 0 {
        write_header(&mut file)?;
    }

    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|err| format!("invalid log filter '{}': {}", directives, err))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| format!("log system init failed: {}", err))?;
    let _ = INITIALIZED.set(());
    Ok(())
}

fn write_header(file: &mut File) -> Result<(), String> {
    let started = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    writeln!(file, "{HEADER_LINE}").map_err(|err| format!("header write failed: {}", err))?;
    writeln!(file, "{HEADER_TITLE}").map_err(|err| format!("header write failed: {}", err))?;
    writeln!(file, "{LOG_FILE} - started at unix time {started}")
        .map_err(|err| format!("header write failed: {}", err))?;
    Ok(())
}
