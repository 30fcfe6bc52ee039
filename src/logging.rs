use crate::config::SiteConfig;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const LOG_FILE: &str = "game-catalog.log";

/// Parse a level name case-insensitively; unknown names fall back to info.
pub fn level_filter(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Log file used while the terminal UI owns the screen.
pub fn default_log_file() -> Option<PathBuf> {
    SiteConfig::project_dirs().map(|d| d.cache_dir().join(LOG_FILE))
}

/// Install the global logger. `RUST_LOG` overrides `level`. With `file`,
/// records are appended there instead of going to stderr.
pub fn init(level: &str, file: Option<&Path>) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_filter(level))
        .parse_default_env()
        .format_timestamp_secs();

    if let Some(path) = file {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let out = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(out)));
    }

    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
    log::info!("logging initialized at level {}", level);
    Ok(())
}
