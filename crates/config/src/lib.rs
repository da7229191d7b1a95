//! Shared configuration: data directory resolution and the skills config
//! schema.
//!
//! The data directory defaults to `~/.satchel` and can be overridden
//! process-wide (used by tests and by embedders that relocate state).

use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

pub mod schema;

pub use schema::SkillsConfig;

static DATA_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Returns the data directory (`~/.satchel` unless overridden).
pub fn data_dir() -> PathBuf {
    if let Ok(guard) = DATA_DIR_OVERRIDE.read()
        && let Some(dir) = guard.as_ref()
    {
        return dir.clone();
    }
    match directories::BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(".satchel"),
        None => {
            tracing::warn!("no home directory found; using relative .satchel");
            PathBuf::from(".satchel")
        },
    }
}

/// Override the data directory for this process.
pub fn set_data_dir(path: &Path) {
    if let Ok(mut guard) = DATA_DIR_OVERRIDE.write() {
        *guard = Some(path.to_path_buf());
    }
}

/// Remove the data directory override.
pub fn clear_data_dir() {
    if let Ok(mut guard) = DATA_DIR_OVERRIDE.write() {
        *guard = None;
    }
}
