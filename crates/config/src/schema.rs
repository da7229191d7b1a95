//! Skills subsystem configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data_dir;

fn default_network_timeout_secs() -> u64 {
    120
}

/// Configuration for skill discovery and installation.
///
/// All paths are optional; unset fields resolve to subdirectories of the
/// data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Extra source roots scanned before the install root. Later roots
    /// override earlier ones by skill name.
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,
    /// Where installed skills are published.
    #[serde(default)]
    pub install_root: Option<PathBuf>,
    /// Clone cache for git sources.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Upper bound on network fetches during install/update.
    #[serde(default = "default_network_timeout_secs")]
    pub network_timeout_secs: u64,
    /// Allow installs that shadow a built-in skill of the same name.
    #[serde(default)]
    pub allow_builtin_override: bool,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            source_roots: Vec::new(),
            install_root: None,
            cache_dir: None,
            network_timeout_secs: default_network_timeout_secs(),
            allow_builtin_override: false,
        }
    }
}

impl SkillsConfig {
    /// The published install root (`<data>/installed-skills` by default).
    pub fn resolve_install_root(&self) -> PathBuf {
        self.install_root
            .clone()
            .unwrap_or_else(|| data_dir().join("installed-skills"))
    }

    /// The git clone cache (`<data>/skill-cache` by default).
    pub fn resolve_cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| data_dir().join("skill-cache"))
    }

    /// Scan roots in priority order: bundled skills first, then any extra
    /// roots, then the install root. Later roots shadow earlier ones.
    pub fn scan_roots(&self) -> Vec<PathBuf> {
        let mut roots = vec![data_dir().join("skills")];
        roots.extend(self.source_roots.iter().cloned());
        roots.push(self.resolve_install_root());
        roots
    }
}
