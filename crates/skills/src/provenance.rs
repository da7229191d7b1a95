use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::Result, types::SkillSourceInfo};

fn default_store_version() -> u32 {
    1
}

/// On-disk shape of `sources.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProvenanceFile {
    #[serde(default = "default_store_version")]
    version: u32,
    #[serde(default)]
    skills: BTreeMap<String, SkillSourceInfo>,
}

impl Default for ProvenanceFile {
    fn default() -> Self {
        Self {
            version: 1,
            skills: BTreeMap::new(),
        }
    }
}

/// Persistent provenance storage with atomic writes.
///
/// Lives at `<install_root>/sources.json`; the scanner ignores it since it
/// is not a bundle directory. Missing file reads as empty.
pub struct ProvenanceStore {
    path: PathBuf,
}

impl ProvenanceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn for_install_root(install_root: &Path) -> Self {
        Self::new(install_root.join("sources.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ProvenanceFile> {
        if !self.path.exists() {
            return Ok(ProvenanceFile::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save atomically via temp file + rename.
    fn save(&self, file: &ProvenanceFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(file)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Option<SkillSourceInfo>> {
        Ok(self.load()?.skills.get(name).cloned())
    }

    pub fn upsert(&self, name: &str, info: SkillSourceInfo) -> Result<()> {
        let mut file = self.load()?;
        file.skills.insert(name.to_string(), info);
        self.save(&file)
    }

    /// Remove a record. Returns whether it existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut file = self.load()?;
        let existed = file.skills.remove(name).is_some();
        if existed {
            self.save(&file)?;
        }
        Ok(existed)
    }

    /// All records, sorted by skill name.
    pub fn list(&self) -> Result<Vec<(String, SkillSourceInfo)>> {
        Ok(self.load()?.skills.into_iter().collect())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::types::SourceType,
    };

    fn info(location: &str) -> SkillSourceInfo {
        SkillSourceInfo {
            source_type: SourceType::Github,
            location: location.into(),
            subdirectory: Some("skills/demo".into()),
            git_ref: Some("v1".into()),
            sha: Some("abc123".into()),
            installed_at_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_missing_store_reads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ProvenanceStore::for_install_root(tmp.path());
        assert!(store.get("anything").unwrap().is_none());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_get_remove_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ProvenanceStore::for_install_root(tmp.path());

        store.upsert("demo", info("owner/repo")).unwrap();
        let loaded = store.get("demo").unwrap().unwrap();
        assert_eq!(loaded, info("owner/repo"));

        store.upsert("demo", info("owner/other")).unwrap();
        assert_eq!(store.get("demo").unwrap().unwrap().location, "owner/other");

        assert!(store.remove("demo").unwrap());
        assert!(!store.remove("demo").unwrap());
        assert!(store.get("demo").unwrap().is_none());
    }

    #[test]
    fn test_list_sorted_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ProvenanceStore::for_install_root(tmp.path());
        store.upsert("zeta", info("a/z")).unwrap();
        store.upsert("alpha", info("a/a")).unwrap();
        let names: Vec<String> = store.list().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
