use std::{
    collections::HashMap,
    fmt::Write as _,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::RwLock;

use crate::{
    error::{Result, SkillError},
    parse,
    scan::{FsSkillScanner, ScanDiagnostic, SkillScanner},
    types::{Skill, SkillMetadata},
};

/// One fully-populated scan result. Replaced wholesale on invalidation so
/// concurrent readers never observe a half-populated registry.
struct RegistryCache {
    skills: HashMap<String, SkillMetadata>,
    diagnostics: Vec<ScanDiagnostic>,
}

/// Registry over one or more skill source roots.
///
/// Level-1 metadata is cached across calls until [`invalidate_cache`] runs
/// (the installer calls it after every mutation). Level-2 full skills are
/// deliberately re-read from disk on every access so staleness after an
/// install or update is immediately visible.
///
/// [`invalidate_cache`]: SkillRegistry::invalidate_cache
pub struct SkillRegistry {
    scanner: Box<dyn SkillScanner>,
    cache: RwLock<Option<Arc<RegistryCache>>>,
    generation: AtomicU64,
}

impl SkillRegistry {
    pub fn new(scanner: Box<dyn SkillScanner>) -> Self {
        Self {
            scanner,
            cache: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Registry over filesystem roots, scanned in priority order.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self::new(Box::new(FsSkillScanner::new(roots)))
    }

    /// Load the cache, scanning at most once per invalidation.
    async fn load_cache(&self) -> Result<Arc<RegistryCache>> {
        if let Some(cache) = self.cache.read().await.as_ref() {
            return Ok(Arc::clone(cache));
        }

        let mut guard = self.cache.write().await;
        // Another caller may have scanned while we waited for the lock.
        if let Some(cache) = guard.as_ref() {
            return Ok(Arc::clone(cache));
        }

        let report = self.scanner.scan().await?;
        tracing::debug!(
            skills = report.skills.len(),
            failures = report.diagnostics.len(),
            "scanned skill roots"
        );
        let cache = Arc::new(RegistryCache {
            skills: report.skills,
            diagnostics: report.diagnostics,
        });
        *guard = Some(Arc::clone(&cache));
        Ok(cache)
    }

    /// All known skill metadata, keyed by name. Scans only when cold.
    pub async fn get_all_metadata(&self) -> Result<HashMap<String, SkillMetadata>> {
        Ok(self.load_cache().await?.skills.clone())
    }

    /// Load the full skill (Level 2), always re-reading the body from disk.
    pub async fn get_skill_full(&self, name: &str) -> Result<Skill> {
        let cache = self.load_cache().await?;
        let meta = cache
            .skills
            .get(name)
            .ok_or_else(|| SkillError::activation(format!("skill '{name}' not found")))?;

        let skill_md = meta.path.join("SKILL.md");
        let content = tokio::fs::read_to_string(&skill_md)
            .await
            .map_err(|e| SkillError::activation(format!("failed to read {}: {e}", skill_md.display())))?;
        parse::parse_skill(&content, &meta.path)
            .map_err(|e| SkillError::activation(format!("failed to load skill '{name}': {e}")))
    }

    /// `name: description` lines for the discovery prompt. Mode skills come
    /// first, each group sorted by name — the ordering the agent's system
    /// prompt relies on.
    pub async fn get_formatted_skills_list(&self) -> Result<String> {
        let cache = self.load_cache().await?;
        let mut modes: Vec<&SkillMetadata> = Vec::new();
        let mut others: Vec<&SkillMetadata> = Vec::new();
        for meta in cache.skills.values() {
            if meta.is_mode {
                modes.push(meta);
            } else {
                others.push(meta);
            }
        }
        modes.sort_by(|a, b| a.name.cmp(&b.name));
        others.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = String::new();
        for meta in modes.into_iter().chain(others) {
            let _ = writeln!(out, "{}: {}", meta.name, meta.description);
        }
        Ok(out.trim_end().to_string())
    }

    /// Mode skills only, sorted by name.
    pub async fn list_mode_skills(&self) -> Result<Vec<SkillMetadata>> {
        let cache = self.load_cache().await?;
        let mut modes: Vec<SkillMetadata> =
            cache.skills.values().filter(|m| m.is_mode).cloned().collect();
        modes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(modes)
    }

    /// Skills in the given category, sorted by name.
    pub async fn get_skills_by_category(&self, category: &str) -> Result<Vec<SkillMetadata>> {
        let cache = self.load_cache().await?;
        let mut matched: Vec<SkillMetadata> = cache
            .skills
            .values()
            .filter(|m| m.category.as_deref() == Some(category))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matched)
    }

    /// Distinct categories, sorted.
    pub async fn get_all_categories(&self) -> Result<Vec<String>> {
        let cache = self.load_cache().await?;
        let mut categories: Vec<String> = cache
            .skills
            .values()
            .filter_map(|m| m.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    pub async fn skill_exists(&self, name: &str) -> Result<bool> {
        Ok(self.load_cache().await?.skills.contains_key(name))
    }

    /// Per-bundle failures from the last scan, for logging/inspection.
    pub async fn scan_diagnostics(&self) -> Result<Vec<ScanDiagnostic>> {
        Ok(self.load_cache().await?.diagnostics.clone())
    }

    /// Drop the cache and bump the generation. The next metadata access
    /// re-scans and reflects every install/uninstall that completed before
    /// this call.
    pub async fn invalidate_cache(&self) {
        let mut guard = self.cache.write().await;
        *guard = None;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Monotonic counter bumped on each invalidation.
    pub fn cache_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
