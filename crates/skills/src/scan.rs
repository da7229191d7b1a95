use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{error::Result, parse, types::SkillMetadata};

/// One bundle that failed to load during a scan. Collected instead of
/// thrown so a broken skill never hides its valid siblings.
#[derive(Debug, Clone)]
pub struct ScanDiagnostic {
    pub bundle: PathBuf,
    pub error: String,
}

/// Result of scanning all source roots: the valid-metadata map plus the
/// per-bundle failures.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub skills: HashMap<String, SkillMetadata>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

/// Discovers skills from configured source roots.
#[async_trait]
pub trait SkillScanner: Send + Sync {
    /// Scan all roots and return metadata for every valid bundle.
    async fn scan(&self) -> Result<ScanReport>;
}

/// Default filesystem-based scanner.
///
/// Roots are scanned in order; a later root's skill overrides an earlier
/// root's skill of the same name (built-in first, installed last).
pub struct FsSkillScanner {
    roots: Vec<PathBuf>,
}

impl FsSkillScanner {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Roots from the default skills configuration.
    pub fn default_roots() -> Vec<PathBuf> {
        satchel_config::SkillsConfig::default().scan_roots()
    }
}

#[async_trait]
impl SkillScanner for FsSkillScanner {
    async fn scan(&self) -> Result<ScanReport> {
        let mut report = ScanReport::default();
        for root in &self.roots {
            if !root.is_dir() {
                continue;
            }
            scan_root(root, &mut report);
        }
        Ok(report)
    }
}

/// Scan one level deep for `SKILL.md` bundles. Frontmatter only; the
/// instruction body is never read here, keeping discovery O(bundle count).
fn scan_root(root: &Path, report: &mut ScanReport) {
    let entries = match std::fs::read_dir(root) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(root = %root.display(), %e, "failed to read skill root");
            return;
        },
    };

    for entry in entries.flatten() {
        let bundle_dir = entry.path();
        if !bundle_dir.is_dir() {
            continue;
        }
        let skill_md = bundle_dir.join("SKILL.md");
        if !skill_md.is_file() {
            continue;
        }
        let content = match std::fs::read_to_string(&skill_md) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %skill_md.display(), %e, "failed to read SKILL.md");
                report.diagnostics.push(ScanDiagnostic {
                    bundle: bundle_dir,
                    error: e.to_string(),
                });
                continue;
            },
        };
        match parse::parse_metadata(&content, &bundle_dir) {
            Ok(meta) => {
                // Last write wins: later roots shadow earlier ones.
                report.skills.insert(meta.name.clone(), meta);
            },
            Err(e) => {
                tracing::warn!(bundle = %bundle_dir.display(), %e, "skipping invalid skill bundle");
                report.diagnostics.push(ScanDiagnostic {
                    bundle: bundle_dir,
                    error: e.to_string(),
                });
            },
        }
    }
}
