use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ── Skill frontmatter ────────────────────────────────────────────────────────

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Structured header parsed from a bundle's `SKILL.md` frontmatter.
///
/// `name` and `description` are required; everything else is optional with
/// defaults. Validation happens in [`crate::parse`] — an untyped map never
/// crosses the parsing boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillFrontmatter {
    /// Unique identifier: lowercase, `[a-z0-9_-]`, 1-64 chars.
    pub name: String,
    /// Human-friendly name for display; falls back to `name`.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Short description used for semantic discovery (<= 500 chars).
    #[serde(default)]
    pub description: String,
    /// Semver string.
    #[serde(default = "default_version")]
    pub version: String,
    /// Optional grouping tag.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// SPDX license identifier.
    #[serde(default)]
    pub license: Option<String>,
    /// Optional programmatic hook.
    #[serde(default, alias = "function")]
    pub entrypoint: Option<String>,
    /// Dependency specifiers, in order.
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Comma-separated capability names the skill restricts the agent to.
    #[serde(default, alias = "allowed-tools")]
    pub allowed_tools: Option<String>,
    /// Model override identifier.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub disable_model_invocation: bool,
    /// Mode skills are mutually exclusive and listed first.
    #[serde(default)]
    pub mode: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Sample user utterances.
    #[serde(default)]
    pub examples: Vec<String>,
}

impl SkillFrontmatter {
    /// Display name if set, otherwise the identifier.
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

// ── Skill metadata (Level 1) ─────────────────────────────────────────────────

/// Lightweight projection loaded for all discovered skills (cheap).
/// Derivable from frontmatter alone, without reading the instruction body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_mode: bool,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Filesystem path to the bundle directory.
    pub path: PathBuf,
}

impl SkillMetadata {
    pub fn from_frontmatter(frontmatter: &SkillFrontmatter, bundle_dir: &Path) -> Self {
        Self {
            name: frontmatter.name.clone(),
            description: frontmatter.description.clone(),
            version: frontmatter.version.clone(),
            category: frontmatter.category.clone(),
            is_mode: frontmatter.mode,
            display_name: frontmatter.display_name.clone(),
            path: bundle_dir.to_path_buf(),
        }
    }

    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

// ── Skill (Level 2) ──────────────────────────────────────────────────────────

/// Full skill content: frontmatter + instruction body + bundle directory.
/// Loaded on demand when a skill is activated; never cached by the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub frontmatter: SkillFrontmatter,
    /// Full instruction text, verbatim from the bundle.
    pub instructions: String,
    pub base_dir: PathBuf,
}

impl Skill {
    /// The Level-1 projection. Agrees with scanner output for the same bundle.
    pub fn metadata(&self) -> SkillMetadata {
        SkillMetadata::from_frontmatter(&self.frontmatter, &self.base_dir)
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.base_dir.join("scripts")
    }

    pub fn references_dir(&self) -> PathBuf {
        self.base_dir.join("references")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.base_dir.join("assets")
    }

    pub fn has_scripts(&self) -> bool {
        self.scripts_dir().is_dir()
    }

    pub fn has_references(&self) -> bool {
        self.references_dir().is_dir()
    }

    pub fn has_assets(&self) -> bool {
        self.assets_dir().is_dir()
    }
}

// ── Install provenance ───────────────────────────────────────────────────────

/// Where an installed skill came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Local,
    Github,
    GitUrl,
    Zip,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Github => write!(f, "github"),
            Self::GitUrl => write!(f, "git_url"),
            Self::Zip => write!(f, "zip"),
        }
    }
}

/// Provenance for an installed skill. Written at install time, replaced at
/// update time, removed at uninstall time. Built-in skills have none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSourceInfo {
    pub source_type: SourceType,
    /// `owner/repo`, clone URL, or filesystem path depending on the type.
    pub location: String,
    #[serde(default)]
    pub subdirectory: Option<String>,
    /// Branch or tag requested at install time.
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    /// Resolved commit, when the source is a git repository.
    #[serde(default)]
    pub sha: Option<String>,
    pub installed_at_ms: u64,
}

// ── Activation output ────────────────────────────────────────────────────────

/// One conversation message produced by activation. `is_meta` messages are
/// appended to context but hidden from the user-facing transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: String,
    pub content: String,
    #[serde(rename = "isMeta")]
    pub is_meta: bool,
}

/// Ambient-behavior changes requested by an activated skill. Enforcement
/// belongs to the executor; this core only computes the values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextModifier {
    /// Deduplicated, order-preserving tool allowlist. `None` means the
    /// ambient toolset is unchanged.
    #[serde(default)]
    pub allowed_tools: Option<Vec<String>>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub disable_model_invocation: bool,
}

/// Result of one activation call: the ordered message sequence plus the
/// context modifier. Ephemeral; owned by the caller for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationResult {
    pub messages: Vec<AgentMessage>,
    pub context: ContextModifier,
}
