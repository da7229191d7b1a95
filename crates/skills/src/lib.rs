//! Skills system: discovery, registry, activation, and installation.
//!
//! Skills are directories containing a `SKILL.md` file with YAML frontmatter
//! and markdown instructions. Discovery loads frontmatter only (Level 1);
//! activation loads the full instruction body on demand (Level 2); any
//! bundled `scripts/`, `references/`, or `assets/` resources are left to the
//! agent to read while following the instructions (Level 3).

pub mod activate;
pub mod error;
pub mod format;
pub mod install;
pub mod parse;
pub mod provenance;
pub mod registry;
pub mod scan;
pub mod types;

pub use {
    activate::Activator,
    error::{Result, SkillError},
    install::{InstallOptions, SkillInstaller},
    provenance::ProvenanceStore,
    registry::SkillRegistry,
    scan::{FsSkillScanner, ScanDiagnostic, ScanReport, SkillScanner},
    types::{
        ActivationResult, AgentMessage, ContextModifier, Skill, SkillFrontmatter, SkillMetadata,
        SkillSourceInfo, SourceType,
    },
};
