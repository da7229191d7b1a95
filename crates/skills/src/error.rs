use std::path::PathBuf;

use thiserror::Error;

/// Errors from the skills subsystem.
///
/// `InvalidSkill` is localized to one bundle: the scanner catches it
/// per-bundle and records a diagnostic instead of failing the whole scan.
/// `Activation` and `Install` propagate to the caller; neither leaves the
/// registry or the install root partially mutated.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("invalid skill bundle at {path}: {reason}")]
    InvalidSkill { path: PathBuf, reason: String },

    #[error("skill activation failed: {0}")]
    Activation(String),

    #[error("skill install failed: {0}")]
    Install(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("frontmatter error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SkillError {
    pub fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidSkill {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn activation(reason: impl Into<String>) -> Self {
        Self::Activation(reason.into())
    }

    pub fn install(reason: impl Into<String>) -> Self {
        Self::Install(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;
