use std::path::Path;

use crate::{
    error::{Result, SkillError},
    types::{Skill, SkillFrontmatter, SkillMetadata},
};

/// Maximum description length accepted during validation.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Validate a skill name: lowercase ASCII, digits, `-`/`_`, 1-64 chars.
pub fn validate_name(name: &str) -> bool {
    let is_sep = |c: char| c == '-' || c == '_';
    !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || is_sep(c))
        && !name.starts_with(is_sep)
        && !name.ends_with(is_sep)
        && !name.contains("--")
        && !name.contains("__")
}

/// Parse a `SKILL.md` file into metadata only (frontmatter, no body reads).
pub fn parse_metadata(content: &str, skill_dir: &Path) -> Result<SkillMetadata> {
    let (frontmatter, _body) = split_frontmatter(content, skill_dir)?;
    let fm = parse_frontmatter(&frontmatter, skill_dir)?;
    Ok(SkillMetadata::from_frontmatter(&fm, skill_dir))
}

/// Parse a `SKILL.md` file into full content (frontmatter + body).
///
/// The body is lightly normalized: blank lines directly after the closing
/// delimiter and trailing whitespace are stripped; interior content is
/// preserved verbatim.
pub fn parse_skill(content: &str, skill_dir: &Path) -> Result<Skill> {
    let (frontmatter, body) = split_frontmatter(content, skill_dir)?;
    let fm = parse_frontmatter(&frontmatter, skill_dir)?;
    Ok(Skill {
        frontmatter: fm,
        instructions: body,
        base_dir: skill_dir.to_path_buf(),
    })
}

/// Deserialize and validate frontmatter in a single pass.
fn parse_frontmatter(frontmatter: &str, skill_dir: &Path) -> Result<SkillFrontmatter> {
    let fm: SkillFrontmatter = serde_yaml::from_str(frontmatter)
        .map_err(|e| SkillError::invalid(skill_dir, format!("invalid frontmatter: {e}")))?;

    if !validate_name(&fm.name) {
        return Err(SkillError::invalid(
            skill_dir,
            format!(
                "invalid skill name '{}': must be 1-64 lowercase alphanumeric/hyphen/underscore chars",
                fm.name
            ),
        ));
    }
    if fm.description.trim().is_empty() {
        return Err(SkillError::invalid(skill_dir, "missing required field 'description'"));
    }
    if fm.description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(SkillError::invalid(
            skill_dir,
            format!("description exceeds {MAX_DESCRIPTION_CHARS} characters"),
        ));
    }
    Ok(fm)
}

/// Split `SKILL.md` content at `---` delimiters into (frontmatter, body).
fn split_frontmatter(content: &str, skill_dir: &Path) -> Result<(String, String)> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return Err(SkillError::invalid(
            skill_dir,
            "SKILL.md must start with YAML frontmatter delimited by ---",
        ));
    }

    // Skip the opening ---
    let after_open = &trimmed[3..];
    let close_pos = after_open.find("\n---").ok_or_else(|| {
        SkillError::invalid(skill_dir, "SKILL.md missing closing --- for frontmatter")
    })?;

    let frontmatter = after_open[..close_pos].trim().to_string();
    let body = after_open[close_pos + 4..]
        .trim_start_matches(['\r', '\n'])
        .trim_end()
        .to_string();
    Ok((frontmatter, body))
}

/// Split a comma-separated tool list into a deduplicated, ordered vec.
/// Empty or whitespace-only input yields an empty vec.
pub fn split_allowed_tools(raw: &str) -> Vec<String> {
    let mut tools = Vec::new();
    for part in raw.split(',') {
        let tool = part.trim();
        if !tool.is_empty() && !tools.iter().any(|t| t == tool) {
            tools.push(tool.to_string());
        }
    }
    tools
}
