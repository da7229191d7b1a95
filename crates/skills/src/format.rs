//! Message and context-modifier builders.
//!
//! Pure, stateless formatting of skill content into the shapes the agent
//! executor consumes. Kept separate from the activator so the message shape
//! can evolve independently of activation logic.

use std::fmt::Write as _;

use serde_json::json;

use crate::{
    parse::split_allowed_tools,
    types::{AgentMessage, ContextModifier, Skill},
};

/// Visible activation banner naming the skill.
pub fn metadata_message(skill: &Skill) -> AgentMessage {
    AgentMessage {
        role: "assistant".to_string(),
        content: format!(
            "Activating skill: {} ({})",
            skill.frontmatter.display_label(),
            skill.frontmatter.name
        ),
        is_meta: false,
    }
}

/// Hidden message carrying the full instruction body verbatim.
pub fn instruction_message(skill: &Skill) -> AgentMessage {
    AgentMessage {
        role: "system".to_string(),
        content: skill.instructions.clone(),
        is_meta: true,
    }
}

/// Hidden permissions payload. `None` when the skill sets no tool allowlist.
pub fn permissions_message(skill: &Skill) -> Option<AgentMessage> {
    let raw = skill.frontmatter.allowed_tools.as_deref()?;
    let tools = split_allowed_tools(raw);
    if tools.is_empty() {
        return None;
    }
    let payload = json!({
        "type": "skill_permissions",
        "skill": skill.frontmatter.name,
        "allowed_tools": tools,
        "model": skill.frontmatter.model,
    });
    Some(AgentMessage {
        role: "system".to_string(),
        content: payload.to_string(),
        is_meta: true,
    })
}

/// Ambient-behavior changes requested by the skill. An empty/unset tool list
/// means the ambient toolset stays unchanged.
pub fn context_modifier(skill: &Skill) -> ContextModifier {
    let allowed_tools = skill
        .frontmatter
        .allowed_tools
        .as_deref()
        .map(split_allowed_tools)
        .filter(|tools| !tools.is_empty());
    ContextModifier {
        allowed_tools,
        model: skill.frontmatter.model.clone(),
        disable_model_invocation: skill.frontmatter.disable_model_invocation,
    }
}

/// Wrap the registry's flat `name: description` list with the framing an
/// agent's system prompt needs.
pub fn format_skills_list_for_prompt(rendered_list: &str) -> String {
    if rendered_list.trim().is_empty() {
        return String::new();
    }
    format!(
        "<available_skills>\n{}\n</available_skills>\n\
         To use a skill, activate it by name. Mode skills are mutually \
         exclusive; activate at most one.",
        rendered_list.trim_end()
    )
}

/// Multi-line human-readable summary for logs and debugging.
pub fn format_for_debug(skill: &Skill) -> String {
    let fm = &skill.frontmatter;
    let mut out = String::new();
    let _ = writeln!(out, "skill: {} v{}", fm.name, fm.version);
    let _ = writeln!(out, "  description: {}", fm.description);
    if let Some(category) = &fm.category {
        let _ = writeln!(out, "  category: {category}");
    }
    if let Some(tools) = &fm.allowed_tools {
        let _ = writeln!(out, "  allowed_tools: {tools}");
    }
    if let Some(model) = &fm.model {
        let _ = writeln!(out, "  model: {model}");
    }
    let _ = writeln!(out, "  mode: {}", fm.mode);
    let _ = writeln!(
        out,
        "  resources: scripts={} references={} assets={}",
        skill.has_scripts(),
        skill.has_references(),
        skill.has_assets()
    );
    let _ = write!(out, "  base_dir: {}", skill.base_dir.display());
    out
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::types::SkillFrontmatter,
        std::path::PathBuf,
    };

    fn skill_with(allowed_tools: Option<&str>, model: Option<&str>) -> Skill {
        Skill {
            frontmatter: SkillFrontmatter {
                name: "demo".into(),
                display_name: Some("Demo Skill".into()),
                description: "demonstrates".into(),
                version: "1.0.0".into(),
                category: None,
                author: None,
                license: None,
                entrypoint: None,
                requirements: vec![],
                allowed_tools: allowed_tools.map(Into::into),
                model: model.map(Into::into),
                disable_model_invocation: false,
                mode: false,
                tags: vec![],
                examples: vec![],
            },
            instructions: "Do the demo.".into(),
            base_dir: PathBuf::from("/skills/demo"),
        }
    }

    #[test]
    fn test_banner_is_visible_and_named() {
        let msg = metadata_message(&skill_with(None, None));
        assert!(!msg.is_meta);
        assert!(msg.content.contains("Demo Skill"));
        assert!(msg.content.contains("(demo)"));
    }

    #[test]
    fn test_instruction_message_is_hidden_verbatim() {
        let msg = instruction_message(&skill_with(None, None));
        assert!(msg.is_meta);
        assert_eq!(msg.content, "Do the demo.");
    }

    #[test]
    fn test_permissions_message_absent_without_tools() {
        assert!(permissions_message(&skill_with(None, None)).is_none());
        assert!(permissions_message(&skill_with(Some("  , "), None)).is_none());
    }

    #[test]
    fn test_permissions_payload_carries_tools_and_model() {
        let msg = permissions_message(&skill_with(Some("Read, Write,Read"), Some("fast-1"))).unwrap();
        assert!(msg.is_meta);
        let payload: serde_json::Value = serde_json::from_str(&msg.content).unwrap();
        assert_eq!(payload["type"], "skill_permissions");
        assert_eq!(payload["allowed_tools"], serde_json::json!(["Read", "Write"]));
        assert_eq!(payload["model"], "fast-1");
    }

    #[test]
    fn test_context_modifier_dedupes_and_defaults() {
        let modifier = context_modifier(&skill_with(Some("Read,Write , Read"), None));
        assert_eq!(modifier.allowed_tools, Some(vec!["Read".to_string(), "Write".to_string()]));
        assert!(modifier.model.is_none());
        assert!(!modifier.disable_model_invocation);

        let unrestricted = context_modifier(&skill_with(None, None));
        assert!(unrestricted.allowed_tools.is_none());
    }

    #[test]
    fn test_prompt_wrapper() {
        let wrapped = format_skills_list_for_prompt("a: does a\nb: does b");
        assert!(wrapped.starts_with("<available_skills>\n"));
        assert!(wrapped.contains("a: does a"));
        assert!(wrapped.contains("</available_skills>"));
        assert!(format_skills_list_for_prompt("  ").is_empty());
    }

    #[test]
    fn test_debug_format_mentions_resources() {
        let out = format_for_debug(&skill_with(Some("Read"), None));
        assert!(out.contains("skill: demo v1.0.0"));
        assert!(out.contains("allowed_tools: Read"));
        assert!(out.contains("resources: scripts=false"));
    }
}
