//! Skill activation.
//!
//! Activation resolves a skill name through the registry, then formats the
//! message sequence and context modifier as one atomic result. It performs
//! no registry writes and keeps no "already activated" state — re-activating
//! the same skill yields an identical result, and duplicate suppression is
//! the calling agent's concern.

use std::sync::Arc;

use crate::{
    error::Result,
    format,
    registry::SkillRegistry,
    types::{ActivationResult, AgentMessage},
};

pub struct Activator {
    registry: Arc<SkillRegistry>,
}

impl Activator {
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        Self { registry }
    }

    /// Activate a skill by name.
    ///
    /// `history` is the prior conversation, passed through for future use
    /// (e.g. duplicate-activation detection); it is not modified or consumed.
    ///
    /// Message order is fixed: visible banner, hidden instructions, then —
    /// only when the skill sets `allowed_tools` — a hidden permissions
    /// payload. An unknown name fails with `SkillError::Activation` before
    /// any message is built.
    pub async fn activate_skill(
        &self,
        skill_name: &str,
        history: Option<&[AgentMessage]>,
    ) -> Result<ActivationResult> {
        let skill = self.registry.get_skill_full(skill_name).await?;
        tracing::debug!(
            skill = %skill_name,
            history_len = history.map_or(0, <[AgentMessage]>::len),
            "activating skill"
        );

        let mut messages = vec![
            format::metadata_message(&skill),
            format::instruction_message(&skill),
        ];
        if let Some(permissions) = format::permissions_message(&skill) {
            messages.push(permissions);
        }

        Ok(ActivationResult {
            messages,
            context: format::context_modifier(&skill),
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, crate::error::SkillError, std::path::Path};

    fn write_skill(root: &Path, name: &str, extra: &str, body: &str) {
        let bundle = root.join(name);
        std::fs::create_dir_all(&bundle).unwrap();
        std::fs::write(
            bundle.join("SKILL.md"),
            format!("---\nname: {name}\ndescription: {name} skill\n{extra}---\n{body}\n"),
        )
        .unwrap();
    }

    fn activator_over(root: &Path) -> Activator {
        Activator::new(Arc::new(SkillRegistry::with_roots(vec![root.to_path_buf()])))
    }

    #[tokio::test]
    async fn test_activation_message_order_with_permissions() {
        let tmp = tempfile::tempdir().unwrap();
        write_skill(
            tmp.path(),
            "deploy",
            "allowed_tools: \"Read,Write\"\nmodel: fast-1\n",
            "Deploy carefully.",
        );

        let result = activator_over(tmp.path())
            .activate_skill("deploy", None)
            .await
            .unwrap();

        assert_eq!(result.messages.len(), 3);
        assert!(!result.messages[0].is_meta);
        assert!(result.messages[0].content.contains("deploy"));
        assert!(result.messages[1].is_meta);
        assert_eq!(result.messages[1].content, "Deploy carefully.");
        assert!(result.messages[2].is_meta);
        assert!(result.messages[2].content.contains("skill_permissions"));

        assert_eq!(
            result.context.allowed_tools,
            Some(vec!["Read".to_string(), "Write".to_string()])
        );
        assert_eq!(result.context.model.as_deref(), Some("fast-1"));
    }

    #[tokio::test]
    async fn test_activation_without_tools_emits_two_messages() {
        let tmp = tempfile::tempdir().unwrap();
        write_skill(tmp.path(), "notes", "", "Take notes.");

        let result = activator_over(tmp.path())
            .activate_skill("notes", None)
            .await
            .unwrap();
        assert_eq!(result.messages.len(), 2);
        assert!(result.context.allowed_tools.is_none());
    }

    #[tokio::test]
    async fn test_missing_skill_fails_atomically() {
        let tmp = tempfile::tempdir().unwrap();
        let err = activator_over(tmp.path())
            .activate_skill("missing_skill", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SkillError::Activation(_)));
    }

    #[tokio::test]
    async fn test_activation_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        write_skill(tmp.path(), "notes", "disable_model_invocation: true\n", "Take notes.");

        let activator = activator_over(tmp.path());
        let history = vec![AgentMessage {
            role: "user".into(),
            content: "hello".into(),
            is_meta: false,
        }];
        let first = activator.activate_skill("notes", Some(&history)).await.unwrap();
        let second = activator.activate_skill("notes", Some(&history)).await.unwrap();
        assert_eq!(first, second);
        assert!(first.context.disable_model_invocation);
    }
}
