//! Builtin skills shipped with the assistant.

use async_trait::async_trait;
use std::sync::Arc;

use pagia_core::{Result, SessionContext};
use pagia_llm::{GenerationOptions, TextProvider};

use crate::skill::Skill;

/// Echoes the input back to the user.
pub struct EchoSkill;

#[async_trait]
impl Skill for EchoSkill {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echoes the input back to the user"
    }

    async fn run(&self, ctx: &SessionContext) -> Result<String> {
        Ok(format!("Echo Skill Output: {}", ctx.input))
    }
}

/// Reverses the input string.
pub struct ReverseSkill;

#[async_trait]
impl Skill for ReverseSkill {
    fn name(&self) -> &str {
        "reverse"
    }

    fn description(&self) -> &str {
        "Reverses the input string"
    }

    async fn run(&self, ctx: &SessionContext) -> Result<String> {
        Ok(ctx.input.chars().rev().collect())
    }
}

/// Wraps a fixed copywriting persona around the input and delegates to
/// the provider. The template is static, so the built prompt is fully
/// determined by the context.
pub struct CopywriterSkill {
    provider: Arc<dyn TextProvider>,
}

impl CopywriterSkill {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    fn build_prompt(ctx: &SessionContext) -> String {
        format!(
            "You are a copywriter who specializes in conversion.\n\
             Use mental triggers, clarity, and a strong call to action.\n\
             \n\
             Input:\n\
             {}",
            ctx.input
        )
    }
}

#[async_trait]
impl Skill for CopywriterSkill {
    fn name(&self) -> &str {
        "copywriter"
    }

    fn description(&self) -> &str {
        "Copywriting and persuasion specialist"
    }

    async fn run(&self, ctx: &SessionContext) -> Result<String> {
        let prompt = Self::build_prompt(ctx);
        self.provider
            .generate(&prompt, &GenerationOptions::default())
            .await
    }
}

/// The default skill set registered at startup.
pub fn builtin_skills(provider: Arc<dyn TextProvider>) -> Vec<Arc<dyn Skill>> {
    vec![
        Arc::new(EchoSkill),
        Arc::new(ReverseSkill),
        Arc::new(CopywriterSkill::new(provider)),
    ]
}
