use std::time::Instant;
use tracing::debug;

use pagia_core::{Result, SessionContext};

use crate::skill::Skill;

/// The single seam between a skill and its execution context.
///
/// Today it times the invocation; middleware-style concerns (audit
/// logging, circuit breaking) belong here rather than in individual
/// skills. Failures pass through with their original cause.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillRunner;

impl SkillRunner {
    pub fn new() -> Self {
        Self
    }

    /// Invoke `skill` against `ctx` and return its output unchanged.
    pub async fn run(&self, skill: &dyn Skill, ctx: &SessionContext) -> Result<String> {
        let started = Instant::now();
        let result = skill.run(ctx).await;
        debug!(
            skill = %skill.name(),
            session = %ctx.session_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "skill finished"
        );
        result
    }
}
