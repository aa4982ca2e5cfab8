use async_trait::async_trait;
use pagia_core::{Result, SessionContext};

/// A named, pluggable unit of behavior.
///
/// Implementations must be stateless and must not mutate the context —
/// they receive it by shared reference. Given the same context and the
/// same underlying provider response, `run` must produce the same output.
#[async_trait]
pub trait Skill: Send + Sync {
    /// Unique key within a registry.
    fn name(&self) -> &str;

    /// Short description shown in skill listings.
    fn description(&self) -> &str;

    /// Produce the skill's output for one interaction. Failures from an
    /// underlying provider propagate unchanged; skills do not retry.
    async fn run(&self, ctx: &SessionContext) -> Result<String>;
}

impl std::fmt::Debug for dyn Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skill")
            .field("name", &self.name())
            .finish()
    }
}
