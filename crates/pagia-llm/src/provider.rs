use async_trait::async_trait;
use pagia_core::Result;
use serde::{Deserialize, Serialize};

/// Optional tuning knobs passed through to the provider unvalidated.
/// Out-of-range values are the provider's to reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Instructional text sent alongside the prompt, separate from it.
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl GenerationOptions {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Trait implemented by each text-generation provider.
///
/// This is the seam for substituting providers: given a non-empty prompt,
/// valid credentials, and a supported model name, `generate` returns the
/// provider's text. Every failure mode (bad credentials, unknown model,
/// transport error, rate limiting) surfaces as the single opaque
/// [`pagia_core::PagiaError::Provider`] condition.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Human-readable provider name, e.g. "gemini".
    fn name(&self) -> &str;

    /// The model this provider instance targets.
    fn model(&self) -> &str;

    /// Make exactly one generation call and await its single response.
    async fn generate(&self, prompt: &str, opts: &GenerationOptions) -> Result<String>;
}
