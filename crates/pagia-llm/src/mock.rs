//! Mock text provider for deterministic testing.
//!
//! Returns pre-configured responses without making any HTTP calls.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::provider::{GenerationOptions, TextProvider};
use pagia_core::{PagiaError, Result};

/// A mock provider that returns pre-configured responses in order.
///
/// # Example
/// ```
/// use pagia_llm::MockProvider;
/// let provider = MockProvider::new().with_response("Hello, world!");
/// ```
pub struct MockProvider {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Every prompt received, for assertions in tests.
    prompts: Arc<Mutex<Vec<String>>>,
}

/// A pre-configured response from the mock provider.
#[derive(Clone, Default)]
pub struct MockResponse {
    pub text: String,
    /// If set, the provider returns this error instead.
    pub error: Option<String>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![])),
            prompts: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Queue a text response.
    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().push(MockResponse {
            text: text.to_string(),
            error: None,
        });
        self
    }

    /// Queue an error response.
    pub fn with_error(self, error: &str) -> Self {
        self.responses.lock().push(MockResponse {
            error: Some(error.to_string()),
            ..Default::default()
        });
        self
    }

    /// A provider that echoes every prompt back verbatim. Equivalent to
    /// `new()` with nothing queued; named for intent in tests.
    pub fn echoing() -> Self {
        Self::new()
    }

    /// All prompts this provider has received, in order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    fn next_response(&self) -> Option<MockResponse> {
        let mut responses = self.responses.lock();
        if responses.is_empty() {
            None
        } else {
            Some(responses.remove(0))
        }
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock/test-model"
    }

    async fn generate(&self, prompt: &str, _opts: &GenerationOptions) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());

        match self.next_response() {
            Some(mock) => match mock.error {
                Some(error) => Err(PagiaError::Provider(error)),
                None => Ok(mock.text),
            },
            // No queued responses: echo the prompt so templating tests
            // can inspect exactly what the skill built.
            None => Ok(prompt.to_string()),
        }
    }
}
