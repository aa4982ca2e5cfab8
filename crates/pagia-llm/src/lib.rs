//! # pagia-llm
//!
//! Abstraction layer over text-generation providers. One outbound call
//! per invocation: no retry, no backoff, no caching. Callers that need
//! bounded latency impose their own timeout around the call.

pub mod gemini;
pub mod mock;
pub mod provider;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use provider::{GenerationOptions, TextProvider};
