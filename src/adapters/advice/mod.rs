//! Advice Generator Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAIAdviceGenerator` - OpenAI chat completions
//! - `TemplateAdviceGenerator` - Deterministic templated text
//! - `MockAdviceGenerator` - Configurable mock for testing

mod mock;
mod openai;
mod prompt;
mod template;

pub use mock::MockAdviceGenerator;
pub use openai::{OpenAIAdviceConfig, OpenAIAdviceGenerator};
pub use prompt::{AdvicePrompt, COACH_SYSTEM_PROMPT};
pub use template::TemplateAdviceGenerator;
