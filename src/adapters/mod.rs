//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Trait catalog and mentor sources from YAML seed data
//! - `feedback` - Feedback sinks (PostgreSQL, JSONL file, in-memory, no-op)
//! - `advice` - Advice generators (OpenAI, template, mock)
//! - `clock` - System and fixed clocks
//! - `http` - REST API (axum)

pub mod advice;
pub mod catalog;
pub mod clock;
pub mod feedback;
pub mod http;

pub use advice::{MockAdviceGenerator, OpenAIAdviceConfig, OpenAIAdviceGenerator, TemplateAdviceGenerator};
pub use catalog::{StaticMentorSource, YamlFileMentorSource, YamlTraitCatalog};
pub use clock::{FixedClock, SystemClock};
pub use feedback::{InMemoryFeedbackSink, JsonlFeedbackSink, NoopFeedbackSink, PostgresFeedbackSink};
