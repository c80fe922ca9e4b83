//! Template advice generator - deterministic text, no network.

use async_trait::async_trait;

use crate::ports::{AdviceError, AdviceGenerator, AdviceRequest};

/// Always answers with the templated fallback text.
///
/// Used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateAdviceGenerator;

impl TemplateAdviceGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AdviceGenerator for TemplateAdviceGenerator {
    async fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        Ok(request.fallback_text())
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
