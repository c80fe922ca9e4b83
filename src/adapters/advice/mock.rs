//! Mock advice generator for testing.
//!
//! Returns a fixed answer or a fixed error and records every request.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::ports::{AdviceError, AdviceGenerator, AdviceRequest};

/// Configurable mock for the AdviceGenerator port.
#[derive(Debug, Clone)]
pub struct MockAdviceGenerator {
    response: Result<String, AdviceError>,
    calls: Arc<Mutex<Vec<AdviceRequest>>>,
}

impl MockAdviceGenerator {
    /// Answers every request with `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every request with `error`.
    pub fn failing(error: AdviceError) -> Self {
        Self {
            response: Err(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    /// Requests received, in order.
    pub fn calls(&self) -> Vec<AdviceRequest> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }
}

#[async_trait]
impl AdviceGenerator for MockAdviceGenerator {
    async fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(request.clone());
        self.response.clone()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
