//! Mock composer backend for deterministic testing.
//!
//! Generates fixed or mapped responses without any network dependency, with
//! optional latency and failure injection for exercising the store's timeout
//! and fallback paths.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use relata_core::{Error, PersonalizeRequest, Personalizer, Result};

/// Mock composer backend.
#[derive(Clone)]
pub struct MockComposerBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    mapped_responses: HashMap<String, String>,
    default_response: String,
    latency_ms: u64,
    failure_rate: f64,
}

/// One logged personalization call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub contact_name: String,
    pub template_body: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            mapped_responses: HashMap::new(),
            default_response: "Mock personalized message".to_string(),
            latency_ms: 0,
            failure_rate: 0.0,
        }
    }
}

impl MockComposerBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the fixed response returned for unmapped template bodies.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Add a response mapping for a specific template body.
    pub fn with_response_mapping(
        mut self,
        template_body: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_responses
            .insert(template_body.into(), output.into());
        self
    }

    /// Set simulated latency for all calls.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Set failure rate (0.0 - 1.0) for testing error handling.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of personalization calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    fn should_fail(&self) -> bool {
        use rand::Rng;
        if self.config.failure_rate >= 1.0 {
            return true;
        }
        if self.config.failure_rate > 0.0 {
            rand::thread_rng().gen::<f64>() < self.config.failure_rate
        } else {
            false
        }
    }
}

impl Default for MockComposerBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Personalizer for MockComposerBackend {
    async fn personalize(&self, req: PersonalizeRequest) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            contact_name: req.contact.name.clone(),
            template_body: req.template_body.clone(),
        });

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.should_fail() {
            return Err(Error::Personalization("injected mock failure".to_string()));
        }

        Ok(self
            .config
            .mapped_responses
            .get(&req.template_body)
            .cloned()
            .unwrap_or_else(|| self.config.default_response.clone()))
    }
}
