//! Response Generator - the only caller of the model backend
//!
//! Always yields a string: model text trimmed of surrounding whitespace, or
//! [`FALLBACK_MESSAGE`] when the backend fails for any reason. Failures are
//! logged here and never retried.

use std::sync::Arc;
use tracing::{debug, error};

use super::LlmBackend;

/// Text returned to the user whenever the model call fails.
pub const FALLBACK_MESSAGE: &str =
    "I apologize, but I encountered an error processing your question. Please try again.";

/// Wraps a model backend and absorbs its failures.
#[derive(Clone)]
pub struct ResponseGenerator {
    backend: Arc<dyn LlmBackend>,
}

impl ResponseGenerator {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    /// Run the prompt through the backend.
    pub async fn respond(&self, prompt: &str) -> String {
        match self.backend.generate(prompt).await {
            Ok(text) => {
                let answer = text.trim().to_string();
                debug!(
                    backend = self.backend.backend_name(),
                    chars = answer.chars().count(),
                    "Model response received"
                );
                answer
            }
            Err(e) => {
                error!(
                    backend = self.backend.backend_name(),
                    error = %e,
                    "Error generating model response"
                );
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedBackend(&'static str);

    #[async_trait]
    impl LlmBackend for FixedBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }

        fn backend_name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl LlmBackend for FailingBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Status {
                status: 401,
                body: "API key not valid".to_string(),
            })
        }

        fn backend_name(&self) -> &str {
            "failing"
        }
    }

    #[derive(Default)]
    struct RecordingBackend {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LlmBackend for RecordingBackend {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("ok".to_string())
        }

        fn backend_name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_output_is_trimmed() {
        let generator = ResponseGenerator::new(Arc::new(FixedBackend("\n  Clover blooms in June.  \n")));
        assert_eq!(generator.respond("prompt").await, "Clover blooms in June.");
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback() {
        let generator = ResponseGenerator::new(Arc::new(FailingBackend));
        assert_eq!(generator.respond("prompt").await, FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_prompt_forwarded_unchanged() {
        let backend = Arc::new(RecordingBackend::default());
        let generator = ResponseGenerator::new(backend.clone());
        generator.respond("  exact prompt\n").await;
        assert_eq!(*backend.prompts.lock().unwrap(), vec!["  exact prompt\n".to_string()]);
    }

    #[test]
    fn test_backend_name() {
        let generator = ResponseGenerator::new(Arc::new(FixedBackend("x")));
        assert_eq!(generator.backend_name(), "fixed");
    }
}
