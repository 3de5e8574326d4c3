//! Scripted provider for tests and offline runs

use crate::LlmError;
use itinera_domain::traits::LlmProvider;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Deterministic provider that replays scripted replies
///
/// Replies queued with [`push_response`](Self::push_response) and
/// [`push_error`](Self::push_error) are consumed in order; once the script
/// runs out every call returns the default reply. Clones share the script
/// and the call log.
///
/// # Examples
///
/// ```
/// use itinera_llm::{LlmError, MockProvider};
/// use itinera_domain::traits::LlmProvider;
///
/// let provider = MockProvider::new("{}");
/// provider.push_error(LlmError::RateLimitExceeded);
/// provider.push_response(r#"{"title": "Nile"}"#);
///
/// assert!(provider.generate("a").is_err());
/// assert_eq!(provider.generate("b").unwrap(), r#"{"title": "Nile"}"#);
/// assert_eq!(provider.generate("c").unwrap(), "{}");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    script: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
    model: String,
}

impl MockProvider {
    /// Create a provider answering every prompt with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: None,
            model: "mock".to_string(),
        }
    }

    /// Block for `delay` before answering, to exercise caller timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report a different model name
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Queue a reply for the next unscripted call
    pub fn push_response(&self, response: impl Into<String>) {
        lock(&self.script).push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unscripted call
    pub fn push_error(&self, error: LlmError) {
        lock(&self.script).push_back(Err(error));
    }

    /// Number of calls so far
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Every prompt received, oldest first
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    fn reply(&self, prompt: &str) -> Result<String, LlmError> {
        lock(&self.prompts).push(prompt.to_string());
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Ok(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.reply(prompt)
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.reply(prompt)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// A panicking test thread must not poison the script for the others.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_response() {
        let provider = MockProvider::new("fixed");
        assert_eq!(provider.generate("any prompt").unwrap(), "fixed");
        assert_eq!(provider.generate_structured("p", "{}").unwrap(), "fixed");
    }

    #[test]
    fn test_script_consumed_in_order() {
        let provider = MockProvider::default();
        provider.push_response("first");
        provider.push_error(LlmError::ModelNotAvailable("tiny".to_string()));

        assert_eq!(provider.generate("1").unwrap(), "first");
        assert_eq!(
            provider.generate("2").unwrap_err(),
            LlmError::ModelNotAvailable("tiny".to_string())
        );
        assert_eq!(provider.generate("3").unwrap(), "{}");
    }

    #[test]
    fn test_prompts_recorded() {
        let provider = MockProvider::default();
        provider.generate("hello").unwrap();
        provider.generate_structured("world", "{}").unwrap();
        assert_eq!(provider.prompts(), vec!["hello", "world"]);
    }

    #[test]
    fn test_clones_share_state() {
        let provider = MockProvider::default();
        let clone = provider.clone();
        clone.push_response("from clone");

        assert_eq!(provider.generate("x").unwrap(), "from clone");
        assert_eq!(clone.call_count(), 1);
    }

    #[test]
    fn test_model_name() {
        assert_eq!(MockProvider::default().model_name(), "mock");
        assert_eq!(
            MockProvider::default().with_model_name("scripted").model_name(),
            "scripted"
        );
    }
}
