//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction logic and
//! infrastructure. Implementations live in other crates.

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (itinera-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (if supported)
    ///
    /// `schema` is a JSON description of the expected object. Providers that
    /// cannot constrain their output fall back to [`LlmProvider::generate`].
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;

    /// Name of the model behind this provider
    fn model_name(&self) -> &str {
        "llm"
    }
}
