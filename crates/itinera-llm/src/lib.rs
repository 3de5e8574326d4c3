//! Itinera LLM Provider Layer
//!
//! Implementations of [`LlmProvider`](itinera_domain::traits::LlmProvider)
//! for the model-assisted extraction strategy.
//!
//! # Providers
//!
//! - [`MockProvider`]: scripted, deterministic responses for tests
//! - [`OllamaProvider`]: a local Ollama server over HTTP
//!
//! # Examples
//!
//! ```
//! use itinera_llm::MockProvider;
//! use itinera_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"title": "Bali Escape"}"#);
//! let reply = provider.generate("extract this itinerary").unwrap();
//! assert!(reply.contains("Bali Escape"));
//! ```

#![warn(missing_docs)]

mod error;
pub mod mock;
pub mod ollama;

pub use error::LlmError;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
