//! The LLM-assisted extraction pipeline

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::prompt::{PromptBuilder, ITINERARY_SCHEMA};
use crate::response::parse_reply;
use itinera_domain::traits::LlmProvider;
use itinera_domain::{ParseId, ParseMetadata, ParseReport, Strategy};
use itinera_parser::{normalize, Normalized, ParserConfig};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, info_span, Instrument};

/// Extracts itineraries by asking a language model
///
/// The reply goes through the same normalizer as heuristic output, so both
/// strategies return records of identical shape.
pub struct LlmExtractor<L> {
    llm: Arc<L>,
    config: ExtractorConfig,
    parser_config: ParserConfig,
}

impl<L> LlmExtractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create an extractor, validating the configuration
    pub fn new(llm: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            llm: Arc::new(llm),
            config,
            parser_config: ParserConfig::default(),
        })
    }

    /// Use `parser_config` for normalization (gazetteer, limits)
    pub fn with_parser_config(mut self, parser_config: ParserConfig) -> Self {
        self.parser_config = parser_config;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract an itinerary from document text
    pub async fn extract(&self, text: &str) -> Result<ParseReport, ExtractorError> {
        let len = text.chars().count();
        if len > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(len, self.config.max_text_length));
        }

        let parse_id = ParseId::new();
        let span = info_span!("parse", parse_id = %parse_id);
        self.extract_inner(text, parse_id).instrument(span).await
    }

    async fn extract_inner(
        &self,
        text: &str,
        parse_id: ParseId,
    ) -> Result<ParseReport, ExtractorError> {
        let start = Instant::now();
        info!(
            "Starting LLM extraction: {} chars, model '{}'",
            text.len(),
            self.llm.model_name()
        );

        let prompt = PromptBuilder::new(text).build();
        debug!("Prompt length: {} chars", prompt.len());

        let reply = timeout(self.config.extraction_timeout(), self.call_llm(prompt))
            .await
            .map_err(|_| ExtractorError::Timeout)??;
        debug!("LLM response length: {} chars", reply.len());

        let value = parse_reply(&reply, self.config.response_preview_len)?;
        let normalized = self
            .normalize(&value)
            .map_err(|e| e.with_preview(&reply, self.config.response_preview_len))?;

        let metadata = ParseMetadata {
            strategy: Strategy::Llm,
            line_count: 0,
            day_count: normalized.itinerary.itinerary.len(),
            truncated: false,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "LLM extraction complete: {} days, {} dropped fields",
            metadata.day_count,
            normalized.failures.len()
        );

        Ok(ParseReport {
            parse_id,
            itinerary: normalized.itinerary,
            failures: normalized.failures,
            metadata,
        })
    }

    fn normalize(&self, value: &Value) -> Result<Normalized, ExtractorError> {
        Ok(normalize(value, &self.parser_config)?)
    }

    async fn call_llm(&self, prompt: String) -> Result<String, ExtractorError> {
        let llm = Arc::clone(&self.llm);
        let structured = self.config.structured_output;

        // LlmProvider is synchronous; keep it off the async workers
        tokio::task::spawn_blocking(move || {
            let reply = if structured {
                llm.generate_structured(&prompt, ITINERARY_SCHEMA)
            } else {
                llm.generate(&prompt)
            };
            reply.map_err(|e| ExtractorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))?
    }
}
