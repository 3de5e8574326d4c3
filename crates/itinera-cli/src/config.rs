//! Configuration management for the CLI.
//!
//! One TOML file, `~/.itinera/config.toml` unless `--config` points
//! elsewhere:
//!
//! ```toml
//! [settings]
//! color = true
//! format = "json"
//!
//! [parser]
//! max_input_length = 200000
//! oversize_policy = "truncate"
//!
//! [llm]
//! endpoint = "http://localhost:11434"
//! model = "llama3.1"
//! max_retries = 3
//! ```
//!
//! Every section and key is optional; a missing file means defaults.

use crate::error::{CliError, Result};
use itinera_extractor::ExtractorConfig;
use itinera_llm::ollama::{DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_MODEL};
use itinera_parser::ParserConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Heuristic parser settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// LLM extractor settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Where and how to reach the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Ollama endpoint
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Attempts per call, at least 1
    pub max_retries: u32,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON record
    Json,
    /// Summary and day tables
    Table,
    /// Plain-text document
    Text,
    /// Slug only
    Quiet,
}

impl Config {
    /// Default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".itinera").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.parser
            .validate()
            .map_err(|e| CliError::Config(format!("[parser] {}", e)))?;
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        if self.llm.endpoint.trim().is_empty() {
            return Err(CliError::Config("[llm] endpoint cannot be empty".into()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(CliError::Config("[llm] model cannot be empty".into()));
        }
        if self.llm.max_retries == 0 {
            return Err(CliError::Config("[llm] max_retries must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Json,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}
