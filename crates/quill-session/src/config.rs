#![forbid(unsafe_code)]

//! Policy-as-data configuration for the session runtime.
//!
//! Captures every tunable parameter of the session stack as a single
//! [`SessionConfig`] that can be loaded from TOML or JSON at startup,
//! removing the need for compile-time constant changes.
//!
//! # Loading
//!
//! ```toml
//! # quill.toml
//! [provider]
//! provider = "anthropic"
//! api_key = "sk-..."
//!
//! [history]
//! max_depth = 100
//! debounce_ms = 500
//! ```
//!
//! ```rust,ignore
//! let config = SessionConfig::from_toml_file("quill.toml")?;
//! let config = SessionConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field has a default that exactly matches the hardcoded values
//! in each component, so `SessionConfig::default()` produces the same
//! behavior as an unconfigured session.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::history::HistoryConfig;
use crate::pipeline::PipelineConfig;

// ---------------------------------------------------------------------------
// Top-level SessionConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for the session runtime.
///
/// Groups every tunable parameter into a single struct that can be
/// loaded from TOML or JSON. All fields default to the values hardcoded
/// in the individual config structs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Transform provider parameters.
    pub provider: ProviderPolicy,

    /// Undo/redo history parameters.
    pub history: HistoryPolicy,

    /// Status lifecycle parameters.
    pub status: StatusPolicy,

    /// Target language for the translate action.
    pub translate_language: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            provider: ProviderPolicy::default(),
            history: HistoryPolicy::default(),
            status: StatusPolicy::default(),
            translate_language: "Spanish".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the
    /// config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.history.max_depth == 0 {
            errors.push("history.max_depth must be > 0".into());
        }

        // Temperature follows the provider API range.
        if self.provider.temperature < 0.0 || self.provider.temperature > 2.0 {
            errors.push(format!(
                "provider.temperature must be in [0, 2], got {}",
                self.provider.temperature
            ));
        }

        if self.provider.max_tokens == 0 {
            errors.push("provider.max_tokens must be > 0".into());
        }

        if let Some(model) = &self.provider.model
            && model.trim().is_empty()
        {
            errors.push("provider.model must not be blank when set".into());
        }

        if self.translate_language.trim().is_empty() {
            errors.push("translate_language must not be blank".into());
        }

        errors
    }

    /// Build a [`HistoryConfig`] from this policy.
    #[must_use]
    pub fn to_history_config(&self) -> HistoryConfig {
        HistoryConfig {
            max_depth: self.history.max_depth,
            debounce: Duration::from_millis(self.history.debounce_ms),
        }
    }

    /// Build a [`PipelineConfig`] from this policy.
    #[must_use]
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            success_hold: Duration::from_millis(self.status.success_hold_ms),
            failure_hold: Duration::from_millis(self.status.failure_hold_ms),
            translate_language: self.translate_language.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configs (flat, serde-friendly)
// ---------------------------------------------------------------------------

/// The transform providers the session can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI chat completions.
    OpenAi,
    /// Anthropic messages.
    Anthropic,
    /// Perplexity chat completions (OpenAI-compatible).
    Perplexity,
}

impl Provider {
    /// The model used when none is configured explicitly.
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Anthropic => "claude-3-haiku-20240307",
            Provider::Perplexity => "sonar",
        }
    }
}

/// Transform provider policy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderPolicy {
    /// Which provider to call. Default: anthropic.
    pub provider: Provider,
    /// Model override; `None` uses the provider default.
    pub model: Option<String>,
    /// API credential; `None` means transforms are rejected. Default: None.
    pub api_key: Option<String>,
    /// Sampling temperature. Default: 0.7.
    pub temperature: f64,
    /// Completion token cap. Default: 4096.
    pub max_tokens: u32,
}

impl ProviderPolicy {
    /// The model to request, honoring the override.
    #[must_use]
    pub fn resolved_model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }
}

impl Default for ProviderPolicy {
    fn default() -> Self {
        Self {
            provider: Provider::Anthropic,
            model: None,
            api_key: None,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

/// Undo/redo history policy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryPolicy {
    /// Maximum retained snapshots. Default: 100.
    pub max_depth: usize,
    /// Minimum interval between accepted snapshots (ms). Default: 500.
    pub debounce_ms: u64,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self {
            max_depth: 100,
            debounce_ms: 500,
        }
    }
}

/// Status lifecycle policy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPolicy {
    /// How long Success status is held before auto-reset (ms). Default: 2000.
    pub success_hold_ms: u64,
    /// How long Failure status is held before auto-reset (ms). Default: 3000.
    pub failure_hold_ms: u64,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            success_hold_ms: 2000,
            failure_hold_ms: 3000,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
