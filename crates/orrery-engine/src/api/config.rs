use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::api::error::EngineError;
use crate::catalog::bodies::BodyDesc;
use crate::timeline::path::Pacing;

/// Configuration for the engine, provided by the host.
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock length of a full playback in seconds (default: 20).
    pub total_duration: f32,
    /// How elapsed time maps onto each body's path (default: time fraction).
    pub pacing: Pacing,
    /// Directory holding one ephemeris table per body.
    pub data_dir: Option<PathBuf>,
    /// File name pattern inside `data_dir`; `{id}` is replaced by the body id.
    pub file_template: String,
    /// Body list overriding the built-in solar system catalog.
    pub bodies: Option<Vec<BodyDesc>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_duration: 20.0,
            pacing: Pacing::default(),
            data_dir: None,
            file_template: "planet_{id}_positions.txt".to_string(),
            bodies: None,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        validate_duration(self.total_duration)
    }

    /// File name for a body's table, from `file_template`.
    pub fn file_name(&self, body_id: &str) -> String {
        self.file_template.replace("{id}", body_id)
    }
}

/// Durations must be positive and finite.
pub fn validate_duration(secs: f32) -> Result<(), EngineError> {
    if secs.is_finite() && secs > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidDuration(secs))
    }
}
