//! Music provider trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::GenerationError;

/// A text-to-music generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Prompt text describing the desired music
    pub prompt: String,
    /// Requested track length in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f32,
    /// Sampling temperature (0.0 = deterministic, higher = more varied)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Optional seed for reproducible generation
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_duration_secs() -> f32 {
    30.0
}

fn default_temperature() -> f32 {
    1.0
}

impl GenerationRequest {
    /// Validate request parameters before they reach a provider.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.prompt.trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }
        if !(self.duration_secs > 0.0) {
            return Err(GenerationError::InvalidRequest(format!(
                "duration must be positive (got {})",
                self.duration_secs
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(GenerationError::InvalidRequest(format!(
                "temperature must be in [0, 2] (got {})",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Options for a generation request.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
        }
    }
}

/// A finished generation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTrack {
    /// Playable audio URL
    pub audio_url: String,
    /// Provider that produced the track
    pub provider: String,
    /// Model that produced the track
    pub model: String,
    /// Track length in seconds
    pub duration_secs: f32,
    /// Seed the track was generated with, when known
    pub seed: Option<u64>,
}

/// Trait for music generation providers.
///
/// Implementations connect to different backends (hosted text-to-music
/// services, the deterministic mock) while providing a unified interface.
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Get the provider's name (e.g., "hosted", "mock").
    fn name(&self) -> &str;

    /// Get the model being used.
    fn model(&self) -> &str;

    /// Generate a track from a prompt.
    ///
    /// # Arguments
    /// * `request` - Prompt and numeric generation parameters.
    /// * `options` - Transport options (timeout).
    async fn generate(
        &self,
        request: &GenerationRequest,
        options: &GenerationOptions,
    ) -> Result<GeneratedTrack, GenerationError>;

    /// Check if the provider is healthy and reachable.
    async fn health_check(&self) -> Result<(), GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str, duration_secs: f32, temperature: f32) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.to_string(),
            duration_secs,
            temperature,
            seed: None,
        }
    }

    #[test]
    fn test_validate_accepts_reasonable_request() {
        assert!(request("calm piano", 30.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_prompt() {
        assert!(request("   ", 30.0, 1.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        assert!(request("x", 0.0, 1.0).validate().is_err());
        assert!(request("x", -5.0, 1.0).validate().is_err());
        assert!(request("x", 30.0, 3.0).validate().is_err());
        assert!(request("x", f32::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"prompt": "lo-fi beat"}"#).unwrap();
        assert_eq!(request.duration_secs, 30.0);
        assert_eq!(request.temperature, 1.0);
        assert_eq!(request.seed, None);
    }
}
