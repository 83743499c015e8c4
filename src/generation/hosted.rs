//! Hosted text-to-music provider implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerationError;
use crate::generation::provider::{
    GeneratedTrack, GenerationOptions, GenerationRequest, MusicProvider,
};

/// Hosted generation provider.
///
/// Connects to a text-to-music service over HTTP and uses its
/// `/v1/generate` endpoint, authenticating with a bearer token.
pub struct HostedProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HostedProvider {
    /// Create a new hosted provider.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the service (e.g., "https://api.musicgen.example").
    /// * `api_key` - Bearer token for authentication.
    /// * `model` - Model to request (e.g., "musicgen-large").
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl MusicProvider for HostedProvider {
    fn name(&self) -> &str {
        "hosted"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        options: &GenerationOptions,
    ) -> Result<GeneratedTrack, GenerationError> {
        let url = format!("{}/v1/generate", self.base_url);

        let body = HostedGenerateRequest {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            duration_secs: request.duration_secs,
            temperature: request.temperature,
            seed: request.seed,
        };

        debug!(
            model = %self.model,
            duration_secs = request.duration_secs,
            has_seed = request.seed.is_some(),
            "Sending generation request to hosted service"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let hosted: HostedGenerateResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("failed to parse generation response: {}", e))
        })?;

        debug!(audio_url = %hosted.audio_url, "Received generated track");

        Ok(GeneratedTrack {
            audio_url: hosted.audio_url,
            provider: self.name().to_string(),
            model: self.model.clone(),
            duration_secs: hosted.duration_secs.unwrap_or(request.duration_secs),
            seed: hosted.seed.or(request.seed),
        })
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        let url = format!("{}/v1/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Connection(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GenerationError::Api {
                status: response.status().as_u16(),
                message: "Health check failed".to_string(),
            });
        }

        Ok(())
    }
}

// Hosted service API types

#[derive(Debug, Serialize)]
struct HostedGenerateRequest {
    model: String,
    prompt: String,
    duration_secs: f32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct HostedGenerateResponse {
    audio_url: String,
    #[serde(default)]
    duration_secs: Option<f32>,
    #[serde(default)]
    seed: Option<u64>,
}
