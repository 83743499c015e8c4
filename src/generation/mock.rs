//! Deterministic mock provider.
//!
//! Selected explicitly by configuration when no hosted service is
//! available. Results are stable for a given request, which keeps the
//! rest of the pipeline testable without network access.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use tracing::debug;

use crate::error::GenerationError;
use crate::generation::provider::{
    GeneratedTrack, GenerationOptions, GenerationRequest, MusicProvider,
};

/// Placeholder provider producing stable `mock://` URLs.
#[derive(Debug, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    fn track_digest(request: &GenerationRequest) -> u64 {
        let mut hasher = DefaultHasher::new();
        request.prompt.hash(&mut hasher);
        request.duration_secs.to_bits().hash(&mut hasher);
        request.temperature.to_bits().hash(&mut hasher);
        request.seed.hash(&mut hasher);
        hasher.finish()
    }
}

#[async_trait]
impl MusicProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "placeholder-v0"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        _options: &GenerationOptions,
    ) -> Result<GeneratedTrack, GenerationError> {
        request.validate()?;

        let digest = Self::track_digest(request);
        debug!(digest = format!("{:016x}", digest), "Serving mock track");

        Ok(GeneratedTrack {
            audio_url: format!("mock://musegen/tracks/{:016x}.wav", digest),
            provider: self.name().to_string(),
            model: self.model().to_string(),
            duration_secs: request.duration_secs,
            seed: request.seed,
        })
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        Ok(())
    }
}
