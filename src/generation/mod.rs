// Generation module - text-to-music provider boundary
//
// The analysis core never calls a provider; the application pipes its
// feature report through prompt drafting and into a `MusicProvider`
// selected once at startup. Provider choice is an explicit configured
// variant, either the hosted HTTP client or the deterministic mock.

mod hosted;
mod mock;
pub mod prompt;
mod provider;

pub use hosted::HostedProvider;
pub use mock::MockProvider;
pub use provider::{GeneratedTrack, GenerationOptions, GenerationRequest, MusicProvider};

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::GenerationError;

/// Build the configured provider.
///
/// # Returns
/// * `Ok(provider)` - The hosted client or the mock, per configuration
/// * `Err(GenerationError::MissingApiKey)` - Hosted selected with no key
pub fn build_provider(
    config: &ProviderConfig,
) -> Result<Arc<dyn MusicProvider>, GenerationError> {
    match config.kind {
        ProviderKind::Mock => {
            info!("[Generation] Using mock provider");
            Ok(Arc::new(MockProvider::new()))
        }
        ProviderKind::Hosted => {
            let api_key = config
                .api_key
                .as_deref()
                .filter(|key| !key.is_empty())
                .ok_or(GenerationError::MissingApiKey)?;
            info!(
                base_url = %config.base_url,
                model = %config.model,
                "[Generation] Using hosted provider"
            );
            Ok(Arc::new(HostedProvider::new(
                config.base_url.clone(),
                api_key,
                config.model.clone(),
            )))
        }
    }
}

/// Transport options derived from provider configuration.
pub fn options_from_config(config: &ProviderConfig) -> GenerationOptions {
    GenerationOptions {
        timeout: Duration::from_secs(config.timeout_secs),
    }
}
