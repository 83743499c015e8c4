//! Configuration management
//!
//! Runtime configuration loads from a JSON file with per-section
//! defaults, so the binary runs with no config present and partial
//! experiments only need the sections they touch. Provider selection is
//! an explicit variant here; there is no implicit fallback between
//! hosted and mock generation at request time.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Feature-extraction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Transform length for the spectral centroid
    pub centroid_frame_size: usize,
    /// Hop between centroid frames (overlap = frame − hop)
    pub centroid_hop_size: usize,
    /// Transform length for the coefficient vector
    pub coefficient_frame_size: usize,
    /// Hop accepted by the coefficient analyzer
    pub coefficient_hop_size: usize,
    /// Length of the coefficient vector
    pub coefficient_count: usize,
    /// Transform length for polyphony detection
    pub polyphony_frame_size: usize,
    /// Hop between polyphony frames
    pub polyphony_hop_size: usize,
    /// Fraction of the frame maximum a bin must exceed to be a peak
    pub peak_floor_ratio: f32,
    /// Peaks per frame above which the frame counts as polyphonic
    pub peak_count_threshold: usize,
    /// Fraction of polyphonic frames above which the signal is polyphonic
    pub polyphonic_fraction: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            centroid_frame_size: 2048,
            centroid_hop_size: 512,
            coefficient_frame_size: 1024,
            coefficient_hop_size: 512,
            coefficient_count: 13,
            polyphony_frame_size: 2048,
            polyphony_hop_size: 512,
            peak_floor_ratio: 0.1,
            peak_count_threshold: 3,
            polyphonic_fraction: 0.3,
        }
    }
}

/// Which generation backend to build at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Deterministic placeholder results, no configuration required
    Mock,
    /// Hosted text-to-music service reached over HTTP
    Hosted,
}

/// Generation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Base URL of the hosted service
    pub base_url: String,
    /// Model identifier sent with each request
    pub model: String,
    /// API key for the hosted service; required when kind = hosted
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Mock,
            base_url: "https://api.musicgen.example".to_string(),
            model: "musicgen-large".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, host:port
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration; if the file is missing or invalid, logs a
    /// warning and returns defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    tracing::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location.
    pub fn load() -> Self {
        Self::load_from_file("musegen.json")
    }
}
