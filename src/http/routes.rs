use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tracing::info;

use crate::analysis::{FeatureExtractor, FeatureReport};
use crate::audio::{decode_wav_bytes, DecodeError};
use crate::error::{AnalysisError, GenerationError};
use crate::generation::{
    prompt::draft_prompt, GeneratedTrack, GenerationOptions, GenerationRequest, MusicProvider,
};

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct ApiState {
    pub provider: Arc<dyn MusicProvider>,
    pub extractor: Arc<FeatureExtractor>,
    pub options: GenerationOptions,
}

impl ApiState {
    pub fn new(
        provider: Arc<dyn MusicProvider>,
        extractor: FeatureExtractor,
        options: GenerationOptions,
    ) -> Self {
        Self {
            provider,
            extractor: Arc::new(extractor),
            options,
        }
    }
}

/// HTTP error variants mapped to JSON responses.
#[derive(Debug)]
pub enum HttpServerError {
    BadRequest(String),
    UpstreamFailed(String),
    UpstreamTimeout,
    Internal(String),
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::UpstreamFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "generation provider timed out".into(),
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<DecodeError> for HttpServerError {
    fn from(err: DecodeError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<AnalysisError> for HttpServerError {
    fn from(err: AnalysisError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<GenerationError> for HttpServerError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Timeout => Self::UpstreamTimeout,
            GenerationError::InvalidRequest(msg) => Self::BadRequest(msg),
            GenerationError::MissingApiKey => Self::Internal(err.to_string()),
            other => Self::UpstreamFailed(other.to_string()),
        }
    }
}

/// Health endpoint response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub model: String,
    pub version: &'static str,
}

/// Analyze endpoint response payload.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub report: FeatureReport,
    pub suggested_prompt: String,
}

/// Build the Axum router with all handlers.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/generate", post(generate))
        .with_state(state)
}

/// Run the HTTP server loop.
pub async fn run_http_server(state: ApiState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("binding HTTP listener")?;
    info!(%addr, "listening");
    let router = build_router(state);
    axum::serve(listener, router)
        .await
        .context("serving HTTP router")?;
    Ok(())
}

pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.provider.name().to_string(),
        model: state.provider.model().to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Decode an uploaded WAV body and return its feature report plus a
/// drafted generation prompt.
pub async fn analyze(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, HttpServerError> {
    if body.is_empty() {
        return Err(HttpServerError::BadRequest(
            "request body must contain WAV audio".to_string(),
        ));
    }

    let buffer = decode_wav_bytes(&body)?;
    let report = state.extractor.analyze(&buffer)?;
    let suggested_prompt = draft_prompt(&report);

    Ok(Json(AnalyzeResponse {
        report,
        suggested_prompt,
    }))
}

/// Forward a generation request to the configured provider.
pub async fn generate(
    State(state): State<ApiState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GeneratedTrack>, HttpServerError> {
    request.validate()?;
    let track = state.provider.generate(&request, &state.options).await?;
    Ok(Json(track))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{bin_frequency, SyntheticPattern};
    use crate::generation::MockProvider;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use serde_json::Value;
    use std::io::Cursor;
    use tower::ServiceExt;

    fn make_router() -> Router {
        let state = ApiState::new(
            Arc::new(MockProvider::new()),
            FeatureExtractor::default(),
            GenerationOptions::default(),
        );
        build_router(state)
    }

    async fn response_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body bytes");
        let json = serde_json::from_slice::<Value>(&bytes).expect("JSON body");
        (status, json)
    }

    fn sine_wav_bytes(frequency: f32, sample_rate: u32, duration_secs: f32) -> Vec<u8> {
        let buffer = SyntheticPattern::Sine {
            frequency_hz: frequency,
            amplitude: 0.5,
        }
        .render(sample_rate, duration_secs)
        .unwrap();

        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).expect("wav writer");
            for &sample in buffer.channel(0) {
                writer
                    .write_sample((sample * i16::MAX as f32) as i16)
                    .expect("write sample");
            }
            writer.finalize().expect("finalize wav");
        }
        cursor.into_inner()
    }

    #[tokio::test]
    async fn health_reports_provider() {
        let (status, json) = response_json(
            make_router()
                .oneshot(
                    Request::builder()
                        .uri("/health")
                        .body(Body::empty())
                        .expect("health request"),
                )
                .await
                .expect("health call"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["provider"], "mock");
    }

    #[tokio::test]
    async fn analyze_returns_report_and_prompt() {
        let frequency = bin_frequency(44100, 2048, 20);
        let wav = sine_wav_bytes(frequency, 44100, 1.0);

        let (status, json) = response_json(
            make_router()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/analyze")
                        .header("content-type", "audio/wav")
                        .body(Body::from(wav))
                        .expect("analyze request"),
                )
                .await
                .expect("analyze call"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let centroid = json["report"]["centroid_hz"].as_f64().expect("centroid");
        assert!(
            (centroid - frequency as f64).abs() < 5.0,
            "centroid {} should be near {}",
            centroid,
            frequency
        );
        assert_eq!(json["report"]["polyphonic"], false);
        assert_eq!(json["report"]["format"]["sample_rate"], 44100);
        assert!(json["suggested_prompt"].as_str().expect("prompt").len() > 10);
    }

    #[tokio::test]
    async fn analyze_rejects_garbage_body() {
        let (status, json) = response_json(
            make_router()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/analyze")
                        .body(Body::from("not audio at all"))
                        .expect("analyze request"),
                )
                .await
                .expect("analyze call"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().expect("error").contains("WAV"));
    }

    #[tokio::test]
    async fn analyze_rejects_empty_body() {
        let (status, _) = response_json(
            make_router()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/analyze")
                        .body(Body::empty())
                        .expect("analyze request"),
                )
                .await
                .expect("analyze call"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generate_returns_track() {
        let request = GenerationRequest {
            prompt: "a warm, mellow piece".to_string(),
            duration_secs: 20.0,
            temperature: 0.9,
            seed: Some(5),
        };

        let (status, json) = response_json(
            make_router()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/generate")
                        .header("content-type", "application/json")
                        .body(Body::from(serde_json::to_vec(&request).unwrap()))
                        .expect("generate request"),
                )
                .await
                .expect("generate call"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["audio_url"]
            .as_str()
            .expect("audio_url")
            .starts_with("mock://"));
        assert_eq!(json["provider"], "mock");
        assert_eq!(json["seed"], 5);
    }

    #[tokio::test]
    async fn generate_rejects_invalid_duration() {
        let (status, json) = response_json(
            make_router()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/generate")
                        .header("content-type", "application/json")
                        .body(Body::from(
                            r#"{"prompt": "x", "duration_secs": -2.0}"#,
                        ))
                        .expect("generate request"),
                )
                .await
                .expect("generate call"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().expect("error").contains("duration"));
    }
}
