use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use musegen::analysis::FeatureExtractor;
use musegen::audio::decode_wav_file;
use musegen::config::AppConfig;
use musegen::fixtures::SyntheticPattern;
use musegen::generation::{
    build_provider, options_from_config, prompt::draft_prompt, GenerationRequest,
};
use musegen::http::{run_http_server, ApiState};
use musegen::workflow::Session;

#[derive(Parser, Debug)]
#[command(
    name = "musegen",
    about = "Audio feature analysis and text-to-music generation front door"
)]
struct Cli {
    /// Path to JSON configuration file (defaults to musegen.json)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a WAV file or a synthetic fixture and print the report as JSON
    Analyze {
        /// WAV file to analyze
        #[arg(long, conflicts_with = "synthetic")]
        input: Option<PathBuf>,
        /// Synthetic pattern instead of a file: sine, square, noise, silence
        #[arg(long)]
        synthetic: Option<String>,
        /// Tone frequency for synthetic patterns (Hz)
        #[arg(long, default_value_t = 440.0)]
        frequency: f32,
        /// Sample rate for synthetic patterns (Hz)
        #[arg(long, default_value_t = 44100)]
        sample_rate: u32,
        /// Duration for synthetic patterns (seconds)
        #[arg(long, default_value_t = 1.0)]
        duration: f32,
        /// Write the JSON report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run a WAV file through the full workflow: analyze, draft a prompt,
    /// generate a track with the configured provider
    Generate {
        /// WAV file to analyze and remix
        #[arg(long)]
        input: PathBuf,
        /// Override the drafted prompt
        #[arg(long)]
        prompt: Option<String>,
        /// Requested track length in seconds
        #[arg(long, default_value_t = 30.0)]
        duration: f32,
        /// Sampling temperature
        #[arg(long, default_value_t = 1.0)]
        temperature: f32,
        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the HTTP API server
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);

    match cli.command {
        Commands::Analyze {
            input,
            synthetic,
            frequency,
            sample_rate,
            duration,
            output,
        } => run_analyze(
            &config, input, synthetic, frequency, sample_rate, duration, output,
        ),
        Commands::Generate {
            input,
            prompt,
            duration,
            temperature,
            seed,
        } => run_generate(&config, input, prompt, duration, temperature, seed),
        Commands::Serve { addr } => run_serve(&config, addr),
    }
}

fn run_analyze(
    config: &AppConfig,
    input: Option<PathBuf>,
    synthetic: Option<String>,
    frequency: f32,
    sample_rate: u32,
    duration: f32,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let buffer = match (&input, &synthetic) {
        (Some(path), None) => decode_wav_file(path)
            .with_context(|| format!("decoding {}", path.display()))?,
        (None, Some(name)) => parse_pattern(name, frequency)?
            .render(sample_rate, duration)
            .context("rendering synthetic fixture")?,
        _ => bail!("provide exactly one of --input or --synthetic"),
    };

    let extractor = FeatureExtractor::new(config.analysis.clone());
    let report = extractor.analyze(&buffer).context("analyzing audio")?;
    let prompt = draft_prompt(&report);

    let payload = serde_json::json!({
        "report": report,
        "suggested_prompt": prompt,
    });
    let rendered = serde_json::to_string_pretty(&payload)?;

    match output {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(ExitCode::from(0))
}

fn run_generate(
    config: &AppConfig,
    input: PathBuf,
    prompt_override: Option<String>,
    duration: f32,
    temperature: f32,
    seed: Option<u64>,
) -> Result<ExitCode> {
    let provider = build_provider(&config.provider).context("building provider")?;
    let options = options_from_config(&config.provider);
    let extractor = FeatureExtractor::new(config.analysis.clone());

    // Drive the full wizard: upload, analysis, generation, done
    let mut session = Session::new();
    let buffer =
        decode_wav_file(&input).with_context(|| format!("decoding {}", input.display()))?;
    session.attach_audio(buffer)?;

    let report = extractor
        .analyze(session.buffer().context("session has no audio")?)
        .context("analyzing audio")?;
    let drafted = prompt_override.unwrap_or_else(|| draft_prompt(&report));
    session.attach_report(report, drafted.clone())?;

    let request = GenerationRequest {
        prompt: drafted,
        duration_secs: duration,
        temperature,
        seed,
    };

    let runtime = tokio::runtime::Runtime::new().context("building async runtime")?;
    let track = runtime
        .block_on(provider.generate(&request, &options))
        .context("generating track")?;
    session.attach_track(track)?;

    let finished = session.track().context("session has no track")?;
    println!("{}", serde_json::to_string_pretty(finished)?);

    Ok(ExitCode::from(0))
}

fn run_serve(config: &AppConfig, addr_override: Option<SocketAddr>) -> Result<ExitCode> {
    let addr = match addr_override {
        Some(addr) => addr,
        None => config
            .server
            .bind_addr
            .parse()
            .with_context(|| format!("parsing bind address {}", config.server.bind_addr))?,
    };

    let provider = build_provider(&config.provider).context("building provider")?;
    let state = ApiState::new(
        provider,
        FeatureExtractor::new(config.analysis.clone()),
        options_from_config(&config.provider),
    );

    let runtime = tokio::runtime::Runtime::new().context("building async runtime")?;
    runtime.block_on(run_http_server(state, addr))?;

    Ok(ExitCode::from(0))
}

fn parse_pattern(name: &str, frequency: f32) -> Result<SyntheticPattern> {
    let pattern = match name {
        "sine" => SyntheticPattern::Sine {
            frequency_hz: frequency,
            amplitude: 0.5,
        },
        "square" => SyntheticPattern::Square {
            frequency_hz: frequency,
            amplitude: 0.5,
        },
        "noise" => SyntheticPattern::WhiteNoise {
            seed: 0,
            amplitude: 0.8,
        },
        "silence" => SyntheticPattern::Silence,
        other => bail!("unknown synthetic pattern '{other}' (expected sine, square, noise, or silence)"),
    };
    Ok(pattern)
}
