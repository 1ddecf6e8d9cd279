//! ReelFX - transcript-driven overlay tool
//!
//! Assigns overlays to transcripts, samples composed frames and produces
//! placeholder transcripts. Results go to stdout as JSON; logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reelfx_ai::images::DEFAULT_IMAGE_COUNT;
use reelfx_ai::{
    mock_transcript, resolve_transcript, search_images, EngineConfig, ImageSearch, OverlayEngine,
    PexelsSearch, TranscriptionResult,
};
use reelfx_core::FrameRate;
use reelfx_render::{compose_frame, CompositorConfig, RendererRegistry};
use reelfx_timeline::{validate_segments, ProjectFile, Segment};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reelfx")]
#[command(about = "Transcript-driven motion graphics overlays")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip remote providers and use local assignment only
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign overlays to every segment of a transcript
    Assign {
        /// Transcript JSON: a segment array or a transcription result
        transcript: PathBuf,
    },
    /// Suggest one overlay for a piece of text
    Suggest {
        #[arg(long)]
        text: String,
        /// What the overlay should show
        #[arg(long)]
        prompt: String,
    },
    /// Sample the composed overlays of a project at one frame
    Compose {
        /// Project file JSON
        project: PathBuf,
        #[arg(long)]
        frame: i64,
        /// Override the project frame rate
        #[arg(long)]
        fps: Option<u32>,
    },
    /// Turn transcriber output into project segments
    Transcript {
        /// Transcriber JSON output
        result: PathBuf,
        /// Media duration in seconds
        #[arg(long)]
        duration: f64,
    },
    /// Generate a placeholder transcript
    MockTranscript {
        /// Media duration in seconds
        #[arg(long)]
        duration: f64,
    },
    /// Find images for a media overlay
    Images {
        query: String,
        #[arg(long, default_value_t = DEFAULT_IMAGE_COUNT)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assign { transcript } => {
            let segments = load_segments(&transcript)?;
            let engine = build_engine(cli.config.as_deref(), cli.offline)?;
            let report = engine.assign_overlays_for_transcript(&segments).await;
            if report.degraded() {
                warn!("AI suggestions unavailable, used local assignment");
            }
            info!(
                overlays = report.overlay_count(),
                segments = report.segments.len(),
                "assignment complete"
            );
            print_json(&report)?;
        }

        Commands::Suggest { text, prompt } => {
            let engine = build_engine(cli.config.as_deref(), cli.offline)?;
            match engine.assign_overlay_for_prompt(&text, &prompt).await {
                Some(overlay) => print_json(&overlay)?,
                None => bail!("text and prompt must not be empty"),
            }
        }

        Commands::Compose { project, frame, fps } => {
            let data = std::fs::read(&project)
                .with_context(|| format!("reading {}", project.display()))?;
            let file = ProjectFile::from_json(&data)?;
            let rate = fps
                .map(|fps| FrameRate::from_fps(fps.max(1)))
                .unwrap_or_else(|| file.state.frame_rate());
            let config = CompositorConfig {
                width: file.video.width,
                height: file.video.height,
            };
            let registry = RendererRegistry::new();
            let composed = compose_frame(&file.state.segments, rate, frame, &registry, &config);
            info!(frame, layers = composed.layers.len(), "composed");
            print_json(&composed)?;
        }

        Commands::Transcript { result, duration } => {
            let output = std::fs::read_to_string(&result)
                .with_context(|| format!("reading {}", result.display()))?;
            let resolved = resolve_transcript(TranscriptionResult::from_json(&output), duration);
            if let Some(notice) = &resolved.notice {
                warn!(status = ?resolved.status, "{notice}");
            }
            print_json(&resolved)?;
        }

        Commands::MockTranscript { duration } => {
            if !duration.is_finite() || duration <= 0.0 {
                bail!("duration must be a positive number of seconds");
            }
            print_json(&mock_transcript(duration))?;
        }

        Commands::Images { query, count } => {
            let config = load_config(cli.config.as_deref())?;
            let pexels = if cli.offline {
                None
            } else {
                PexelsSearch::from_config(&config.images, config.request_timeout())?
            };
            let backend = pexels.as_ref().map(|p| p as &dyn ImageSearch);
            let results = search_images(backend, &query, count).await;
            info!(images = results.images.len(), source = ?results.source, "image search complete");
            print_json(&results)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok(config.resolve_keys())
}

fn build_engine(config: Option<&Path>, offline: bool) -> Result<OverlayEngine> {
    if offline {
        info!("offline mode, remote providers disabled");
        return Ok(OverlayEngine::offline());
    }
    let config = load_config(config)?;
    let engine = OverlayEngine::from_config(&config)?;
    info!(providers = ?engine.provider_names(), "engine ready");
    Ok(engine)
}

/// Read a transcript given either as a bare segment array or as transcriber output.
fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let segments: Vec<Segment> = if text.trim_start().starts_with('[') {
        serde_json::from_str(&text)?
    } else {
        TranscriptionResult::from_json(&text)?.segments
    };
    validate_segments(&segments)?;
    info!(path = %path.display(), segments = segments.len(), "loaded transcript");
    Ok(segments)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
