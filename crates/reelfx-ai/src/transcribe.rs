//! Transcription boundary.
//!
//! Speech-to-text runs outside this crate. Its JSON result is parsed here
//! and resolved into the segments a project starts with, substituting a
//! locally generated placeholder transcript when transcription failed.

use reelfx_timeline::{Segment, TranscriptStatus};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AiResult;
use crate::parse::extract_json_object;

/// Error code a transcriber reports for media without an audio track.
pub const NO_AUDIO_ERROR: &str = "no_audio_stream";

/// Sentences cycled through by the placeholder transcript.
const MOCK_SENTENCES: [&str; 16] = [
    "Hey everyone, welcome back to another video",
    "Today we're going to talk about something really exciting",
    "I've been working on this project for a while now",
    "And I'm finally ready to share the results with you",
    "Let me show you how it works step by step",
    "First, you need to set up the basic structure",
    "Then we add the core functionality piece by piece",
    "This is where it gets really interesting",
    "Watch how everything comes together seamlessly",
    "The key insight here is to keep things simple",
    "Don't overcomplicate the process at the start",
    "Focus on getting the fundamentals right first",
    "Once you have that foundation, you can build on top",
    "Let me know in the comments what you think",
    "Don't forget to like and subscribe for more content",
    "Thanks for watching, see you in the next one",
];

/// Raw output of a transcription run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResult {
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, alias = "avg_confidence", skip_serializing_if = "Option::is_none")]
    pub avg_confidence: Option<f64>,
}

impl TranscriptionResult {
    /// Parse transcriber output, ignoring any log noise around the JSON object.
    pub fn from_json(output: &str) -> AiResult<Self> {
        let json = extract_json_object(output).unwrap_or(output);
        Ok(serde_json::from_str(json)?)
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_no_audio(&self) -> bool {
        self.error.as_deref() == Some(NO_AUDIO_ERROR)
    }
}

/// Segments a project starts with, and how they were obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTranscript {
    pub segments: Vec<Segment>,
    pub status: TranscriptStatus,
    pub language: Option<String>,
    /// Message suitable for a soft warning.
    pub notice: Option<String>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Placeholder transcript spread evenly over `duration` seconds.
///
/// Segments are at least two seconds long, at most sixteen of them, with
/// times rounded to hundredths.
pub fn mock_transcript(duration: f64) -> Vec<Segment> {
    if !duration.is_finite() || duration <= 0.0 {
        return Vec::new();
    }
    let sentences = MOCK_SENTENCES.len();
    let slots = ((duration / 3.0).ceil() as usize).clamp(1, sentences);
    let segment_duration = (duration / slots as f64).max(2.0);
    let count = ((duration / segment_duration).ceil() as usize).min(sentences);

    (0..count)
        .map(|i| {
            let start = i as f64 * segment_duration;
            let end = (start + segment_duration).min(duration);
            Segment::new(
                format!("seg-{i}"),
                round2(start),
                round2(end),
                MOCK_SENTENCES[i % sentences],
            )
        })
        .collect()
}

/// Turn a transcription outcome into project segments.
///
/// - no audio track: empty segments, `mock-no-audio`
/// - any other failure: placeholder transcript, `mock-error`
/// - success without usable segments: placeholder transcript, `mock-empty`
/// - success: the provider's segments, `real`
pub fn resolve_transcript(
    result: AiResult<TranscriptionResult>,
    duration: f64,
) -> ResolvedTranscript {
    let result = match result {
        Ok(result) => result,
        Err(e) => TranscriptionResult::failed(e.to_string()),
    };

    if result.is_no_audio() {
        warn!("media has no audio track");
        return ResolvedTranscript {
            segments: Vec::new(),
            status: TranscriptStatus::MockNoAudio,
            language: None,
            notice: Some(
                result
                    .message
                    .unwrap_or_else(|| "This video has no audio track.".to_string()),
            ),
        };
    }

    if let Some(error) = result.error {
        warn!(%error, "transcription failed, using placeholder transcript");
        return ResolvedTranscript {
            segments: mock_transcript(duration),
            status: TranscriptStatus::MockError,
            language: None,
            notice: Some(error),
        };
    }

    let total = result.segments.len();
    let segments: Vec<Segment> = result
        .segments
        .into_iter()
        .filter(|s| s.validate().is_ok() && !s.text.trim().is_empty())
        .collect();
    if segments.len() < total {
        warn!(dropped = total - segments.len(), "dropped invalid transcript segments");
    }

    if segments.is_empty() {
        warn!("no speech detected, using placeholder transcript");
        return ResolvedTranscript {
            segments: mock_transcript(duration),
            status: TranscriptStatus::MockEmpty,
            language: result.language,
            notice: Some("No speech detected.".to_string()),
        };
    }

    info!(segments = segments.len(), language = ?result.language, "transcript ready");
    ResolvedTranscript {
        segments,
        status: TranscriptStatus::Real,
        language: result.language,
        notice: None,
    }
}
