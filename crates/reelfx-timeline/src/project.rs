//! Editable project state and project metadata.

use reelfx_core::FrameRate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::segment::Segment;

/// Color-grade sliders applied to the base video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoFilters {
    /// 0-200, default 100
    pub brightness: f64,
    /// 0-200, default 100
    pub contrast: f64,
    /// 0-200, default 100
    pub saturation: f64,
    /// 0-20, default 0
    pub blur: f64,
    /// 0-100, default 0
    pub vignette: f64,
    /// -50 to 50, default 0
    pub temperature: f64,
}

impl Default for VideoFilters {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            blur: 0.0,
            vignette: 0.0,
            temperature: 0.0,
        }
    }
}

impl VideoFilters {
    /// Clamp every slider into its supported range.
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.clamp(0.0, 200.0),
            contrast: self.contrast.clamp(0.0, 200.0),
            saturation: self.saturation.clamp(0.0, 200.0),
            blur: self.blur.clamp(0.0, 20.0),
            vignette: self.vignette.clamp(0.0, 100.0),
            temperature: self.temperature.clamp(-50.0, 50.0),
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// In/out trim points in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimPoints {
    pub in_point: f64,
    pub out_point: f64,
}

impl TrimPoints {
    pub fn new(in_point: f64, out_point: f64) -> Self {
        Self { in_point, out_point }
    }

    /// Full-length trim for a video of `duration` seconds.
    pub fn full(duration: f64) -> Self {
        Self::new(0.0, duration.max(0.0))
    }

    pub fn duration(&self) -> f64 {
        (self.out_point - self.in_point).max(0.0)
    }
}

/// Free text placed on the frame by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub id: String,
    pub text: String,
    /// Horizontal position, 0-100 percent.
    pub x: f64,
    /// Vertical position, 0-100 percent.
    pub y: f64,
    pub font_size: f64,
    pub color: String,
    pub font_weight: u32,
    pub start_time: f64,
    pub end_time: f64,
}

impl TextOverlay {
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            id: format!("text_{}", Uuid::new_v4().simple()),
            text: text.into(),
            x: 50.0,
            y: 50.0,
            font_size: 48.0,
            color: "#ffffff".to_string(),
            font_weight: 700,
            start_time,
            end_time,
        }
    }
}

/// Where the transcript of a project came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranscriptStatus {
    /// No transcript yet
    #[default]
    None,
    Transcribing,
    /// Real audio-to-text transcript
    Real,
    /// Placeholder: the video has no audio track
    MockNoAudio,
    /// Placeholder: transcription failed
    MockError,
    /// Placeholder: no speech detected
    MockEmpty,
}

impl TranscriptStatus {
    pub fn is_mock(self) -> bool {
        matches!(
            self,
            TranscriptStatus::MockNoAudio
                | TranscriptStatus::MockError
                | TranscriptStatus::MockEmpty
        )
    }
}

/// The editable, undoable part of a project.
///
/// Treated as an immutable value: every edit produces a new `EditState`
/// through the reducers in [`crate::edit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditState {
    #[serde(alias = "subtitles")]
    pub segments: Vec<Segment>,
    pub filters: VideoFilters,
    pub trim_points: TrimPoints,
    pub text_overlays: Vec<TextOverlay>,
    pub playback_speed: f64,
    pub fps: u32,
}

impl Default for EditState {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            filters: VideoFilters::default(),
            trim_points: TrimPoints::default(),
            text_overlays: Vec::new(),
            playback_speed: 1.0,
            fps: 30,
        }
    }
}

impl EditState {
    /// State for a freshly loaded video of `duration` seconds.
    pub fn new(segments: Vec<Segment>, duration: f64, fps: u32) -> Self {
        Self {
            segments,
            trim_points: TrimPoints::full(duration),
            fps,
            ..Self::default()
        }
    }

    pub fn frame_rate(&self) -> FrameRate {
        FrameRate::from_fps(self.fps.max(1))
    }

    pub fn overlay_count(&self) -> usize {
        self.segments.iter().filter(|s| s.has_overlay()).count()
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }
}

/// Reference to the source video; the bytes themselves live elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRef {
    pub name: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub duration: f64,
}

impl Default for VideoRef {
    fn default() -> Self {
        Self {
            name: String::new(),
            mime_type: "video/mp4".to_string(),
            width: 1920,
            height: 1080,
            duration: 0.0,
        }
    }
}

/// Summary shown in project listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    pub id: String,
    pub name: String,
    /// Unix milliseconds.
    pub created_at: u64,
    pub duration: f64,
    pub segment_count: usize,
    pub overlay_count: usize,
    pub transcript_status: TranscriptStatus,
}

impl ProjectMeta {
    pub fn new(name: impl Into<String>, created_at: u64) -> Self {
        Self {
            id: format!("proj_{}", Uuid::new_v4().simple()),
            name: name.into(),
            created_at,
            duration: 0.0,
            segment_count: 0,
            overlay_count: 0,
            transcript_status: TranscriptStatus::None,
        }
    }

    /// Refresh the derived counters from `state`.
    pub fn refresh(&mut self, state: &EditState) {
        self.segment_count = state.segments.len();
        self.overlay_count = state.overlay_count();
    }
}
