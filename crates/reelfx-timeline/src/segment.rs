//! Transcript segments and the overlays assigned to them.

use reelfx_core::{FrameRate, FrameWindow, ReelError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Free-form overlay properties, keyed by camelCase prop name.
pub type OverlayProps = Map<String, Value>;

// ── Overlay kinds ───────────────────────────────────────────────

/// Every visual effect family an overlay can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayKind {
    AnimatedSubtitles,
    LowerThird,
    HighlightBox,
    EmojiReaction,
    ZoomEffect,
    SceneTransition,
    GlowingParticles,
    KineticText,
    VisualIllustration,
    BrollVideo,
    GifReaction,
    ImageCard,
    AiGeneratedImage,
    TranscriptMotion,
    DynamicBroll,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 15] = [
        OverlayKind::AnimatedSubtitles,
        OverlayKind::LowerThird,
        OverlayKind::HighlightBox,
        OverlayKind::EmojiReaction,
        OverlayKind::ZoomEffect,
        OverlayKind::SceneTransition,
        OverlayKind::GlowingParticles,
        OverlayKind::KineticText,
        OverlayKind::VisualIllustration,
        OverlayKind::BrollVideo,
        OverlayKind::GifReaction,
        OverlayKind::ImageCard,
        OverlayKind::AiGeneratedImage,
        OverlayKind::TranscriptMotion,
        OverlayKind::DynamicBroll,
    ];

    /// Wire name, e.g. `"visual-illustration"`.
    pub fn as_str(self) -> &'static str {
        match self {
            OverlayKind::AnimatedSubtitles => "animated-subtitles",
            OverlayKind::LowerThird => "lower-third",
            OverlayKind::HighlightBox => "highlight-box",
            OverlayKind::EmojiReaction => "emoji-reaction",
            OverlayKind::ZoomEffect => "zoom-effect",
            OverlayKind::SceneTransition => "scene-transition",
            OverlayKind::GlowingParticles => "glowing-particles",
            OverlayKind::KineticText => "kinetic-text",
            OverlayKind::VisualIllustration => "visual-illustration",
            OverlayKind::BrollVideo => "broll-video",
            OverlayKind::GifReaction => "gif-reaction",
            OverlayKind::ImageCard => "image-card",
            OverlayKind::AiGeneratedImage => "ai-generated-image",
            OverlayKind::TranscriptMotion => "transcript-motion",
            OverlayKind::DynamicBroll => "dynamic-broll",
        }
    }

    /// Human-readable template name.
    pub fn display_name(self) -> &'static str {
        match self {
            OverlayKind::AnimatedSubtitles => "Animated Subtitles",
            OverlayKind::LowerThird => "Lower Third",
            OverlayKind::HighlightBox => "Highlight Box",
            OverlayKind::EmojiReaction => "Emoji Reaction",
            OverlayKind::ZoomEffect => "Zoom Emphasis",
            OverlayKind::SceneTransition => "Scene Transition",
            OverlayKind::GlowingParticles => "Particles",
            OverlayKind::KineticText => "Kinetic Text",
            OverlayKind::VisualIllustration => "Visual Illustration",
            OverlayKind::BrollVideo => "B-Roll Video",
            OverlayKind::GifReaction => "GIF Reaction",
            OverlayKind::ImageCard => "Image Card",
            OverlayKind::AiGeneratedImage => "AI Generated Image",
            OverlayKind::TranscriptMotion => "Transcript Motion",
            OverlayKind::DynamicBroll => "Dynamic B-Roll",
        }
    }

    /// Template props a freshly inserted overlay of this kind starts with.
    pub fn default_props(self) -> OverlayProps {
        let value = match self {
            OverlayKind::AnimatedSubtitles => json!({
                "color": "#ffffff",
                "highlightColor": "#6366f1",
                "fontSize": 42,
                "position": "bottom",
            }),
            OverlayKind::LowerThird => {
                json!({ "name": "Your Name", "title": "Title", "color": "#6366f1" })
            }
            OverlayKind::HighlightBox => json!({ "color": "#f59e0b", "style": "glow" }),
            OverlayKind::EmojiReaction => json!({ "emoji": "🔥", "size": 80 }),
            OverlayKind::ZoomEffect => json!({ "scale": 1.3 }),
            OverlayKind::SceneTransition => json!({ "style": "fade", "color": "#6366f1" }),
            OverlayKind::GlowingParticles => {
                json!({ "color": "#6366f1", "count": 20, "style": "ambient" })
            }
            OverlayKind::KineticText => {
                json!({ "color": "#6366f1", "style": "pop", "position": "center" })
            }
            OverlayKind::VisualIllustration => json!({
                "scene": "solar-system",
                "label": "",
                "color": "#6366f1",
                "displayMode": "overlay",
                "transition": "fade-in",
                "soundEffect": "none",
            }),
            OverlayKind::BrollVideo => json!({ "url": "", "keyword": "", "style": "split-screen" }),
            OverlayKind::GifReaction => json!({ "url": "", "keyword": "", "size": "medium" }),
            OverlayKind::ImageCard => json!({
                "imageUrl": "",
                "keyword": "",
                "label": "",
                "displayMode": "card",
                "position": "center",
                "transition": "slide-in",
                "cardStyle": "glass",
            }),
            OverlayKind::AiGeneratedImage => json!({
                "imagePrompt": "",
                "imageUrl": "",
                "displayMode": "full",
                "transition": "fade-in",
                "style": "cinematic",
            }),
            OverlayKind::TranscriptMotion => {
                json!({ "color": "#6366f1", "style": "karaoke", "position": "bottom" })
            }
            OverlayKind::DynamicBroll => json!({ "color": "#8b5cf6", "style": "abstract" }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    /// Whether this kind hides the base video for its whole window.
    pub fn is_full_scene_replacement(self) -> bool {
        matches!(self, OverlayKind::DynamicBroll)
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayKind {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self> {
        OverlayKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ReelError::InvalidParameter(format!("unknown overlay type: {s}")))
    }
}

// ── Overlay assignment ──────────────────────────────────────────

/// An effect attached to a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayAssignment {
    #[serde(rename = "type")]
    pub kind: OverlayKind,
    #[serde(default)]
    pub props: OverlayProps,
}

impl OverlayAssignment {
    pub fn new(kind: OverlayKind, props: OverlayProps) -> Self {
        Self { kind, props }
    }

    /// Overlay carrying the kind's template props.
    pub fn with_defaults(kind: OverlayKind) -> Self {
        Self::new(kind, kind.default_props())
    }

    /// Set a prop, builder style.
    pub fn with_prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// String prop, treating empty strings as absent.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn prop_f64(&self, key: &str) -> Option<f64> {
        self.props.get(key).and_then(Value::as_f64)
    }
}

// ── Segment ─────────────────────────────────────────────────────

/// A timestamped transcript unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayAssignment>,
}

impl Segment {
    pub fn new(
        id: impl Into<String>,
        start_time: f64,
        end_time: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            text: text.into(),
            overlay: None,
        }
    }

    pub fn with_overlay(mut self, overlay: OverlayAssignment) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Check the `start < end` invariant.
    pub fn validate(&self) -> Result<()> {
        let finite = self.start_time.is_finite() && self.end_time.is_finite();
        if finite && self.start_time < self.end_time {
            Ok(())
        } else {
            Err(ReelError::InvalidSegment {
                id: self.id.clone(),
                start: self.start_time,
                end: self.end_time,
            })
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Half-open containment test used for playhead lookup.
    pub fn contains_time(&self, seconds: f64) -> bool {
        seconds >= self.start_time && seconds < self.end_time
    }

    /// Visible frame window of this segment's overlay.
    pub fn window(&self, rate: FrameRate) -> FrameWindow {
        FrameWindow::from_seconds(self.start_time, self.end_time, rate)
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }
}

/// Look up a segment by id.
pub fn find_segment<'a>(segments: &'a [Segment], id: &str) -> Option<&'a Segment> {
    segments.iter().find(|s| s.id == id)
}

/// Validate every segment and check ids are unique.
pub fn validate_segments(segments: &[Segment]) -> Result<()> {
    let mut seen = std::collections::HashSet::with_capacity(segments.len());
    for segment in segments {
        segment.validate()?;
        if !seen.insert(segment.id.as_str()) {
            return Err(ReelError::InvalidParameter(format!(
                "duplicate segment id: {}",
                segment.id
            )));
        }
    }
    Ok(())
}
