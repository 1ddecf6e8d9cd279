//! Renderer output: a drawable description of one overlay at one frame.

use reelfx_core::FrameWindow;
use reelfx_timeline::OverlayKind;
use serde::Serialize;

/// Everything a renderer may read besides the overlay props.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub window: FrameWindow,
    pub fps: f64,
    pub segment_id: &'a str,
    /// Transcript text of the owning segment.
    pub text: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(window: FrameWindow, fps: f64, segment_id: &'a str, text: &'a str) -> Self {
        Self {
            window,
            fps,
            segment_id,
            text,
        }
    }

    /// Frame offset into the window, or `None` when `frame` is outside it.
    pub fn local_frame(&self, frame: i64) -> Option<f64> {
        self.window
            .contains(frame)
            .then(|| self.window.local_frame(frame) as f64)
    }

    /// Window length in frames.
    pub fn duration(&self) -> f64 {
        self.window.duration() as f64
    }

    /// Key for seeding per-segment variation.
    pub fn seed_key(&self) -> String {
        format!("{}:{}", self.segment_id, self.text)
    }
}

/// One particle, positioned in percent of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub opacity: f64,
}

/// Reveal state of one animated word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordState {
    pub text: String,
    pub scale: f64,
    pub opacity: f64,
    /// The word currently being spoken.
    pub active: bool,
    /// Content word drawn with extra weight.
    pub emphasis: bool,
}

/// Kind-specific drawing data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VisualContent {
    Illustration {
        scene: String,
        label: String,
        color: String,
        display_mode: String,
        background_dim: f64,
    },
    Emoji {
        emoji: String,
        size: f64,
    },
    Particles {
        color: String,
        style: String,
        particles: Vec<Particle>,
    },
    LowerThird {
        name: String,
        title: String,
        color: String,
        bar: f64,
        panel: f64,
        name_reveal: f64,
        title_reveal: f64,
    },
    Highlight {
        text: String,
        color: String,
        style: String,
        card: f64,
        accent: f64,
        text_reveal: f64,
    },
    Zoom {
        scale: f64,
        border_opacity: f64,
    },
    Transition {
        style: String,
        color: String,
        /// Sweep position or zoom/flash intensity, depending on the style.
        progress: f64,
    },
    Words {
        color: String,
        style: String,
        words: Vec<WordState>,
    },
    Media {
        url: String,
        label: String,
        display_mode: String,
    },
    Backdrop {
        hue: u32,
        hue2: u32,
        angle: u32,
        color: String,
        keywords: Vec<String>,
    },
}

/// A sampled overlay, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visual {
    pub kind: OverlayKind,
    pub opacity: f64,
    pub scale: f64,
    /// Offset in pixels from the overlay's anchor.
    pub offset_x: f64,
    pub offset_y: f64,
    pub replaces_base_video: bool,
    pub content: VisualContent,
}

impl Visual {
    pub fn new(kind: OverlayKind, content: VisualContent) -> Self {
        Self {
            kind,
            opacity: 1.0,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            replaces_base_video: kind.is_full_scene_replacement(),
            content,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }
}
