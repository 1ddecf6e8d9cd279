//! Per-frame compositor: collects the visible overlays for a playhead
//! position and decides whether the base video shows through.
//!
//! Layers are stacked bottom to top in segment order, so when two windows
//! overlap the later segment draws on top. The base video is hidden while
//! any visible layer is a full-scene replacement.

use reelfx_core::FrameRate;
use reelfx_timeline::Segment;
use serde::Serialize;
use tracing::trace;

use crate::renderer::{render_segment, RendererRegistry};
use crate::visual::Visual;

/// Configuration for the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompositorConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// One overlay in the stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeLayer {
    pub segment_id: String,
    pub visual: Visual,
}

/// Everything drawn at one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeFrame {
    pub frame: i64,
    pub width: u32,
    pub height: u32,
    /// Whether the base video is drawn under the layers.
    pub show_base_video: bool,
    /// Bottom to top.
    pub layers: Vec<CompositeLayer>,
}

impl CompositeFrame {
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Topmost layer, if any.
    pub fn top(&self) -> Option<&CompositeLayer> {
        self.layers.last()
    }
}

/// Compose every segment overlay visible at `frame`.
pub fn compose_frame(
    segments: &[Segment],
    rate: FrameRate,
    frame: i64,
    registry: &RendererRegistry,
    config: &CompositorConfig,
) -> CompositeFrame {
    let layers: Vec<CompositeLayer> = segments
        .iter()
        .filter_map(|segment| {
            render_segment(registry, segment, rate, frame).map(|visual| CompositeLayer {
                segment_id: segment.id.clone(),
                visual,
            })
        })
        .collect();

    let show_base_video = !layers.iter().any(|l| l.visual.replaces_base_video);
    trace!(frame, layers = layers.len(), show_base_video, "composed frame");

    CompositeFrame {
        frame,
        width: config.width,
        height: config.height,
        show_base_video,
        layers,
    }
}
