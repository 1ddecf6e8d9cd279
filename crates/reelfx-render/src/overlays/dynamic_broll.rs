use reelfx_core::{spring, stable_hash, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::prop_or;
use crate::envelope::{fade_out, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent};

const ENTRY: SpringConfig = SpringConfig::new(12.0, 80.0, 0.8);
const EXIT_FRAMES: f64 = 10.0;

/// Procedural full-frame backdrop that stands in for the camera shot.
///
/// Colors and gradient angle are derived from the keywords and segment text,
/// so each segment gets its own palette and re-renders identically.
pub struct DynamicBroll;

impl OverlayRenderer for DynamicBroll {
    fn name(&self) -> &str {
        "Dynamic B-Roll"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::DynamicBroll]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let keywords = prop_or(overlay, "keywords", "");
        let seed = stable_hash(&format!("{keywords}{}", ctx.text));
        let hue = seed % 360;

        let content = VisualContent::Backdrop {
            hue,
            hue2: (hue + 40 + seed % 50) % 360,
            angle: 130 + seed % 60,
            color: prop_or(overlay, "color", "#8b5cf6").to_string(),
            keywords: keywords
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect(),
        };
        let enter = spring(f, ctx.fps, ENTRY);
        Some(
            Visual::new(OverlayKind::DynamicBroll, content)
                .with_opacity(visible_opacity(enter, fade_out(f, ctx.duration(), EXIT_FRAMES))),
        )
    }
}
