use reelfx_core::{spring, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::prop_or;
use crate::envelope::{delayed_spring, exit_progress, lerp, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent};

const CARD: SpringConfig = SpringConfig::new(14.0, 160.0, 0.5);
const ACCENT: SpringConfig = SpringConfig::new(18.0, 90.0, 0.5);
const TEXT: SpringConfig = SpringConfig::new(14.0, 100.0, 1.0);

const EXIT_FRAMES: f64 = 18.0;

/// Callout card quoting the segment text.
pub struct HighlightBox;

impl OverlayRenderer for HighlightBox {
    fn name(&self) -> &str {
        "Highlight Box"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::HighlightBox]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let style = prop_or(overlay, "style", "glow");
        let card = spring(f, ctx.fps, CARD);
        let exit = exit_progress(f, ctx.duration(), EXIT_FRAMES);
        // solid cards come in from the left, the others from the right
        let from_x = if style == "solid" { -40.0 } else { 40.0 };

        let content = VisualContent::Highlight {
            text: ctx.text.to_string(),
            color: prop_or(overlay, "color", "#f59e0b").to_string(),
            style: style.to_string(),
            card,
            accent: delayed_spring(f, 3.0, ctx.fps, ACCENT),
            text_reveal: delayed_spring(f, 8.0, ctx.fps, TEXT),
        };
        Some(
            Visual::new(OverlayKind::HighlightBox, content)
                .with_opacity(visible_opacity(card, 1.0 - exit))
                .with_scale(lerp(exit, 1.0, 0.85))
                .with_offset(lerp(card.min(1.0), from_x, 0.0), lerp(exit, 0.0, 20.0)),
        )
    }
}
