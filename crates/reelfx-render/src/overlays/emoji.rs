use reelfx_core::{interpolate, spring, Extrapolate, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::{num_or, prop_or};
use crate::envelope::{fade_out, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent};

const POP: SpringConfig = SpringConfig::new(8.0, 200.0, 0.5);
const EXIT_FRAMES: f64 = 10.0;

/// Emoji that pops in, bobs, then fades after a couple of seconds.
pub struct EmojiReaction;

impl OverlayRenderer for EmojiReaction {
    fn name(&self) -> &str {
        "Emoji Reaction"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[OverlayKind::EmojiReaction]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let pop = spring(f, ctx.fps, POP);
        let float_y = (f * 0.08).sin() * 5.0;
        let shown =
            interpolate(f, &[0.0, 5.0, 40.0, 55.0], &[0.0, 1.0, 1.0, 0.0], Extrapolate::Clamp);

        let content = VisualContent::Emoji {
            emoji: prop_or(overlay, "emoji", "🔥").to_string(),
            size: num_or(overlay, "size", 80.0),
        };
        Some(
            Visual::new(OverlayKind::EmojiReaction, content)
                .with_opacity(visible_opacity(shown, fade_out(f, ctx.duration(), EXIT_FRAMES)))
                .with_scale(pop)
                .with_offset(0.0, float_y),
        )
    }
}
