use reelfx_core::{spring, SpringConfig};
use reelfx_timeline::{OverlayAssignment, OverlayKind};

use super::prop_or;
use crate::envelope::{fade_out, lerp, visible_opacity};
use crate::renderer::OverlayRenderer;
use crate::visual::{RenderContext, Visual, VisualContent};

const ENTRY: SpringConfig = SpringConfig::new(15.0, 80.0, 0.8);
const EXIT_FRAMES: f64 = 8.0;

/// Picture or clip shown in a floating card: stock b-roll, GIFs, image
/// cards and generated images.
pub struct MediaCard;

impl OverlayRenderer for MediaCard {
    fn name(&self) -> &str {
        "Media Card"
    }

    fn kinds(&self) -> &[OverlayKind] {
        &[
            OverlayKind::BrollVideo,
            OverlayKind::GifReaction,
            OverlayKind::ImageCard,
            OverlayKind::AiGeneratedImage,
        ]
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        overlay: &OverlayAssignment,
        frame: i64,
    ) -> Option<Visual> {
        let f = ctx.local_frame(frame)?;
        let entry = spring(f, ctx.fps, ENTRY);
        let float_y = (f / 20.0).sin() * 3.0;

        let (scale, offset_x) = match prop_or(overlay, "transition", "fade-in") {
            "slide-in" => (1.0, lerp(entry, 60.0, 0.0)),
            "zoom-in" => (lerp(entry, 0.3, 1.0), 0.0),
            _ => (1.0, 0.0),
        };

        let url = overlay
            .prop_str("imageUrl")
            .or_else(|| overlay.prop_str("url"))
            .unwrap_or_default();
        let label = ["label", "keyword", "imagePrompt"]
            .iter()
            .find_map(|key| overlay.prop_str(key))
            .unwrap_or_default();
        let content = VisualContent::Media {
            url: url.to_string(),
            label: label.to_string(),
            display_mode: prop_or(overlay, "displayMode", "card").to_string(),
        };
        Some(
            Visual::new(overlay.kind, content)
                .with_opacity(visible_opacity(entry, fade_out(f, ctx.duration(), EXIT_FRAMES)))
                .with_scale(scale)
                .with_offset(offset_x, float_y),
        )
    }
}
